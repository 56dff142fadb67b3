use std::io;

use todo_core::TaskStore;

fn main() -> anyhow::Result<()> {
    let mut store = TaskStore::new();
    let stdin = io::stdin();
    let stdout = io::stdout();
    todo_console::run(&mut store, &mut stdin.lock(), &mut stdout.lock())?;
    Ok(())
}
