//! Interactive menu front end over a [`TaskStore`].
//!
//! The loop is generic over `BufRead`/`Write` so tests can drive the full
//! menu with scripted input.

use std::io::{self, BufRead, Write};

use todo_core::TaskStore;

/// Runs the menu loop until the user picks "Exit" or input ends.
pub fn run(
    store: &mut TaskStore,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<()> {
    writeln!(output, "Welcome to the To-Do App!")?;
    writeln!(output, "================================")?;

    loop {
        display_menu(output)?;
        let Some(choice) = read_line(input)? else {
            break;
        };
        match choice.parse::<u32>() {
            Ok(1) => add_task(store, input, output)?,
            Ok(2) => list_tasks(store, output)?,
            Ok(3) => update_task(store, input, output)?,
            Ok(4) => delete_task(store, input, output)?,
            Ok(5) => mark_task_completed(store, input, output)?,
            Ok(6) => break,
            Ok(_) => writeln!(
                output,
                "Invalid option. Please choose a number between 1 and 6."
            )?,
            Err(_) => writeln!(
                output,
                "Invalid input. Please enter a number between 1 and 6."
            )?,
        }
    }

    writeln!(output, "Exiting the application. Goodbye!")?;
    Ok(())
}

fn display_menu(output: &mut impl Write) -> io::Result<()> {
    writeln!(output)?;
    writeln!(output, "Choose an option:")?;
    writeln!(output, "1. Add Task")?;
    writeln!(output, "2. List Tasks")?;
    writeln!(output, "3. Update Task")?;
    writeln!(output, "4. Delete Task")?;
    writeln!(output, "5. Mark Task Completed")?;
    writeln!(output, "6. Exit")?;
    prompt(output, "> ")
}

/// Reads one line, trimmed. Returns `None` once input is exhausted.
fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn prompt(output: &mut impl Write, text: &str) -> io::Result<()> {
    write!(output, "{}", text)?;
    output.flush()
}

/// Prompts for a task ID and validates it is a positive number.
fn read_task_id(
    input: &mut impl BufRead,
    output: &mut impl Write,
    prompt_text: &str,
) -> io::Result<Option<u32>> {
    prompt(output, prompt_text)?;
    let Some(line) = read_line(input)? else {
        return Ok(None);
    };
    match line.parse::<i64>() {
        Ok(id) if id > 0 && id <= i64::from(u32::MAX) => Ok(Some(id as u32)),
        Ok(_) => {
            writeln!(output, "Task ID must be a positive number.")?;
            Ok(None)
        }
        Err(_) => {
            writeln!(
                output,
                "Invalid input. Please enter a valid task ID (positive number)."
            )?;
            Ok(None)
        }
    }
}

fn add_task(
    store: &mut TaskStore,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<()> {
    prompt(output, "Enter task description: ")?;
    let Some(description) = read_line(input)? else {
        return Ok(());
    };

    if description.is_empty() {
        writeln!(output, "Task description cannot be empty. Please try again.")?;
        return Ok(());
    }

    match store.add(&description) {
        Ok(id) => writeln!(output, "Task added with ID {}.", id)?,
        Err(err) => writeln!(output, "Error: {}", err)?,
    }
    Ok(())
}

fn list_tasks(store: &TaskStore, output: &mut impl Write) -> io::Result<()> {
    let tasks = store.all_tasks();
    if tasks.is_empty() {
        writeln!(output, "No tasks found. Add some tasks to get started!")?;
        return Ok(());
    }

    writeln!(output)?;
    writeln!(output, "--- Your Tasks ---")?;
    for task in &tasks {
        writeln!(output, "{}", task)?;
    }
    writeln!(output, "Total tasks: {}", tasks.len())?;
    Ok(())
}

fn update_task(
    store: &mut TaskStore,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<()> {
    if store.is_empty() {
        writeln!(output, "No tasks available to update.")?;
        return Ok(());
    }

    let Some(id) = read_task_id(input, output, "Enter task ID to update: ")? else {
        return Ok(());
    };
    let Some(task) = store.find_by_id(id) else {
        writeln!(output, "Task with ID {} not found.", id)?;
        return Ok(());
    };

    writeln!(output, "Current task: {}", task)?;
    writeln!(output, "What would you like to update?")?;
    writeln!(output, "1. Description")?;
    writeln!(output, "2. Status")?;
    prompt(output, "> ")?;

    let Some(choice) = read_line(input)? else {
        return Ok(());
    };
    match choice.parse::<u32>() {
        Ok(1) => update_task_description(store, input, output, id),
        Ok(2) => update_task_status(store, input, output, id),
        _ => writeln!(output, "Invalid option. Please choose 1 or 2."),
    }
}

fn update_task_description(
    store: &mut TaskStore,
    input: &mut impl BufRead,
    output: &mut impl Write,
    id: u32,
) -> io::Result<()> {
    prompt(output, "Enter new description: ")?;
    let Some(new_description) = read_line(input)? else {
        return Ok(());
    };

    if new_description.is_empty() {
        writeln!(output, "Description cannot be empty.")?;
        return Ok(());
    }

    match store.update_description(id, &new_description) {
        Ok(true) => writeln!(output, "Task description updated successfully."),
        Ok(false) => writeln!(output, "Failed to update task description."),
        Err(err) => writeln!(output, "Error: {}", err),
    }
}

fn update_task_status(
    store: &mut TaskStore,
    input: &mut impl BufRead,
    output: &mut impl Write,
    id: u32,
) -> io::Result<()> {
    prompt(
        output,
        "Enter new status (e.g., Pending, In Progress, Completed): ",
    )?;
    let Some(new_status) = read_line(input)? else {
        return Ok(());
    };

    if new_status.is_empty() {
        writeln!(output, "Status cannot be empty.")?;
        return Ok(());
    }

    match store.update_status(id, &new_status) {
        Ok(true) => writeln!(output, "Task status updated successfully."),
        Ok(false) => writeln!(output, "Failed to update task status."),
        Err(err) => writeln!(output, "Error: {}", err),
    }
}

fn delete_task(
    store: &mut TaskStore,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<()> {
    if store.is_empty() {
        writeln!(output, "No tasks available to delete.")?;
        return Ok(());
    }

    let Some(id) = read_task_id(input, output, "Enter task ID to delete: ")? else {
        return Ok(());
    };
    let Some(task) = store.find_by_id(id) else {
        writeln!(output, "Task with ID {} not found.", id)?;
        return Ok(());
    };

    writeln!(output, "Are you sure you want to delete this task?")?;
    writeln!(output, "{}", task)?;
    prompt(output, "Enter 'yes' to confirm: ")?;

    let Some(confirmation) = read_line(input)? else {
        return Ok(());
    };
    if confirmation.eq_ignore_ascii_case("yes") {
        if store.delete(id) {
            writeln!(output, "Task {} deleted successfully.", id)?;
        } else {
            writeln!(output, "Failed to delete task.")?;
        }
    } else {
        writeln!(output, "Task deletion cancelled.")?;
    }
    Ok(())
}

fn mark_task_completed(
    store: &mut TaskStore,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<()> {
    if store.is_empty() {
        writeln!(output, "No tasks available to mark as completed.")?;
        return Ok(());
    }

    let Some(id) = read_task_id(input, output, "Enter task ID to mark completed: ")? else {
        return Ok(());
    };
    let Some(task) = store.find_by_id(id) else {
        writeln!(output, "Task with ID {} not found.", id)?;
        return Ok(());
    };

    if task.is_completed() {
        writeln!(output, "Task {} is already completed.", id)?;
        return Ok(());
    }

    if store.mark_completed(id) {
        writeln!(output, "Task {} marked as completed.", id)?;
    } else {
        writeln!(output, "Failed to mark task as completed.")?;
    }
    Ok(())
}
