use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
};
use serde::{Deserialize, Serialize};
use todo_core::{Task, TaskStore, TodoError};

/// Shared state for the to-do endpoints: one store for the life of the
/// server, guarded by a mutex so concurrent requests see each
/// find-then-mutate sequence as a single step.
#[derive(Debug)]
pub struct TodoState {
    store: Mutex<TaskStore>,
}

impl TodoState {
    pub fn new() -> Self {
        Self::with_store(TaskStore::new())
    }

    /// Wraps an existing store, e.g. one pre-populated by tests.
    pub fn with_store(store: TaskStore) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }
}

impl Default for TodoState {
    fn default() -> Self {
        Self::new()
    }
}

/// JSON representation of a task for API responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskJson {
    /// Unique identifier for the task
    id: u32,
    /// What needs to be done
    description: String,
    /// Free-form status text
    status: String,
}

impl From<Task> for TaskJson {
    fn from(task: Task) -> Self {
        Self {
            id: task.id(),
            description: task.description().to_string(),
            status: task.status().to_string(),
        }
    }
}

/// JSON request payload carrying a task description (create and update).
#[derive(Debug, Deserialize)]
pub struct TaskDescriptionRequest {
    #[serde(default)]
    pub description: Option<String>,
}

/// API response for a successful create.
#[derive(Debug, Serialize)]
pub struct CreateTaskResponse {
    message: String,
    task_id: u32,
    task: TaskJson,
}

/// API response carrying a message and the refreshed task record.
#[derive(Debug, Serialize)]
pub struct TaskMessageResponse {
    message: String,
    task: TaskJson,
}

/// API response carrying only a message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    message: String,
}

/// API response for the aggregate stats endpoint.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    total_tasks: usize,
    completed_tasks: usize,
    pending_tasks: usize,
}

/// JSON response for API errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: String) -> Self {
        Self { error }
    }
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn lock_store(state: &TodoState) -> Result<MutexGuard<'_, TaskStore>, HandlerError> {
    state.store.lock().map_err(|err| {
        tracing::error!("Task store lock poisoned: {}", err);
        server_error("Task store is unavailable")
    })
}

fn server_error(message: &str) -> HandlerError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(message.to_string())),
    )
}

fn task_not_found(id: u32) -> HandlerError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(format!("Task with ID {} not found", id))),
    )
}

fn invalid_argument(err: TodoError) -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new(err.to_string())),
    )
}

fn missing_description() -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new("Description is required".to_string())),
    )
}

/// Handler for GET /api/todos - Returns all tasks in insertion order.
#[tracing::instrument(skip(state))]
pub async fn list_tasks_handler(
    State(state): State<Arc<TodoState>>,
) -> Result<Json<Vec<TaskJson>>, HandlerError> {
    let store = lock_store(&state)?;
    let tasks = store.all_tasks().into_iter().map(TaskJson::from).collect();
    Ok(Json(tasks))
}

/// Handler for GET /api/todos/{id} - Returns one task or 404.
#[tracing::instrument(skip(state))]
pub async fn get_task_handler(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<u32>,
) -> Result<Json<TaskJson>, HandlerError> {
    let store = lock_store(&state)?;
    match store.find_by_id(id) {
        Some(task) => Ok(Json(TaskJson::from(task.clone()))),
        None => Err(task_not_found(id)),
    }
}

/// Handler for POST /api/todos - Creates a task from a description field.
#[tracing::instrument(skip(state, payload))]
pub async fn create_task_handler(
    State(state): State<Arc<TodoState>>,
    Json(payload): Json<TaskDescriptionRequest>,
) -> Result<(StatusCode, Json<CreateTaskResponse>), HandlerError> {
    let description = payload.description.unwrap_or_default();
    if description.trim().is_empty() {
        return Err(missing_description());
    }

    let mut store = lock_store(&state)?;
    let task_id = store.add(&description).map_err(invalid_argument)?;
    let task = store
        .find_by_id(task_id)
        .cloned()
        .ok_or_else(|| server_error("Failed to load the created task"))?;

    tracing::info!("Created task {}", task_id);
    Ok((
        StatusCode::CREATED,
        Json(CreateTaskResponse {
            message: "Task created successfully".to_string(),
            task_id,
            task: TaskJson::from(task),
        }),
    ))
}

/// Handler for PUT /api/todos/{id} - Replaces a task's description.
#[tracing::instrument(skip(state, payload))]
pub async fn update_task_handler(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<u32>,
    Json(payload): Json<TaskDescriptionRequest>,
) -> Result<Json<TaskMessageResponse>, HandlerError> {
    let description = payload.description.unwrap_or_default();
    if description.trim().is_empty() {
        return Err(missing_description());
    }

    let mut store = lock_store(&state)?;
    match store.update_description(id, &description) {
        Ok(true) => {
            let task = store
                .find_by_id(id)
                .cloned()
                .ok_or_else(|| server_error("Failed to load the updated task"))?;
            Ok(Json(TaskMessageResponse {
                message: "Task updated successfully".to_string(),
                task: TaskJson::from(task),
            }))
        }
        Ok(false) => Err(task_not_found(id)),
        Err(err) => Err(invalid_argument(err)),
    }
}

/// Handler for PATCH /api/todos/{id}/complete - Marks a task completed.
/// Idempotent: completing an already completed task succeeds again.
#[tracing::instrument(skip(state))]
pub async fn complete_task_handler(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<u32>,
) -> Result<Json<TaskMessageResponse>, HandlerError> {
    let mut store = lock_store(&state)?;
    if !store.mark_completed(id) {
        return Err(task_not_found(id));
    }

    let task = store
        .find_by_id(id)
        .cloned()
        .ok_or_else(|| server_error("Failed to load the completed task"))?;
    tracing::info!("Marked task {} as completed", id);
    Ok(Json(TaskMessageResponse {
        message: "Task marked as completed".to_string(),
        task: TaskJson::from(task),
    }))
}

/// Handler for DELETE /api/todos/{id} - Removes a task.
#[tracing::instrument(skip(state))]
pub async fn delete_task_handler(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<u32>,
) -> Result<Json<MessageResponse>, HandlerError> {
    let mut store = lock_store(&state)?;
    if !store.delete(id) {
        return Err(task_not_found(id));
    }

    tracing::info!("Deleted task {}", id);
    Ok(Json(MessageResponse {
        message: "Task deleted successfully".to_string(),
    }))
}

/// Handler for GET /api/todos/stats - Aggregate counts. A task counts as
/// completed when its status reads "completed" in any casing.
#[tracing::instrument(skip(state))]
pub async fn stats_handler(
    State(state): State<Arc<TodoState>>,
) -> Result<Json<StatsResponse>, HandlerError> {
    let store = lock_store(&state)?;
    let tasks = store.all_tasks();
    let completed_tasks = tasks.iter().filter(|task| task.is_completed()).count();

    Ok(Json(StatsResponse {
        total_tasks: tasks.len(),
        completed_tasks,
        pending_tasks: tasks.len() - completed_tasks,
    }))
}

/// Creates and returns the to-do API router.
pub fn create_todo_router(state: Arc<TodoState>) -> Router {
    Router::new()
        .route(
            "/api/todos",
            get(list_tasks_handler).post(create_task_handler),
        )
        .route("/api/todos/stats", get(stats_handler))
        .route(
            "/api/todos/{id}",
            get(get_task_handler)
                .put(update_task_handler)
                .delete(delete_task_handler),
        )
        .route("/api/todos/{id}/complete", patch(complete_task_handler))
        .with_state(state)
}
