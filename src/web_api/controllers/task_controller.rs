use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    api_error::ApiError, app_state::SharedState, create_task_request::CreateTaskRequest,
    delete_task_response::DeleteTaskResponse, json_body::JsonBody, task::Task,
    update_task_request::UpdateTaskRequest,
};

pub struct TaskController {}

impl TaskController {
    pub async fn get_all(State(state): State<SharedState>) -> Result<Json<Vec<Task>>, ApiError> {
        let tasks = state
            .task_store
            .load()
            .await
            .map_err(ApiError::internal("Failed to read tasks"))?;
        Ok(Json(tasks))
    }

    pub async fn add(
        State(state): State<SharedState>,
        JsonBody(body): JsonBody<CreateTaskRequest>,
    ) -> Result<(StatusCode, Json<Task>), ApiError> {
        let text = body
            .task_text()
            .ok_or_else(|| ApiError::Validation("Task text is required".to_string()))?;
        let task = Task::new(state.task_store.generate_id(), text, &body);

        let store = &state.task_store;
        let mut tasks = store
            .load()
            .await
            .map_err(ApiError::internal("Failed to create task"))?;
        tasks.push(task.clone());
        store
            .save(&tasks)
            .await
            .map_err(ApiError::internal("Failed to create task"))?;

        tracing::info!(id = %task.id, "created task");
        Ok((StatusCode::CREATED, Json(task)))
    }

    pub async fn edit(
        State(state): State<SharedState>,
        Path(id): Path<String>,
        JsonBody(body): JsonBody<UpdateTaskRequest>,
    ) -> Result<Json<Task>, ApiError> {
        Self::mutate(&state, &id, "Failed to update task", |task| task.edit(body)).await
    }

    pub async fn toggle(
        State(state): State<SharedState>,
        Path(id): Path<String>,
    ) -> Result<Json<Task>, ApiError> {
        Self::mutate(&state, &id, "Failed to toggle task", Task::toggle).await
    }

    pub async fn delete(
        State(state): State<SharedState>,
        Path(id): Path<String>,
    ) -> Result<Json<DeleteTaskResponse>, ApiError> {
        let store = &state.task_store;
        let mut tasks = store
            .load()
            .await
            .map_err(ApiError::internal("Failed to delete task"))?;

        if !tasks.iter().any(|t| t.id == id) {
            return Err(ApiError::NotFound);
        }
        tasks.retain(|t| t.id != id);
        store
            .save(&tasks)
            .await
            .map_err(ApiError::internal("Failed to delete task"))?;

        tracing::info!(%id, "deleted task");
        Ok(Json(DeleteTaskResponse { success: true }))
    }

    // Load, change one record in place, rewrite everything.
    async fn mutate(
        state: &SharedState,
        id: &str,
        failure: &'static str,
        change: impl FnOnce(&mut Task),
    ) -> Result<Json<Task>, ApiError> {
        let store = &state.task_store;
        let mut tasks = store.load().await.map_err(ApiError::internal(failure))?;

        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ApiError::NotFound)?;
        change(task);
        let updated = task.clone();

        store.save(&tasks).await.map_err(ApiError::internal(failure))?;

        tracing::info!(%id, done = updated.done, "updated task");
        Ok(Json(updated))
    }
}
