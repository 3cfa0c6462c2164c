use axum::{Router, routing::{get, patch, put}};
use crate::{app_state::SharedState, task_controller::TaskController};

pub const ROUTER_PATH: &str = "/tasks";

pub fn get_router(app_state: SharedState) -> Router {
    Router::new()
        .route(ROUTER_PATH, get(TaskController::get_all).post(TaskController::add))
        .route(format!("{}/:id", ROUTER_PATH).as_str(), put(TaskController::edit).delete(TaskController::delete))
        .route(format!("{}/:id/toggle", ROUTER_PATH).as_str(), patch(TaskController::toggle))
        .with_state(app_state)
}
