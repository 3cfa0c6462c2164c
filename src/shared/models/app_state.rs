use std::sync::Arc;

use crate::task_store::TaskStore;

pub struct AppState {
    pub task_store: TaskStore,
}

pub type SharedState = Arc<AppState>;
