use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    coerce::{is_truthy, lenient_bool, lenient_text, text_or_empty, to_text},
    create_task_request::CreateTaskRequest,
    update_task_request::UpdateTaskRequest,
};

/// A single to-do record, stored and served in this exact shape.
///
/// `date` and `time` are free-form (`YYYY-MM-DD` / `HH:MM` by convention)
/// and may be empty. Hand-edited records still load: missing fields take
/// their empty value, mistyped ones are coerced, and keys this struct
/// doesn't know ride along in `extra` and are written back untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(deserialize_with = "lenient_text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub time: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub task: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub done: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    /// `text` is the already-validated task text from the request.
    pub fn new(id: String, text: String, request: &CreateTaskRequest) -> Self {
        Self {
            id,
            date: text_or_empty(request.date.as_ref()),
            time: text_or_empty(request.time.as_ref()),
            task: text,
            done: false,
            extra: Map::new(),
        }
    }

    /// Field-level merge. `task` is not re-validated, so an update can
    /// blank it out.
    pub fn edit(&mut self, request: UpdateTaskRequest) {
        if let Some(date) = request.date {
            self.date = to_text(&date);
        }
        if let Some(time) = request.time {
            self.time = to_text(&time);
        }
        if let Some(task) = request.task {
            self.task = to_text(&task);
        }
        if let Some(done) = request.done {
            self.done = is_truthy(&done);
        }
    }

    pub fn toggle(&mut self) {
        self.done = !self.done;
    }
}
