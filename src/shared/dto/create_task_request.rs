use serde::Deserialize;
use serde_json::Value;

use crate::coerce::{is_truthy, to_text};

#[derive(Debug, Default, Deserialize)]
pub struct CreateTaskRequest {
    pub date: Option<Value>,
    pub time: Option<Value>,
    pub task: Option<Value>,
}

impl CreateTaskRequest {
    /// The task text as it will be stored, or `None` when it is missing,
    /// falsy, or only whitespace.
    pub fn task_text(&self) -> Option<String> {
        let value = self.task.as_ref().filter(|v| is_truthy(v))?;
        let text = to_text(value);
        if text.trim().is_empty() {
            return None;
        }
        Some(text)
    }
}
