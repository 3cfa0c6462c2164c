use serde::Deserialize;
use serde_json::Value;

use crate::coerce::present;

/// Partial update. A field is applied whenever it appears in the body,
/// explicit `null` included; omitted fields stay untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default, deserialize_with = "present")]
    pub date: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub time: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub task: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub done: Option<Value>,
}
