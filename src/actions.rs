use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Action {
    pub label: String,
    pub desc: String,
    pub action: String, // URL to open
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<String>,
}
