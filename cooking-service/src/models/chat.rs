use serde::{Deserialize, Serialize};
use validator::Validate;

/// One exchange of an earlier conversation. Either side may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub assistant: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 1000, message = "message must be 1-1000 characters"))]
    pub message: String,
    #[serde(default)]
    pub context: Vec<ChatTurn>,
    #[serde(
        default = "super::language::default_language",
        deserialize_with = "super::language::deserialize"
    )]
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    pub response: String,
    pub model: String,
    pub language: String,
    pub suggestions: Vec<String>,
}
