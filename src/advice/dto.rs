use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// Falls back to the pending question when absent.
    #[serde(default)]
    pub question: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetQuestionRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<&'static str>,
}
