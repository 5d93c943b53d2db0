use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::{ApiKey, ImageInfo};

#[derive(Debug, Deserialize)]
pub struct SelectImageBytesRequest {
    pub image: serde_bytes::ByteBuf,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ImageSelectedResponse {
    pub image: ImageInfo,
    /// Job abandoned because a new image was picked.
    pub cancelled_job: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default = "blank_key")]
    pub api_key: ApiKey,
}

fn blank_key() -> ApiKey {
    ApiKey::new("")
}
