use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PostRecord {
    pub id: String,
    pub likes_count: i64,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// Body of `POST /increment-likes`.
///
/// Only the shape is checked here; emptiness is a business rule and is
/// checked by the handler so it can answer with the documented message.
#[derive(Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IncrementLikeRequest {
    #[serde(default)]
    pub post_id: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct IncrementLikeResponse {
    pub success: bool,
    pub data: Vec<PostRecord>,
}
