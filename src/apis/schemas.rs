use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ------------------------------------------ General Error API ------------------------------------------
#[derive(Serialize, Deserialize, Debug, ToSchema, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

// ------------------------------------------ Referral API ------------------------------------------
#[derive(Serialize, Deserialize, Debug, ToSchema, PartialEq, Eq)]
pub struct SubmitResponse {
    pub message: String,
    // Provider message id; absent when nothing was sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum ReplyBody {
    Success(SubmitResponse),
    Failure(ErrorResponse),
}
