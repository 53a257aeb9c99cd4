//! Data models and structures
//!
//! Defines the user record, the multi-part prompt wire format used by the
//! frontend, and the conversation message persisted after generation.

use serde::{Deserialize, Serialize};

/// One unit of a multi-part prompt.
///
/// Text parts carry the prompt text; image parts carry a path relative to
/// the upload directory. The `type`/`text`/`content` field names are fixed
/// by the frontend payloads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PromptPart {
    Text { text: String },
    Image { content: String },
}

/// Request body for `POST /image/huggingface`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateImageRequest {
    pub prompt: Vec<PromptPart>,
    pub model: String,
}

/// A user document from the `users` collection.
///
/// Registration creates these; this crate only ever reads them and flips
/// the `admin` flag. Unknown fields (including `_id`) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub credits: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Cost units attributed to one generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Billing {
    pub input_units: i64,
    pub output_units: i64,
}

/// A conversation message referencing a generated image, as stored in the
/// `conversations` collection and returned to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: String,
    pub user_email: String,
    pub model: String,
    pub prompt: String,
    pub image_path: String,
    pub billing: Billing,
    pub created_at: String, // RFC 3339
}
