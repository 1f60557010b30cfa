use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Published when raw audio/video media lands in storage and waits for the encoder.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VideoMediaCreated {
    pub video_id: Uuid,
    pub resource_id: String,
    pub file_path: String,
}

/// Messages the encoder sends back, discriminated by `status`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EncoderResult {
    Completed(EncoderCompleted),
    Error(EncoderError),
    #[serde(other)]
    Unknown,
}

impl EncoderResult {
    /// Payloads that do not parse at all are treated like an unknown status.
    pub fn decode(payload: &[u8]) -> Self {
        serde_json::from_slice(payload).unwrap_or(EncoderResult::Unknown)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EncoderCompleted {
    #[serde(rename = "id")]
    pub video_id: String,
    #[serde(rename = "output_bucket_path")]
    pub output_bucket: String,
    #[serde(rename = "video")]
    pub metadata: EncoderMetadata,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EncoderMetadata {
    #[serde(rename = "encoded_video_folder")]
    pub folder: String,
    pub resource_id: String,
    #[serde(rename = "file_path")]
    pub filename: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EncoderError {
    pub message: EncoderErrorMessage,
    pub error: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EncoderErrorMessage {
    pub resource_id: String,
    #[serde(default)]
    pub video_id: Option<String>,
}
