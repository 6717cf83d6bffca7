use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Processing state of a video resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoStatus {
    Available,
    Uploading,
    Transcoding,
    UploadingError,
    TranscodingError,
    QuotaExceeded,
    /// Any status value this client does not know about.
    #[serde(other)]
    Unknown,
}

/// Privacy settings as reported on a video resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoPrivacy {
    pub view: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

/// A video resource as served by the API.
///
/// Only the fields this client consumes are modeled; the API serves more.
/// Unknown fields are ignored on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// Canonical resource path, e.g. `/videos/12345`.
    pub uri: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Duration in whole seconds. Absent while the video is still processing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<VideoStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy: Option<VideoPrivacy>,
}

impl VideoMetadata {
    /// Returns the numeric identifier: the trailing segment of `uri`.
    pub fn id(&self) -> &str {
        self.uri.rsplit('/').next().unwrap_or_default()
    }
}
