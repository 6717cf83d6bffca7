//! Video catalog operations against the API host.
//!
//! Thin request/decode glue over [`Transport`](reelsync_transport::Transport):
//! paginated listing, single-resource fetch, property edits, and deletion.
//! Unlike the upload path these calls are not resumable, so transport and
//! decode failures propagate directly to the caller.

mod client;

pub use client::VideoCatalog;

use reelsync_transport::{StatusCode, TransportError};

/// Errors from catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("server returned HTTP {0}")]
    Status(StatusCode),

    #[error("undecodable response body: {0}")]
    Decode(#[from] serde_json::Error),
}
