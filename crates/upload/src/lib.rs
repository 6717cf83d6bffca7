//! Streaming upload state machine for the Vimeo REST API.
//!
//! This crate implements the **resumable upload protocol**: acquire a
//! ticket, push file bytes to the upload host, ask the server what it
//! actually received, resume from the server-reported offset, and finalize
//! the session into a permanent video resource. The server is the source of
//! truth for progress — the client never trusts its own write counter.
//!
//! # Sequence
//!
//! 1. **Ticket** — `POST /me/videos` opens a streaming session
//! 2. **Transfer** — PUT the remaining bytes, probe the confirmed range,
//!    repeat until the server has everything
//! 3. **Finalize** — `DELETE complete_uri`, yielding the video's `Location`
//! 4. **Patch + fetch** — apply caller properties, read back the metadata
//!
//! Remote failures along the way are collected as data in
//! [`UploadOutcome`]; only local, unrecoverable conditions surface as
//! [`UploadError`].

pub mod outcome;
pub mod retry;
pub mod session;
pub mod window;

pub use outcome::{RemoteFailure, UploadEvent, UploadOutcome, UploadStep};
pub use retry::RetryPolicy;
pub use session::UploadSession;
pub use window::TransferWindow;

/// Conditions that abort an upload outright.
///
/// Everything else — failed chunk writes, rejected probes, a flaky
/// finalize — is tolerated and recorded in the outcome instead.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ticket body could not be decoded: {0}")]
    TicketDecode(#[source] serde_json::Error),

    #[error("progress probe response carried no Range header")]
    MissingRange,

    #[error("no upload progress after {attempts} attempts at offset {offset}")]
    Stalled { attempts: u32, offset: u64 },

    #[error("finalize response carried no Location header")]
    MissingLocation,

    #[error("upload deadline exceeded")]
    DeadlineExceeded,

    #[error("cancelled")]
    Cancelled,
}
