use std::fmt;

use reelsync_transport::{StatusCode, TransportError};
use reelsync_types::{UploadTicket, VideoMetadata};

/// Remote step of the upload sequence, used to tag tolerated failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStep {
    CreateTicket,
    ChunkWrite,
    RangeProbe,
    Finalize,
    EditMetadata,
    FinalFetch,
}

impl fmt::Display for UploadStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CreateTicket => "create ticket",
            Self::ChunkWrite => "chunk write",
            Self::RangeProbe => "range probe",
            Self::Finalize => "finalize",
            Self::EditMetadata => "edit metadata",
            Self::FinalFetch => "final fetch",
        };
        f.write_str(name)
    }
}

/// A remote call that went wrong without aborting the upload.
#[derive(Debug, thiserror::Error)]
pub enum RemoteFailure {
    #[error("{step}: {source}")]
    Transport {
        step: UploadStep,
        #[source]
        source: TransportError,
    },

    #[error("{step}: server returned HTTP {status}")]
    Status { step: UploadStep, status: StatusCode },

    #[error("{step}: undecodable response body: {source}")]
    Decode {
        step: UploadStep,
        #[source]
        source: serde_json::Error,
    },
}

impl RemoteFailure {
    pub fn step(&self) -> UploadStep {
        match self {
            Self::Transport { step, .. } | Self::Status { step, .. } | Self::Decode { step, .. } => {
                *step
            }
        }
    }
}

/// Aggregate result of one upload attempt.
///
/// Built empty when the upload starts and accumulated through the run;
/// callers inspect `failures` to decide how much to trust a nominally
/// finished upload.
#[derive(Debug, Default)]
pub struct UploadOutcome {
    /// Non-fatal remote failures, in the order they occurred.
    pub failures: Vec<RemoteFailure>,
    /// The ticket used, once session creation succeeded.
    pub ticket: Option<UploadTicket>,
    /// Final metadata, present only if the whole sequence completed.
    pub video: Option<VideoMetadata>,
}

impl UploadOutcome {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// True when the sequence ran through and the final fetch decoded.
    pub fn is_complete(&self) -> bool {
        self.video.is_some()
    }
}

/// Progress notifications emitted during an upload.
///
/// Delivery is best-effort on a bounded channel; a slow or dropped
/// receiver never affects the transfer itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEvent {
    TicketIssued { ticket_id: String },
    Progress { confirmed: u64, total: u64 },
    Finalized { video_id: String },
    Completed,
}
