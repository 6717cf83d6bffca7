//! Upload session controller.
//!
//! Drives one streaming upload end to end against a [`Transport`]. The
//! controller is deliberately transport-agnostic so the whole state machine
//! can be exercised with scripted in-memory exchanges.

use std::path::Path;
use std::time::{Duration, Instant};

use serde_json::json;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use reelsync_transport::{ApiRequest, Exchange, StatusCode, Transport};
use reelsync_types::{UploadTicket, VideoMetadata, VideoProperties};

use crate::UploadError;
use crate::outcome::{RemoteFailure, UploadEvent, UploadOutcome, UploadStep};
use crate::retry::RetryPolicy;
use crate::window::TransferWindow;

/// API path that opens a streaming upload session.
const CREATE_PATH: &str = "/me/videos";

/// Controls one upload attempt: ticket, transfer loop, finalization.
///
/// Sessions are strictly sequential — every remote call is issued only
/// after the previous one completed, and no state is shared across
/// sessions, so different files can upload concurrently on separate
/// sessions.
pub struct UploadSession<'a> {
    transport: &'a dyn Transport,
    retry: RetryPolicy,
    deadline: Option<Duration>,
    cancel: CancellationToken,
    events_tx: mpsc::Sender<UploadEvent>,
    events_rx: Option<mpsc::Receiver<UploadEvent>>,
}

impl<'a> UploadSession<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        let (events_tx, events_rx) = mpsc::channel(64);
        Self {
            transport,
            retry: RetryPolicy::default(),
            deadline: None,
            cancel: CancellationToken::new(),
            events_tx,
            events_rx: Some(events_rx),
        }
    }

    /// Replaces the stall backoff policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Bounds the whole upload, transfer loop included.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Returns a cancellation token for this upload.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Takes the progress event receiver. Can only be called once.
    pub fn take_events(&mut self) -> Option<mpsc::Receiver<UploadEvent>> {
        self.events_rx.take()
    }

    /// Uploads a local file, optionally patching properties onto the new
    /// video after finalization.
    ///
    /// The file is read fully up front and treated as immutable for the
    /// duration of the transfer.
    pub async fn upload(
        &self,
        path: &Path,
        properties: Option<&VideoProperties>,
    ) -> Result<UploadOutcome, UploadError> {
        let bytes = tokio::fs::read(path).await?;
        self.upload_bytes(&bytes, properties).await
    }

    /// Uploads pre-read file content.
    ///
    /// Remote-side trouble never surfaces as `Err`: it accumulates in the
    /// outcome's failure list while the protocol recovers via the
    /// server-reported offset. `Err` is reserved for local conditions the
    /// loop cannot recover from.
    pub async fn upload_bytes(
        &self,
        bytes: &[u8],
        properties: Option<&VideoProperties>,
    ) -> Result<UploadOutcome, UploadError> {
        let started = Instant::now();
        let mut outcome = UploadOutcome::new();
        self.check_cancelled()?;

        // Session creation: the one remote hard-stop before any bytes move.
        let Some(ticket) = self.create_ticket(&mut outcome).await? else {
            return Ok(outcome);
        };
        self.emit(UploadEvent::TicketIssued {
            ticket_id: ticket.ticket_id.clone(),
        });
        outcome.ticket = Some(ticket.clone());

        self.transfer(&ticket, bytes, started, &mut outcome).await?;

        let location = self.finalize(&ticket, &mut outcome).await?;
        let video_id = location.rsplit('/').next().unwrap_or_default().to_string();
        self.emit(UploadEvent::Finalized {
            video_id: video_id.clone(),
        });

        if let Some(properties) = properties {
            self.edit_metadata(&location, properties, &mut outcome)
                .await;
        }
        self.fetch_video(&video_id, &mut outcome).await;
        self.emit(UploadEvent::Completed);
        Ok(outcome)
    }

    /// Opens a streaming upload session and decodes the ticket.
    ///
    /// Returns `Ok(None)` when the server refused the session — the only
    /// remote failure that stops the upload before any bytes are sent.
    async fn create_ticket(
        &self,
        outcome: &mut UploadOutcome,
    ) -> Result<Option<UploadTicket>, UploadError> {
        let request = ApiRequest::post(CREATE_PATH).json(json!({"type": "streaming"}));
        let exchange = match self.transport.exchange(request).await {
            Ok(exchange) => exchange,
            Err(e) => {
                warn!(error = %e, "session creation failed");
                outcome.failures.push(RemoteFailure::Transport {
                    step: UploadStep::CreateTicket,
                    source: e,
                });
                return Ok(None);
            }
        };
        if exchange.status != StatusCode::CREATED {
            warn!(status = exchange.status.as_u16(), "session creation rejected");
            outcome.failures.push(RemoteFailure::Status {
                step: UploadStep::CreateTicket,
                status: exchange.status,
            });
            return Ok(None);
        }
        let ticket: UploadTicket =
            serde_json::from_str(&exchange.body).map_err(UploadError::TicketDecode)?;
        debug!(ticket_id = %ticket.ticket_id, "upload ticket issued");
        Ok(Some(ticket))
    }

    /// The chunked transfer loop: push the tail, probe the server, move the
    /// window to whatever the server confirms, repeat.
    async fn transfer(
        &self,
        ticket: &UploadTicket,
        bytes: &[u8],
        started: Instant,
        outcome: &mut UploadOutcome,
    ) -> Result<(), UploadError> {
        let mut window = TransferWindow::new(bytes.len() as u64);
        let mut stalled: u32 = 0;

        while !window.is_complete() {
            self.check_cancelled()?;
            self.check_deadline(started)?;

            self.send_tail(ticket, bytes, window, outcome).await;

            let Some(exchange) = self.probe(ticket, outcome).await else {
                // No response at all; tolerated, but bounded.
                stalled += 1;
                self.backoff(stalled, window).await?;
                continue;
            };

            // A delivered probe without range data cannot drive the loop.
            let Some(range) = exchange.header("Range").map(str::to_owned) else {
                return Err(UploadError::MissingRange);
            };

            let before = window.confirmed();
            let parsed = window.apply(&range);
            if parsed && window.confirmed() > before {
                stalled = 0;
                debug!(
                    confirmed = window.confirmed(),
                    total = window.total(),
                    "server confirmed range"
                );
                self.emit(UploadEvent::Progress {
                    confirmed: window.confirmed(),
                    total: window.total(),
                });
            } else {
                stalled += 1;
                self.backoff(stalled, window).await?;
            }
        }
        Ok(())
    }

    /// PUTs the unconfirmed remainder of the file.
    ///
    /// Failures here never abort: the follow-up probe re-reads the true
    /// server state, which is all the loop depends on.
    async fn send_tail(
        &self,
        ticket: &UploadTicket,
        bytes: &[u8],
        window: TransferWindow,
        outcome: &mut UploadOutcome,
    ) {
        let start = window.confirmed();
        let total = window.total();
        let request = ApiRequest::put(ticket.upload_link_secure.as_str())
            .bytes(bytes[start as usize..].to_vec())
            .header("Content-Range", format!("bytes {start}-{total}/{total}"));
        match self.transport.exchange(request).await {
            Ok(exchange) if !exchange.status.is_success() => {
                warn!(status = exchange.status.as_u16(), start, "chunk write rejected");
                outcome.failures.push(RemoteFailure::Status {
                    step: UploadStep::ChunkWrite,
                    status: exchange.status,
                });
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, start, "chunk write failed");
                outcome.failures.push(RemoteFailure::Transport {
                    step: UploadStep::ChunkWrite,
                    source: e,
                });
            }
        }
    }

    /// Content-range probe: asks the upload host what it actually received.
    ///
    /// Returns `None` when the exchange produced no response to inspect.
    async fn probe(&self, ticket: &UploadTicket, outcome: &mut UploadOutcome) -> Option<Exchange> {
        let request = ApiRequest::put(ticket.upload_link_secure.as_str())
            .header("Content-Range", "bytes */*");
        match self.transport.exchange(request).await {
            Ok(exchange) => {
                // 308 is the usual reply to a range report; anything else
                // non-2xx is recorded while the headers are still inspected.
                if !exchange.status.is_success()
                    && exchange.status != StatusCode::PERMANENT_REDIRECT
                {
                    outcome.failures.push(RemoteFailure::Status {
                        step: UploadStep::RangeProbe,
                        status: exchange.status,
                    });
                }
                Some(exchange)
            }
            Err(e) => {
                warn!(error = %e, "progress probe failed");
                outcome.failures.push(RemoteFailure::Transport {
                    step: UploadStep::RangeProbe,
                    source: e,
                });
                None
            }
        }
    }

    /// Sleeps before the next stalled iteration, aborting past the cap.
    async fn backoff(&self, stalled: u32, window: TransferWindow) -> Result<(), UploadError> {
        if stalled >= self.retry.max_stalled_attempts {
            return Err(UploadError::Stalled {
                attempts: stalled,
                offset: window.confirmed(),
            });
        }
        let delay = self.retry.delay_for_attempt(stalled);
        debug!(
            attempt = stalled,
            delay_ms = delay.as_millis() as u64,
            "no upload progress, backing off"
        );
        tokio::select! {
            _ = self.cancel.cancelled() => Err(UploadError::Cancelled),
            _ = tokio::time::sleep(delay) => Ok(()),
        }
    }

    /// Converts the finished session into a permanent video resource.
    ///
    /// The `Location` header names the new resource; without it the
    /// follow-up patch and fetch would be meaningless, so its absence is a
    /// hard stop.
    async fn finalize(
        &self,
        ticket: &UploadTicket,
        outcome: &mut UploadOutcome,
    ) -> Result<String, UploadError> {
        let request = ApiRequest::delete(ticket.complete_uri.as_str());
        match self.transport.exchange(request).await {
            Ok(exchange) => {
                if !exchange.status.is_success() {
                    outcome.failures.push(RemoteFailure::Status {
                        step: UploadStep::Finalize,
                        status: exchange.status,
                    });
                }
                match exchange.header("Location") {
                    Some(location) => {
                        info!(location, "upload finalized");
                        Ok(location.to_string())
                    }
                    None => Err(UploadError::MissingLocation),
                }
            }
            Err(e) => {
                outcome.failures.push(RemoteFailure::Transport {
                    step: UploadStep::Finalize,
                    source: e,
                });
                Err(UploadError::MissingLocation)
            }
        }
    }

    /// PATCHes caller-supplied properties onto the new video resource.
    async fn edit_metadata(
        &self,
        location: &str,
        properties: &VideoProperties,
        outcome: &mut UploadOutcome,
    ) {
        let payload = match serde_json::to_value(properties) {
            Ok(payload) => payload,
            Err(e) => {
                outcome.failures.push(RemoteFailure::Decode {
                    step: UploadStep::EditMetadata,
                    source: e,
                });
                return;
            }
        };
        let request = ApiRequest::patch(location).json(payload);
        match self.transport.exchange(request).await {
            Ok(exchange) if !exchange.status.is_success() => {
                warn!(status = exchange.status.as_u16(), "property patch rejected");
                outcome.failures.push(RemoteFailure::Status {
                    step: UploadStep::EditMetadata,
                    status: exchange.status,
                });
            }
            Ok(_) => debug!("video properties patched"),
            Err(e) => {
                outcome.failures.push(RemoteFailure::Transport {
                    step: UploadStep::EditMetadata,
                    source: e,
                });
            }
        }
    }

    /// Reads back the finished video's metadata into the outcome.
    async fn fetch_video(&self, video_id: &str, outcome: &mut UploadOutcome) {
        let request = ApiRequest::get(format!("/me/videos/{video_id}"));
        match self.transport.exchange(request).await {
            Ok(exchange) if exchange.status.is_success() => {
                match serde_json::from_str::<VideoMetadata>(&exchange.body) {
                    Ok(video) => outcome.video = Some(video),
                    Err(e) => outcome.failures.push(RemoteFailure::Decode {
                        step: UploadStep::FinalFetch,
                        source: e,
                    }),
                }
            }
            Ok(exchange) => outcome.failures.push(RemoteFailure::Status {
                step: UploadStep::FinalFetch,
                status: exchange.status,
            }),
            Err(e) => outcome.failures.push(RemoteFailure::Transport {
                step: UploadStep::FinalFetch,
                source: e,
            }),
        }
    }

    fn check_cancelled(&self) -> Result<(), UploadError> {
        if self.cancel.is_cancelled() {
            Err(UploadError::Cancelled)
        } else {
            Ok(())
        }
    }

    fn check_deadline(&self, started: Instant) -> Result<(), UploadError> {
        match self.deadline {
            Some(deadline) if started.elapsed() >= deadline => Err(UploadError::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    fn emit(&self, event: UploadEvent) {
        let _ = self.events_tx.try_send(event);
    }
}
