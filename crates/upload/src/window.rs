/// The portion of the file the server has acknowledged.
///
/// `confirmed` is authoritative: it is only ever set from the server's
/// `Range` reply, never advanced from local write counts — a transmitted
/// chunk is not necessarily durably received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferWindow {
    confirmed: u64,
    total: u64,
}

impl TransferWindow {
    pub fn new(total: u64) -> Self {
        Self {
            confirmed: 0,
            total,
        }
    }

    /// Server-confirmed byte offset.
    pub fn confirmed(&self) -> u64 {
        self.confirmed
    }

    /// Total file length, fixed for the lifetime of the upload.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Bytes not yet confirmed by the server.
    pub fn remaining(&self) -> u64 {
        self.total.saturating_sub(self.confirmed)
    }

    pub fn is_complete(&self) -> bool {
        self.confirmed >= self.total
    }

    /// Applies a `Range` header value of the form `bytes 0-{end}`.
    ///
    /// Only the integer after the last hyphen is consumed. Returns `false`
    /// and leaves the window untouched when the value has no hyphen or the
    /// suffix does not parse; otherwise the confirmed offset becomes exactly
    /// what the server reported, including values below the current offset.
    pub fn apply(&mut self, header: &str) -> bool {
        match confirmed_end(header) {
            Some(end) => {
                self.confirmed = end;
                true
            }
            None => false,
        }
    }
}

/// Extracts the confirmed end offset from a range header value.
fn confirmed_end(header: &str) -> Option<u64> {
    let (_, end) = header.rsplit_once('-')?;
    end.trim().parse().ok()
}
