//! HTTP exchange layer for the Vimeo REST API.
//!
//! The [`Transport`] trait is the seam between protocol logic and the wire:
//! upload and catalog code talk to `&dyn Transport` and are tested against
//! mocks, while [`HttpClient`] is the reqwest-backed implementation used in
//! production. A single [`exchange`](Transport::exchange) performs one HTTP
//! round trip and hands back status, headers, and body even for non-2xx
//! responses; `Err` is reserved for connection-level failures so callers can
//! always inspect server headers on error responses.

mod client;
mod request;

use std::future::Future;
use std::pin::Pin;

pub use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};

pub use client::{ApiConfig, HttpClient};
pub use request::{ApiRequest, Body};

/// Errors below the HTTP layer: the exchange produced no response at all.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid target URL: {0}")]
    InvalidUrl(String),
}

/// The outcome of one HTTP exchange, success or not.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl Exchange {
    /// Returns a response header as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Abstract HTTP transport.
///
/// Implemented by [`HttpClient`] in production and by in-memory mocks in
/// tests. Using a trait keeps the upload state machine decoupled from
/// reqwest and testable without a live server.
pub trait Transport: Send + Sync {
    /// Performs a single HTTP exchange.
    fn exchange(
        &self,
        request: ApiRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Exchange, TransportError>> + Send + '_>>;
}
