//! reqwest-backed [`Transport`] implementation.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::Url;
use tracing::{debug, trace};

use crate::request::{ApiRequest, Body};
use crate::{Exchange, Transport, TransportError};

/// Default per-call timeout. Without a bound a dead upload host would
/// hang the transfer loop forever.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const DEFAULT_BASE_URL: &str = "https://api.vimeo.com";

/// Connection settings for [`HttpClient`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// API host, e.g. `https://api.vimeo.com`.
    pub base_url: String,
    /// Pre-obtained bearer token, passed through opaquely.
    pub token: String,
    /// Timeout applied to every exchange.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Config for the default API host with the given bearer token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Production transport over reqwest.
pub struct HttpClient {
    http: reqwest::Client,
    base: Url,
    token: String,
}

impl HttpClient {
    pub fn new(config: ApiConfig) -> Result<Self, TransportError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            http,
            base,
            token: config.token,
        })
    }
}

/// Resolves a request target against the API base URL.
///
/// Absolute targets are taken as-is; everything else is joined onto the
/// base host.
fn resolve_target(base: &Url, target: &str) -> Result<Url, TransportError> {
    let url = if target.starts_with("http://") || target.starts_with("https://") {
        Url::parse(target)
    } else {
        base.join(target)
    };
    url.map_err(|e| TransportError::InvalidUrl(format!("{target}: {e}")))
}

/// The bearer token is only attached to requests against the API host
/// itself, never to upload hosts or other third parties.
fn same_host(base: &Url, target: &Url) -> bool {
    base.host_str() == target.host_str()
}

impl Transport for HttpClient {
    fn exchange(
        &self,
        request: ApiRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Exchange, TransportError>> + Send + '_>> {
        Box::pin(async move {
            let url = resolve_target(&self.base, &request.target)?;
            trace!(method = %request.method, url = %url, "exchange");

            let mut builder = self.http.request(request.method.clone(), url.clone());
            if same_host(&self.base, &url) {
                builder = builder.bearer_auth(&self.token);
            }
            builder = match request.body {
                Body::Empty => builder,
                Body::Json(payload) => builder.json(&payload),
                Body::Bytes(bytes) => builder
                    .header(http::header::CONTENT_TYPE, "application/octet-stream")
                    .body(bytes),
            };
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }

            let response = builder.send().await?;
            let status = response.status();
            let headers = response.headers().clone();
            let body = response.text().await?;
            debug!(method = %request.method, url = %url, status = status.as_u16(), "exchange complete");

            Ok(Exchange {
                status,
                headers,
                body,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://api.vimeo.com").unwrap()
    }

    #[test]
    fn relative_target_joins_base() {
        let url = resolve_target(&base(), "/me/videos?per_page=100").unwrap();
        assert_eq!(url.as_str(), "https://api.vimeo.com/me/videos?per_page=100");
    }

    #[test]
    fn absolute_target_kept_as_is() {
        let url = resolve_target(&base(), "https://upload-17.cloud.example.com/u?t=1").unwrap();
        assert_eq!(url.host_str(), Some("upload-17.cloud.example.com"));
    }

    #[test]
    fn malformed_target_is_invalid_url() {
        let result = resolve_target(&base(), "https://");
        assert!(matches!(result, Err(TransportError::InvalidUrl(_))));
    }

    #[test]
    fn bearer_only_for_api_host() {
        let api = resolve_target(&base(), "/me/videos").unwrap();
        assert!(same_host(&base(), &api));

        let upload = resolve_target(&base(), "https://upload.example.com/u").unwrap();
        assert!(!same_host(&base(), &upload));
    }

    #[test]
    fn config_defaults() {
        let config = ApiConfig::new("tok");
        assert_eq!(config.base_url, "https://api.vimeo.com");
        assert_eq!(config.timeout, Duration::from_secs(60));
        HttpClient::new(config).unwrap();
    }
}
