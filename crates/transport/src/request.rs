use http::Method;

/// Request payload variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Json(serde_json::Value),
    Bytes(Vec<u8>),
}

/// One HTTP request to hand to a [`Transport`](crate::Transport).
///
/// `target` is either a path resolved against the API host (`/me/videos`)
/// or an absolute URL — upload endpoints live on dedicated hosts outside
/// the API domain.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub target: String,
    pub body: Body,
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    fn new(method: Method, target: impl Into<String>) -> Self {
        Self {
            method,
            target: target.into(),
            body: Body::Empty,
            headers: Vec::new(),
        }
    }

    pub fn get(target: impl Into<String>) -> Self {
        Self::new(Method::GET, target)
    }

    pub fn post(target: impl Into<String>) -> Self {
        Self::new(Method::POST, target)
    }

    pub fn put(target: impl Into<String>) -> Self {
        Self::new(Method::PUT, target)
    }

    pub fn patch(target: impl Into<String>) -> Self {
        Self::new(Method::PATCH, target)
    }

    pub fn delete(target: impl Into<String>) -> Self {
        Self::new(Method::DELETE, target)
    }

    /// Attaches a JSON payload.
    pub fn json(mut self, payload: serde_json::Value) -> Self {
        self.body = Body::Json(payload);
        self
    }

    /// Attaches a raw byte payload.
    pub fn bytes(mut self, payload: Vec<u8>) -> Self {
        self.body = Body::Bytes(payload);
        self
    }

    /// Adds a request header, e.g. `Content-Range` for chunk writes.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}
