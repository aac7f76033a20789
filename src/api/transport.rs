//! The seam between the client wrapper and the network.
//!
//! [`ConfigApi`](super::ConfigApi) only ever talks to a [`Transport`], so
//! tests can swap in a scripted transport while the binary uses
//! [`UreqTransport`].
use std::fmt;

use thiserror::Error;

/// HTTP methods used against the configuration service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully built request, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Absolute URL, or a path starting with `/` for same-origin requests.
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Attach a JSON body and the matching content type.
    pub fn with_json_body(mut self, body: String) -> Self {
        self.headers
            .push(("Content-Type".to_string(), "application/json".to_string()));
        self.body = Some(body);
        self
    }

    /// Attach a raw body with an optional content type (used by the proxy).
    pub fn with_raw_body(mut self, body: String, content_type: Option<&str>) -> Self {
        if let Some(ct) = content_type {
            self.headers
                .push(("Content-Type".to_string(), ct.to_string()));
        }
        self.body = Some(body);
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Any HTTP response, successful or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: None,
            body: body.into(),
        }
    }

    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: Some("application/json".to_string()),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request could not be sent or no response was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Sends one request and returns whatever response came back.
///
/// Non-2xx statuses are a successful send: status interpretation belongs to
/// the caller.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}

// ---------------------------------------------------------------------------
// ureq transport
// ---------------------------------------------------------------------------

/// Synchronous transport backed by a shared `ureq` agent.
///
/// Same-origin URLs (those starting with `/`) are resolved against the
/// configured upstream origin.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    upstream: String,
}

impl UreqTransport {
    pub fn new(upstream: &str) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            upstream: upstream.trim_end_matches('/').to_string(),
        }
    }

    pub fn upstream(&self) -> &str {
        &self.upstream
    }

    /// Turn a same-origin path into an absolute URL on the upstream.
    pub fn resolve(&self, url: &str) -> String {
        if url.starts_with('/') {
            format!("{}{}", self.upstream, url)
        } else {
            url.to_string()
        }
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = self.resolve(&request.url);
        let mut req = self.agent.request(request.method.as_str(), &url);
        for (name, value) in &request.headers {
            req = req.set(name, value);
        }

        let result = match &request.body {
            Some(body) => req.send_string(body),
            None => req.call(),
        };

        match result {
            Ok(resp) | Err(ureq::Error::Status(_, resp)) => read_response(resp),
            Err(ureq::Error::Transport(err)) => Err(TransportError(err.to_string())),
        }
    }
}

fn read_response(resp: ureq::Response) -> Result<HttpResponse, TransportError> {
    let status = resp.status();
    let content_type = resp.header("Content-Type").map(str::to_string);
    let body = resp
        .into_string()
        .map_err(|e| TransportError(format!("failed to read response body: {e}")))?;

    Ok(HttpResponse {
        status,
        content_type,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_prefixes_same_origin_paths() {
        let transport = UreqTransport::new("http://localhost:8080/");
        assert_eq!(
            transport.resolve("/configs/prod"),
            "http://localhost:8080/configs/prod"
        );
    }

    #[test]
    fn resolve_keeps_absolute_urls() {
        let transport = UreqTransport::new("http://localhost:8080");
        assert_eq!(
            transport.resolve("http://api/configs/prod"),
            "http://api/configs/prod"
        );
    }

    #[test]
    fn json_body_sets_content_type() {
        let req = HttpRequest::new(HttpMethod::Post, "/x").with_json_body("{}".to_string());
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.body.as_deref(), Some("{}"));
    }

    #[test]
    fn success_range() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(301, "").is_success());
        assert!(!HttpResponse::new(500, "").is_success());
    }
}
