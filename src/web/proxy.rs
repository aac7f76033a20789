//! Pass-through of `/configs/*`, `/health` and the API docs to the upstream
//! service.
//!
//! Lets browser code and scripts reach the API same-origin on the console's
//! port, the way a frontend dev server proxies API paths.
use tiny_http::Method;

use crate::api::{HttpMethod, HttpRequest, Transport};

use super::Reply;

/// Whether `path` belongs to the service API rather than the console.
pub fn is_api_path(path: &str) -> bool {
    matches!(path, "/health" | "/configs" | "/doc.json" | "/doc.yaml")
        || path.starts_with("/configs/")
}

/// Forward one request. `url` keeps its query string.
pub fn forward<T: Transport>(
    transport: &T,
    method: &Method,
    url: &str,
    body: Option<&str>,
    content_type: Option<&str>,
) -> Reply {
    let Some(method) = map_method(method) else {
        return Reply::text(405, "method not allowed");
    };

    let mut request = HttpRequest::new(method, url);
    if let Some(body) = body.filter(|b| !b.is_empty()) {
        request = request.with_raw_body(body.to_string(), content_type);
    }

    match transport.send(&request) {
        Ok(response) => Reply::from_upstream(response),
        Err(err) => Reply::text(502, &format!("upstream unreachable: {err}")),
    }
}

fn map_method(method: &Method) -> Option<HttpMethod> {
    match method {
        Method::Get => Some(HttpMethod::Get),
        Method::Post => Some(HttpMethod::Post),
        Method::Put => Some(HttpMethod::Put),
        Method::Delete => Some(HttpMethod::Delete),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_paths() {
        assert!(is_api_path("/health"));
        assert!(is_api_path("/configs"));
        assert!(is_api_path("/configs/prod/a"));
        assert!(is_api_path("/doc.json"));
        assert!(is_api_path("/doc.yaml"));
        assert!(!is_api_path("/doc.html"));
        assert!(!is_api_path("/configsx"));
        assert!(!is_api_path("/"));
        assert!(!is_api_path("/entries/create"));
    }

    #[test]
    fn unsupported_methods_are_rejected() {
        assert!(map_method(&Method::Patch).is_none());
        assert_eq!(map_method(&Method::Delete), Some(HttpMethod::Delete));
    }
}
