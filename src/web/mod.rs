//! Embedded web console.
//!
//! A synchronous `tiny_http` server that serves the server-rendered console
//! page and its form actions, plus a pass-through of the service API:
//!
//! - `GET /` renders the page from the console state
//! - `POST /env`, `/refresh`, `/entries/*`, `/editor/clear`, `/lookup`,
//!   `/health-check` run one action and redirect back to `/`
//! - `/configs/*`, `/health`, `/doc.json` and `/doc.yaml` are forwarded to
//!   the upstream service
//!
//! Launched via `kvconsole serve` (default: `http://127.0.0.1:5173`).

pub mod form;
pub mod proxy;

use std::io::{Cursor, Read};

use anyhow::{Context, Result};
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

use crate::activity::ActivityLog;
use crate::api::{ConfigApi, HttpResponse, Transport, UreqTransport};
use crate::config::ConsoleConfig;
use crate::console::{Console, Inputs};

use form::Form;

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the console on `config.server.addr`.
///
/// Blocks the current thread. Requests are handled one at a time, so actions
/// never overlap; a failing request never stops the server.
pub fn serve(config: &ConsoleConfig) -> Result<()> {
    let addr = config.server.addr.as_str();
    let transport = UreqTransport::new(&config.api.upstream);
    let api = ConfigApi::new(&config.api.base_url, transport);
    let log = ActivityLog::open_default(config.logging.activity_log);
    let mut console = Console::new(api, log);

    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    println!("kvconsole running at http://{addr}");
    println!("API base: {}", console.api().base_label());
    println!("Upstream: {}", console.api().transport().upstream());
    println!("Press Ctrl+C to stop.\n");

    if config.server.open_browser {
        let _ = open_browser(&format!("http://{addr}"));
    }

    console.check_backend();
    println!("{}", console.state().status.message);

    for request in server.incoming_requests() {
        handle(&mut console, request, config.logging.access_log);
    }

    Ok(())
}

/// Read, dispatch and answer one request.
fn handle<T: Transport>(console: &mut Console<T>, mut request: Request, access_log: bool) {
    let method = request.method().clone();
    let url = request.url().to_string();
    let content_type = request
        .headers()
        .iter()
        .find(|h| h.field.equiv("Content-Type"))
        .map(|h| h.value.as_str().to_string());

    let reply = match read_body(request.as_reader(), &method) {
        Ok(body) => dispatch(console, &method, &url, body.as_deref(), content_type.as_deref()),
        Err(reply) => reply,
    };
    let status = reply.status;

    if let Err(e) = request.respond(reply.into_response()) {
        eprintln!("failed to send response for {method} {url}: {e}");
    }

    if access_log {
        println!(
            "{} {} {} {}",
            method,
            url,
            status,
            chrono::Local::now().format("%H:%M:%S")
        );
    }
}

/// Largest request body accepted, form posts and proxied API writes alike.
pub const MAX_BODY_BYTES: u64 = 1024 * 1024;

/// Read the body of a method that carries one. Oversized bodies are refused
/// with 413, unreadable ones with 400.
fn read_body(reader: impl Read, method: &Method) -> std::result::Result<Option<String>, Reply> {
    if !matches!(
        method,
        Method::Post | Method::Put | Method::Patch | Method::Delete
    ) {
        return Ok(None);
    }

    let mut buf = String::new();
    reader
        .take(MAX_BODY_BYTES + 1)
        .read_to_string(&mut buf)
        .map_err(|e| Reply::text(400, &format!("failed to read request body: {e}")))?;

    if buf.len() as u64 > MAX_BODY_BYTES {
        return Err(Reply::text(413, "request body too large"));
    }
    Ok(Some(buf))
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Route one request to the console or the proxy.
pub fn dispatch<T: Transport>(
    console: &mut Console<T>,
    method: &Method,
    url: &str,
    body: Option<&str>,
    content_type: Option<&str>,
) -> Reply {
    let path = url.split('?').next().unwrap_or(url);

    if proxy::is_api_path(path) {
        return proxy::forward(console.api().transport(), method, url, body, content_type);
    }

    if *method == Method::Get {
        return match path {
            "/" | "/index.html" => Reply::html(console.render()),
            _ => Reply::not_found(),
        };
    }

    if *method != Method::Post {
        return Reply::not_found();
    }

    let form = Form::parse(body.unwrap_or(""));
    keep_typed_inputs(console.inputs_mut(), &form);
    match path {
        "/env" => console.submit_env(form.get("env")),
        "/refresh" => console.refresh(form.get("env")),
        "/entries/create" => console.create(form.get("env"), form.get("key"), form.get("value")),
        "/entries/update" => console.update(form.get("env"), form.get("key"), form.get("value")),
        "/entries/select" => console.select(form.get("target")),
        "/entries/delete" => console.request_delete(form.get("target")),
        "/entries/delete/confirm" => console.resolve_delete(form.get("answer") == "yes"),
        "/editor/clear" => console.clear_editor(),
        "/lookup" => console.lookup(form.get("env"), form.get("lookup_key")),
        "/health-check" => console.check_backend(),
        _ => return Reply::not_found(),
    }

    Reply::redirect("/")
}

/// Carry every posted text field over to the next render, so typing in one
/// section survives an action in another. Fields a form did not post keep
/// their previous value.
fn keep_typed_inputs(inputs: &mut Inputs, form: &Form) {
    let fields = [
        ("env", &mut inputs.env),
        ("key", &mut inputs.key),
        ("value", &mut inputs.value),
        ("lookup_key", &mut inputs.lookup_key),
    ];
    for (name, slot) in fields {
        if let Some(value) = form.field(name) {
            *slot = value.to_string();
        }
    }
}

// ---------------------------------------------------------------------------
// Replies
// ---------------------------------------------------------------------------

/// A response before it is handed to `tiny_http`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: Option<String>,
    pub location: Option<String>,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn html(body: String) -> Self {
        Self {
            status: 200,
            content_type: Some("text/html; charset=utf-8".to_string()),
            location: None,
            body: body.into_bytes(),
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: Some("text/plain; charset=utf-8".to_string()),
            location: None,
            body: body.as_bytes().to_vec(),
        }
    }

    /// `303 See Other`, so the browser follows up with a GET.
    pub fn redirect(location: &str) -> Self {
        Self {
            status: 303,
            content_type: None,
            location: Some(location.to_string()),
            body: Vec::new(),
        }
    }

    pub fn not_found() -> Self {
        Self::text(404, "not found")
    }

    pub fn from_upstream(response: HttpResponse) -> Self {
        Self {
            status: response.status,
            content_type: response.content_type,
            location: None,
            body: response.body.into_bytes(),
        }
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn into_response(self) -> Response<Cursor<Vec<u8>>> {
        let mut response = Response::from_data(self.body).with_status_code(StatusCode(self.status));
        if let Some(value) = self.content_type
            && let Ok(header) = Header::from_bytes("Content-Type", value)
        {
            response = response.with_header(header);
        }
        if let Some(value) = self.location
            && let Ok(header) = Header::from_bytes("Location", value)
        {
            response = response.with_header(header);
        }
        response
    }
}

/// Attempt to open a URL in the system default browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_carries_location() {
        let reply = Reply::redirect("/");
        assert_eq!(reply.status, 303);
        assert_eq!(reply.location.as_deref(), Some("/"));
        assert!(reply.body.is_empty());
    }

    #[test]
    fn upstream_reply_keeps_status_and_type() {
        let reply = Reply::from_upstream(HttpResponse::json(201, "{}"));
        assert_eq!(reply.status, 201);
        assert_eq!(reply.content_type.as_deref(), Some("application/json"));
        assert_eq!(reply.body_text(), "{}");
    }

    #[test]
    fn body_is_read_for_writes_only() {
        assert_eq!(read_body(&b"env=prod"[..], &Method::Get), Ok(None));
        assert_eq!(
            read_body(&b"env=prod"[..], &Method::Post),
            Ok(Some("env=prod".to_string()))
        );
    }

    #[test]
    fn oversized_body_is_refused() {
        let limit = MAX_BODY_BYTES as usize;
        let at_limit = vec![b'a'; limit];
        assert_eq!(
            read_body(&at_limit[..], &Method::Put).map(|b| b.map(|s| s.len())),
            Ok(Some(limit))
        );

        let over = vec![b'a'; limit + 1];
        let reply = read_body(&over[..], &Method::Post).unwrap_err();
        assert_eq!(reply.status, 413);
    }

    #[test]
    fn non_utf8_body_is_bad_request() {
        let reply = read_body(&[0xff, 0xfe][..], &Method::Post).unwrap_err();
        assert_eq!(reply.status, 400);
    }

    #[test]
    fn into_response_sets_status() {
        let response = Reply::not_found().into_response();
        assert_eq!(response.status_code(), StatusCode(404));
    }
}
