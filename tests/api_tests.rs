//! Client tests over real HTTP.
//!
//! Each test starts a throwaway `tiny_http` service on an ephemeral port and
//! drives it through `UreqTransport`, checking what arrives on the wire.
use std::io::Read;
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use kvconsole::activity::ActivityLog;
use kvconsole::api::{ApiError, ConfigApi, ConfigEntry, UreqTransport};
use kvconsole::console::Console;
use kvconsole::web::dispatch;
use tiny_http::{Method, Response, Server, StatusCode};

/// One request as the fake service saw it.
#[derive(Debug, Clone)]
struct Received {
    method: String,
    url: String,
    body: String,
    content_type: Option<String>,
}

/// Serve exactly `expected` requests, answering each with `respond`.
fn fake_service<F>(expected: usize, respond: F) -> (String, JoinHandle<Vec<Received>>)
where
    F: Fn(&Received) -> (u16, String) + Send + 'static,
{
    let server = Server::http("127.0.0.1:0").expect("bind fake service");
    let addr = server.server_addr().to_ip().expect("ip listener");

    let handle = thread::spawn(move || {
        let mut seen = Vec::new();
        for _ in 0..expected {
            let mut request = server.recv().expect("receive request");
            let mut body = String::new();
            request
                .as_reader()
                .read_to_string(&mut body)
                .expect("read body");
            let received = Received {
                method: request.method().to_string(),
                url: request.url().to_string(),
                body,
                content_type: request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("Content-Type"))
                    .map(|h| h.value.as_str().to_string()),
            };
            let (status, text) = respond(&received);
            request
                .respond(Response::from_string(text).with_status_code(StatusCode(status)))
                .expect("respond");
            seen.push(received);
        }
        seen
    });

    (format!("http://{addr}"), handle)
}

fn client(base_url: &str) -> ConfigApi<UreqTransport> {
    ConfigApi::new(base_url, UreqTransport::new("http://127.0.0.1:9"))
}

#[test]
fn list_configs_over_http() {
    let (base, service) = fake_service(1, |_| (200, r#"[{"key":"a","value":"b"}]"#.to_string()));

    let result = client(&format!("{base}/")).list_configs("prod").unwrap();

    assert_eq!(result, vec![ConfigEntry::new("a", "b")]);
    let seen = service.join().unwrap();
    assert_eq!(seen[0].method, "GET");
    assert_eq!(seen[0].url, "/configs/prod");
    assert!(seen[0].body.is_empty());
}

#[test]
fn create_sends_json_body() {
    let (base, service) = fake_service(1, |_| (201, String::new()));

    client(&base).create_config("stage", "token", "secret").unwrap();

    let seen = service.join().unwrap();
    assert_eq!(seen[0].method, "POST");
    assert_eq!(seen[0].url, "/configs/stage/token");
    assert_eq!(seen[0].content_type.as_deref(), Some("application/json"));
    let body: serde_json::Value = serde_json::from_str(&seen[0].body).unwrap();
    assert_eq!(body, serde_json::json!({ "value": "secret" }));
}

#[test]
fn update_and_delete_resolve_on_no_content() {
    let (base, service) = fake_service(2, |_| (204, String::new()));
    let api = client(&base);

    api.update_config("stage", "token", "new-secret").unwrap();
    api.delete_config("stage", "token").unwrap();

    let seen = service.join().unwrap();
    assert_eq!(seen[0].method, "PUT");
    assert_eq!(seen[0].body, r#"{"value":"new-secret"}"#);
    assert_eq!(seen[1].method, "DELETE");
    assert_eq!(seen[1].url, "/configs/stage/token");
    assert!(seen[1].body.is_empty());
}

#[test]
fn server_error_body_becomes_message() {
    let (base, service) = fake_service(1, |_| (500, "boom".to_string()));

    let err = client(&base).get_config("prod", "missing").unwrap_err();

    assert_eq!(err.to_string(), "boom");
    assert_eq!(err.status(), Some(500));
    service.join().unwrap();
}

#[test]
fn empty_error_body_falls_back_to_status() {
    let (base, service) = fake_service(1, |_| (404, String::new()));

    let err = client(&base).get_config("prod", "missing").unwrap_err();

    assert_eq!(err.to_string(), "Request failed with status 404");
    assert_eq!(err.status(), Some(404));
    service.join().unwrap();
}

#[test]
fn same_origin_resolves_against_upstream() {
    let (base, service) = fake_service(1, |_| (200, r#"{"status":"ok"}"#.to_string()));

    let api = ConfigApi::new("/", UreqTransport::new(&base));
    assert_eq!(api.base_label(), "same-origin (/)");
    api.health().unwrap();

    assert_eq!(service.join().unwrap()[0].url, "/health");
}

#[test]
fn unreachable_host_is_a_network_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let base = format!("http://127.0.0.1:{port}");

    let err = client(&base).health().unwrap_err();

    assert!(matches!(err, ApiError::Network { .. }));
    assert!(
        err.to_string()
            .starts_with(&format!("Failed to fetch API ({base})."))
    );
    assert_eq!(err.status(), None);
}

#[test]
fn console_proxy_reaches_upstream() {
    let (base, service) = fake_service(1, |req| {
        (200, format!(r#"[{{"key":"echo","value":"{}"}}]"#, req.url))
    });

    let api = ConfigApi::new("/", UreqTransport::new(&base));
    let mut console = Console::new(api, ActivityLog::disabled());
    let reply = dispatch(&mut console, &Method::Get, "/configs/prod", None, None);

    assert_eq!(reply.status, 200);
    assert_eq!(reply.body_text(), r#"[{"key":"echo","value":"/configs/prod"}]"#);
    service.join().unwrap();
}
