use std::cell::RefCell;
use std::collections::VecDeque;

use kvconsole::activity::ActivityLog;
use kvconsole::api::{ConfigApi, HttpRequest, HttpResponse, Transport, TransportError};
use kvconsole::console::Console;

/// Transport that replays scripted responses in order and records requests.
#[derive(Default)]
pub struct MockTransport {
    responses: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, response: HttpResponse) -> &Self {
        self.responses.borrow_mut().push_back(Ok(response));
        self
    }

    pub fn respond_json(&self, status: u16, body: &str) -> &Self {
        self.respond(HttpResponse::json(status, body))
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.responses
            .borrow_mut()
            .push_back(Err(TransportError(message.to_string())));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .borrow()
            .last()
            .cloned()
            .unwrap_or_else(|| panic!("no request was sent"))
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no scripted response".to_string())))
    }
}

/// Console against `http://api` with the activity log disabled.
#[allow(dead_code)]
pub fn console(transport: &MockTransport) -> Console<&MockTransport> {
    Console::new(ConfigApi::new("http://api", transport), ActivityLog::disabled())
}
