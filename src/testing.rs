//! Test doubles shared by the unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;

use crate::error::{ApiError, Result};
use crate::models::{Trip, TripStatus, User};
use crate::services::http::{HttpRequest, HttpResponse, HttpTransport};
use crate::services::{ApiClient, SessionService, TripService};
use crate::utils::MemoryTokenStore;

/// Replays scripted responses in order and records every request.
#[derive(Default)]
pub(crate) struct MockTransport {
    responses: RefCell<VecDeque<Result<HttpResponse>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, response: Result<HttpResponse>) {
        self.responses.borrow_mut().push_back(response);
    }

    pub(crate) fn push_json(&self, status: u16, body: &str) {
        self.push(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub(crate) fn push_value(&self, status: u16, body: &impl serde::Serialize) {
        self.push_json(status, &serde_json::to_string(body).unwrap());
    }

    pub(crate) fn push_failure(&self, reason: &str) {
        self.push(Err(ApiError::Transport(reason.to_string())));
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub(crate) fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted response".to_string())))
    }
}

pub(crate) const BASE_URL: &str = "http://localhost:3000/api";

/// Transport, token store and the two services wired to them
pub(crate) struct Harness {
    pub(crate) transport: Rc<MockTransport>,
    pub(crate) tokens: Rc<MemoryTokenStore>,
    pub(crate) session: Rc<SessionService>,
    pub(crate) trips: TripService,
}

impl Harness {
    pub(crate) fn new() -> Self {
        Self::with_tokens(MemoryTokenStore::new())
    }

    pub(crate) fn with_tokens(tokens: MemoryTokenStore) -> Self {
        let transport = Rc::new(MockTransport::new());
        let tokens = Rc::new(tokens);
        let api = ApiClient::new(BASE_URL, transport.clone(), tokens.clone()).unwrap();
        Self {
            transport,
            session: Rc::new(SessionService::new(api.clone(), tokens.clone())),
            trips: TripService::new(api),
            tokens,
        }
    }
}

pub(crate) fn user(name: &str) -> User {
    User {
        id: format!("u-{}", name.to_lowercase()),
        name: name.to_string(),
        email: format!("{}@x.com", name.to_lowercase()),
        role: None,
    }
}

pub(crate) fn trip(id: &str, status: TripStatus) -> Trip {
    Trip {
        id: id.to_string(),
        requester_id: "u-ana".to_string(),
        destination: "Lisbon".to_string(),
        start_date: "2024-05-01".to_string(),
        end_date: "2024-05-03".to_string(),
        status,
        created_at: "2024-04-01T10:00:00Z".to_string(),
        updated_at: "2024-04-01T10:00:00Z".to_string(),
    }
}
