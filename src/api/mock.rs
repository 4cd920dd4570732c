//! In-memory transport for tests: records requests, replays scripted responses.

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use futures::channel::oneshot;

use super::{ApiRequest, ApiResponse, Transport};
use crate::error::ApiError;

struct Scripted {
    /// Response is held until this fires (or its sender drops)
    gate: Option<oneshot::Receiver<()>>,
    result: Result<ApiResponse, ApiError>,
}

#[derive(Default)]
pub struct MockTransport {
    requests: RefCell<Vec<ApiRequest>>,
    responses: RefCell<VecDeque<Scripted>>,
}

fn reply(status: u16, body: &str) -> Result<ApiResponse, ApiError> {
    Ok(ApiResponse {
        status,
        body: body.to_string(),
    })
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self, gate: Option<oneshot::Receiver<()>>, result: Result<ApiResponse, ApiError>) {
        self.responses.borrow_mut().push_back(Scripted { gate, result });
    }

    pub fn respond(&self, status: u16, body: &str) {
        self.script(None, reply(status, body));
    }

    /// Script a response that is only delivered once the returned sender fires
    pub fn respond_later(&self, status: u16, body: &str) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        self.script(Some(gate), reply(status, body));
        release
    }

    pub fn fail(&self, err: ApiError) {
        self.script(None, Err(err));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.borrow_mut().push(request);
        let next = self.responses.borrow_mut().pop_front();
        let Some(Scripted { gate, result }) = next else {
            return Err(ApiError::Network("no scripted response".to_string()));
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        result
    }
}
