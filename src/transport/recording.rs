//! In-memory transport that records requests instead of sending them.
//!
//! Used for dry runs from the CLI and for exercising the client without
//! a network.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use futures_util::future::BoxFuture;

use crate::error::ApiResult;
use crate::transport::{ApiRequest, ApiResponse, Transport};

#[derive(Debug, Default)]
struct State {
    requests: Vec<ApiRequest>,
    queued: VecDeque<ApiResult<ApiResponse>>,
}

/// Records every request and answers with queued responses, or `200 OK`
/// once the queue is empty.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    state: Arc<Mutex<State>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result for the next unanswered request.
    pub fn push_response(&self, response: ApiResult<ApiResponse>) {
        self.lock().queued.push_back(response);
    }

    /// Snapshot of all recorded requests, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.lock().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.lock().requests.last().cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("recording transport mutex poisoned")
    }
}

impl Transport for RecordingTransport {
    fn request(&self, request: ApiRequest) -> BoxFuture<'_, ApiResult<ApiResponse>> {
        let reply = {
            let mut state = self.lock();
            tracing::debug!(
                request_id = %request.request_id,
                method = %request.method,
                url = %request.url,
                "Recorded request"
            );
            state.requests.push(request);
            state.queued.pop_front()
        };
        Box::pin(async move { reply.unwrap_or_else(|| Ok(ApiResponse::ok())) })
    }
}
