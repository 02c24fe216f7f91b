//! Scripted transport for exercising the pipeline and adapters.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use larder_domain::{ApiRequest, ApiResponse};

use crate::ports::{HttpTransport, TransportError};

/// Replays queued results and records every request it was given.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    replies: Arc<Mutex<VecDeque<Result<ApiResponse, TransportError>>>>,
    sent: Arc<Mutex<Vec<ApiRequest>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response with a JSON body.
    pub fn reply(&self, status: u16, body: &str) -> &Self {
        self.replies
            .lock()
            .push_back(Ok(ApiResponse::new(status, body.as_bytes().to_vec())));
        self
    }

    pub fn fail(&self, error: TransportError) -> &Self {
        self.replies.lock().push_back(Err(error));
        self
    }

    pub fn sent(&self) -> Vec<ApiRequest> {
        self.sent.lock().clone()
    }

    pub fn last(&self) -> ApiRequest {
        self.sent
            .lock()
            .last()
            .cloned()
            .unwrap_or_else(|| ApiRequest::get("/"))
    }
}

impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        self.sent.lock().push(request.clone());
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(ApiResponse::new(200, "null")))
    }
}
