#![cfg(feature = "std")]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::protocol::ApiRequest;
use crate::transport::Transport;

/// Requests seen by a [`ScriptedTransport`], shared with the caller.
pub type RequestLog = Arc<Mutex<Vec<ApiRequest>>>;

/// Replays canned response bodies in order and records every request.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: VecDeque<String>,
    log: RequestLog,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
            log: RequestLog::default(),
        }
    }

    pub fn push_response(&mut self, body: impl Into<String>) -> &mut Self {
        self.responses.push_back(body.into());
        self
    }

    /// Handle to the requests issued so far.
    pub fn request_log(&self) -> RequestLog {
        Arc::clone(&self.log)
    }

    pub fn remaining(&self) -> usize {
        self.responses.len()
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn request(&mut self, request: ApiRequest) -> anyhow::Result<String> {
        let summary = format!("{} {}", request.method, request.url);
        self.log
            .lock()
            .map_err(|_| anyhow::anyhow!("request log poisoned"))?
            .push(request);
        self.responses
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("no scripted response left for {}", summary))
    }
}
