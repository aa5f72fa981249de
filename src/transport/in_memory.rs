#![cfg(feature = "std")]

use tokio::sync::{mpsc, oneshot};

use crate::protocol::ApiRequest;
use crate::transport::Transport;

/// A request received by a [`ServerEndpoint`], answered exactly once.
pub struct Exchange {
    pub request: ApiRequest,
    reply: oneshot::Sender<anyhow::Result<String>>,
}

impl Exchange {
    /// Reply with a response body.
    pub fn respond(self, body: impl Into<String>) {
        let _ = self.reply.send(Ok(body.into()));
    }

    /// Reply with a transport failure.
    pub fn fail(self, reason: impl Into<String>) {
        let reason: String = reason.into();
        let _ = self.reply.send(Err(anyhow::Error::msg(reason)));
    }
}

/// Client half of an in-process channel to a test or demo service.
pub struct InMemoryTransport {
    sender: mpsc::UnboundedSender<Exchange>,
}

/// Service half of [`InMemoryTransport::pair`].
pub struct ServerEndpoint {
    receiver: mpsc::UnboundedReceiver<Exchange>,
}

impl InMemoryTransport {
    pub fn pair() -> (Self, ServerEndpoint) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, ServerEndpoint { receiver })
    }
}

impl ServerEndpoint {
    /// Next pending request, or `None` once every client is dropped.
    pub async fn next(&mut self) -> Option<Exchange> {
        self.receiver.recv().await
    }
}

#[async_trait::async_trait]
impl Transport for InMemoryTransport {
    async fn request(&mut self, request: ApiRequest) -> anyhow::Result<String> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(Exchange { request, reply })
            .map_err(|_| anyhow::anyhow!("Channel closed"))?;
        response
            .await
            .map_err(|_| anyhow::anyhow!("Channel closed before a response arrived"))?
    }
}
