#![cfg(feature = "std")]

use anyhow::Context;

use crate::domain::{InitRequest, InitResponse, TurnRequest, TurnResponse};
use crate::protocol::{Endpoints, GameApi};
use crate::transport::Transport;

/// [`GameApi`] backed by a [`Transport`]: builds requests from the configured
/// endpoints and parses the JSON bodies that come back.
pub struct RemoteApi<T: Transport> {
    transport: T,
    endpoints: Endpoints,
}

impl<T: Transport> RemoteApi<T> {
    pub fn new(transport: T, endpoints: Endpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }
}

#[async_trait::async_trait]
impl<T: Transport> GameApi for RemoteApi<T> {
    async fn init(&mut self, request: &InitRequest) -> anyhow::Result<InitResponse> {
        let api_request = self.endpoints.init_request(request)?;
        let body = self.transport.request(api_request).await?;
        serde_json::from_str(&body).context("malformed init response")
    }

    async fn turn(&mut self, request: &TurnRequest) -> anyhow::Result<TurnResponse> {
        let api_request = self.endpoints.turn_request(request);
        let body = self.transport.request(api_request).await?;
        serde_json::from_str(&body).context("malformed turn response")
    }
}
