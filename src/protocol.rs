#![cfg(feature = "std")]

//! Request shapes for the game service and the asynchronous API seam.

use std::fmt;

use crate::config::{DEFAULT_INIT_LINK, DEFAULT_TURN_LINK};
use crate::domain::{InitRequest, InitResponse, TurnRequest, TurnResponse};

/// HTTP verbs used by the game service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Post,
    Patch,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Post => f.write_str("POST"),
            Method::Patch => f.write_str("PATCH"),
        }
    }
}

/// A request as handed to a [`crate::transport::Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<serde_json::Value>,
}

/// Service URLs. Turn requests append the cell id to `turn_link`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub init_link: String,
    pub turn_link: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            init_link: DEFAULT_INIT_LINK.to_string(),
            turn_link: DEFAULT_TURN_LINK.to_string(),
        }
    }
}

impl Endpoints {
    pub fn new(init_link: impl Into<String>, turn_link: impl Into<String>) -> Self {
        Self {
            init_link: init_link.into(),
            turn_link: turn_link.into(),
        }
    }

    pub fn init_request(&self, request: &InitRequest) -> anyhow::Result<ApiRequest> {
        Ok(ApiRequest {
            method: Method::Post,
            url: self.init_link.clone(),
            body: Some(serde_json::to_value(request)?),
        })
    }

    pub fn turn_request(&self, request: &TurnRequest) -> ApiRequest {
        ApiRequest {
            method: Method::Patch,
            url: format!("{}{}", self.turn_link, request.cell_id),
            body: None,
        }
    }
}

/// The remote game service as seen by the client.
#[async_trait::async_trait]
pub trait GameApi: Send {
    async fn init(&mut self, request: &InitRequest) -> anyhow::Result<InitResponse>;
    async fn turn(&mut self, request: &TurnRequest) -> anyhow::Result<TurnResponse>;
}
