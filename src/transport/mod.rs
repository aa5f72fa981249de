use crate::protocol::ApiRequest;

/// Issues one request to the game service and yields the raw response body.
///
/// Implementations own timeouts, retries and error reporting for the wire;
/// the client only sees the final result.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn request(&mut self, request: ApiRequest) -> anyhow::Result<String>;
}

#[cfg(feature = "std")]
pub mod in_memory;
#[cfg(feature = "std")]
pub mod scripted;
