//! # ServiceClient Trait
//!
//! Provides a common interface for service-specific clients: a wrapper owns an [`RpcClient`],
//! names its error type, and inherits a `send` method that maps framework failures into
//! that error.
use crate::{FrameworkError, RpcClient, RpcService};
use async_trait::async_trait;

/// Trait for service-specific clients to inherit the raw call path.
///
/// # Example
///
/// ```rust
/// use rpc_framework::{FrameworkError, RpcClient, RpcService, ServiceClient};
/// use async_trait::async_trait;
/// use serde::{Deserialize, Serialize};
///
/// struct Echo;
/// #[derive(Debug, Serialize, Deserialize)] struct Say(String);
/// #[derive(Debug, Serialize, Deserialize)] struct Heard(String);
///
/// #[async_trait]
/// impl RpcService for Echo {
///     type Call = Say;
///     type Reply = Heard;
///     const NAME: &'static str = "echo";
///     async fn handle(&self, call: Say) -> Heard { Heard(call.0) }
/// }
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("echo failed: {0}")]
/// struct EchoError(String);
///
/// struct EchoClient { inner: RpcClient<Echo> }
///
/// #[async_trait]
/// impl ServiceClient<Echo> for EchoClient {
///     type Error = EchoError;
///     fn inner(&self) -> &RpcClient<Echo> { &self.inner }
///     fn map_error(e: FrameworkError) -> EchoError { EchoError(e.to_string()) }
/// }
///
/// async fn usage(client: EchoClient) -> Result<String, EchoError> {
///     let Heard(text) = client.send(Say("hi".into())).await?;
///     Ok(text)
/// }
/// ```
#[async_trait]
pub trait ServiceClient<S: RpcService>: Send + Sync {
    /// The service-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic RpcClient.
    fn inner(&self) -> &RpcClient<S>;

    /// Map framework errors to the service-specific error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Send one call and wait for its reply.
    #[tracing::instrument(level = "debug", skip(self), fields(service = S::NAME))]
    async fn send(&self, call: S::Call) -> Result<S::Reply, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().call(call).await.map_err(Self::map_error)
    }
}
