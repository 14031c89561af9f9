//! # Inventory Client
//!
//! Provides a high-level API for calling the inventory service, in-process or over TCP.
//! It wraps an `RpcClient<InventoryService>` and unpacks each reply into its plain value.
use crate::inventory_service::{InventoryCall, InventoryError, InventoryReply, InventoryService};
use crate::model::{ProductId, ProductListing, StockStatus};
use async_trait::async_trait;
use rpc_framework::{FrameworkError, RpcClient, ServiceClient};
use std::net::SocketAddr;
use tracing::instrument;

/// Client for interacting with the inventory service.
#[derive(Clone, Debug)]
pub struct InventoryClient {
    inner: RpcClient<InventoryService>,
}

impl InventoryClient {
    pub fn new(inner: RpcClient<InventoryService>) -> Self {
        Self { inner }
    }

    /// A client for an inventory service listening at `addr`.
    pub fn remote(addr: SocketAddr) -> Self {
        Self::new(RpcClient::remote(addr))
    }
}

#[async_trait]
impl ServiceClient<InventoryService> for InventoryClient {
    type Error = InventoryError;

    fn inner(&self) -> &RpcClient<InventoryService> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        InventoryError::ServiceCommunicationError(e.to_string())
    }
}

impl InventoryClient {
    #[instrument(level = "debug", skip(self, description))]
    pub async fn add_product(
        &self,
        description: impl Into<String> + Send,
        quantity: u32,
    ) -> Result<ProductId, InventoryError> {
        let call = InventoryCall::AddProduct {
            description: description.into(),
            quantity,
        };
        match self.send(call).await? {
            InventoryReply::AddProduct(id) => Ok(id),
            _ => Err(InventoryError::UnexpectedReply("AddProduct")),
        }
    }

    /// Applies `delta` to a product. Business failures come back as a non-success
    /// [`StockStatus`], not as `Err`.
    #[instrument(level = "debug", skip(self))]
    pub async fn change_quantity(
        &self,
        product_id: ProductId,
        delta: i64,
    ) -> Result<StockStatus, InventoryError> {
        match self
            .send(InventoryCall::ChangeQuantity { product_id, delta })
            .await?
        {
            InventoryReply::ChangeQuantity(status) => Ok(status),
            _ => Err(InventoryError::UnexpectedReply("ChangeQuantity")),
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn list_products(&self) -> Result<Vec<ProductListing>, InventoryError> {
        match self.send(InventoryCall::ListProducts).await? {
            InventoryReply::ListProducts(listing) => Ok(listing),
            _ => Err(InventoryError::UnexpectedReply("ListProducts")),
        }
    }

    /// Stops the inventory service and returns its product count.
    #[instrument(level = "debug", skip(self))]
    pub async fn shutdown(&self) -> Result<usize, InventoryError> {
        match self.send(InventoryCall::Shutdown).await? {
            InventoryReply::Shutdown { total_products } => Ok(total_products),
            _ => Err(InventoryError::UnexpectedReply("Shutdown")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpc_framework::mock::{create_mock_client, expect_request, MockClient};

    #[tokio::test]
    async fn test_change_quantity_unpacks_status() {
        let (client, mut receiver) = create_mock_client::<InventoryService>(10);
        let inventory = InventoryClient::new(client);

        let task =
            tokio::spawn(async move { inventory.change_quantity(ProductId(1), -10).await });

        let (call, responder) = expect_request(&mut receiver)
            .await
            .expect("Expected a call");
        assert_eq!(
            call,
            InventoryCall::ChangeQuantity {
                product_id: ProductId(1),
                delta: -10
            }
        );
        responder
            .send(Ok(InventoryReply::ChangeQuantity(
                StockStatus::InsufficientStock,
            )))
            .unwrap();

        let result = task.await.unwrap();
        assert_eq!(result, Ok(StockStatus::InsufficientStock));
    }

    #[tokio::test]
    async fn test_mismatched_reply_is_an_error() {
        let mut mock = MockClient::<InventoryService>::new();
        mock.expect_call(InventoryCall::ListProducts)
            .return_ok(InventoryReply::Shutdown { total_products: 0 });

        let inventory = InventoryClient::new(mock.client());
        assert_eq!(
            inventory.list_products().await,
            Err(InventoryError::UnexpectedReply("ListProducts"))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_transport_failure_is_surfaced() {
        let mut mock = MockClient::<InventoryService>::new();
        mock.expect_call(InventoryCall::Shutdown)
            .return_err(FrameworkError::Transport("connection refused".to_string()));

        let inventory = InventoryClient::new(mock.client());
        match inventory.shutdown().await {
            Err(InventoryError::ServiceCommunicationError(msg)) => {
                assert!(msg.contains("connection refused"));
            }
            other => panic!("Expected ServiceCommunicationError, got {other:?}"),
        }
        mock.verify();
    }
}
