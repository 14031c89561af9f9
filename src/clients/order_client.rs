use crate::model::{CancelStatus, OrderId, OrderItem};
use crate::order_service::{CreatedOrder, OrderCall, OrderError, OrderReply, OrderService};
use async_trait::async_trait;
use rpc_framework::{FrameworkError, RpcClient, ServiceClient};
use std::net::SocketAddr;
use tracing::{debug, instrument};

/// Client for interacting with the order service.
///
/// Reservation and compensation happen inside the service; this wrapper only unpacks replies.
#[derive(Clone, Debug)]
pub struct OrderClient {
    inner: RpcClient<OrderService>,
}

/// Totals reported by the order service as it shuts down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShutdownTotals {
    pub total_products: usize,
    pub total_orders: usize,
}

impl OrderClient {
    pub fn new(inner: RpcClient<OrderService>) -> Self {
        Self { inner }
    }

    pub fn remote(addr: SocketAddr) -> Self {
        Self::new(RpcClient::remote(addr))
    }

    #[instrument(level = "debug", skip(self, items), fields(items = items.len()))]
    pub async fn create_order(&self, items: Vec<OrderItem>) -> Result<CreatedOrder, OrderError> {
        debug!(?items, "create_order called");
        match self.send(OrderCall::CreateOrder { items }).await? {
            OrderReply::CreateOrder { order_id, items } => Ok(CreatedOrder { order_id, items }),
            OrderReply::InventoryUnavailable(msg) => Err(OrderError::InventoryUnavailable(msg)),
            _ => Err(OrderError::UnexpectedReply("CreateOrder")),
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn cancel_order(&self, order_id: OrderId) -> Result<CancelStatus, OrderError> {
        match self.send(OrderCall::CancelOrder { order_id }).await? {
            OrderReply::CancelOrder(status) => Ok(status),
            OrderReply::InventoryUnavailable(msg) => Err(OrderError::InventoryUnavailable(msg)),
            _ => Err(OrderError::UnexpectedReply("CancelOrder")),
        }
    }

    /// Stops the inventory service and then the order service.
    #[instrument(level = "debug", skip(self))]
    pub async fn shutdown(&self) -> Result<ShutdownTotals, OrderError> {
        match self.send(OrderCall::Shutdown).await? {
            OrderReply::Shutdown {
                total_products,
                total_orders,
            } => Ok(ShutdownTotals {
                total_products,
                total_orders,
            }),
            _ => Err(OrderError::UnexpectedReply("Shutdown")),
        }
    }
}

#[async_trait]
impl ServiceClient<OrderService> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &RpcClient<OrderService> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        OrderError::ServiceCommunicationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpc_framework::mock::MockClient;

    #[tokio::test]
    async fn test_inventory_unavailable_maps_to_error() {
        let mut mock = MockClient::<OrderService>::new();
        mock.expect_call(OrderCall::CancelOrder {
            order_id: OrderId(3),
        })
        .return_ok(OrderReply::InventoryUnavailable("down".to_string()));

        let client = OrderClient::new(mock.client());
        assert_eq!(
            client.cancel_order(OrderId(3)).await,
            Err(OrderError::InventoryUnavailable("down".to_string()))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_shutdown_totals() {
        let mut mock = MockClient::<OrderService>::new();
        mock.expect_call(OrderCall::Shutdown)
            .return_ok(OrderReply::Shutdown {
                total_products: 4,
                total_orders: 2,
            });

        let client = OrderClient::new(mock.client());
        assert_eq!(
            client.shutdown().await,
            Ok(ShutdownTotals {
                total_products: 4,
                total_orders: 2
            })
        );
        mock.verify();
    }
}
