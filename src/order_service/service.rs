//! RPC façade over the [`OrderStore`].

use super::calls::{OrderCall, OrderReply};
use super::store::{CreatedOrder, OrderStore};
use crate::clients::InventoryClient;
use async_trait::async_trait;
use rpc_framework::{RpcService, ShutdownSignal};
use tracing::{info, warn};

/// The order service hosted by an [`RpcServer`](rpc_framework::RpcServer).
#[derive(Debug)]
pub struct OrderService {
    store: OrderStore,
    shutdown: ShutdownSignal,
}

impl OrderService {
    pub fn new(inventory: InventoryClient, shutdown: ShutdownSignal) -> Self {
        Self {
            store: OrderStore::new(inventory),
            shutdown,
        }
    }

    pub fn store(&self) -> &OrderStore {
        &self.store
    }

    pub fn shutdown_signal(&self) -> &ShutdownSignal {
        &self.shutdown
    }
}

#[async_trait]
impl RpcService for OrderService {
    type Call = OrderCall;
    type Reply = OrderReply;
    const NAME: &'static str = "order";

    async fn handle(&self, call: OrderCall) -> OrderReply {
        match call {
            OrderCall::CreateOrder { items } => match self.store.create_order(items).await {
                Ok(CreatedOrder { order_id, items }) => OrderReply::CreateOrder { order_id, items },
                Err(e) => OrderReply::InventoryUnavailable(e.to_string()),
            },
            OrderCall::CancelOrder { order_id } => match self.store.cancel_order(order_id).await {
                Ok(status) => OrderReply::CancelOrder(status),
                Err(e) => OrderReply::InventoryUnavailable(e.to_string()),
            },
            OrderCall::Shutdown => {
                // The order service stops even when the inventory is already gone.
                let total_products = match self.store.inventory().shutdown().await {
                    Ok(total) => total,
                    Err(e) => {
                        warn!(error = %e, "Inventory did not acknowledge shutdown");
                        0
                    }
                };
                let total_orders = self.store.open_orders().await;
                info!(total_products, total_orders, "Orders shutting down");
                self.shutdown.raise();
                OrderReply::Shutdown {
                    total_products,
                    total_orders,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory_service::{InventoryCall, InventoryReply, InventoryService};
    use crate::model::{CancelStatus, OrderId, OrderItem, ProductId, StockStatus};
    use rpc_framework::mock::MockClient;
    use rpc_framework::FrameworkError;

    #[tokio::test]
    async fn test_create_and_cancel_replies() {
        let mut mock = MockClient::<InventoryService>::new();
        mock.expect_call(InventoryCall::ChangeQuantity {
            product_id: ProductId(4),
            delta: -1,
        })
        .return_ok(InventoryReply::ChangeQuantity(StockStatus::Committed(0)));
        mock.expect_call(InventoryCall::ChangeQuantity {
            product_id: ProductId(4),
            delta: 1,
        })
        .return_ok(InventoryReply::ChangeQuantity(StockStatus::Committed(1)));

        let service = OrderService::new(InventoryClient::new(mock.client()), ShutdownSignal::new());

        match service
            .handle(OrderCall::CreateOrder {
                items: vec![OrderItem::new(4, 1)],
            })
            .await
        {
            OrderReply::CreateOrder { order_id, items } => {
                assert_eq!(order_id, OrderId(1));
                assert_eq!(items[0].status, StockStatus::Committed(0));
            }
            other => panic!("unexpected reply {other:?}"),
        }

        let cancelled = service
            .handle(OrderCall::CancelOrder {
                order_id: OrderId(1),
            })
            .await;
        assert_eq!(cancelled, OrderReply::CancelOrder(CancelStatus::Cancelled));
        mock.verify();
    }

    #[tokio::test]
    async fn test_inventory_failure_becomes_unavailable_reply() {
        let mut mock = MockClient::<InventoryService>::new();
        mock.expect_call(InventoryCall::ChangeQuantity {
            product_id: ProductId(1),
            delta: -1,
        })
        .return_err(FrameworkError::Transport("connection refused".to_string()));

        let service = OrderService::new(InventoryClient::new(mock.client()), ShutdownSignal::new());
        let reply = service
            .handle(OrderCall::CreateOrder {
                items: vec![OrderItem::new(1, 1)],
            })
            .await;

        match reply {
            OrderReply::InventoryUnavailable(msg) => {
                assert!(msg.contains("order 1"));
                assert!(msg.contains("connection refused"));
            }
            other => panic!("unexpected reply {other:?}"),
        }
        mock.verify();
    }

    #[tokio::test]
    async fn test_shutdown_reports_totals_and_stops_inventory() {
        let mut mock = MockClient::<InventoryService>::new();
        mock.expect_call(InventoryCall::Shutdown)
            .return_ok(InventoryReply::Shutdown { total_products: 3 });

        let service = OrderService::new(InventoryClient::new(mock.client()), ShutdownSignal::new());
        service.store().create_order(Vec::new()).await.unwrap();

        let reply = service.handle(OrderCall::Shutdown).await;
        assert_eq!(
            reply,
            OrderReply::Shutdown {
                total_products: 3,
                total_orders: 1
            }
        );
        assert!(service.shutdown_signal().is_raised());
        mock.verify();
    }
}
