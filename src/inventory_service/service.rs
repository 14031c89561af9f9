//! RPC façade over the [`InventoryStore`].
//!
//! Maps each [`InventoryCall`] to one store operation and raises the service's shutdown signal
//! on `Shutdown`.

use super::calls::{InventoryCall, InventoryReply};
use super::store::InventoryStore;
use async_trait::async_trait;
use rpc_framework::{RpcService, ShutdownSignal};
use tracing::info;

/// The inventory service hosted by an [`RpcServer`](rpc_framework::RpcServer).
#[derive(Debug)]
pub struct InventoryService {
    store: InventoryStore,
    shutdown: ShutdownSignal,
}

impl InventoryService {
    pub fn new(shutdown: ShutdownSignal) -> Self {
        Self {
            store: InventoryStore::new(),
            shutdown,
        }
    }

    pub fn store(&self) -> &InventoryStore {
        &self.store
    }

    pub fn shutdown_signal(&self) -> &ShutdownSignal {
        &self.shutdown
    }
}

#[async_trait]
impl RpcService for InventoryService {
    type Call = InventoryCall;
    type Reply = InventoryReply;
    const NAME: &'static str = "inventory";

    async fn handle(&self, call: InventoryCall) -> InventoryReply {
        match call {
            InventoryCall::AddProduct {
                description,
                quantity,
            } => InventoryReply::AddProduct(self.store.add_product(description, quantity).await),
            InventoryCall::ChangeQuantity { product_id, delta } => {
                InventoryReply::ChangeQuantity(self.store.change_quantity(product_id, delta).await)
            }
            InventoryCall::ListProducts => {
                InventoryReply::ListProducts(self.store.list_products().await)
            }
            InventoryCall::Shutdown => {
                let total_products = self.store.product_count().await;
                info!(total_products, "Inventory shutting down");
                self.shutdown.raise();
                InventoryReply::Shutdown { total_products }
            }
        }
    }
}
