//! The in-process [`StockSystem`].

use super::config::DEFAULT_WORKERS;
use crate::clients::{InventoryClient, OrderClient};
use crate::{inventory_service, order_service};
use rpc_framework::ShutdownSignal;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Both services running in this process, wired through local channels.
///
/// `StockSystem` starts the inventory service first and hands its client to the order service.
/// It is what the integration tests drive, and it can embed the whole system in another
/// program without any sockets.
///
/// # Example
///
/// ```rust
/// use stockroom::lifecycle::StockSystem;
/// use stockroom::model::{OrderItem, StockStatus};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let system = StockSystem::new();
///
///     let bolt = system.inventory.add_product("Bolt", 3).await?;
///     let order = system.orders.create_order(vec![OrderItem::new(bolt, 2)]).await?;
///     assert_eq!(order.items[0].status, StockStatus::Committed(1));
///
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct StockSystem {
    /// Client for the inventory service
    pub inventory: InventoryClient,

    /// Client for the order service
    pub orders: OrderClient,

    inventory_shutdown: ShutdownSignal,
    order_shutdown: ShutdownSignal,

    /// Server tasks, order service last
    handles: Vec<JoinHandle<()>>,
}

impl StockSystem {
    /// Starts both services with the default worker pool size.
    pub fn new() -> Self {
        Self::with_workers(DEFAULT_WORKERS)
    }

    pub fn with_workers(workers: usize) -> Self {
        let inventory_shutdown = ShutdownSignal::new();
        let order_shutdown = ShutdownSignal::new();

        let (inventory_server, inventory_client) =
            inventory_service::new(workers, inventory_shutdown.clone());
        let inventory = InventoryClient::new(inventory_client);

        let (order_server, order_client) =
            order_service::new(workers, order_shutdown.clone(), inventory.clone());

        let handles = vec![
            tokio::spawn(inventory_server.run()),
            tokio::spawn(order_server.run()),
        ];

        Self {
            inventory,
            orders: OrderClient::new(order_client),
            inventory_shutdown,
            order_shutdown,
            handles,
        }
    }

    /// Raises both shutdown signals and waits for the servers to drain.
    ///
    /// Safe to call after a Shutdown call has already stopped the services.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        self.order_shutdown.raise();
        self.inventory_shutdown.raise();
        self.join().await
    }

    /// Waits for both servers to stop on their own, after a Shutdown call.
    pub async fn join(self) -> Result<(), String> {
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Server task failed: {:?}", e);
                return Err(format!("Server task failed: {:?}", e));
            }
        }
        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for StockSystem {
    fn default() -> Self {
        Self::new()
    }
}
