//! `order-server <port> <inventory_addr> [--workers n]`
//!
//! Serves orders until a Shutdown call arrives. Shutting down also shuts the inventory down.

use clap::Parser;
use rpc_framework::tracing::setup_tracing;
use rpc_framework::ShutdownSignal;
use stockroom::clients::InventoryClient;
use stockroom::lifecycle::{host, listen_addr, OrderServerArgs};
use stockroom::order_service;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();
    let args = OrderServerArgs::parse();

    let listener = TcpListener::bind(listen_addr(args.port)).await?;
    info!(port = args.port, inventory = %args.inventory, workers = args.workers, "Starting order server");

    let shutdown = ShutdownSignal::new();
    let inventory = InventoryClient::remote(args.inventory);
    let (server, client) = order_service::new(args.workers, shutdown.clone(), inventory);
    host(listener, server, client, shutdown).await?;
    Ok(())
}
