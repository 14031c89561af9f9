//! `inventory-server <port> [--workers n]`
//!
//! Serves the inventory until a Shutdown call arrives.

use clap::Parser;
use rpc_framework::tracing::setup_tracing;
use rpc_framework::ShutdownSignal;
use stockroom::inventory_service;
use stockroom::lifecycle::{host, listen_addr, InventoryServerArgs};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();
    let args = InventoryServerArgs::parse();

    let listener = TcpListener::bind(listen_addr(args.port)).await?;
    info!(port = args.port, workers = args.workers, "Starting inventory server");

    let shutdown = ShutdownSignal::new();
    let (server, client) = inventory_service::new(args.workers, shutdown.clone());
    host(listener, server, client, shutdown).await?;
    Ok(())
}
