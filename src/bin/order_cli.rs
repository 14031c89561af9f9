//! `order-cli <inventory_addr> <order_addr>`: lists the products, then reads order commands
//! from stdin.

use clap::Parser;
use rpc_framework::tracing::setup_tracing;
use stockroom::clients::{InventoryClient, OrderClient};
use stockroom::commands::run_order_session;
use stockroom::lifecycle::OrderCliArgs;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();
    let args = OrderCliArgs::parse();

    let inventory = InventoryClient::remote(args.inventory);
    let orders = OrderClient::remote(args.orders);
    let stdin = BufReader::new(tokio::io::stdin());
    run_order_session(
        &inventory,
        &orders,
        stdin,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )
    .await?;
    Ok(())
}
