//! `inventory-cli <inventory_addr>`: reads inventory commands from stdin.

use clap::Parser;
use rpc_framework::tracing::setup_tracing;
use stockroom::clients::InventoryClient;
use stockroom::commands::run_inventory_session;
use stockroom::lifecycle::InventoryCliArgs;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();
    let args = InventoryCliArgs::parse();

    let client = InventoryClient::remote(args.inventory);
    let stdin = BufReader::new(tokio::io::stdin());
    run_inventory_session(
        &client,
        stdin,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )
    .await?;
    Ok(())
}
