//! Commands of `order-cli`.

use super::{split_command, write_listing, SessionError};
use crate::clients::{InventoryClient, OrderClient};
use crate::model::{OrderId, OrderItem};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

/// One parsed `order-cli` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderCommand {
    /// `P <pid> <qty> [<pid> <qty> ...]`; a bare `P` places an empty order.
    Create(Vec<OrderItem>),
    /// `X <order_id>`
    Cancel(OrderId),
    /// `T`
    Terminate,
}

impl OrderCommand {
    pub fn parse(line: &str) -> Option<Self> {
        let (command, args) = split_command(line)?;
        match command {
            'P' => {
                let numbers = args
                    .split_whitespace()
                    .map(|field| field.parse::<u32>().ok())
                    .collect::<Option<Vec<_>>>()?;
                if numbers.len() % 2 != 0 {
                    return None;
                }
                let items = numbers
                    .chunks_exact(2)
                    .map(|pair| OrderItem::new(pair[0], pair[1]))
                    .collect();
                Some(Self::Create(items))
            }
            'X' => Some(Self::Cancel(OrderId(args.parse().ok()?))),
            'T' => Some(Self::Terminate),
            _ => None,
        }
    }
}

/// Prints the product listing, then runs commands from `input` until `T` or end of input.
///
/// If the opening listing cannot be fetched the failure is reported to `err` and no commands
/// are read.
pub async fn run_order_session<R>(
    inventory: &InventoryClient,
    orders: &OrderClient,
    input: R,
    out: &mut impl Write,
    err: &mut impl Write,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    match inventory.list_products().await {
        Ok(listing) => write_listing(out, &listing)?,
        Err(e) => {
            warn!(error = %e, "Could not list products");
            writeln!(err, "{e}")?;
            return out.flush();
        }
    }

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let Some(command) = OrderCommand::parse(&line) else {
            continue;
        };
        let terminate = command == OrderCommand::Terminate;

        match execute(orders, command, out).await {
            Ok(()) => {}
            Err(SessionError::Io(e)) => return Err(e),
            Err(e) => {
                warn!(error = %e, "Order call failed");
                writeln!(err, "{e}")?;
            }
        }
        if terminate {
            break;
        }
    }
    out.flush()
}

async fn execute(
    orders: &OrderClient,
    command: OrderCommand,
    out: &mut impl Write,
) -> Result<(), SessionError> {
    match command {
        OrderCommand::Create(items) => {
            let created = orders.create_order(items).await?;
            for item in &created.items {
                writeln!(out, "{item}")?;
            }
        }
        OrderCommand::Cancel(order_id) => {
            let status = orders.cancel_order(order_id).await?;
            writeln!(out, "{status}")?;
        }
        OrderCommand::Terminate => {
            let totals = orders.shutdown().await?;
            writeln!(out, "{} {}", totals.total_products, totals.total_orders)?;
        }
    }
    Ok(())
}
