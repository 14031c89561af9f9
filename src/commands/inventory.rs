//! Commands of `inventory-cli`.

use super::{split_command, write_listing, SessionError};
use crate::clients::InventoryClient;
use crate::model::ProductId;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

/// One parsed `inventory-cli` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryCommand {
    /// `P <quantity> <description...>`
    AddProduct { quantity: u32, description: String },
    /// `Q <product_id> <delta>`
    ChangeQuantity { product_id: ProductId, delta: i64 },
    /// `L`
    List,
    /// `F`
    Finish,
}

impl InventoryCommand {
    pub fn parse(line: &str) -> Option<Self> {
        let (command, args) = split_command(line)?;
        match command {
            'P' => {
                // The description is the de-duplication key, so it is kept as typed.
                let (quantity, description) = args.split_once(' ')?;
                Some(Self::AddProduct {
                    quantity: quantity.parse().ok()?,
                    description: description.to_string(),
                })
            }
            'Q' => {
                let mut fields = args.split_whitespace();
                let product_id = fields.next()?.parse().ok()?;
                let delta = fields.next()?.parse().ok()?;
                if fields.next().is_some() {
                    return None;
                }
                Some(Self::ChangeQuantity {
                    product_id: ProductId(product_id),
                    delta,
                })
            }
            'L' => Some(Self::List),
            'F' => Some(Self::Finish),
            _ => None,
        }
    }
}

/// Runs commands from `input` against the inventory until `F` or end of input.
///
/// Results go to `out`. A call that fails in transport is reported to `err` and the session
/// moves on to the next line, unless the failed command was `F`.
pub async fn run_inventory_session<R>(
    client: &InventoryClient,
    input: R,
    out: &mut impl Write,
    err: &mut impl Write,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let Some(command) = InventoryCommand::parse(&line) else {
            continue;
        };
        let finish = command == InventoryCommand::Finish;

        match execute(client, command, out).await {
            Ok(()) => {}
            Err(SessionError::Io(e)) => return Err(e),
            Err(e) => {
                warn!(error = %e, "Inventory call failed");
                writeln!(err, "{e}")?;
            }
        }
        if finish {
            break;
        }
    }
    out.flush()
}

async fn execute(
    client: &InventoryClient,
    command: InventoryCommand,
    out: &mut impl Write,
) -> Result<(), SessionError> {
    match command {
        InventoryCommand::AddProduct {
            quantity,
            description,
        } => {
            let id = client.add_product(description, quantity).await?;
            writeln!(out, "{id}")?;
        }
        InventoryCommand::ChangeQuantity { product_id, delta } => {
            let status = client.change_quantity(product_id, delta).await?;
            writeln!(out, "{status}")?;
        }
        InventoryCommand::List => write_listing(out, &client.list_products().await?)?,
        InventoryCommand::Finish => {
            let total_products = client.shutdown().await?;
            writeln!(out, "{total_products}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_product_keeps_spaces_in_description() {
        assert_eq!(
            InventoryCommand::parse("P 10 Blue widget, large"),
            Some(InventoryCommand::AddProduct {
                quantity: 10,
                description: "Blue widget, large".to_string()
            })
        );
    }

    #[test]
    fn test_parse_add_product_keeps_inner_spacing() {
        assert_eq!(
            InventoryCommand::parse("P 10  Widget"),
            Some(InventoryCommand::AddProduct {
                quantity: 10,
                description: " Widget".to_string()
            })
        );
    }

    #[test]
    fn test_parse_change_quantity() {
        assert_eq!(
            InventoryCommand::parse("Q 1 -3"),
            Some(InventoryCommand::ChangeQuantity {
                product_id: ProductId(1),
                delta: -3
            })
        );
    }

    #[test]
    fn test_malformed_lines_are_ignored() {
        for line in ["", "P", "P ten Widget", "P -1 Widget", "P 10", "Q 1", "Q x 2", "Q 1 2 3", "Z"] {
            assert_eq!(InventoryCommand::parse(line), None, "{line:?}");
        }
        assert_eq!(InventoryCommand::parse("L"), Some(InventoryCommand::List));
        assert_eq!(InventoryCommand::parse("F"), Some(InventoryCommand::Finish));
    }
}
