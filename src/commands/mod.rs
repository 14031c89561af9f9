//! # Line Commands
//!
//! The stdin protocols of the two command-line clients. A line's first character selects the
//! command and the rest are its arguments; blank, unknown and malformed lines are skipped.
//!
//! Parsing is kept apart from execution so the grammar can be tested without a service, and the
//! sessions write to any [`std::io::Write`] so their output can be captured.

pub mod inventory;
pub mod order;

pub use inventory::*;
pub use order::*;

use crate::inventory_service::InventoryError;
use crate::order_service::OrderError;
use thiserror::Error;

/// Why one command of a session failed.
///
/// Service errors are reported and the session continues; output errors end it.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    #[error(transparent)]
    Order(#[from] OrderError),
}

/// Splits a trimmed, non-empty line into its command character and argument text.
fn split_command(line: &str) -> Option<(char, &str)> {
    let line = line.trim();
    let mut chars = line.chars();
    let command = chars.next()?;
    Some((command, chars.as_str().trim()))
}

/// Prints a listing the way both clients show products: `id quantity description`.
fn write_listing(
    out: &mut impl std::io::Write,
    listing: &[crate::model::ProductListing],
) -> std::io::Result<()> {
    for product in listing {
        writeln!(out, "{product}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_command() {
        assert_eq!(split_command("  P 10 Widget  "), Some(('P', "10 Widget")));
        assert_eq!(split_command("L"), Some(('L', "")));
        assert_eq!(split_command("   "), None);
    }
}
