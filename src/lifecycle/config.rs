//! Command-line configuration of the four binaries.
//!
//! Ports are validated at parse time; endpoints given as `host:port` are resolved once, when
//! the arguments are parsed.

use clap::Parser;
use std::net::{Ipv4Addr, SocketAddr, ToSocketAddrs};
use std::ops::RangeInclusive;

/// Worker pool size when `--workers` is not given.
pub const DEFAULT_WORKERS: usize = 10;

/// Ports a server may listen on.
pub const PORT_RANGE: RangeInclusive<u16> = 2048..=65535;

/// `inventory-server` arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "inventory-server", about = "Serve the product inventory over TCP", version)]
pub struct InventoryServerArgs {
    /// Port to listen on, on every interface.
    #[arg(value_name = "port", value_parser = parse_port)]
    pub port: u16,
    /// Maximum number of calls handled at once.
    #[arg(long, value_name = "n", default_value_t = DEFAULT_WORKERS, value_parser = parse_workers)]
    pub workers: usize,
}

/// `order-server` arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "order-server", about = "Serve orders over TCP, reserving stock from an inventory server", version)]
pub struct OrderServerArgs {
    /// Port to listen on, on every interface.
    #[arg(value_name = "port", value_parser = parse_port)]
    pub port: u16,
    /// Address of the inventory server, as `host:port`.
    #[arg(value_name = "inventory_addr", value_parser = parse_endpoint)]
    pub inventory: SocketAddr,
    /// Maximum number of calls handled at once.
    #[arg(long, value_name = "n", default_value_t = DEFAULT_WORKERS, value_parser = parse_workers)]
    pub workers: usize,
}

/// `inventory-cli` arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "inventory-cli", about = "Send inventory commands read from stdin", version)]
pub struct InventoryCliArgs {
    /// Address of the inventory server, as `host:port`.
    #[arg(value_name = "inventory_addr", value_parser = parse_endpoint)]
    pub inventory: SocketAddr,
}

/// `order-cli` arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "order-cli", about = "Send order commands read from stdin", version)]
pub struct OrderCliArgs {
    /// Address of the inventory server, as `host:port`.
    #[arg(value_name = "inventory_addr", value_parser = parse_endpoint)]
    pub inventory: SocketAddr,
    /// Address of the order server, as `host:port`.
    #[arg(value_name = "order_addr", value_parser = parse_endpoint)]
    pub orders: SocketAddr,
}

/// The address a server binds for `port`: every IPv4 interface.
pub fn listen_addr(port: u16) -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, port))
}

fn parse_port(raw: &str) -> Result<u16, String> {
    let port: u16 = raw
        .parse()
        .map_err(|_| format!("`{raw}` is not a port number"))?;
    if PORT_RANGE.contains(&port) {
        Ok(port)
    } else {
        Err(format!(
            "port {port} is outside {}..={}",
            PORT_RANGE.start(),
            PORT_RANGE.end()
        ))
    }
}

fn parse_workers(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("at least one worker is required".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("`{raw}` is not a worker count")),
    }
}

fn parse_endpoint(raw: &str) -> Result<SocketAddr, String> {
    raw.to_socket_addrs()
        .map_err(|e| format!("cannot resolve `{raw}`: {e}"))?
        .next()
        .ok_or_else(|| format!("`{raw}` resolved to no address"))
}
