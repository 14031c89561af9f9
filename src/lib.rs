//! # Stockroom
//!
//! Two cooperating services over a small RPC framework: an **inventory** that owns product
//! stock, and an **order** service that reserves stock for each order line and gives it back
//! when the order is cancelled.
//!
//! ## Design
//!
//! ### Concurrent handlers
//! Each service runs on an [`RpcServer`](rpc_framework::RpcServer) with a bounded worker pool,
//! so calls are handled in parallel. The stores protect themselves with two lock tiers: one
//! structural lock for membership and id allocation, and one lock per product or order created
//! when the entity is inserted. Calls on different entities never wait for each other.
//!
//! ### In-band outcomes
//! Unknown products, insufficient stock and unknown orders are ordinary answers
//! ([`StockStatus`](model::StockStatus), [`CancelStatus`](model::CancelStatus)) and keep their
//! integer codes on the wire. Only delivery failures are errors.
//!
//! ### Compensation instead of transactions
//! An order records the inventory's answer for each line. Cancelling releases exactly the
//! lines that were reserved, so the two stores agree again after create + cancel.
//!
//! ## Module Tour
//!
//! - [`model`] - identifiers, order lines and status codes
//! - [`inventory_service`] / [`order_service`] - stores and their RPC services
//! - [`clients`] - typed clients, in-process or over TCP
//! - [`commands`] - the stdin protocols of `inventory-cli` and `order-cli`
//! - [`lifecycle`] - arguments, TCP hosting and the in-process [`StockSystem`](lifecycle::StockSystem)
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run --bin inventory-server -- 5000
//! RUST_LOG=info cargo run --bin order-server -- 5001 127.0.0.1:5000
//! echo "P 10 Widget" | cargo run --bin inventory-cli -- 127.0.0.1:5000
//! ```

pub mod clients;
pub mod commands;
pub mod inventory_service;
pub mod lifecycle;
pub mod model;
pub mod order_service;
