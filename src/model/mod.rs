//! Pure data structures shared by both services and their clients.

pub mod order;
pub mod product;
pub mod status;

pub use order::*;
pub use product::*;
pub use status::*;
