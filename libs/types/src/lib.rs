//! Types library for the limit order book
//!
//! Core type definitions shared by the matching core and its callers.
//! Everything here is plain `Copy` data sized for dense, index-addressed
//! tables: no heap-owning fields, no wall-clock timestamps.
//!
//! # Modules
//! - `ids`: Order identifier (dense `u32` registry index)
//! - `numeric`: Price, quantity and volume widths plus the bounded price domain
//! - `order`: Side and order state
//! - `errors`: Error taxonomy

// Public modules
pub mod ids;
pub mod numeric;
pub mod order;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::order::*;
    pub use crate::errors::*;
}
