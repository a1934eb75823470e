//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — Rich domain types (validated, business-logic-ready)
//! - `wire.rs` — Raw serde structs matching backend requests and responses
//! - `convert.rs` — `TryFrom`/`From` conversions with validation
//! - `client.rs` — Sub-client with HTTP methods (`http` feature)
//!
//! `cart` and `checkout` are local-only: the cart and its totals, and the
//! checkout state machine that drives the order endpoints.

pub mod analytics;
pub mod cart;
pub mod checkout;
pub mod order;
pub mod product;
pub mod salon;
