//! Shopping cart module.
//!
//! Contains the cart and line item types, pricing summaries, and the
//! persistent [`CartStore`].

mod cart;
mod pricing;
mod store;

pub use cart::{Cart, LineItem};
pub use pricing::{CartSummary, LineSummary};
pub use store::{CartStore, Outcome};
