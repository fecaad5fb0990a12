//! Product catalog module.
//!
//! Contains the product and stock types returned by the catalog service and
//! the [`Catalog`] lookup seam with its HTTP and in-memory implementations.

mod lookup;
mod product;
mod stock;

pub use lookup::{Catalog, HttpCatalog, StaticCatalog};
pub use product::Product;
pub use stock::StockInfo;
