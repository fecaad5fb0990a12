//! Shopping cart state for the RocketShoes storefront.
//!
//! The crate is built around [`CartStore`], which holds the cart in memory,
//! mirrors it to durable storage after every change, and validates
//! quantities against the catalog's stock before committing them:
//!
//! - **Cart**: line items, pricing summaries, the persistent store
//! - **Catalog**: product and stock lookups over HTTP or in memory
//! - **Notify**: user-facing messages for rejected operations
//! - **Config**: storage key, API location, message texts
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rocketshoes_cart::prelude::*;
//!
//! let config = CartConfig::load("rocketshoes.toml")?;
//! let (notifier, mut toasts) = ChannelNotifier::new();
//! let store = Arc::new(CartStore::open(&config, Arc::new(notifier))?);
//!
//! store.add_product(ProductId::new(1)).await;
//! store.update_product_amount(ProductId::new(1), 3).await;
//!
//! let summary = store.cart().summary()?;
//! println!("Total: {}", summary.total);
//!
//! while let Ok(toast) = toasts.try_recv() {
//!     eprintln!("{}", toast.message);
//! }
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod config;
pub mod notify;

pub use cart::{Cart, CartStore, CartSummary, LineItem, LineSummary, Outcome};
pub use catalog::{Catalog, HttpCatalog, Product, StaticCatalog, StockInfo};
pub use config::{ApiConfig, CartConfig, Messages, StorageConfig};
pub use error::{CartError, CatalogError, ConfigError};
pub use ids::ProductId;
pub use money::Money;
pub use notify::{
    ChannelNotifier, Notification, NotificationKind, Notifier, RecordingNotifier,
    TracingNotifier,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CartError, CatalogError, ConfigError};
    pub use crate::ids::ProductId;
    pub use crate::money::Money;

    // Cart
    pub use crate::cart::{Cart, CartStore, CartSummary, LineItem, LineSummary, Outcome};

    // Catalog
    pub use crate::catalog::{Catalog, HttpCatalog, Product, StaticCatalog, StockInfo};

    // Config
    pub use crate::config::{ApiConfig, CartConfig, Messages, StorageConfig};

    // Notifications
    pub use crate::notify::{
        ChannelNotifier, Notification, NotificationKind, Notifier, RecordingNotifier,
        TracingNotifier,
    };
}
