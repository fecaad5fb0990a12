//! Cart error types.

use crate::ids::ProductId;
use thiserror::Error;

/// Errors from the catalog and stock lookup.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog has no record for this product.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// The request failed in transport or returned an unexpected status.
    #[error(transparent)]
    Transport(#[from] rocketshoes_data::FetchError),

    /// The lookup backend refused to answer.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Why a cart operation was rejected.
///
/// The user only ever sees the operation's configured message; this type
/// keeps the underlying cause for logs and callers.
#[derive(Error, Debug)]
pub enum CartError {
    /// Requested quantity exceeds available stock.
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: u64,
        available: u32,
    },

    /// Product or stock lookup failed.
    #[error("Lookup failed: {0}")]
    Lookup(#[from] CatalogError),

    /// The product is not in the cart.
    #[error("Product not in cart: {0}")]
    NotInCart(ProductId),

    /// Quantity arithmetic overflowed.
    #[error("Quantity overflow for product {0}")]
    Overflow(ProductId),

    /// Persisting the cart failed.
    #[error("Storage error: {0}")]
    Storage(#[from] rocketshoes_cache::CacheError),
}

impl CartError {
    /// Whether this is a stock rejection rather than a failure.
    pub fn is_out_of_stock(&self) -> bool {
        matches!(self, CartError::OutOfStock { .. })
    }
}

/// Errors loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Could not read the config file.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML parse failure.
    #[error("Failed to parse TOML config {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// JSON parse failure.
    #[error("Failed to parse JSON config {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_stock_message() {
        let err = CartError::OutOfStock {
            product_id: ProductId::new(1),
            requested: 3,
            available: 2,
        };
        assert!(err.is_out_of_stock());
        assert_eq!(
            err.to_string(),
            "Insufficient stock for product 1: requested 3, available 2"
        );
    }

    #[test]
    fn test_lookup_errors_convert() {
        let err: CartError = CatalogError::NotFound(ProductId::new(9)).into();
        assert!(!err.is_out_of_stock());
        assert_eq!(err.to_string(), "Lookup failed: Product not found: 9");
    }
}
