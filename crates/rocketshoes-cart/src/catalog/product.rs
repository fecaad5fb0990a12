//! Product details as served by the catalog.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Field names on the wire follow the catalog API (`title`, `image`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    #[serde(rename = "title")]
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Product image URL.
    #[serde(rename = "image")]
    pub image_url: String,
}

impl Product {
    /// Create a product.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Money,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            image_url: image_url.into(),
        }
    }
}
