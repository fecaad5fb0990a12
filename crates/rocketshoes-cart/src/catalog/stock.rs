//! Stock availability.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Maximum purchasable quantity for a product.
///
/// Always fetched fresh before a quantity-changing operation; never cached.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockInfo {
    /// Product this stock record belongs to.
    pub id: ProductId,
    /// Units available.
    pub amount: u32,
}

impl StockInfo {
    /// Create a stock record.
    pub fn new(id: ProductId, amount: u32) -> Self {
        Self {
            id,
            amount,
        }
    }

    /// Check if a specific quantity is available.
    pub fn can_fulfill(&self, quantity: u64) -> bool {
        quantity <= u64::from(self.amount)
    }

    /// Check if out of stock.
    pub fn is_out_of_stock(&self) -> bool {
        self.amount == 0
    }
}
