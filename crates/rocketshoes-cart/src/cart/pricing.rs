//! Cart pricing summaries.

use crate::cart::Cart;
use crate::error::CartError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Totals for a cart, as shown on the cart page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartSummary {
    /// Per-line breakdown, in cart order.
    pub lines: Vec<LineSummary>,
    /// Total number of units.
    pub item_count: u64,
    /// Sum of line subtotals.
    pub total: Money,
}

/// Pricing for a single line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineSummary {
    pub id: ProductId,
    pub unit_price: Money,
    pub amount: u32,
    /// `unit_price * amount`.
    pub subtotal: Money,
}

impl Cart {
    /// Calculate per-line subtotals and the cart total.
    ///
    /// Returns error if arithmetic overflow occurs.
    pub fn summary(&self) -> Result<CartSummary, CartError> {
        let mut lines = Vec::with_capacity(self.len());
        let mut total = Money::zero();

        for item in self {
            let subtotal = item.subtotal().ok_or(CartError::Overflow(item.id))?;
            total = total
                .try_add(subtotal)
                .ok_or(CartError::Overflow(item.id))?;
            lines.push(LineSummary {
                id: item.id,
                unit_price: item.price,
                amount: item.amount,
                subtotal,
            });
        }

        Ok(CartSummary {
            lines,
            item_count: self.item_count(),
            total,
        })
    }
}
