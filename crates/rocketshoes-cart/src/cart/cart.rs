//! Cart and line item types.

use std::collections::HashMap;

use crate::catalog::{Product, StockInfo};
use crate::error::CartError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A shopping cart.
///
/// An ordered list of line items with at most one entry per product.
/// Serialized as a bare JSON array, which is the persisted form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from existing items.
    ///
    /// Later duplicates of a product id are merged into the first occurrence
    /// by adding their amounts.
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            match cart.items.iter_mut().find(|i| i.id == item.id) {
                Some(existing) => existing.amount = existing.amount.saturating_add(item.amount),
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Iterate over items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units (sum of amounts).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.amount)).sum()
    }

    /// Get an item by product ID.
    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Check if a product is in the cart.
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Amount in cart per product, for "in cart" badges on a product grid.
    pub fn amounts_by_product(&self) -> HashMap<ProductId, u32> {
        self.items.iter().map(|i| (i.id, i.amount)).collect()
    }

    /// Add one unit of `product`.
    ///
    /// A product already in the cart is incremented, and the new amount must
    /// fit within `stock`. A product not yet in the cart is appended with an
    /// amount of 1.
    ///
    /// Returns the resulting amount.
    pub fn add_one(&mut self, product: &Product, stock: &StockInfo) -> Result<u32, CartError> {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == product.id) {
            let candidate = existing
                .amount
                .checked_add(1)
                .ok_or(CartError::Overflow(product.id))?;

            if !stock.can_fulfill(u64::from(candidate)) {
                return Err(CartError::OutOfStock {
                    product_id: product.id,
                    requested: u64::from(candidate),
                    available: stock.amount,
                });
            }

            existing.amount = candidate;
            return Ok(candidate);
        }

        self.items.push(LineItem::from_product(product, 1));
        Ok(1)
    }

    /// Set the amount of a product already in the cart.
    pub fn set_amount(&mut self, id: ProductId, amount: u32) -> Result<(), CartError> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(CartError::NotInCart(id))?;
        item.amount = amount;
        Ok(())
    }

    /// Remove a product, keeping the order of the remaining items.
    pub fn remove(&mut self, id: ProductId) -> Result<LineItem, CartError> {
        let index = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or(CartError::NotInCart(id))?;
        Ok(self.items.remove(index))
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A product entry in the cart with its quantity.
///
/// Field names on the wire follow the catalog API (`title`, `image`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product ID.
    pub id: ProductId,
    /// Product name (denormalized for display).
    #[serde(rename = "title")]
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Product image URL.
    #[serde(rename = "image")]
    pub image_url: String,
    /// Quantity in the cart, at least 1.
    pub amount: u32,
}

impl LineItem {
    /// Create a line item for `product`.
    pub fn from_product(product: &Product, amount: u32) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            amount,
        }
    }

    /// Price times amount, or `None` on overflow.
    pub fn subtotal(&self) -> Option<Money> {
        self.price.try_multiply(i64::from(self.amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64) -> Product {
        Product::new(
            ProductId::new(id),
            format!("Tênis {}", id),
            Money::new(10000 + id as i64),
            format!("https://cdn.example.com/{}.jpg", id),
        )
    }

    fn stock(id: u64, amount: u32) -> StockInfo {
        StockInfo::new(ProductId::new(id), amount)
    }

    #[test]
    fn test_add_new_product_starts_at_one() {
        let mut cart = Cart::new();
        assert_eq!(cart.add_one(&product(5), &stock(5, 3)).unwrap(), 1);

        let item = cart.get(ProductId::new(5)).unwrap();
        assert_eq!(item.amount, 1);
        assert_eq!(item.name, "Tênis 5");
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_add_new_product_ignores_zero_stock() {
        let mut cart = Cart::new();
        assert_eq!(cart.add_one(&product(1), &stock(1, 0)).unwrap(), 1);
    }

    #[test]
    fn test_add_existing_product_increments() {
        let mut cart = Cart::new();
        cart.add_one(&product(1), &stock(1, 3)).unwrap();
        assert_eq!(cart.add_one(&product(1), &stock(1, 3)).unwrap(), 2);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_add_existing_product_beyond_stock() {
        let mut cart = Cart::from_items([LineItem::from_product(&product(1), 2)]);
        let before = cart.clone();

        let err = cart.add_one(&product(1), &stock(1, 2)).unwrap_err();
        assert!(matches!(
            err,
            CartError::OutOfStock { requested: 3, available: 2, .. }
        ));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_set_amount() {
        let mut cart = Cart::from_items([LineItem::from_product(&product(1), 1)]);
        cart.set_amount(ProductId::new(1), 4).unwrap();
        assert_eq!(cart.get(ProductId::new(1)).unwrap().amount, 4);

        assert!(matches!(
            cart.set_amount(ProductId::new(2), 1),
            Err(CartError::NotInCart(_))
        ));
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut cart = Cart::from_items([1, 2, 3].map(|id| LineItem::from_product(&product(id), 1)));

        let removed = cart.remove(ProductId::new(2)).unwrap();
        assert_eq!(removed.id, ProductId::new(2));

        let ids: Vec<u64> = cart.iter().map(|i| i.id.get()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(matches!(
            cart.remove(ProductId::new(2)),
            Err(CartError::NotInCart(_))
        ));
    }

    #[test]
    fn test_from_items_merges_duplicates() {
        let cart = Cart::from_items([
            LineItem::from_product(&product(1), 1),
            LineItem::from_product(&product(2), 1),
            LineItem::from_product(&product(1), 2),
        ]);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().amount, 3);
    }

    #[test]
    fn test_amounts_by_product() {
        let cart = Cart::from_items([
            LineItem::from_product(&product(1), 2),
            LineItem::from_product(&product(7), 1),
        ]);

        let amounts = cart.amounts_by_product();
        assert_eq!(amounts[&ProductId::new(1)], 2);
        assert_eq!(amounts[&ProductId::new(7)], 1);
        assert_eq!(amounts.get(&ProductId::new(3)), None);
    }

    #[test]
    fn test_cart_serializes_as_array() {
        let cart = Cart::from_items([LineItem {
            id: ProductId::new(1),
            name: "Tênis".to_string(),
            price: Money::new(17990),
            image_url: "img".to_string(),
            amount: 2,
        }]);

        let json = serde_json::to_string(&cart).unwrap();
        assert_eq!(
            json,
            r#"[{"id":1,"title":"Tênis","price":179.9,"image":"img","amount":2}]"#
        );
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }
}
