//! Persistent cart state.

use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use rocketshoes_cache::{Cache, CacheError};

use crate::cart::Cart;
use crate::catalog::{Catalog, HttpCatalog};
use crate::config::{CartConfig, Messages};
use crate::error::CartError;
use crate::ids::ProductId;
use crate::notify::{Notification, Notifier};

/// Result of a cart operation.
#[derive(Debug)]
#[must_use]
pub enum Outcome {
    /// The cart changed, and storage reflects the change.
    Committed,
    /// Nothing changed; the user was notified.
    Rejected(CartError),
    /// Nothing changed and nobody was notified.
    Ignored,
}

impl Outcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Outcome::Committed)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }

    /// The rejection cause, if any.
    pub fn error(&self) -> Option<&CartError> {
        match self {
            Outcome::Rejected(err) => Some(err),
            _ => None,
        }
    }
}

/// Shopping cart state, mirrored to durable storage.
///
/// Every operation either commits (memory and storage both updated) or
/// leaves both untouched. Rejections are reported to the [`Notifier`] and
/// returned as [`Outcome::Rejected`]; they never panic or bubble up as
/// errors.
///
/// Methods take `&self`, so one store can be shared (e.g. in an `Arc`)
/// across every component that reads or edits the cart. The in-memory cart
/// is locked only for the synchronous validate-mutate-persist step; remote
/// lookups run unlocked, so two operations on the same product may both
/// pass a stock check against the same stock snapshot.
pub struct CartStore {
    cart: RwLock<Cart>,
    cache: Cache,
    key: String,
    catalog: Arc<dyn Catalog>,
    notifier: Arc<dyn Notifier>,
    messages: Messages,
}

impl CartStore {
    /// Create a store and load the persisted cart.
    ///
    /// The storage key and messages come from `config`.
    pub fn new(
        cache: Cache,
        catalog: Arc<dyn Catalog>,
        notifier: Arc<dyn Notifier>,
        config: &CartConfig,
    ) -> Self {
        let key = config.storage.cart_key();
        let cart = load_cart(&cache, &key);
        Self {
            cart: RwLock::new(cart),
            cache,
            key,
            catalog,
            notifier,
            messages: config.messages.clone(),
        }
    }

    /// Create a store wired to the configured catalog API and the platform's
    /// durable storage (a file natively, Spin key-value on `wasm32`).
    pub fn open(config: &CartConfig, notifier: Arc<dyn Notifier>) -> Result<Self, CacheError> {
        #[cfg(not(target_arch = "wasm32"))]
        let cache = Cache::open_file(config.storage.path.clone())?;
        #[cfg(target_arch = "wasm32")]
        let cache = Cache::open_default()?;

        let catalog = Arc::new(HttpCatalog::new(&config.api));
        Ok(Self::new(cache, catalog, notifier, config))
    }

    /// Snapshot of the current cart.
    pub fn cart(&self) -> Cart {
        self.cart
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Borrow the current cart without cloning it.
    pub fn with_cart<R>(&self, f: impl FnOnce(&Cart) -> R) -> R {
        f(&self.cart.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Storage key holding the serialized cart.
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Re-read the cart from storage, replacing the in-memory copy.
    pub fn reload(&self) {
        let cart = load_cart(&self.cache, &self.key);
        *self.lock_cart() = cart;
    }

    /// Add one unit of a product.
    ///
    /// Fetches product details and stock concurrently. A product already in
    /// the cart is incremented if stock allows; a new product is appended with
    /// an amount of 1.
    pub async fn add_product(&self, product_id: ProductId) -> Outcome {
        let result = self.try_add_product(product_id).await;
        self.finish("add_product", product_id, result, &self.messages.add_failed)
    }

    /// Remove a product from the cart.
    pub fn remove_product(&self, product_id: ProductId) -> Outcome {
        let result = self.mutate(|cart| cart.remove(product_id).map(drop));
        self.finish("remove_product", product_id, result, &self.messages.remove_failed)
    }

    /// Set the amount of a product already in the cart.
    ///
    /// A non-positive `amount` is ignored without notifying anyone.
    pub async fn update_product_amount(&self, product_id: ProductId, amount: i64) -> Outcome {
        if amount <= 0 {
            tracing::debug!(product_id = %product_id, amount, "ignoring non-positive amount");
            return Outcome::Ignored;
        }

        let result = self.try_update_amount(product_id, amount.unsigned_abs()).await;
        self.finish(
            "update_product_amount",
            product_id,
            result,
            &self.messages.update_failed,
        )
    }

    async fn try_add_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let (product, stock) = futures::try_join!(
            self.catalog.get_product(product_id),
            self.catalog.get_stock(product_id)
        )?;

        self.mutate(|cart| cart.add_one(&product, &stock).map(drop))
    }

    async fn try_update_amount(&self, product_id: ProductId, amount: u64) -> Result<(), CartError> {
        let stock = self.catalog.get_stock(product_id).await?;
        if !stock.can_fulfill(amount) {
            return Err(CartError::OutOfStock {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }

        let amount = u32::try_from(amount).map_err(|_| CartError::Overflow(product_id))?;
        self.mutate(|cart| cart.set_amount(product_id, amount))
    }

    /// Apply `f` to a copy of the cart, persist the copy, then commit it.
    ///
    /// The lock is held throughout, so a failed write leaves memory and
    /// storage both on the previous cart.
    fn mutate<F>(&self, f: F) -> Result<(), CartError>
    where
        F: FnOnce(&mut Cart) -> Result<(), CartError>,
    {
        let mut current = self.lock_cart();
        let mut next = current.clone();
        f(&mut next)?;
        self.cache.set(&self.key, &next)?;
        *current = next;
        Ok(())
    }

    fn finish(
        &self,
        operation: &'static str,
        product_id: ProductId,
        result: Result<(), CartError>,
        failure_message: &str,
    ) -> Outcome {
        match result {
            Ok(()) => {
                tracing::debug!(operation, product_id = %product_id, "cart committed");
                Outcome::Committed
            }
            Err(err) => {
                tracing::warn!(operation, product_id = %product_id, error = %err, "cart operation rejected");
                let message: &str = if err.is_out_of_stock() {
                    &self.messages.out_of_stock
                } else {
                    failure_message
                };
                self.notifier.notify(Notification::error(message));
                Outcome::Rejected(err)
            }
        }
    }

    fn lock_cart(&self) -> RwLockWriteGuard<'_, Cart> {
        self.cart.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}

/// Read the persisted cart. Missing or unparsable content yields an empty cart.
fn load_cart(cache: &Cache, key: &str) -> Cart {
    match cache.get::<Cart>(key) {
        Ok(Some(cart)) => {
            tracing::debug!(key, items = cart.len(), "cart loaded");
            Cart::from_items(cart.items().iter().filter(|i| i.amount > 0).cloned())
        }
        Ok(None) => Cart::new(),
        Err(err) => {
            tracing::warn!(key, error = %err, "discarding unreadable cart");
            Cart::new()
        }
    }
}
