//! Catalog and stock lookup.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use rocketshoes_data::{FetchClient, FetchError};
use serde::de::DeserializeOwned;

use crate::catalog::{Product, StockInfo};
use crate::config::ApiConfig;
use crate::error::CatalogError;
use crate::ids::ProductId;

/// Read-only access to product details and stock.
///
/// Implementations resolve or fail; no partial results. The cart treats
/// every failure the same way.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait Catalog: Send + Sync {
    /// Fetch product details.
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError>;

    /// Fetch current stock.
    async fn get_stock(&self, id: ProductId) -> Result<StockInfo, CatalogError>;
}

/// Catalog backed by the storefront's JSON API.
///
/// Issues `GET {base_url}{products_path}/{id}` and
/// `GET {base_url}{stock_path}/{id}`.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: FetchClient,
    products_path: String,
    stock_path: String,
}

impl HttpCatalog {
    /// Create a catalog client from API configuration.
    pub fn new(config: &ApiConfig) -> Self {
        let client = FetchClient::new()
            .with_base_url(config.base_url.clone())
            .with_default_header("Accept", "application/json");
        Self::with_client(client, config)
    }

    /// Use an existing client; only the paths are taken from `config`.
    pub fn with_client(client: FetchClient, config: &ApiConfig) -> Self {
        Self {
            client,
            products_path: config.products_path.trim_end_matches('/').to_string(),
            stock_path: config.stock_path.trim_end_matches('/').to_string(),
        }
    }

    /// Path of a product resource.
    pub fn product_path(&self, id: ProductId) -> String {
        format!("{}/{}", self.products_path, id)
    }

    /// Path of a stock resource.
    pub fn stock_path(&self, id: ProductId) -> String {
        format!("{}/{}", self.stock_path, id)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: String,
        id: ProductId,
    ) -> Result<T, CatalogError> {
        let response = self
            .client
            .get(path)
            .send()
            .await?
            .error_for_status()
            .map_err(|err| not_found_or(err, id))?;
        Ok(response.json()?)
    }
}

fn not_found_or(err: FetchError, id: ProductId) -> CatalogError {
    if err.is_not_found() {
        CatalogError::NotFound(id)
    } else {
        CatalogError::Transport(err)
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl Catalog for HttpCatalog {
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.fetch(self.product_path(id), id).await
    }

    async fn get_stock(&self, id: ProductId) -> Result<StockInfo, CatalogError> {
        self.fetch(self.stock_path(id), id).await
    }
}

/// In-memory catalog.
///
/// Useful for demos and tests: stock can be changed between calls and
/// individual products can be made to fail.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    products: RwLock<HashMap<ProductId, Product>>,
    stock: RwLock<HashMap<ProductId, u32>>,
    failing: RwLock<HashSet<ProductId>>,
    failing_stock: RwLock<HashSet<ProductId>>,
    lookups: AtomicUsize,
}

impl StaticCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`StaticCatalog::insert`].
    pub fn with_product(self, product: Product, stock: u32) -> Self {
        self.insert(product, stock);
        self
    }

    /// Add or replace a product with its stock level.
    pub fn insert(&self, product: Product, stock: u32) {
        let id = product.id;
        self.products
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, product);
        self.set_stock(id, stock);
    }

    /// Change the stock level of a product.
    pub fn set_stock(&self, id: ProductId, amount: u32) {
        self.stock
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, amount);
    }

    /// Make every lookup for `id` fail until [`StaticCatalog::recover`].
    pub fn fail_on(&self, id: ProductId) {
        self.failing
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id);
    }

    /// Make only stock lookups for `id` fail; product details still resolve.
    pub fn fail_stock_on(&self, id: ProductId) {
        self.failing_stock
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id);
    }

    /// Undo [`StaticCatalog::fail_on`] and [`StaticCatalog::fail_stock_on`].
    pub fn recover(&self, id: ProductId) {
        self.failing
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
        self.failing_stock
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
    }

    /// Total number of lookups served (successful or not).
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn check(&self, id: ProductId) -> Result<(), CatalogError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let failing = self.failing.read().unwrap_or_else(PoisonError::into_inner);
        if failing.contains(&id) {
            return Err(CatalogError::Unavailable(format!("lookup for {} failed", id)));
        }
        Ok(())
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl Catalog for StaticCatalog {
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.check(id)?;
        self.products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    async fn get_stock(&self, id: ProductId) -> Result<StockInfo, CatalogError> {
        self.check(id)?;
        let failing = self
            .failing_stock
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&id);
        if failing {
            return Err(CatalogError::Unavailable(format!("stock lookup for {} failed", id)));
        }
        self.stock
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .map(|amount| StockInfo::new(id, *amount))
            .ok_or(CatalogError::NotFound(id))
    }
}
