//! Cart configuration.
//!
//! Every field has a default, so an empty file (or no file) yields a working
//! configuration pointed at a local catalog API.

use std::path::{Path, PathBuf};

use rocketshoes_cache::cache_key;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Where the cart is persisted.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Catalog API location.
    #[serde(default)]
    pub api: ApiConfig,

    /// User-facing messages.
    #[serde(default)]
    pub messages: Messages,
}

impl CartConfig {
    /// Load config from a file. Paths ending in `.json` are parsed as JSON,
    /// anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|source| ConfigError::Json {
                path: display,
                source,
            })
        } else {
            Self::from_toml(&content).map_err(|source| ConfigError::Toml {
                path: display,
                source,
            })
        }
    }

    /// Parse config from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Persistence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Key namespace (default: `@RocketShoes`).
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Key name within the namespace (default: `cart`).
    #[serde(default = "default_key")]
    pub key: String,

    /// Backing file for the native file store.
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

impl StorageConfig {
    /// Fully qualified storage key, e.g. `@RocketShoes:cart`.
    pub fn cart_key(&self) -> String {
        cache_key!(self.namespace.as_str(), self.key)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            key: default_key(),
            path: default_path(),
        }
    }
}

fn default_namespace() -> String {
    "@RocketShoes".to_string()
}

fn default_key() -> String {
    "cart".to_string()
}

fn default_path() -> PathBuf {
    PathBuf::from(".rocketshoes/storage.json")
}

/// Catalog API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL (default: `http://localhost:3333`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Product resource path (default: `/products`).
    #[serde(default = "default_products_path")]
    pub products_path: String,

    /// Stock resource path (default: `/stock`).
    #[serde(default = "default_stock_path")]
    pub stock_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            products_path: default_products_path(),
            stock_path: default_stock_path(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

fn default_products_path() -> String {
    "/products".to_string()
}

fn default_stock_path() -> String {
    "/stock".to_string()
}

/// Texts shown to the user when an operation is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Requested quantity exceeds stock.
    pub out_of_stock: String,
    /// Adding a product failed.
    pub add_failed: String,
    /// Removing a product failed.
    pub remove_failed: String,
    /// Changing a quantity failed.
    pub update_failed: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            out_of_stock: "Quantidade solicitada fora de estoque".to_string(),
            add_failed: "Erro na adição do produto".to_string(),
            remove_failed: "Erro na remoção do produto".to_string(),
            update_failed: "Erro na alteração de quantidade do produto".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CartConfig::default();
        assert_eq!(config.storage.cart_key(), "@RocketShoes:cart");
        assert_eq!(config.api.base_url, "http://localhost:3333");
        assert_eq!(config.messages.out_of_stock, "Quantidade solicitada fora de estoque");
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(CartConfig::from_toml("").unwrap(), CartConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = CartConfig::from_toml(
            r#"
            [storage]
            namespace = "@Staging"

            [api]
            base_url = "https://api.rocketshoes.dev"

            [messages]
            out_of_stock = "Out of stock"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.cart_key(), "@Staging:cart");
        assert_eq!(config.api.base_url, "https://api.rocketshoes.dev");
        assert_eq!(config.api.stock_path, "/stock");
        assert_eq!(config.messages.out_of_stock, "Out of stock");
        assert_eq!(config.messages.add_failed, "Erro na adição do produto");
    }

    #[test]
    fn test_load_json_and_toml_files() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("cart.toml");
        std::fs::write(&toml_path, "[storage]\nkey = \"bag\"\n").unwrap();
        assert_eq!(CartConfig::load(&toml_path).unwrap().storage.cart_key(), "@RocketShoes:bag");

        let json_path = dir.path().join("cart.json");
        std::fs::write(&json_path, r#"{"api": {"base_url": "http://api"}}"#).unwrap();
        assert_eq!(CartConfig::load(&json_path).unwrap().api.base_url, "http://api");
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            CartConfig::load(dir.path().join("missing.toml")),
            Err(ConfigError::Read { .. })
        ));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[storage\n").unwrap();
        assert!(matches!(CartConfig::load(&bad), Err(ConfigError::Toml { .. })));
    }
}
