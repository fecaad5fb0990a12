//! Cart persistence across store instances, using the file-backed store.

use std::sync::Arc;

use rocketshoes_cache::{Cache, KeyValueStore, FileStore};
use rocketshoes_cart::prelude::*;

fn catalog() -> Arc<StaticCatalog> {
    Arc::new(
        StaticCatalog::new()
            .with_product(
                Product::new(
                    ProductId::new(1),
                    "Tênis de Caminhada Leve Confortável",
                    Money::from_decimal(179.9),
                    "https://cdn.example.com/tenis1.jpg",
                ),
                3,
            )
            .with_product(
                Product::new(
                    ProductId::new(2),
                    "Tênis VR Caminhada Confortável Detalhes Couro Masculino",
                    Money::from_decimal(139.9),
                    "https://cdn.example.com/tenis2.jpg",
                ),
                5,
            ),
    )
}

fn open(config: &CartConfig, catalog: Arc<StaticCatalog>, notifier: Arc<RecordingNotifier>) -> CartStore {
    let cache = Cache::open_file(config.storage.path.clone()).unwrap();
    CartStore::new(cache, catalog, notifier, config)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[tokio::test]
async fn test_cart_survives_restart() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let mut config = CartConfig::default();
    config.storage.path = dir.path().join("storage.json");

    let catalog = catalog();
    let notifier = Arc::new(RecordingNotifier::new());

    {
        let store = open(&config, catalog.clone(), notifier.clone());
        assert!(store.add_product(ProductId::new(1)).await.is_committed());
        assert!(store.add_product(ProductId::new(2)).await.is_committed());
        assert!(store.update_product_amount(ProductId::new(2), 4).await.is_committed());
        assert!(store.remove_product(ProductId::new(1)).is_committed());
    }

    let store = open(&config, catalog, notifier.clone());
    let cart = store.cart();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.get(ProductId::new(2)).unwrap().amount, 4);

    let summary = cart.summary().unwrap();
    assert_eq!(summary.total.display(), "R$ 559,60");
    assert!(notifier.is_empty());
}

#[tokio::test]
async fn test_raw_storage_format() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let mut config = CartConfig::default();
    config.storage.path = dir.path().join("storage.json");

    let store = open(&config, catalog(), Arc::new(RecordingNotifier::new()));
    assert!(store.add_product(ProductId::new(1)).await.is_committed());

    let raw = FileStore::open(&config.storage.path)
        .unwrap()
        .read("@RocketShoes:cart")
        .unwrap()
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{
            "id": 1,
            "title": "Tênis de Caminhada Leve Confortável",
            "price": 179.9,
            "image": "https://cdn.example.com/tenis1.jpg",
            "amount": 1
        }])
    );
}

#[tokio::test]
async fn test_stock_limit_end_to_end() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let mut config = CartConfig::default();
    config.storage.path = dir.path().join("storage.json");

    let catalog = catalog();
    let notifier = Arc::new(RecordingNotifier::new());
    let store = open(&config, catalog.clone(), notifier.clone());

    for _ in 0..3 {
        assert!(store.add_product(ProductId::new(1)).await.is_committed());
    }
    assert!(store.add_product(ProductId::new(1)).await.is_rejected());

    catalog.set_stock(ProductId::new(1), 4);
    assert!(store.add_product(ProductId::new(1)).await.is_committed());

    assert_eq!(store.cart().get(ProductId::new(1)).unwrap().amount, 4);
    assert_eq!(
        notifier.messages(),
        vec!["Quantidade solicitada fora de estoque"]
    );
}

#[tokio::test]
async fn test_channel_notifier_receives_rejections() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = CartConfig::default();
    config.storage.path = dir.path().join("storage.json");

    let (notifier, mut rx) = ChannelNotifier::new();
    let cache = Cache::open_file(config.storage.path.clone()).unwrap();
    let store = CartStore::new(cache, catalog(), Arc::new(notifier), &config);

    assert!(store.remove_product(ProductId::new(9)).is_rejected());
    assert!(matches!(
        store.update_product_amount(ProductId::new(1), 0).await,
        Outcome::Ignored
    ));

    let toast = rx.recv().await.unwrap();
    assert_eq!(toast.message, "Erro na remoção do produto");
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_corrupt_storage_file_is_replaced() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let mut config = CartConfig::default();
    config.storage.path = dir.path().join("storage.json");
    std::fs::write(&config.storage.path, "{truncated").unwrap();

    let notifier = Arc::new(RecordingNotifier::new());
    let store = open(&config, catalog(), notifier.clone());
    assert!(store.cart().is_empty());

    for _ in 0..3 {
        assert!(store.add_product(ProductId::new(1)).await.is_committed());
    }
    assert_eq!(store.cart().get(ProductId::new(1)).unwrap().amount, 3);
    assert!(notifier.is_empty());

    let reopened = open(&config, catalog(), notifier.clone());
    assert_eq!(reopened.cart().get(ProductId::new(1)).unwrap().amount, 3);
}
