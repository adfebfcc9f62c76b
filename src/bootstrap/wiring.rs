//! # Dependency Injection / 依赖注入模块
//!
//! The only place that depends on `pt-infra` and `pt-app` at once. It
//! builds concrete adapters from [`StorefrontConfig`] and hands them to the
//! use cases as ports. Assembly only, no decisions.

use std::path::PathBuf;
use std::sync::Arc;

use pt_app::usecases::cart::{AddToCart, HydrateSelection, LocalSelectionStore, SelectionViewModel};
use pt_app::usecases::checkout::{CheckoutGate, CheckoutSettings};
use pt_core::config::StorefrontConfig;
use pt_core::ports::{CatalogPort, NavigationPort, NotificationPort, OrderPort, SelectionStoragePort};
use pt_infra::http::{HttpMarketApi, HttpMarketApiConfig};
use pt_infra::storage::{FileSelectionStorage, MemorySelectionStorage};
use tracing::info;

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Data directory resolution failed: {0}")]
    DataDir(String),

    #[error("HTTP client initialization failed: {0}")]
    HttpClient(String),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WiringOptions {
    /// Keep the selection in memory only; nothing touches the disk.
    pub ephemeral: bool,
}

/// Fully assembled cart and checkout engine.
pub struct Storefront {
    pub config: StorefrontConfig,
    pub store: Arc<LocalSelectionStore>,
    pub catalog: Arc<dyn CatalogPort>,
    pub hydrator: Arc<HydrateSelection>,
    pub add_to_cart: AddToCart,
    pub checkout: CheckoutGate,
}

impl Storefront {
    /// A fresh, unmounted view over the persisted selection.
    pub fn selection_view(&self) -> SelectionViewModel {
        SelectionViewModel::new(Arc::clone(&self.store), Arc::clone(&self.hydrator))
    }
}

fn resolve_selection_dir(config: &StorefrontConfig) -> WiringResult<PathBuf> {
    match &config.storage.data_dir {
        Some(dir) => Ok(dir.clone()),
        None => pt_infra::fs::selection_dir().map_err(|e| WiringError::DataDir(format!("{e:#}"))),
    }
}

fn create_storage(
    config: &StorefrontConfig,
    options: WiringOptions,
) -> WiringResult<Arc<dyn SelectionStoragePort>> {
    if options.ephemeral {
        info!("Using in-memory selection storage");
        return Ok(Arc::new(MemorySelectionStorage::new()));
    }
    let dir = resolve_selection_dir(config)?;
    info!(dir = %dir.display(), "Using file selection storage");
    Ok(Arc::new(FileSelectionStorage::new(dir)))
}

/// Builds the storefront from configuration.
///
/// `notifier` and `navigator` are the UI shell; the CLI passes console
/// adapters.
pub fn wire_storefront(
    config: StorefrontConfig,
    options: WiringOptions,
    notifier: Arc<dyn NotificationPort>,
    navigator: Arc<dyn NavigationPort>,
) -> WiringResult<Storefront> {
    let storage = create_storage(&config, options)?;
    let store = Arc::new(LocalSelectionStore::new(
        storage,
        config.storage.record_name.clone(),
    ));

    let api = Arc::new(
        HttpMarketApi::new(HttpMarketApiConfig::from(&config.api))
            .map_err(|e| WiringError::HttpClient(format!("{e:#}")))?,
    );
    let catalog: Arc<dyn CatalogPort> = api.clone();
    let orders: Arc<dyn OrderPort> = api;

    let hydrator = Arc::new(HydrateSelection::new(Arc::clone(&catalog)));
    let add_to_cart = AddToCart::new(Arc::clone(&store), Arc::clone(&notifier));
    let checkout = CheckoutGate::new(
        Arc::clone(&store),
        orders,
        notifier,
        navigator,
        CheckoutSettings::from(&config.checkout),
    );

    Ok(Storefront {
        config,
        store,
        catalog,
        hydrator,
        add_to_cart,
        checkout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ConsoleUi;
    use pt_core::ids::ItemId;
    use tempfile::TempDir;

    fn wire(config: StorefrontConfig, options: WiringOptions) -> Storefront {
        let ui = Arc::new(ConsoleUi::new(true));
        wire_storefront(config, options, ui.clone(), ui).unwrap()
    }

    #[tokio::test]
    async fn file_storage_uses_configured_dir_and_record_name() {
        let dir = TempDir::new().unwrap();
        let mut config = StorefrontConfig::default();
        config.storage.data_dir = Some(dir.path().to_path_buf());
        config.storage.record_name = "keranjang".into();

        let storefront = wire(config, WiringOptions::default());
        storefront.store.add(ItemId::new(3)).await.unwrap();

        let record = std::fs::read_to_string(dir.path().join("keranjang.json")).unwrap();
        assert_eq!(record, r#"[{"hewanId":3}]"#);
    }

    #[tokio::test]
    async fn ephemeral_storage_leaves_the_disk_alone() {
        let dir = TempDir::new().unwrap();
        let mut config = StorefrontConfig::default();
        config.storage.data_dir = Some(dir.path().to_path_buf());

        let storefront = wire(config, WiringOptions { ephemeral: true });
        storefront.store.add(ItemId::new(3)).await.unwrap();

        assert_eq!(storefront.store.read_all().await.len(), 1);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
