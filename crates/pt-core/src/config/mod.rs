mod storefront_config;

pub use storefront_config::{
    ApiConfig, CheckoutConfig, ConfigError, StorageConfig, StorefrontConfig,
};
