//! # Configuration Loader / 配置加载器
//!
//! Reads the TOML configuration file into [`StorefrontConfig`]. Missing
//! sections and keys fall back to their defaults; values that parse but
//! cannot be used (a zero request timeout) are rejected at load time.

use std::path::{Path, PathBuf};

use anyhow::Context;
use pt_core::config::StorefrontConfig;
use tracing::{debug, info};

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "PASAR_TERNAK_CONFIG";

/// Environment variable carrying the session bearer token.
pub const TOKEN_ENV: &str = "PASAR_TERNAK_TOKEN";

const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns error if the file cannot be read, is not valid TOML for
/// [`StorefrontConfig`], or holds an unusable value.
pub fn load_config(config_path: &Path) -> anyhow::Result<StorefrontConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let config: StorefrontConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config as TOML: {}", config_path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config: {}", config_path.display()))?;
    Ok(config)
}

/// Resolves and loads the configuration for this process.
///
/// Lookup order: `explicit` (the `--config` flag), then `PASAR_TERNAK_CONFIG`,
/// then `config.toml` under the platform config dir. An explicitly named
/// file must exist; the platform default may be absent, in which case the
/// built-in defaults apply. Environment overrides are applied last.
pub fn load_storefront_config(explicit: Option<PathBuf>) -> anyhow::Result<StorefrontConfig> {
    let named = explicit.or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

    let config = match named {
        Some(path) => {
            info!(path = %path.display(), "Loading config");
            load_config(&path)?
        }
        None => match default_config_path().filter(|path| path.exists()) {
            Some(path) => {
                info!(path = %path.display(), "Loading config");
                load_config(&path)?
            }
            None => {
                debug!("No config file found, using defaults");
                StorefrontConfig::default()
            }
        },
    };

    Ok(apply_env_overrides(config, std::env::var(TOKEN_ENV).ok()))
}

/// Applies environment-provided values on top of the file configuration.
pub fn apply_env_overrides(
    mut config: StorefrontConfig,
    token: Option<String>,
) -> StorefrontConfig {
    if let Some(token) = token.filter(|token| !token.trim().is_empty()) {
        config.api.bearer_token = Some(token.trim().to_string());
    }
    config
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pasar-ternak").join(DEFAULT_CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file
    }

    #[test]
    fn test_load_config_reads_valid_toml() {
        let file = write_config(
            r#"
            [api]
            base_url = "https://api.pasarternak.id"
            item_path = "/hewan/get"
            order_path = "/order/new/"
            request_timeout_ms = 2500

            [storage]
            data_dir = "/var/lib/pasar-ternak"
            record_name = "keranjang"

            [checkout]
            redirect_delay_ms = 500
            redirect_route = "/pesanan"
            "#,
        );

        let config = load_config(file.path()).unwrap();

        assert_eq!(config.api.base_url, "https://api.pasarternak.id");
        assert_eq!(config.api.item_path, "/hewan/get");
        assert_eq!(config.api.request_timeout_ms, 2500);
        assert_eq!(
            config.storage.data_dir,
            Some(PathBuf::from("/var/lib/pasar-ternak"))
        );
        assert_eq!(config.storage.record_name, "keranjang");
        assert_eq!(config.checkout.redirect_delay_ms, 500);
        assert_eq!(config.checkout.redirect_route, "/pesanan");
    }

    #[test]
    fn test_load_config_fills_missing_values_with_defaults() {
        let file = write_config(
            r#"
            [api]
            base_url = "http://10.0.0.2:8000"
            "#,
        );

        let config = load_config(file.path()).unwrap();
        let defaults = StorefrontConfig::default();

        assert_eq!(config.api.base_url, "http://10.0.0.2:8000");
        assert_eq!(config.api.order_path, defaults.api.order_path);
        assert_eq!(config.storage, defaults.storage);
        assert_eq!(config.checkout, defaults.checkout);
    }

    #[test]
    fn test_load_config_returns_error_on_invalid_toml() {
        let file = write_config("[api\nbase_url = ");
        let err = load_config(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config as TOML"));
    }

    #[test]
    fn test_load_config_rejects_zero_request_timeout() {
        let file = write_config(
            r#"
            [api]
            request_timeout_ms = 0
            "#,
        );

        let err = load_config(file.path()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("Invalid config"));
        assert!(message.contains("request_timeout_ms must be greater than zero"));
    }

    #[test]
    fn test_load_config_returns_error_when_file_missing() {
        let err = load_config(Path::new("/nonexistent/pasar-ternak.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_token_override_replaces_file_token() {
        let mut config = StorefrontConfig::default();
        config.api.bearer_token = Some("from-file".into());

        let config = apply_env_overrides(config, Some(" from-env \n".into()));
        assert_eq!(config.api.bearer_token.as_deref(), Some("from-env"));

        let config = apply_env_overrides(config, Some("   ".into()));
        assert_eq!(config.api.bearer_token.as_deref(), Some("from-env"));
    }
}
