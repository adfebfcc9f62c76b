use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the Pasar Ternak application data root directory.
///
/// # Platform-specific Paths
/// - macOS: ~/Library/Application Support/PasarTernak
/// - Windows: %APPDATA%\PasarTernak
/// - Linux: $XDG_DATA_HOME/pasar-ternak or ~/.local/share/pasar-ternak
///
/// The directory is not created here; callers create it when they first write.
pub fn app_data_dir() -> Result<PathBuf> {
    let base_dir =
        get_platform_data_dir().context("Failed to get platform-specific data directory")?;

    Ok(base_dir.join(app_dir_name()))
}

/// Directory holding the persisted selection records.
pub fn selection_dir() -> Result<PathBuf> {
    Ok(app_data_dir()?.join("selection"))
}

fn app_dir_name() -> &'static str {
    if cfg!(target_os = "linux") {
        "pasar-ternak"
    } else {
        "PasarTernak"
    }
}

fn get_platform_data_dir() -> Result<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        // XDG_DATA_HOME wins over ~/.local/share
        if let Some(xdg_data_home) = std::env::var_os("XDG_DATA_HOME") {
            return Ok(PathBuf::from(xdg_data_home));
        }
    }

    dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Unable to get platform data directory"))
}
