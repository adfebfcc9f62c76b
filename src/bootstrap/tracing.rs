//! Tracing configuration
//!
//! Installs a `tracing-subscriber` fmt layer behind an `EnvFilter`. Logs go
//! to stderr so command output on stdout stays clean.

use std::io;

use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Default filter directives when `RUST_LOG` is not set.
fn build_filter_directives(is_dev: bool, verbose: bool) -> Vec<String> {
    let app_level = if is_dev || verbose { "debug" } else { "info" };
    vec![
        if verbose { "info" } else { "warn" }.to_string(),
        format!("pasar_ternak={app_level}"),
        format!("pasar_ternak_lib={app_level}"),
        format!("pt_app={app_level}"),
        format!("pt_infra={app_level}"),
        "hyper=warn".to_string(),
        "reqwest=warn".to_string(),
    ]
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins over the built-in directives. `verbose` raises the
/// defaults for a single run (the CLI's `-v`).
///
/// # Errors
///
/// Returns `Err` if a global subscriber is already registered.
pub fn init_tracing_subscriber(verbose: bool) -> anyhow::Result<()> {
    let filter_directives = build_filter_directives(is_development(), verbose);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives.join(",")));

    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_timer(fmt::time::ChronoLocal::new("%H:%M:%S%.3f".to_string()));

    registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_parse_as_env_filter() {
        for (is_dev, verbose) in [(false, false), (true, false), (false, true)] {
            let directives = build_filter_directives(is_dev, verbose).join(",");
            assert!(EnvFilter::try_new(&directives).is_ok(), "{directives}");
        }
    }

    #[test]
    fn release_defaults_keep_app_at_info() {
        let directives = build_filter_directives(false, false);
        assert!(directives.contains(&"pt_app=info".to_string()));
        assert_eq!(directives[0], "warn");
    }
}
