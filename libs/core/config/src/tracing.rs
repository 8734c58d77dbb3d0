//! Process-wide error reporting and log output.

use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, prelude::*};

/// Colored startup error reports with source locations.
///
/// Call first thing in `main`; a second install is ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

fn default_filter(environment: Environment) -> &'static str {
    if environment.is_production() {
        "info,tower_http=info,sea_orm=warn,audit=info"
    } else {
        "debug,tower_http=debug,sea_orm=info,sqlx=warn"
    }
}

/// Install the global subscriber.
///
/// Production writes flattened JSON lines; development writes the pretty
/// multi-line format with targets. `RUST_LOG` replaces the default filter.
/// Both carry `tracing_error::ErrorLayer` so eyre reports include span traces.
/// Later calls are no-ops, which keeps tests that share a process happy.
pub fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(*environment)));

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_error::ErrorLayer::default());

    let result = if environment.is_production() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .try_init()
    };

    match result {
        Ok(()) => info!(?environment, "Tracing initialized"),
        Err(_) => debug!("Tracing already initialized"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_is_quieter_in_production() {
        assert!(default_filter(Environment::Production).starts_with("info"));
        assert!(default_filter(Environment::Development).starts_with("debug"));
    }

    #[test]
    fn test_init_is_idempotent() {
        init_tracing(&Environment::Development);
        init_tracing(&Environment::Production);
    }

    #[test]
    fn test_rust_log_overrides_default() {
        temp_env::with_var("RUST_LOG", Some("warn"), || {
            init_tracing(&Environment::Production);
        });
    }
}
