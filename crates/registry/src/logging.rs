use std::str::FromStr;

use anyhow::Result;
use tracing::subscriber::Subscriber;
use tracing_subscriber::{
    Layer, Registry,
    layer::{Filter, SubscriberExt},
};

/// Configures [`setup_tracing`] output.
#[derive(Clone, Default)]
pub struct TracingConfig {
    /// Export data JSON-formatted
    pub json_format: bool,
}

impl TracingConfig {
    /// Tracing configuration constructor using environment variables
    pub fn from_env() -> Self {
        TracingConfig {
            json_format: std::env::var("JSON_LOGGING")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
        }
    }
}

/// Initializes tracing to stdout.
///
/// Trace filtering defaults to `INFO` and can be configured using the conventional `RUST_LOG`
/// environment variable.
pub fn setup_tracing(cfg: TracingConfig) -> Result<()> {
    let subscriber = Registry::default()
        .with(stdout_layer(cfg.json_format).with_filter(env_or_default_filter()));

    tracing::subscriber::set_global_default(subscriber).map_err(Into::into)
}

fn stdout_layer<S>(
    json_logging: bool,
) -> Box<dyn tracing_subscriber::Layer<S> + Send + Sync + 'static>
where
    S: Subscriber,
    for<'a> S: tracing_subscriber::registry::LookupSpan<'a>,
{
    if json_logging {
        tracing_subscriber::fmt::layer()
            .with_level(true)
            .with_target(true)
            .json()
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .compact()
            .with_level(true)
            .with_target(true)
            .boxed()
    }
}

/// Creates a filter from the `RUST_LOG` env var with a default of `INFO` if unset.
///
/// # Panics
///
/// Panics if `RUST_LOG` fails to parse.
fn env_or_default_filter<S>() -> Box<dyn Filter<S> + Send + Sync + 'static> {
    use tracing::level_filters::LevelFilter;
    use tracing_subscriber::{
        EnvFilter,
        filter::{FilterExt, Targets},
    };

    // `tracing` does not allow differentiating between invalid and missing env var so we manually
    // do this instead. The alternative is to silently ignore parsing errors which I think is worse.
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(rust_log) => FilterExt::boxed(
            EnvFilter::from_str(&rust_log)
                .expect("RUST_LOG should contain a valid filter configuration"),
        ),
        Err(std::env::VarError::NotUnicode(_)) => panic!("RUST_LOG contained non-unicode"),
        Err(std::env::VarError::NotPresent) => {
            FilterExt::boxed(Targets::new().with_default(LevelFilter::INFO))
        },
    }
}
