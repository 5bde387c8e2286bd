//! Tracing configuration.
//!
//! Output format is chosen by `TERN_LOG_FORMAT`:
//!
//! - `text` (default): plain `tracing-subscriber` lines
//! - `compact`: abbreviated single lines
//! - `json`: one JSON object per event
//!
//! ```bash
//! TERN_LOG=debug cargo test --test resolution
//! TERN_LOG="tern_registry=trace" TERN_LOG_FORMAT=json cargo bench
//! ```
//!
//! The subscriber is only installed when `TERN_LOG` (or `RUST_LOG`) is set.

use std::sync::Once;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

static INIT: Once = Once::new();

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Compact,
    Json,
}

impl LogFormat {
    /// Parse a format name; unknown names give [`LogFormat::Text`].
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Text,
        }
    }

    /// Read `TERN_LOG_FORMAT`.
    pub fn from_env() -> Self {
        std::env::var("TERN_LOG_FORMAT")
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }
}

/// Build an `EnvFilter` from `TERN_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    match std::env::var("TERN_LOG") {
        Ok(value) => EnvFilter::builder().parse_lossy(value),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Install the global subscriber, once.
///
/// Does nothing when neither `TERN_LOG` nor `RUST_LOG` is set. Output goes
/// to stderr. Later calls, and calls after another subscriber was
/// installed, are no-ops.
pub fn init_tracing() {
    INIT.call_once(|| {
        if std::env::var_os("TERN_LOG").is_none() && std::env::var_os("RUST_LOG").is_none() {
            return;
        }
        let filter = build_filter();
        // try_init: a host application may already own the global default
        let _ = match LogFormat::from_env() {
            LogFormat::Json => Registry::default()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init(),
            LogFormat::Compact => Registry::default()
                .with(filter)
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .try_init(),
            LogFormat::Text => Registry::default()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .try_init(),
        };
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_format_names() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse(" Compact "), LogFormat::Compact);
        assert_eq!(LogFormat::parse("text"), LogFormat::Text);
        assert_eq!(LogFormat::parse("tree"), LogFormat::Text);
    }

    #[test]
    fn init_is_idempotent() {
        init_tracing();
        init_tracing();
    }
}
