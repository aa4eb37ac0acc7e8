// SPDX-License-Identifier: MIT
//
// Logging setup.
//
// The terminal belongs to the editor, so log lines can never go to stdout
// or stderr while it runs. Logging is off unless `--log-file` names a
// file; then every `tracing` event at or above the `TILDE_LOG` filter
// (default `info`) is appended there without ANSI colors.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::AppError;

/// Environment variable holding the log filter directives.
pub const FILTER_ENV: &str = "TILDE_LOG";

/// Filter from `TILDE_LOG`, or `info` when unset or unparsable.
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// A subscriber that writes formatted events to `file`.
#[must_use]
pub fn build_subscriber(file: File, filter: EnvFilter) -> impl tracing::Subscriber + Send + Sync {
    let fmt_layer = fmt::layer().with_writer(Arc::new(file)).with_ansi(false);

    tracing_subscriber::registry().with(fmt_layer).with(filter)
}

/// Create (truncating) the log file and install the global subscriber.
///
/// # Errors
///
/// Returns [`AppError::Log`] if the file cannot be created.
pub fn init(path: &Path) -> Result<(), AppError> {
    let file = File::create(path).map_err(|source| AppError::Log {
        path: path.to_path_buf(),
        source,
    })?;

    // A subscriber installed earlier (tests, embedding) wins.
    let _ = build_subscriber(file, env_filter()).try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    #[test]
    fn events_land_in_the_file() {
        let log = tempfile::NamedTempFile::new().unwrap();
        let subscriber = build_subscriber(log.reopen().unwrap(), EnvFilter::new("debug"));

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(rows = 3, "loaded file");
            tracing::trace!("too quiet to show");
        });

        let text = fs::read_to_string(log.path()).unwrap();
        assert!(text.contains("loaded file"), "{text}");
        assert!(text.contains("rows=3"), "{text}");
        assert!(!text.contains("too quiet"), "{text}");
        assert!(!text.contains('\x1b'), "no colors in the log");
    }

    #[test]
    fn filter_drops_lower_levels() {
        let log = tempfile::NamedTempFile::new().unwrap();
        let subscriber = build_subscriber(log.reopen().unwrap(), EnvFilter::new("warn"));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("startup");
            tracing::warn!("odd escape sequence");
        });

        let text = fs::read_to_string(log.path()).unwrap();
        assert!(!text.contains("startup"), "{text}");
        assert!(text.contains("odd escape sequence"), "{text}");
    }

    #[test]
    fn unwritable_path_is_a_log_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = init(&dir.path().join("no/such/dir/tilde.log")).unwrap_err();
        assert!(matches!(err, AppError::Log { .. }), "{err}");
    }
}
