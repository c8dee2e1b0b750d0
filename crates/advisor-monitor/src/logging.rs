//! Logging setup.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Keeps the file writer flushing until dropped. Hold it for the life of
/// the process.
#[must_use = "dropping the guard stops the log file writer"]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// `RUST_LOG` wins over the configured level.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Setup logging with the given level.
///
/// Console output is pretty or JSON. When `file` is given, events are also
/// written as JSON lines to that file through a non-blocking writer.
pub fn setup_logging(level: &str, json: bool, file: Option<&Path>) -> LogGuard {
    let filter = build_filter(level);

    let (file_layer, guard) = match file.and_then(split_path) {
        Some((dir, name)) => {
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init()
    };

    LogGuard { _file: guard }
}

fn split_path(path: &Path) -> Option<(&Path, &std::ffi::OsStr)> {
    let name = path.file_name()?;
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    Some((dir, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_path() {
        let (dir, name) = split_path(Path::new("logs/advisor.log")).unwrap();
        assert_eq!(dir, Path::new("logs"));
        assert_eq!(name, "advisor.log");

        let (dir, _) = split_path(Path::new("advisor.log")).unwrap();
        assert_eq!(dir, Path::new("."));
    }

    #[test]
    fn test_setup_twice_does_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("advisor.log");
        let _first = setup_logging("debug", true, Some(&path));
        let _second = setup_logging("info", false, None);
        tracing::info!("logging initialised");
    }
}
