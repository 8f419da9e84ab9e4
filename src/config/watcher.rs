//! Configuration file watcher for threshold hot reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::{load_config, ConfigError};
use crate::config::schema::LoggerConfig;
use crate::logger::Logger;

/// Watches a configuration file and applies threshold changes to a logger.
///
/// Only the level is applied live; sink changes are published on the update
/// channel but take effect when the caller rebuilds its logger.
pub struct ConfigWatcher {
    path: PathBuf,
    logger: Arc<Logger>,
    update_tx: mpsc::UnboundedSender<LoggerConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for accepted configurations.
    pub fn new(path: &Path, logger: Arc<Logger>) -> (Self, mpsc::UnboundedReceiver<LoggerConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                logger,
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file in a background thread.
    ///
    /// Watching stops when the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.path.clone();
        let logger = self.logger.clone();
        let tx = self.update_tx.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => handle_event(&path, &logger, &tx, &event),
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}

fn handle_event(
    path: &Path,
    logger: &Logger,
    tx: &mpsc::UnboundedSender<LoggerConfig>,
    event: &Event,
) {
    if !(event.kind.is_modify() || event.kind.is_create()) {
        return;
    }

    tracing::info!("Config file change detected, reloading...");
    match reload(path, logger) {
        Ok(config) => {
            let _ = tx.send(config);
        }
        Err(e) => {
            tracing::error!("Failed to reload config: {}. Keeping current threshold.", e);
        }
    }
}

/// Load `path` and apply its level to `logger`.
///
/// On any error the logger is left untouched.
pub fn reload(path: &Path, logger: &Logger) -> Result<LoggerConfig, ConfigError> {
    let config = load_config(path)?;
    let threshold = config.severity()?;
    logger.set_threshold(threshold).map_err(ConfigError::Level)?;

    tracing::info!(threshold = %threshold, "Log threshold reloaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::Severity;
    use crate::sink::MemorySink;
    use notify::event::{AccessKind, EventKind, ModifyKind};
    use std::fs;

    fn setup(contents: &str) -> (tempfile::TempDir, PathBuf, Arc<Logger>) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rnlog.toml");
        fs::write(&path, contents).unwrap();
        (dir, path, Arc::new(Logger::new(MemorySink::new())))
    }

    #[test]
    fn test_reload_applies_threshold() {
        let (_dir, path, logger) = setup("level = \"warn\"");

        let config = reload(&path, &logger).unwrap();
        assert_eq!(config.level, "warn");
        assert_eq!(logger.threshold(), Severity::Warn);
    }

    #[test]
    fn test_invalid_reload_keeps_threshold() {
        let (_dir, path, logger) = setup("level = \"error\"");
        reload(&path, &logger).unwrap();

        fs::write(&path, "level = \"shouting\"").unwrap();
        assert!(reload(&path, &logger).is_err());
        assert_eq!(logger.threshold(), Severity::Error);
    }

    #[tokio::test]
    async fn test_modify_event_publishes_config() {
        let (_dir, path, logger) = setup("level = \"debug\"");
        let (watcher, mut rx) = ConfigWatcher::new(&path, logger.clone());

        handle_event(
            &path,
            &logger,
            &watcher.update_tx,
            &Event::new(EventKind::Modify(ModifyKind::Any)),
        );

        let config = rx.recv().await.unwrap();
        assert_eq!(config.level, "debug");
        assert_eq!(logger.threshold(), Severity::Debug);
    }

    #[tokio::test]
    async fn test_access_event_ignored() {
        let (_dir, path, logger) = setup("level = \"info\"");
        let (watcher, mut rx) = ConfigWatcher::new(&path, logger.clone());

        handle_event(
            &path,
            &logger,
            &watcher.update_tx,
            &Event::new(EventKind::Access(AccessKind::Any)),
        );

        assert!(rx.try_recv().is_err());
        assert_eq!(logger.threshold(), Severity::Trace);
    }

    #[test]
    fn test_run_on_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let logger = Arc::new(Logger::new(MemorySink::new()));
        let (watcher, _rx) = ConfigWatcher::new(&dir.path().join("absent.toml"), logger);
        assert!(watcher.run().is_err());
    }

    #[test]
    fn test_run_on_existing_file() {
        let (_dir, path, logger) = setup("level = \"info\"");
        let (watcher, _rx) = ConfigWatcher::new(&path, logger);
        let handle = watcher.run().unwrap();
        drop(handle);
    }
}
