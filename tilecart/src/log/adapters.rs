//! Logger implementations.

use std::fmt::Arguments;
use std::sync::Mutex;

use super::{LogLevel, Logger};

/// Logger that delegates to the `tracing` crate.
///
/// Output depends on the subscriber installed by
/// [`crate::logging::init_logging`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        match level {
            LogLevel::Trace => tracing::trace!("{}", args),
            LogLevel::Debug => tracing::debug!("{}", args),
            LogLevel::Info => tracing::info!("{}", args),
            LogLevel::Warn => tracing::warn!("{}", args),
            LogLevel::Error => tracing::error!("{}", args),
        }
    }
}

/// A logger that discards all messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    #[inline]
    fn log(&self, _level: LogLevel, _args: Arguments<'_>) {}
}

/// A logger that records formatted messages in memory.
///
/// Used by tests that check which tiles a run reported as skipped.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded messages in arrival order.
    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Messages recorded at exactly `level`.
    pub fn messages_at(&self, level: LogLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, msg)| msg)
            .collect()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        let message = args.to_string();
        match self.entries.lock() {
            Ok(mut entries) => entries.push((level, message)),
            Err(poisoned) => poisoned.into_inner().push((level, message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_loggers_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TracingLogger>();
        assert_send_sync::<NoOpLogger>();
        assert_send_sync::<MemoryLogger>();
    }

    #[test]
    fn test_tracing_logger_without_subscriber() {
        let logger: Box<dyn Logger> = Box::new(TracingLogger);
        logger.info(format_args!("no subscriber installed"));
        logger.debug(format_args!("still fine"));
    }

    #[test]
    fn test_noop_logger_as_trait_object() {
        let logger: Arc<dyn Logger> = Arc::new(NoOpLogger);
        logger.warn(format_args!("discarded"));
        logger.error(format_args!("discarded"));
    }

    #[test]
    fn test_memory_logger_filters_by_level() {
        let logger = MemoryLogger::new();
        logger.info(format_args!("phase 1 done"));
        logger.warn(format_args!("tile 2-2113 skipped"));
        logger.info(format_args!("phase 2 done"));

        assert_eq!(
            logger.messages_at(LogLevel::Info),
            vec!["phase 1 done".to_string(), "phase 2 done".to_string()]
        );
        assert_eq!(logger.messages_at(LogLevel::Warn).len(), 1);
        assert!(logger.messages_at(LogLevel::Error).is_empty());
    }

    #[test]
    fn test_memory_logger_shared_across_threads() {
        let logger = Arc::new(MemoryLogger::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let logger = Arc::clone(&logger);
                std::thread::spawn(move || logger.info(format_args!("worker {}", i)))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(logger.entries().len(), 4);
    }
}
