//! Logging capability passed into the pipeline and installer.

/// Sink for user-facing log messages.
pub trait Logger: Send + Sync {
    fn info(&self, message: &str);

    fn warn(&self, message: &str);

    fn error(&self, message: &str);

    /// Log a debug message, replacing `{key}` placeholders with matching fields.
    fn debug(&self, message: &str, fields: &[(&str, &str)]);
}

/// Logger backed by `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }

    fn debug(&self, message: &str, fields: &[(&str, &str)]) {
        tracing::debug!("{}", interpolate(message, fields));
    }
}

/// Replace every `{key}` in `message` with the value of the matching field.
///
/// Placeholders without a matching field are left untouched. Substituted
/// values are never scanned again.
pub fn interpolate(message: &str, fields: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(message.len());
    let mut rest = message;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];

        let value = tail.find('}').and_then(|close| {
            let key = &tail[1..close];
            fields
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (*value, close))
        });

        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// In-memory logger for tests.
#[cfg(any(test, feature = "testing"))]
pub mod testing {
    use std::sync::Mutex;

    use super::{interpolate, Logger};

    /// Severity of a recorded entry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Level {
        Debug,
        Info,
        Warn,
        Error,
    }

    /// Records every message it receives.
    #[derive(Debug, Default)]
    pub struct RecordingLogger {
        entries: Mutex<Vec<(Level, String)>>,
    }

    impl RecordingLogger {
        pub fn new() -> Self {
            Self::default()
        }

        /// All recorded entries, oldest first.
        pub fn entries(&self) -> Vec<(Level, String)> {
            self.entries.lock().unwrap().clone()
        }

        /// Messages recorded at `level`.
        pub fn messages(&self, level: Level) -> Vec<String> {
            self.entries()
                .into_iter()
                .filter(|(l, _)| *l == level)
                .map(|(_, m)| m)
                .collect()
        }

        fn push(&self, level: Level, message: String) {
            self.entries.lock().unwrap().push((level, message));
        }
    }

    impl Logger for RecordingLogger {
        fn info(&self, message: &str) {
            self.push(Level::Info, message.to_string());
        }

        fn warn(&self, message: &str) {
            self.push(Level::Warn, message.to_string());
        }

        fn error(&self, message: &str) {
            self.push(Level::Error, message.to_string());
        }

        fn debug(&self, message: &str, fields: &[(&str, &str)]) {
            self.push(Level::Debug, interpolate(message, fields));
        }
    }
}
