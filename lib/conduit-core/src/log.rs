//! Log sink contract for request/response bodies.

use derive_more::Display;
use url::Url;

/// Severity of a body log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum LogLevel {
    /// Request bodies and successful responses.
    #[display("information")]
    Information,
    /// Bodies of failed responses.
    #[display("error")]
    Error,
}

/// Receives body logs. Logging is fire-and-forget: a sink cannot fail a call.
pub trait LogSink: Send + Sync {
    /// Record `content` (a pretty-printed body) for `url`.
    fn log(&self, level: LogLevel, url: Option<&Url>, content: &str);
}

impl<F> LogSink for F
where
    F: Fn(LogLevel, Option<&Url>, &str) + Send + Sync,
{
    fn log(&self, level: LogLevel, url: Option<&Url>, content: &str) {
        self(level, url, content);
    }
}
