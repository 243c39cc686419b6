//! `tracing`-backed body log sink.

use tracing::{error, info};
use url::Url;

use crate::{LogLevel, LogSink};

/// Emits body logs as `tracing` events on the `conduit::body` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn log(&self, level: LogLevel, url: Option<&Url>, content: &str) {
        let url = url.map_or("-", Url::as_str);
        match level {
            LogLevel::Information => info!(target: "conduit::body", url, "{content}"),
            LogLevel::Error => error!(target: "conduit::body", url, "{content}"),
        }
    }
}
