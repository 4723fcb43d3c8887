//! Request observation.
//!
//! A [`RequestSink`] is handed to the client at build time and receives one
//! [`RequestEvent`] when a request starts and one when it finishes. Nothing
//! is recorded unless a sink is installed.

use std::sync::Arc;
use std::time::Duration;

use crate::error::AlveoError;

/// What happened to a request.
#[derive(Debug)]
pub enum RequestEvent<'a> {
    /// The request is about to be sent.
    Started { url: &'a str, api_key: &'a str },

    /// The body was read in full.
    Completed {
        url: &'a str,
        status: u16,
        elapsed: Duration,
        /// The `Content-Length` the server declared, if any.
        content_length: Option<u64>,
        bytes_read: usize,
    },

    /// The request failed before a body was returned.
    Failed {
        url: &'a str,
        elapsed: Duration,
        error: &'a AlveoError,
    },
}

/// Receives request events from a [`Client`](crate::Client).
///
/// Sinks are shared across every clone of a client and may be called from
/// several threads at once.
pub trait RequestSink: Send + Sync {
    fn record(&self, event: &RequestEvent<'_>);
}

impl<S: RequestSink + ?Sized> RequestSink for Arc<S> {
    fn record(&self, event: &RequestEvent<'_>) {
        (**self).record(event)
    }
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl RequestSink for NoopSink {
    fn record(&self, _event: &RequestEvent<'_>) {}
}

/// Forwards events to the `log` facade at debug level.
///
/// The API key is redacted to its last four characters.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl RequestSink for LogSink {
    fn record(&self, event: &RequestEvent<'_>) {
        match event {
            RequestEvent::Started { url, api_key } => {
                log::debug!("Requesting {} with key {}", url, redact_key(api_key));
            }
            RequestEvent::Completed {
                url,
                status,
                elapsed,
                content_length,
                bytes_read,
            } => {
                log::debug!(
                    "Time {} {:.3}s status={} content_length={:?} read={}",
                    url,
                    elapsed.as_secs_f64(),
                    status,
                    content_length,
                    bytes_read
                );
            }
            RequestEvent::Failed {
                url,
                elapsed,
                error,
            } => {
                log::debug!(
                    "Failed {} after {:.3}s: {}",
                    url,
                    elapsed.as_secs_f64(),
                    error
                );
            }
        }
    }
}

/// Masks all but the last four characters of a key.
pub(crate) fn redact_key(key: &str) -> String {
    let len = key.chars().count();
    if len <= 4 {
        return "****".to_string();
    }
    let tail: String = key.chars().skip(len - 4).collect();
    format!("****{tail}")
}
