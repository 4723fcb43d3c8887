//! The shared GET helper every operation goes through.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use super::cancel::CancelToken;
use super::sink::RequestEvent;
use super::{Client, API_KEY_HEADER};
use crate::error::AlveoError;

/// How often a waiting caller checks its cancel token.
const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// A 200 response with its body read in full.
#[derive(Debug)]
struct Fetched {
    status: u16,
    content_length: Option<u64>,
    body: Vec<u8>,
}

impl Client {
    /// Fetches `url` with the API key header and returns the raw body.
    ///
    /// The URL is used verbatim. Any status other than 200 fails with
    /// [`AlveoError::UnexpectedStatus`] and the body is discarded unread.
    ///
    /// # Errors
    /// [`AlveoError::Transport`] when the request cannot be completed,
    /// including timeouts and bodies over the configured size cap.
    /// [`AlveoError::Cancelled`] when the bound cancel token fires.
    pub fn get(&self, url: &str) -> Result<Vec<u8>, AlveoError> {
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Err(AlveoError::Cancelled {
                url: url.to_string(),
            });
        }

        self.sink.record(&RequestEvent::Started {
            url,
            api_key: &self.api_key,
        });
        let start = Instant::now();

        let result = match &self.cancel {
            Some(token) => self.fetch_cancellable(url, token),
            None => fetch(&self.agent, url, &self.api_key, self.max_body_bytes),
        };

        let elapsed = start.elapsed();
        match result {
            Ok(fetched) => {
                self.sink.record(&RequestEvent::Completed {
                    url,
                    status: fetched.status,
                    elapsed,
                    content_length: fetched.content_length,
                    bytes_read: fetched.body.len(),
                });
                Ok(fetched.body)
            }
            Err(error) => {
                self.sink.record(&RequestEvent::Failed {
                    url,
                    elapsed,
                    error: &error,
                });
                Err(error)
            }
        }
    }

    /// Runs the request on a worker thread so the caller can stop waiting.
    ///
    /// The agent's connections are registered with `token`, so cancelling
    /// shuts the socket and the abandoned worker fails at its next read or
    /// write; its result is dropped.
    fn fetch_cancellable(&self, url: &str, token: &CancelToken) -> Result<Fetched, AlveoError> {
        let (tx, rx) = mpsc::channel();
        let agent = self.agent.clone();
        let worker_url = url.to_string();
        let api_key = self.api_key.clone();
        let max_body_bytes = self.max_body_bytes;

        thread::Builder::new()
            .name("alveo-request".to_string())
            .spawn(move || {
                let result = fetch(&agent, &worker_url, &api_key, max_body_bytes);
                // The receiver is gone if the caller already returned Cancelled.
                let _ = tx.send(result);
            })
            .map_err(|source| AlveoError::transport(url, ureq::Error::Io(source)))?;

        loop {
            match rx.recv_timeout(CANCEL_POLL_INTERVAL) {
                Ok(Err(_)) if token.is_cancelled() => {
                    return Err(AlveoError::Cancelled {
                        url: url.to_string(),
                    });
                }
                Ok(result) => return result,
                Err(RecvTimeoutError::Timeout) => {
                    if token.is_cancelled() {
                        return Err(AlveoError::Cancelled {
                            url: url.to_string(),
                        });
                    }
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(AlveoError::transport(
                        url,
                        ureq::Error::Io(std::io::Error::other(
                            "request worker exited without a response",
                        )),
                    ));
                }
            }
        }
    }
}

fn fetch(
    agent: &ureq::Agent,
    url: &str,
    api_key: &str,
    max_body_bytes: u64,
) -> Result<Fetched, AlveoError> {
    let mut response = agent
        .get(url)
        .header(API_KEY_HEADER, api_key)
        .call()
        .map_err(|source| AlveoError::transport(url, source))?;

    let status = response.status().as_u16();
    if status != 200 {
        return Err(AlveoError::UnexpectedStatus {
            status,
            url: url.to_string(),
        });
    }

    let content_length = response
        .headers()
        .get("content-length")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok());

    let body = response
        .body_mut()
        .with_config()
        .limit(max_body_bytes)
        .read_to_vec()
        .map_err(|source| AlveoError::transport(url, source))?;

    Ok(Fetched {
        status,
        content_length,
        body,
    })
}
