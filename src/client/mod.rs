//! The Alveo API client.
//!
//! Each operation formats a URL, performs one authenticated GET through
//! [`Client::get`] and decodes the body into a record from [`crate::model`].
//! There is no retry, caching or pagination: one call is one request.
//!
//! # Threading
//!
//! [`Client`] is `Clone + Send + Sync`. Clones share the underlying
//! [`ureq::Agent`], which is safe for concurrent use, so the same client can
//! serve several threads at once.
//!
//! # Cancellation
//!
//! A client bound to a [`CancelToken`] gets its own agent whose connections
//! are registered with the token. Cancelling shuts those connections down,
//! so the server sees the request abandoned. Such agents connect directly and
//! ignore proxy settings from the environment.

mod cancel;
mod request;
mod sink;
mod transport;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use ureq::unversioned::resolver::DefaultResolver;
use ureq::unversioned::transport::{Connector, RustlsConnector};

use crate::error::AlveoError;
use crate::model::io_json::from_json_slice;
use crate::model::legacy::LegacyAnnotationList;
use crate::model::{AnnotationList, ApiVersion, Item, ItemList, ItemLists};

pub use cancel::CancelToken;
pub use sink::{LogSink, NoopSink, RequestEvent, RequestSink};

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Default limit on a whole request, from connect to the last body byte.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default cap on a response body.
pub const DEFAULT_MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

/// A blocking client for one archive deployment and one API key.
#[derive(Clone)]
pub struct Client {
    base_url: String,
    api_key: String,
    agent: ureq::Agent,
    timeout: Duration,
    max_body_bytes: u64,
    sink: Arc<dyn RequestSink>,
    cancel: Option<CancelToken>,
}

impl Client {
    /// Creates a client with default settings.
    ///
    /// # Errors
    /// Returns [`AlveoError::InvalidConfig`] if either argument is empty.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, AlveoError> {
        ClientBuilder::new(base_url, api_key).build()
    }

    /// Starts configuring a client.
    pub fn builder(base_url: impl Into<String>, api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(base_url, api_key)
    }

    /// The base URL exactly as configured.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns a clone of this client whose calls abort when `token` is cancelled.
    pub fn with_cancel_token(&self, token: CancelToken) -> Self {
        Self {
            agent: build_agent(self.timeout, Some(&token)),
            cancel: Some(token),
            ..self.clone()
        }
    }

    /// Returns the API version the server reports.
    pub fn get_version(&self) -> Result<ApiVersion, AlveoError> {
        let url = self.endpoint("version.json");
        self.get_json("get_version", &url)
    }

    /// Fetches the item list with the given numeric id.
    pub fn get_item_list(&self, id: u64) -> Result<ItemList, AlveoError> {
        let url = self.endpoint(&format!("item_lists/{id}.json"));
        self.get_json("get_item_list", &url)
    }

    /// Fetches an item list from an absolute URL, such as
    /// [`ItemListIdentifier::item_list_url`](crate::model::ItemListIdentifier).
    pub fn get_item_list_from_uri(&self, url: &str) -> Result<ItemList, AlveoError> {
        self.get_json("get_item_list_from_uri", url)
    }

    /// Enumerates the item lists the caller owns or has been shared.
    pub fn get_item_lists(&self) -> Result<ItemLists, AlveoError> {
        let url = self.endpoint("item_lists.json");
        self.get_json("get_item_lists", &url)
    }

    /// Fetches an item from its absolute URL. The base URL is not applied.
    pub fn get_item_from_uri(&self, url: &str) -> Result<Item, AlveoError> {
        self.get_json("get_item_from_uri", url)
    }

    /// Fetches the annotations of `item` from its annotations URL.
    pub fn get_annotations(&self, item: &Item) -> Result<AnnotationList, AlveoError> {
        self.get_json("get_annotations", &item.annotations_url)
    }

    /// Like [`Client::get_annotations`], for deployments still serving the
    /// legacy annotation schema.
    pub fn get_legacy_annotations(
        &self,
        item: &Item,
    ) -> Result<LegacyAnnotationList, AlveoError> {
        self.get_json("get_legacy_annotations", &item.annotations_url)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: &str,
    ) -> Result<T, AlveoError> {
        let body = self.get(url)?;
        from_json_slice(&body).map_err(|source| AlveoError::Decode {
            operation,
            url: url.to_string(),
            source,
        })
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("api_key", &sink::redact_key(&self.api_key))
            .field("timeout", &self.timeout)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("cancellable", &self.cancel.is_some())
            .finish()
    }
}

/// Configures a [`Client`].
pub struct ClientBuilder {
    base_url: String,
    api_key: String,
    timeout: Duration,
    max_body_bytes: u64,
    sink: Arc<dyn RequestSink>,
    cancel: Option<CancelToken>,
}

impl ClientBuilder {
    /// Starts from the defaults: 30 s timeout, 64 MiB body cap, no sink.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            sink: Arc::new(NoopSink),
            cancel: None,
        }
    }

    /// Limits each request as a whole, including reading the body.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Caps the number of body bytes read per response.
    pub fn max_body_bytes(mut self, max_body_bytes: u64) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// Installs a sink for request events.
    pub fn sink<S: RequestSink + 'static>(mut self, sink: S) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Binds a cancel token to every call of the built client.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Builds the client.
    ///
    /// Base URL and key are stored verbatim; only empty values are rejected.
    pub fn build(self) -> Result<Client, AlveoError> {
        if self.base_url.is_empty() {
            return Err(AlveoError::InvalidConfig("base URL is empty".to_string()));
        }
        if self.api_key.is_empty() {
            return Err(AlveoError::InvalidConfig("API key is empty".to_string()));
        }

        let agent = build_agent(self.timeout, self.cancel.as_ref());

        Ok(Client {
            base_url: self.base_url,
            api_key: self.api_key,
            agent,
            timeout: self.timeout,
            max_body_bytes: self.max_body_bytes,
            sink: self.sink,
            cancel: self.cancel,
        })
    }
}

/// Builds the agent for a client. With a token, connections go through
/// [`transport::CancellableConnector`] so cancelling can close them.
fn build_agent(timeout: Duration, cancel: Option<&CancelToken>) -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false);

    match cancel {
        None => config.build().into(),
        Some(token) => {
            let connector = transport::CancellableConnector::new(token.clone())
                .chain(RustlsConnector::default());
            ureq::Agent::with_parts(
                config.proxy(None).build(),
                connector,
                DefaultResolver::default(),
            )
        }
    }
}
