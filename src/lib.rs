//! alveo-client: a blocking client for the Alveo language-resource archive API.
//!
//! The archive serves items (metadata records describing a language
//! resource and its documents), item lists, and annotation lists as JSON.
//! [`Client`] fetches them with an API key and decodes them into the typed
//! records in [`model`].
//!
//! # Modules
//!
//! - [`client`]: the client, its builder, cancellation and request sinks
//! - [`model`]: records decoded from API responses
//! - [`error`]: error types for API operations
//!
//! # Example
//!
//! ```no_run
//! use alveo_client::{Client, LogSink};
//!
//! # fn main() -> Result<(), alveo_client::AlveoError> {
//! let client = Client::builder("https://app.alveo.edu.au", "my-api-key")
//!     .sink(LogSink)
//!     .build()?;
//!
//! let list = client.get_item_list(42)?;
//! for url in &list.items {
//!     let item = client.get_item_from_uri(url)?;
//!     let annotations = client.get_annotations(&item)?;
//!     println!("{}: {} annotations", url, annotations.annotations.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod model;

pub use client::{
    CancelToken, Client, ClientBuilder, LogSink, NoopSink, RequestEvent, RequestSink,
    API_KEY_HEADER, DEFAULT_MAX_BODY_BYTES, DEFAULT_TIMEOUT,
};
pub use error::AlveoError;
