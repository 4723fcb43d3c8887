//! Typed records decoded from Alveo API responses.
//!
//! Every record here is a plain value produced by decoding a JSON body. The
//! client never builds or mutates them itself; URLs held inside one record
//! are opaque strings the caller feeds back into the client to fetch the
//! next record.
//!
//! # Schemas
//!
//! The archive has served two annotation-list shapes over its lifetime. The
//! current one (explicit `alveo:`-prefixed keys, textual offsets) is the
//! canonical [`AnnotationList`]. The older shape lives in [`legacy`] and is
//! only decoded when asked for explicitly.
//!
//! # Example
//!
//! ```
//! use alveo_client::model::io_json::from_json_str;
//! use alveo_client::model::ItemList;
//!
//! let list: ItemList =
//!     from_json_str(r#"{"name":"mylist","num_items":2,"items":["a","b"]}"#).unwrap();
//! assert_eq!(list.num_items, 2);
//! ```

mod annotation;
pub mod io_json;
mod item;
mod item_list;
pub mod legacy;
mod version;

pub use annotation::{Annotation, AnnotationList, AnnotationProperties};
pub use item::{DocIdentifier, Item};
pub use item_list::{ItemList, ItemListIdentifier, ItemLists};
pub use version::ApiVersion;
