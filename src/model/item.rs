use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A document attached to an item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocIdentifier {
    #[serde(alias = "Size")]
    pub size: String,

    #[serde(alias = "Url")]
    pub url: String,

    /// Document type as reported by the archive (e.g. "Text", "Audio").
    #[serde(rename = "type", alias = "Type")]
    pub doc_type: String,
}

/// Metadata about a language resource and its documents.
///
/// The metadata map is kept untyped: the archive's metadata vocabulary
/// varies per collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "alveo:catalog_url", alias = "catalog_url")]
    pub catalog_url: String,

    #[serde(rename = "alveo:metadata", alias = "metadata", default)]
    pub metadata: BTreeMap<String, String>,

    #[serde(rename = "alveo:primary_text_url", alias = "primary_text_url")]
    pub primary_text_url: String,

    /// Feed this to [`crate::Client::get_annotations`].
    #[serde(rename = "alveo:annotations_url", alias = "annotations_url")]
    pub annotations_url: String,

    #[serde(rename = "alveo:documents", alias = "documents", default)]
    pub documents: Vec<DocIdentifier>,
}

impl Item {
    /// Looks up a metadata value by key.
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Documents whose type matches `doc_type`, ignoring case.
    pub fn documents_of_type<'a>(
        &'a self,
        doc_type: &'a str,
    ) -> impl Iterator<Item = &'a DocIdentifier> + 'a {
        self.documents
            .iter()
            .filter(move |doc| doc.doc_type.eq_ignore_ascii_case(doc_type))
    }
}
