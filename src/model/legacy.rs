//! The older annotation-list schema.
//!
//! Earlier archive deployments served annotations as a flat object with an
//! `annotates` reference, an `annotations_found` count and numeric offsets.
//! It is kept as its own type rather than folded into
//! [`AnnotationList`](super::AnnotationList): the two shapes disagree on
//! offset representation and nothing in a body says which one it is.

use serde::{Deserialize, Serialize};

/// An annotation list in the legacy schema.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LegacyAnnotationList {
    #[serde(alias = "Annotates")]
    pub annotates: String,

    #[serde(alias = "Annotations_found")]
    pub annotations_found: u64,

    #[serde(alias = "Annotations")]
    pub annotations: Vec<LegacyAnnotation>,
}

/// A legacy annotation with numeric offsets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LegacyAnnotation {
    #[serde(rename = "type", alias = "Type")]
    pub kind: String,

    #[serde(alias = "Label")]
    pub label: String,

    #[serde(alias = "Start")]
    pub start: f64,

    #[serde(alias = "End")]
    pub end: f64,
}
