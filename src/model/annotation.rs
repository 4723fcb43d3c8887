use serde::{Deserialize, Serialize};
use std::num::ParseFloatError;

/// The annotations attached to an item, in the current archive schema.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationList {
    #[serde(rename = "commonProperties")]
    pub common_properties: AnnotationProperties,

    #[serde(rename = "alveo:annotations")]
    pub annotations: Vec<Annotation>,
}

impl AnnotationList {
    /// URL of the document the annotations refer to.
    pub fn annotates(&self) -> &str {
        &self.common_properties.annotates
    }

    /// Annotations with the given type, in document order.
    pub fn of_type<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Annotation> + 'a {
        self.annotations.iter().filter(move |ann| ann.kind == kind)
    }
}

/// Properties shared by every annotation in a list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationProperties {
    #[serde(rename = "alveo:annotates")]
    pub annotates: String,
}

/// A labelled span of a document.
///
/// Offsets are kept as the text the server sent. Use [`Annotation::start_offset`]
/// and [`Annotation::end_offset`] to read them as numbers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(rename = "type")]
    pub kind: String,

    pub label: String,

    pub start: String,

    pub end: String,
}

impl Annotation {
    /// Parses the start offset.
    pub fn start_offset(&self) -> Result<f64, ParseFloatError> {
        self.start.trim().parse()
    }

    /// Parses the end offset.
    pub fn end_offset(&self) -> Result<f64, ParseFloatError> {
        self.end.trim().parse()
    }
}
