use serde::{Deserialize, Serialize};

/// The response from `/version.json`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiVersion {
    #[serde(rename = "API version")]
    pub api_version: String,
}
