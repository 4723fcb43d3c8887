use thiserror::Error;

/// The main error type for Alveo API operations.
#[derive(Debug, Error)]
pub enum AlveoError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("Status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("Failed to decode {operation} response from {url}: {source}")]
    Decode {
        operation: &'static str,
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Request to {url} was cancelled")]
    Cancelled { url: String },

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl AlveoError {
    pub(crate) fn transport(url: &str, source: ureq::Error) -> Self {
        Self::Transport {
            url: url.to_string(),
            source: Box::new(source),
        }
    }

    /// The URL of the request that failed, if the error came from one.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Transport { url, .. }
            | Self::UnexpectedStatus { url, .. }
            | Self::Decode { url, .. }
            | Self::Cancelled { url } => Some(url),
            Self::InvalidConfig(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_names_code_and_url() {
        let err = AlveoError::UnexpectedStatus {
            status: 404,
            url: "https://app.alveo.edu.au/item_lists/7.json".into(),
        };
        assert_eq!(
            err.to_string(),
            "Status 404 from https://app.alveo.edu.au/item_lists/7.json"
        );
        assert_eq!(err.url(), Some("https://app.alveo.edu.au/item_lists/7.json"));
    }

    #[test]
    fn config_errors_have_no_url() {
        let err = AlveoError::InvalidConfig("empty base URL".into());
        assert_eq!(err.url(), None);
    }
}
