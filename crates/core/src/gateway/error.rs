use reqwest::StatusCode;
use thiserror::Error;

/// Every way a gateway call can fail, normalized into one type.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error! status: {}", status.as_u16())]
    HttpStatus {
        endpoint: String,
        status: StatusCode,
    },

    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl GatewayError {
    pub fn endpoint(&self) -> &str {
        match self {
            GatewayError::Transport { endpoint, .. }
            | GatewayError::HttpStatus { endpoint, .. }
            | GatewayError::Decode { endpoint, .. } => endpoint,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GatewayError::HttpStatus { status, .. } => Some(*status),
            GatewayError::Transport { source, .. } => source.status(),
            GatewayError::Decode { .. } => None,
        }
    }
}
