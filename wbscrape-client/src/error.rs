use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The connection could not be established before the connect timeout.
    #[error("Connection timed out: {0}")]
    ConnectTimeout(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl ClientError {
    /// Sorts a transport error into `ConnectTimeout` or `Http`.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_connect() && err.is_timeout() {
            ClientError::ConnectTimeout(err.to_string())
        } else {
            ClientError::Http(err)
        }
    }

    pub fn is_connect_timeout(&self) -> bool {
        matches!(self, ClientError::ConnectTimeout(_))
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
