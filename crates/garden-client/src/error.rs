use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never produced a usable response (connection refused,
    /// timeout, undecodable body).
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status. `message` is the
    /// server's own message when it sent one, otherwise `Error: <status>`.
    #[error("{message}")]
    Status { status: u16, message: String },
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Status { status: 404, .. })
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
