//! FILENAME: client/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {endpoint}")]
    UnexpectedStatus {
        status: reqwest::StatusCode,
        endpoint: String,
    },
}
