// src/api/error.rs
// Errors raised inside the client. Request operations never return these to
// the caller: they are folded into an ApiResponse (see response.rs).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// An authenticated call was made without a stored token.
    #[error("no bearer token in storage")]
    Unauthenticated,

    /// The request could not be sent, or the body was not the expected JSON.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The configured base URL does not parse.
    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Session storage could not be read or written.
    #[error("session storage error: {0}")]
    Storage(String),

    /// A file to upload could not be read.
    #[error("could not read {path}: {source}")]
    Upload {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
