// SPDX-License-Identifier: MPL-2.0
use crate::application::port::StoreError;
use thiserror::Error;

/// Errors surfaced to the user when loading a gallery.
///
/// Listing failures (`Network`, `Format`) and `EmptyResult` are fatal for the
/// load attempt that produced them. Per-object probe failures never reach this
/// type; the enricher reports them as diagnostics instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A request failed or returned a non-success status.
    #[error("Network Error: {0}")]
    Network(String),

    /// The listing payload is not a well-formed bucket listing.
    #[error("Format Error: {0}")]
    Format(String),

    /// The listing succeeded but no qualifying image remained.
    #[error("No images found in bucket")]
    EmptyResult,

    #[error("Config Error: {0}")]
    Config(String),

    #[error("I/O Error: {0}")]
    Io(String),
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Format(msg) => Error::Format(msg),
            other => Error::Network(other.to_string()),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
