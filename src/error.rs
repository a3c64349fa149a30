//! All error types for the langswitch crate.
//!
//! These are returned from all fallible operations (path derivation, loading,
//! saving, manager construction, etc.). Recoverable conditions — a missing
//! translation file, an invalid locale passed to a load — are reported
//! through boolean results instead and never reach this type.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("path resolution failed: {0}")]
    PathResolution(String),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid data: {0}")]
    DataMismatch(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("the default localization manager is already created")]
    AlreadyInitialized,

    #[error("not supported: {0}")]
    NotSupported(String),
}

impl Error {
    /// Creates a new path resolution error
    pub fn path_resolution(message: impl Into<String>) -> Self {
        Error::PathResolution(message.into())
    }

    /// Creates a new invalid state error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Error::InvalidState(message.into())
    }
}
