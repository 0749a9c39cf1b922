//! Error types for harsnip.

use derive_more::{Display, Error, From};

use crate::validate::Invalid;

/// Main error type for harsnip operations.
///
/// Configuration errors are raised by the registration APIs when a target or
/// client definition is structurally wrong. Input errors are raised when the
/// top-level input is neither a single request nor a HAR log.
///
/// A request that fails validation converts to [`Error::Validation`]; a
/// snippet session drops such requests with a warning instead of failing.
/// Unparsable JSON bodies are downgraded to `text/plain` and logged.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// A target definition is missing one of its info fields.
    #[display("target info is missing the `{field}` property")]
    #[from(skip)]
    MissingTargetField {
        /// Name of the missing field (`key`, `title`, `extname` or `default`).
        #[error(not(source))]
        field: &'static str,
    },

    /// A target with the same key is already registered.
    #[display("target `{_0}` already exists")]
    #[from(skip)]
    DuplicateTarget(#[error(not(source))] String),

    /// A target was registered without any client.
    #[display("target `{_0}` must have at least one client defined")]
    #[from(skip)]
    TargetWithoutClients(#[error(not(source))] String),

    /// No target with this key exists to add a client to.
    #[display("no `{_0}` target exists to add clients to")]
    #[from(skip)]
    UnknownTarget(#[error(not(source))] String),

    /// A client definition is missing one of its info fields.
    #[display("client info is missing the `{field}` property")]
    #[from(skip)]
    MissingClientField {
        /// Name of the missing field (`key` or `title`).
        #[error(not(source))]
        field: &'static str,
    },

    /// A client with the same key already exists under the target.
    #[display("client `{client}` already exists on target `{target}`")]
    #[from(skip)]
    DuplicateClient {
        /// Target key.
        target: String,
        /// Client key.
        client: String,
    },

    /// The top-level input is neither a request nor a HAR log.
    #[display("invalid input: {_0}")]
    #[from(skip)]
    InvalidInput(#[error(not(source))] String),

    /// A request failed validation.
    #[display("invalid request: {_0}")]
    #[from]
    Validation(Invalid),

    /// JSON syntax error.
    #[display("JSON error: {_0}")]
    #[from]
    Json(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "log.entries[0].request.headers").
        path: String,
        /// Error message.
        message: String,
    },

    /// Form URL-encoded serialization error.
    #[display("form serialization error: {_0}")]
    #[from]
    FormSerialization(serde_urlencoded::ser::Error),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this error comes from a malformed target or client registration.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingTargetField { .. }
                | Self::DuplicateTarget(_)
                | Self::TargetWithoutClients(_)
                | Self::UnknownTarget(_)
                | Self::MissingClientField { .. }
                | Self::DuplicateClient { .. }
        )
    }

    /// Returns `true` if this error comes from the top-level input shape.
    #[must_use]
    pub const fn is_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::Json(_) | Self::JsonDeserialization { .. }
        )
    }
}
