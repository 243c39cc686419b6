//! Error types for conduit.
//!
//! Every failure of a pipeline call ends up as exactly one [`Error`] variant.

use bytes::Bytes;
use derive_more::{Display, Error, From};

use crate::StatusClass;
use crate::custom::DomainError;

/// Boxed error used for failures that carry no structure we can rely on.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// ============================================================================
// Transport Error
// ============================================================================

/// Failure reported by a [`Transport`](crate::Transport) implementation.
#[derive(Debug, Display, Error)]
pub enum TransportError {
    /// The host could not be reached (refused, unreachable, DNS failure).
    #[display("not connected: {_0}")]
    NotConnected(#[error(not(source))] String),

    /// An established connection dropped before the response was complete.
    #[display("connection lost: {_0}")]
    ConnectionLost(#[error(not(source))] String),

    /// The peer answered with something that is not a usable HTTP response.
    #[display("invalid response: {_0}")]
    InvalidResponse(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    Timeout,

    /// The request could not be turned into a wire request.
    #[display("invalid request: {_0}")]
    InvalidRequest(#[error(not(source))] String),

    /// The transport panicked while handling the request.
    #[display("transport panicked: {_0}")]
    Panicked(#[error(not(source))] String),

    /// Anything else.
    #[display("{_0}")]
    Other(#[error(not(source))] BoxError),
}

impl TransportError {
    /// Create a not-connected error.
    #[must_use]
    pub fn not_connected(message: impl Into<String>) -> Self {
        Self::NotConnected(message.into())
    }

    /// Create a connection-lost error.
    #[must_use]
    pub fn connection_lost(message: impl Into<String>) -> Self {
        Self::ConnectionLost(message.into())
    }

    /// Wrap an arbitrary error.
    #[must_use]
    pub fn other(error: impl Into<BoxError>) -> Self {
        Self::Other(error.into())
    }

    /// Returns `true` when the network itself is gone: no connection could be
    /// made, or an open one was lost.
    #[must_use]
    pub const fn is_connectivity_loss(&self) -> bool {
        matches!(self, Self::NotConnected(_) | Self::ConnectionLost(_))
    }
}

// ============================================================================
// Decode Error
// ============================================================================

/// Broad category of a decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DecodeCategory {
    /// The bytes are not syntactically valid.
    #[display("syntax")]
    Syntax,
    /// The bytes are valid but do not match the expected shape
    /// (type mismatch, missing field, unknown variant...).
    #[display("data")]
    Data,
    /// The input ended early.
    #[display("eof")]
    Eof,
}

/// Typed-decode failure with the path of the field that failed.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("decode error at '{path}': {message}")]
pub struct DecodeError {
    path: String,
    message: String,
    category: DecodeCategory,
}

impl DecodeError {
    /// Create a decode error.
    #[must_use]
    pub fn new(category: DecodeCategory, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            category,
        }
    }

    /// Path to the failing field (e.g. `user.address.city`), `.` for the root.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Underlying decoder message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Failure category.
    #[must_use]
    pub const fn category(&self) -> DecodeCategory {
        self.category
    }
}

// ============================================================================
// Error Type
// ============================================================================

/// Main error type for conduit operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Caller-raised descriptive error.
    #[display("{_0}")]
    Message(#[error(not(source))] String),

    /// Non-success HTTP status, with the raw body for diagnostics.
    #[display("HTTP status error: {class}")]
    Status {
        /// Status class of the response.
        class: StatusClass,
        /// Raw response body (empty for synthetic statuses).
        #[error(not(source))]
        body: Bytes,
    },

    /// Network/transport-layer failure.
    #[display("{_0}")]
    #[from]
    Transport(TransportError),

    /// The body could not be decoded into the requested type.
    #[display("{_0}")]
    #[from]
    Decode(DecodeError),

    /// Domain-specific error payload recognised by the error chain.
    #[display("{}", _0.localized_description())]
    Custom(#[error(not(source))] Box<dyn DomainError>),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a descriptive error.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Create a status error.
    #[must_use]
    pub const fn status_error(class: StatusClass, body: Bytes) -> Self {
        Self::Status { class, body }
    }

    /// Returns the status class if this is a status error.
    #[must_use]
    pub const fn status_class(&self) -> Option<StatusClass> {
        match self {
            Self::Status { class, .. } => Some(*class),
            _ => None,
        }
    }

    /// Returns the numeric status code if this is a status error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { class, .. } => Some(class.code()),
            _ => None,
        }
    }

    /// Returns `true` when the server answered `401 Unauthorized`.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::Status {
                class: StatusClass::Unauthorized,
                ..
            }
        )
    }

    /// Returns `true` if this is a transport error.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns the response body if this is a status error.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        match self {
            Self::Status { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Try to decode the status error body as JSON.
    ///
    /// Returns `None` if this is not a status error.
    pub fn decode_body<T: serde::de::DeserializeOwned>(&self) -> Option<Result<T>> {
        self.body().map(|body| crate::from_json(body))
    }

    /// Downcast the domain error carried by [`Error::Custom`].
    ///
    /// # Example
    ///
    /// ```ignore
    /// if let Some(err) = error.domain_error::<ApiError>() {
    ///     println!("API error code {}", err.code);
    /// }
    /// ```
    #[must_use]
    pub fn domain_error<E: DomainError>(&self) -> Option<&E> {
        match self {
            Self::Custom(inner) => {
                let inner: &(dyn std::error::Error + Send + Sync + 'static) = inner.as_ref();
                inner.downcast_ref::<E>()
            }
            _ => None,
        }
    }
}

impl From<Box<dyn DomainError>> for Error {
    fn from(error: Box<dyn DomainError>) -> Self {
        Self::Custom(error)
    }
}
