//! # Errors
//!
//! reel carries structured errors through `anyhow::Error` so every layer can
//! add context with `?` while the HTTP layer still recovers the status code.
//! Core goals:
//! - consistent status codes + names
//! - can be carried through anyhow::Error
//! - transport-agnostic (the server crate decides how to render them)

use std::fmt;

use anyhow::Error as AnyError;

/// A convenience result type for reel core APIs.
pub type ReelResult<T> = std::result::Result<T, AnyError>;

/// Structured data attached to an error (e.g. the resource size for a 416).
pub type ErrorValue = serde_json::Value;

/// Error classes understood by the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadRequest,          // 400
    NotFound,            // 404
    RangeNotSatisfiable, // 416
    GeneralError,        // 500
}

impl ErrorKind {
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::RangeNotSatisfiable => 416,
            ErrorKind::GeneralError => 500,
        }
    }

    /// Error `name` (e.g. "NotFound")
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "BadRequest",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::RangeNotSatisfiable => "RangeNotSatisfiable",
            ErrorKind::GeneralError => "GeneralError",
        }
    }

    /// True for the 5xx family, whose messages never reach clients verbatim.
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

/// A structured reel error that can live inside `anyhow::Error`.
#[derive(Debug)]
pub struct ReelError {
    pub kind: ErrorKind,
    pub message: String,
    pub data: Option<ErrorValue>,
    pub source: Option<AnyError>,
}

impl ReelError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            data: None,
            source: None,
        }
    }

    pub fn with_data(mut self, data: ErrorValue) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_source(mut self, source: AnyError) -> Self {
        self.source = Some(source);
        self
    }

    pub fn code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Convert into `anyhow::Error`.
    pub fn into_anyhow(self) -> AnyError {
        AnyError::new(self)
    }

    /// Turn any error into a ReelError:
    /// - if it's already a ReelError, keep it
    /// - otherwise wrap as GeneralError
    pub fn normalize(err: AnyError) -> ReelError {
        match err.downcast::<ReelError>() {
            Ok(reel) => reel,
            Err(other) => ReelError::new(ErrorKind::GeneralError, other.to_string()).with_source(other),
        }
    }

    /// A version suitable for returning to clients:
    /// - drop the inner `source`
    /// - replace 5xx messages with a generic one
    pub fn sanitize_for_client(&self) -> ReelError {
        let message = if self.kind.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.message.clone()
        };
        ReelError {
            kind: self.kind,
            message,
            data: self.data.clone(),
            source: None,
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, msg)
    }
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, msg)
    }
    pub fn range_not_satisfiable(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::RangeNotSatisfiable, msg)
    }
    pub fn general_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::GeneralError, msg)
    }
}

impl fmt::Display for ReelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name(), self.code(), self.message)
    }
}

impl std::error::Error for ReelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}
