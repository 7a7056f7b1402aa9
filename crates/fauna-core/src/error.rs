use std::{error::Error as StdError, fmt};
use thiserror::Error as ThisError;

///
/// Error
///
/// Structured client-side error with a stable classification.
/// Every failure surfaced by this crate (value validation, executor
/// failures, malformed responses) flows through this one type.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct Error {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional underlying cause, exposed through `source()`.
    #[source]
    pub detail: Option<ErrorDetail>,
}

impl Error {
    /// Construct an Error without detail.
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    /// Construct a value-origin validation failure.
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::InvalidQuery, ErrorOrigin::Value, message)
    }

    /// Construct an executor failure from a plain message.
    pub fn execution(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Execution, ErrorOrigin::Executor, message)
    }

    /// Construct an executor failure wrapping the executor's own error.
    pub fn execution_source<E>(source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            class: ErrorClass::Execution,
            origin: ErrorOrigin::Executor,
            message: format!("query execution failed: {source}"),
            detail: Some(ErrorDetail::Source(Box::new(source))),
        }
    }

    /// Construct a response-origin malformed payload error.
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::MalformedResponse,
            ErrorOrigin::Response,
            message,
        )
    }

    /// Construct a wire (de)serialization failure.
    pub(crate) fn serialize(err: serde_json::Error) -> Self {
        Self {
            class: ErrorClass::Serialize,
            origin: ErrorOrigin::Serialize,
            message: err.to_string(),
            detail: Some(ErrorDetail::Json(err)),
        }
    }

    #[must_use]
    pub const fn is_invalid_query(&self) -> bool {
        matches!(self.class, ErrorClass::InvalidQuery)
    }

    #[must_use]
    pub const fn is_execution(&self) -> bool {
        matches!(self.class, ErrorClass::Execution)
    }

    #[must_use]
    pub const fn is_malformed_response(&self) -> bool {
        matches!(self.class, ErrorClass::MalformedResponse)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::serialize(err)
    }
}

///
/// ErrorDetail
///
/// Underlying cause carried by [`Error`].
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error(transparent)]
    Json(serde_json::Error),

    #[error("{0}")]
    Source(#[source] Box<dyn StdError + Send + Sync>),
}

///
/// ErrorClass
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorClass {
    InvalidQuery,
    Execution,
    MalformedResponse,
    Serialize,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidQuery => "invalid_query",
            Self::Execution => "execution",
            Self::MalformedResponse => "malformed_response",
            Self::Serialize => "serialize",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorOrigin {
    Value,
    Query,
    Executor,
    Response,
    Serialize,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Value => "value",
            Self::Query => "query",
            Self::Executor => "executor",
            Self::Response => "response",
            Self::Serialize => "serialize",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn execution_source_is_exposed_as_error_source() {
        let err = Error::execution_source(io::Error::other("connection reset"));

        assert!(err.is_execution());
        assert_eq!(err.origin, ErrorOrigin::Executor);
        assert_eq!(err.message, "query execution failed: connection reset");
        let source = err.source().expect("source should be present");
        assert_eq!(source.to_string(), "connection reset");
    }

    #[test]
    fn display_with_class_prefixes_origin_and_class() {
        let err = Error::malformed_response("missing data");

        assert_eq!(
            err.display_with_class(),
            "response:malformed_response: missing data"
        );
        assert_eq!(err.to_string(), "missing data");
    }

    #[test]
    fn json_failures_classify_as_serialize() {
        let json_err = serde_json::from_str::<u32>("\"nope\"").expect_err("must fail");
        let err = Error::from(json_err);

        assert_eq!(err.class, ErrorClass::Serialize);
        assert!(!err.is_execution());
        assert!(err.source().is_some());
    }
}
