use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
/// Structured runtime error with a stable internal classification.
/// Not a stable API; intended for internal use and may change without notice.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl InternalError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    /// Allocation failure for an arena or scratch buffer.
    pub fn out_of_memory(origin: ErrorOrigin, what: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::OutOfMemory,
            origin,
            format!("allocation failed: {}", what.into()),
        )
    }

    /// A pattern sink refused an emission; the mining run unwinds.
    pub fn reporter(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Reporter, ErrorOrigin::Sink, message)
    }

    /// Invalid configuration rejected at the driver boundary.
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Config, ErrorOrigin::Driver, message)
    }

    /// A broken internal invariant (never expected on valid input).
    pub fn invariant(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::InvariantViolation, origin, message)
    }

    #[must_use]
    pub const fn is_reporter(&self) -> bool {
        matches!(self.class, ErrorClass::Reporter)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    OutOfMemory,
    Reporter,
    Config,
    Internal,
    InvariantViolation,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::OutOfMemory => "out_of_memory",
            Self::Reporter => "reporter",
            Self::Config => "config",
            Self::Internal => "internal",
            Self::InvariantViolation => "invariant_violation",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Internal origin taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Database,
    Arena,
    Projection,
    Oracle,
    Sink,
    Driver,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Database => "database",
            Self::Arena => "arena",
            Self::Projection => "projection",
            Self::Oracle => "oracle",
            Self::Sink => "sink",
            Self::Driver => "driver",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
