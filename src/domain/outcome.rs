//! Structured operation outcome used instead of raised errors across component boundaries

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Closed set of error kinds an outcome can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    NotFound,
    UnprocessableContent,
    ValidationError,
    BlobStorageOperation,
    ConversionException,
    PostConversionException,
    UnknownError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NotFound"),
            Self::UnprocessableContent => write!(f, "UnprocessableContent"),
            Self::ValidationError => write!(f, "ValidationError"),
            Self::BlobStorageOperation => write!(f, "BlobStorageOperation"),
            Self::ConversionException => write!(f, "ConversionException"),
            Self::PostConversionException => write!(f, "PostConversionException"),
            Self::UnknownError => write!(f, "UnknownError"),
        }
    }
}

/// A single structured error entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeError {
    pub code: ErrorCode,
    pub message: String,
}

impl OutcomeError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for OutcomeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl From<DomainError> for OutcomeError {
    fn from(err: DomainError) -> Self {
        Self::new(err.code(), err.message())
    }
}

/// Carries either a payload or one or more errors, never both.
///
/// Errors are append-only: once an error has been recorded the payload is
/// dropped and the outcome stays in error for the rest of its life.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Outcome<T> {
    payload: Option<T>,
    errors: Vec<OutcomeError>,
}

impl<T> Outcome<T> {
    /// Successful outcome
    pub fn success(payload: T) -> Self {
        Self {
            payload: Some(payload),
            errors: Vec::new(),
        }
    }

    /// Failed outcome with a single error
    pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            payload: None,
            errors: vec![OutcomeError::new(code, message)],
        }
    }

    /// Failed outcome carrying errors copied from another outcome.
    ///
    /// An empty list is recorded as an unknown error so the result still
    /// reports as failed.
    pub fn from_errors(errors: impl IntoIterator<Item = OutcomeError>) -> Self {
        let mut errors: Vec<OutcomeError> = errors.into_iter().collect();

        if errors.is_empty() {
            errors.push(OutcomeError::new(
                ErrorCode::UnknownError,
                "Operation failed without reporting an error",
            ));
        }

        Self {
            payload: None,
            errors,
        }
    }

    /// Record an error, discarding any payload
    pub fn add_error(&mut self, code: ErrorCode, message: impl Into<String>) {
        self.payload = None;
        self.errors.push(OutcomeError::new(code, message));
    }

    pub fn is_error(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    pub fn into_payload(self) -> Option<T> {
        self.payload
    }

    pub fn errors(&self) -> &[OutcomeError] {
        &self.errors
    }

    /// Code of the first recorded error
    pub fn first_code(&self) -> Option<ErrorCode> {
        self.errors.first().map(|e| e.code)
    }

    /// Transform the payload, keeping errors untouched
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            payload: self.payload.map(f),
            errors: self.errors,
        }
    }

    /// Chain another fallible step onto a successful outcome
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        match self.into_result() {
            Ok(payload) => f(payload),
            Err(errors) => Outcome::from_errors(errors),
        }
    }

    pub fn into_result(self) -> Result<T, Vec<OutcomeError>> {
        match self.payload {
            Some(payload) if self.errors.is_empty() => Ok(payload),
            _ => Err(self.errors),
        }
    }
}

impl<T> From<DomainError> for Outcome<T> {
    fn from(err: DomainError) -> Self {
        Self::from_errors([OutcomeError::from(err)])
    }
}

impl<T> From<Result<T, DomainError>> for Outcome<T> {
    fn from(result: Result<T, DomainError>) -> Self {
        match result {
            Ok(payload) => Self::success(payload),
            Err(err) => err.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_has_payload_and_no_errors() {
        let outcome = Outcome::success(42);
        assert!(!outcome.is_error());
        assert_eq!(outcome.payload(), Some(&42));
        assert!(outcome.errors().is_empty());
    }

    #[test]
    fn test_failure_has_no_payload() {
        let outcome: Outcome<u32> = Outcome::failure(ErrorCode::NotFound, "missing");
        assert!(outcome.is_error());
        assert_eq!(outcome.payload(), None);
        assert_eq!(outcome.first_code(), Some(ErrorCode::NotFound));
        assert_eq!(outcome.errors()[0].message, "missing");
    }

    #[test]
    fn test_add_error_is_permanent() {
        let mut outcome = Outcome::success("value");
        outcome.add_error(ErrorCode::ValidationError, "bad");
        outcome.add_error(ErrorCode::UnknownError, "worse");

        assert!(outcome.is_error());
        assert_eq!(outcome.payload(), None);
        assert_eq!(outcome.errors().len(), 2);
        assert_eq!(outcome.errors()[0].code, ErrorCode::ValidationError);
        assert_eq!(outcome.errors()[1].code, ErrorCode::UnknownError);
    }

    #[test]
    fn test_from_errors_never_empty() {
        let outcome: Outcome<()> = Outcome::from_errors(Vec::new());
        assert!(outcome.is_error());
        assert_eq!(outcome.first_code(), Some(ErrorCode::UnknownError));
    }

    #[test]
    fn test_from_errors_copies_verbatim() {
        let source: Outcome<()> = Outcome::failure(ErrorCode::UnprocessableContent, "empty");
        let copied: Outcome<String> = Outcome::from_errors(source.errors().to_vec());
        assert_eq!(copied.errors(), source.errors());
    }

    #[test]
    fn test_map_and_and_then() {
        let doubled = Outcome::success(2).map(|v| v * 2);
        assert_eq!(doubled.payload(), Some(&4));

        let failed: Outcome<u32> =
            Outcome::success(2).and_then(|_| Outcome::failure(ErrorCode::NotFound, "gone"));
        assert_eq!(failed.first_code(), Some(ErrorCode::NotFound));

        let failed_map = Outcome::<u32>::failure(ErrorCode::UnknownError, "x").map(|v| v + 1);
        assert!(failed_map.is_error());
    }

    #[test]
    fn test_from_domain_error() {
        let outcome: Outcome<()> = DomainError::validation("Name cannot be empty").into();
        assert_eq!(outcome.first_code(), Some(ErrorCode::ValidationError));
        assert_eq!(outcome.errors()[0].message, "Name cannot be empty");
    }

    #[test]
    fn test_into_result() {
        assert_eq!(Outcome::success(1).into_result(), Ok(1));

        let err = Outcome::<u8>::failure(ErrorCode::NotFound, "nope").into_result();
        assert_eq!(err.unwrap_err()[0].code, ErrorCode::NotFound);
    }

    #[test]
    fn test_error_code_serialization() {
        assert_eq!(
            serde_json::to_string(&ErrorCode::PostConversionException).unwrap(),
            "\"PostConversionException\""
        );
        assert_eq!(ErrorCode::BlobStorageOperation.to_string(), "BlobStorageOperation");
    }
}
