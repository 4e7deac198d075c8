//! AWS error classification and handling
//!
//! Provider failures are reduced to a [`ProviderError`] carrying the error
//! code from `ProvideErrorMetadata::code()`, and codes are classified by
//! table lookup rather than by matching on Debug output.

use aws_sdk_ec2::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use thiserror::Error;

/// A failed provider call: the provider's error code (if any) and message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} ({})", .code.as_deref().unwrap_or("no error code"))]
pub struct ProviderError {
    code: Option<String>,
    message: String,
}

/// How a provider error should be handled by the retry and poll loops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Resource is already gone (safe to treat as cleaned)
    NotFound,
    /// Auth hiccup or throttling (retry within the bound)
    Transient,
    /// Resource still has dependents (retry within the bound when deleting)
    DependencyViolation,
    /// Anything else (stop and record)
    Fatal,
}

impl ErrorClass {
    pub fn is_transient(self) -> bool {
        matches!(self, ErrorClass::Transient)
    }
}

impl ProviderError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }

    /// An error that carries no provider code (transport failure, bad response)
    pub fn without_code(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn class(&self) -> ErrorClass {
        classify_code(self.code())
    }

    pub fn is_not_found(&self) -> bool {
        self.class() == ErrorClass::NotFound
    }
}

impl<E, R> From<SdkError<E, R>> for ProviderError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    fn from(err: SdkError<E, R>) -> Self {
        let code = err.code().map(str::to_string);
        let message = match err.message() {
            Some(message) => message.to_string(),
            None => DisplayErrorContext(&err).to_string(),
        };
        Self { code, message }
    }
}

/// Known AWS error codes for "not found" conditions, across every managed kind
const NOT_FOUND_CODES: &[&str] = &[
    "InvalidInstanceID.NotFound",
    "NatGatewayNotFound",
    "InvalidNatGatewayID.NotFound",
    "InvalidInternetGatewayID.NotFound",
    "InvalidRouteTableID.NotFound",
    "InvalidGroup.NotFound",
    "InvalidGroupId.NotFound",
    "InvalidSubnetID.NotFound",
    "InvalidVpcID.NotFound",
    "InvalidAllocationID.NotFound",
    "InvalidKeyPair.NotFound",
    "NotFoundException",
];

/// Codes AWS returns while freshly issued credentials are still propagating
const TRANSIENT_AUTH_CODES: &[&str] = &["AuthFailure"];

/// Known AWS error codes for throttling/rate limiting
const THROTTLING_CODES: &[&str] = &[
    "Throttling",
    "ThrottlingException",
    "RequestLimitExceeded",
    "TooManyRequestsException",
];

/// Known AWS error codes for dependency violations (resource still in use)
const DEPENDENCY_CODES: &[&str] = &["DependencyViolation"];

/// Returned when detaching an internet gateway that is no longer attached
pub const NOT_ATTACHED_CODE: &str = "Gateway.NotAttached";

/// Classify an AWS error code.
pub fn classify_code(code: Option<&str>) -> ErrorClass {
    match code {
        Some(c) if NOT_FOUND_CODES.contains(&c) => ErrorClass::NotFound,
        Some(c) if TRANSIENT_AUTH_CODES.contains(&c) || THROTTLING_CODES.contains(&c) => {
            ErrorClass::Transient
        }
        Some(c) if DEPENDENCY_CODES.contains(&c) => ErrorClass::DependencyViolation,
        _ => ErrorClass::Fatal,
    }
}

/// Classifier for deletes that may race the removal of a dependent:
/// a dependency violation is retried like a transient error.
pub fn classify_dependent_delete(error: &ProviderError) -> ErrorClass {
    match error.class() {
        ErrorClass::DependencyViolation => ErrorClass::Transient,
        class => class,
    }
}

/// Map a "not found" error to `Ok(None)`, leaving other errors intact.
pub fn ignore_not_found<T>(result: Result<T, ProviderError>) -> Result<Option<T>, ProviderError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}
