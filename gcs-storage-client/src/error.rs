/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_smithy_runtime_api::client::orchestrator::HttpResponse;

/// A boxed error that is `Send` and `Sync`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by this library
///
/// NOTE: Use [`aws_smithy_types::error::display::DisplayErrorContext`] or similar to display
/// the entire error cause/source chain.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: BoxError,
}

/// General categories of storage errors.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Project identifier or credential material missing or invalid
    ConfigInvalid,

    /// Operation input validation issues (e.g. an invalid bucket name)
    InputInvalid,

    /// Bucket or object not found
    NotFound,

    /// The authenticated identity is not allowed to perform the operation
    PermissionDenied,

    /// Request conflicts with the current remote state (e.g. bucket name taken, bucket not empty)
    Conflict,

    /// Local I/O errors
    IOError,

    /// Timeout or network failure. Requests are never retried.
    Transient,

    /// Any other error returned by the storage service
    ServiceError,

    /// Some kind of internal runtime issue (e.g. the blocking runtime could not be started)
    RuntimeError,
}

impl Error {
    /// Creates a new storage [`Error`] from a known kind of error as well as an arbitrary error
    /// source.
    pub fn new<E>(kind: ErrorKind, err: E) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            kind,
            source: err.into(),
        }
    }

    /// Returns the corresponding [`ErrorKind`] for this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns true if the bucket or object targeted by the request does not exist.
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::InputInvalid => write!(f, "invalid input"),
            ErrorKind::NotFound => write!(f, "resource not found"),
            ErrorKind::PermissionDenied => write!(f, "permission denied"),
            ErrorKind::Conflict => write!(f, "conflict with remote state"),
            ErrorKind::IOError => write!(f, "I/O error"),
            ErrorKind::Transient => write!(f, "transient network error"),
            ErrorKind::ServiceError => write!(f, "service error"),
            ErrorKind::RuntimeError => write!(f, "runtime error"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::new(ErrorKind::IOError, value)
    }
}

impl From<aws_smithy_types::byte_stream::error::Error> for Error {
    fn from(value: aws_smithy_types::byte_stream::error::Error) -> Self {
        Self::new(ErrorKind::IOError, value)
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::new(ErrorKind::ConfigInvalid, value)
    }
}

impl From<aws_smithy_types::error::operation::BuildError> for Error {
    fn from(value: aws_smithy_types::error::operation::BuildError) -> Self {
        Self::new(ErrorKind::InputInvalid, value)
    }
}

pub(crate) fn invalid_input<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::InputInvalid, err)
}

pub(crate) fn config_invalid<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::ConfigInvalid, err)
}

pub(crate) fn from_kind<E>(kind: ErrorKind) -> impl FnOnce(E) -> Error
where
    E: Into<BoxError>,
{
    |err| Error::new(kind, err)
}

/// Classify a service error by its error code, falling back to the HTTP status.
///
/// HEAD responses carry no body, so the status is often all there is to go on.
fn classify_service_error(code: Option<&str>, status: Option<u16>) -> ErrorKind {
    match code {
        Some("NoSuchBucket" | "NoSuchKey" | "NotFound") => return ErrorKind::NotFound,
        Some("AccessDenied" | "Forbidden" | "InvalidAccessKeyId" | "SignatureDoesNotMatch") => {
            return ErrorKind::PermissionDenied
        }
        Some("BucketAlreadyExists" | "BucketAlreadyOwnedByYou" | "BucketNotEmpty" | "Conflict") => {
            return ErrorKind::Conflict
        }
        Some("InvalidBucketName" | "InvalidArgument") => return ErrorKind::InputInvalid,
        _ => {}
    }

    match status {
        Some(404) => ErrorKind::NotFound,
        Some(401 | 403) => ErrorKind::PermissionDenied,
        Some(409) => ErrorKind::Conflict,
        _ => ErrorKind::ServiceError,
    }
}

impl<E> From<SdkError<E, HttpResponse>> for Error
where
    E: std::error::Error + ProvideErrorMetadata + Send + Sync + 'static,
{
    fn from(value: SdkError<E, HttpResponse>) -> Self {
        let kind = match &value {
            SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => ErrorKind::Transient,
            SdkError::ConstructionFailure(_) => ErrorKind::InputInvalid,
            SdkError::ServiceError(_) => classify_service_error(
                value.code(),
                value.raw_response().map(|resp| resp.status().as_u16()),
            ),
            _ => ErrorKind::ServiceError,
        };

        Error::new(kind, value)
    }
}
