use std::error;
use std::fmt;

use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::get_object::GetObjectError;

/// Error type for object storage backends.
/// Each variant can carry a message for logging purposes.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    NotFound(String),
    AccessDenied(String),
    RequestTimeout,
    RequestError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::NotFound(ref msg) => write!(f, "NotFound: {}", msg),
            Error::AccessDenied(ref msg) => write!(f, "AccessDenied: {}", msg),
            Error::RequestTimeout => f.write_str("RequestTimeout"),
            Error::RequestError(ref msg) => write!(f, "RequestError: {}", msg),
        }
    }
}

impl error::Error for Error {}

impl<R> From<SdkError<GetObjectError, R>> for Error
where
    R: fmt::Debug,
{
    fn from(err: SdkError<GetObjectError, R>) -> Self {
        match err {
            SdkError::TimeoutError(_) => Self::RequestTimeout,
            SdkError::ServiceError(ref e) => match e.err() {
                GetObjectError::NoSuchKey(_) => Self::NotFound(DisplayErrorContext(&err).to_string()),
                _ if e.err().code() == Some("AccessDenied") => {
                    Self::AccessDenied(DisplayErrorContext(&err).to_string())
                }
                _ => Self::RequestError(DisplayErrorContext(&err).to_string()),
            },
            _ => Self::RequestError(DisplayErrorContext(&err).to_string()),
        }
    }
}
