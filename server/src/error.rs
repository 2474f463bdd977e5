use std::convert::Infallible;

use warp::{http::StatusCode, Rejection, Reply};

use sesmail::api::ServerResult;

/// Wrap the shared error type so Reject can be impl'd
#[derive(Debug)]
pub struct Error(pub sesmail::Error);

impl warp::reject::Reject for Error {}

impl From<sesmail::Error> for Error {
    fn from(err: sesmail::Error) -> Self {
        Self(err)
    }
}

/// HTTP status reported back to SNS for a failed envelope.
///
/// SNS retries deliveries that fail with a 5xx, so only errors that a retry
/// could fix map to one.
pub fn status_for(err: &sesmail::Error) -> StatusCode {
    match *err {
        sesmail::Error::Authenticity(_) => StatusCode::FORBIDDEN,
        sesmail::Error::UnknownEnvelopeType(_)
        | sesmail::Error::InvalidNotificationType(_)
        | sesmail::Error::MalformedNotification(_)
        | sesmail::Error::Mime(_) => StatusCode::UNPROCESSABLE_ENTITY,
        sesmail::Error::StorageFetch(_)
        | sesmail::Error::Attachment(_)
        | sesmail::Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps rejections to HTTP return codes and a JSON `ServerResult` body.
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let status_code;
    let error;

    if err.is_not_found() {
        status_code = StatusCode::NOT_FOUND;
        error = "Not found".to_string();
    } else if let Some(e) = err.find::<Error>() {
        status_code = status_for(&e.0);
        error = e.0.to_string();
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        status_code = StatusCode::PAYLOAD_TOO_LARGE;
        error = "Envelope too large".to_string();
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        status_code = StatusCode::METHOD_NOT_ALLOWED;
        error = "Method not allowed".to_string();
    } else {
        log::error!("Unhandled rejection: {:?}", err);
        status_code = StatusCode::INTERNAL_SERVER_ERROR;
        error = "Internal server error".to_string();
    }

    let resp = ServerResult {
        success: false,
        error: Some(error),
        ..Default::default()
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&resp),
        status_code,
    ))
}
