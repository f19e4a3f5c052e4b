//! Unified error type.

use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::response::{IntoResponse, Response};
use crate::status::Status;
use crate::store::StoreError;

/// The error type returned by kvgate's fallible operations.
///
/// Every variant maps to exactly one HTTP response through [`IntoResponse`],
/// so no failure leaves a request unanswered.
#[derive(Debug, Error)]
pub enum Error {
    /// Nothing is stored under the requested key.
    #[error("no object stored at `{0}`")]
    NotFound(String),

    /// The request method is neither `GET` nor `POST`.
    #[error("method `{0}` is not supported")]
    UnsupportedMethod(String),

    /// A body declared as `application/json` did not parse.
    #[error("malformed JSON body: {0}")]
    MalformedInput(#[from] serde_json::Error),

    /// The store backend failed; the cause is logged, not returned.
    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),

    /// Binding or accepting failed.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: &'a str,
}

fn error_response(status: Status, message: &str) -> Response {
    let body = ErrorBody { success: false, error: message };
    match serde_json::to_vec(&body) {
        Ok(bytes) => Response::builder().status(status).json(bytes),
        Err(_) => Response::status(status),
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(_) => Response::status(Status::NotFound),
            Self::UnsupportedMethod(_) => Response::status(Status::InternalServerError),
            Self::MalformedInput(e) => {
                error_response(Status::BadRequest, &format!("malformed JSON body: {e}"))
            }
            Self::StoreUnavailable(e) => {
                error!(error = %e, "store call failed");
                error_response(Status::ServiceUnavailable, "store unavailable")
            }
            Self::Io(e) => {
                error!(error = %e, "io failure while handling request");
                error_response(Status::InternalServerError, "internal error")
            }
        }
    }
}
