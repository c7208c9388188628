use std::process::{ExitCode, Termination};

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use error_stack::Report;
use kernel::{ErrorMessage, KernelError};
use serde::Serialize;

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
}

impl ErrorStatus {
    pub fn status_code(&self) -> StatusCode {
        match self.0.current_context() {
            KernelError::Validation => StatusCode::BAD_REQUEST,
            KernelError::NotFound => StatusCode::NOT_FOUND,
            KernelError::Conflict => StatusCode::CONFLICT,
            KernelError::Unauthorized => StatusCode::UNAUTHORIZED,
            KernelError::Forbidden => StatusCode::FORBIDDEN,
            KernelError::Timeout => StatusCode::REQUEST_TIMEOUT,
            KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The most recent message attached to the report. Internal failures
    /// without one are not described to the client.
    pub fn message(&self) -> String {
        match self.0.downcast_ref::<ErrorMessage>() {
            Some(message) => message.to_string(),
            None if self.status_code().is_server_error() => "Something went very wrong!".to_string(),
            None => self.0.current_context().to_string(),
        }
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        let code = self.status_code();
        if code.is_server_error() {
            tracing::error!("{:?}", self.0);
        } else {
            tracing::debug!("{:?}", self.0);
        }
        let body = ErrorBody {
            status: if code.is_server_error() { "error" } else { "fail" },
            message: self.message(),
        };
        (code, Json(body)).into_response()
    }
}
