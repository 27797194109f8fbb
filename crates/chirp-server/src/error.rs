//! Error translation: every failure leaves the service as the same JSON shape.
//!
//! Handlers and middleware return [`ApiError`]. Its `IntoResponse` only sets the status
//! and attaches an [`ErrorReport`] extension; [`translate_errors`] is the single place
//! that renders reports into `{ title, message, errors, stack }` bodies, hiding `stack`
//! in production.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use chirp_core::AppError;

use crate::config::Environment;
use crate::dto::ErrorResponse;

/// A failure on its way out to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    App(#[from] AppError),

    /// The request body could not be read as the expected JSON.
    #[error(transparent)]
    Rejected(#[from] JsonRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::App(err) => match err {
                AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
                AppError::NotFound { .. } | AppError::RouteNotFound => StatusCode::NOT_FOUND,
                AppError::Unauthorized => StatusCode::UNAUTHORIZED,
                AppError::Conflict(_) => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Rejected(rejection) => rejection.status(),
        }
    }

    pub fn title(&self) -> String {
        match self {
            ApiError::App(err) => match err {
                AppError::ValidationError(_) => "Bad request".to_string(),
                AppError::NotFound { resource, .. } => format!("{resource} not found"),
                AppError::RouteNotFound => "Resource Not Found".to_string(),
                AppError::Unauthorized => "Unauthorized".to_string(),
                AppError::Conflict(_) => "Conflict".to_string(),
                _ => "Server Error".to_string(),
            },
            ApiError::Rejected(_) => "Bad request".to_string(),
        }
    }

    /// Whether the request itself was at fault, as opposed to the server.
    pub fn is_client_error(&self) -> bool {
        match self {
            ApiError::App(err) => err.is_client_error(),
            ApiError::Rejected(_) => true,
        }
    }

    fn report(&self) -> ErrorReport {
        let (message, errors) = match self {
            ApiError::App(err) => (err.to_string(), err.messages()),
            ApiError::Rejected(rejection) => (rejection.body_text(), None),
        };

        ErrorReport {
            title: self.title(),
            message,
            errors,
            detail: format!("{self:?}"),
        }
    }
}

/// What went wrong, carried in response extensions until [`translate_errors`] renders it.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub title: String,
    pub message: String,
    pub errors: Option<Vec<String>>,
    /// Debug rendering of the underlying error; exposed as `stack` outside production.
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if self.is_client_error() {
            tracing::debug!(%status, error = %self, "request rejected");
        } else {
            tracing::error!(error = ?self, "request failed");
        }

        let mut response = status.into_response();
        response.extensions_mut().insert(self.report());
        response
    }
}

/// Terminal error handler: renders any [`ErrorReport`] into the JSON error body.
pub async fn translate_errors(
    State(environment): State<Environment>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let Some(report) = response.extensions_mut().remove::<ErrorReport>() else {
        return response;
    };

    let body = ErrorResponse {
        title: report.title,
        message: report.message,
        errors: report.errors,
        stack: (!environment.is_production()).then_some(report.detail),
    };

    let mut rendered = (response.status(), axum::Json(body)).into_response();
    for (name, value) in response.headers() {
        if *name != header::CONTENT_TYPE && *name != header::CONTENT_LENGTH {
            rendered.headers_mut().append(name.clone(), value.clone());
        }
    }
    rendered
}

/// Catch-all for unmatched routes and methods.
pub async fn not_found() -> ApiError {
    AppError::RouteNotFound.into()
}
