use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use subtle::ConstantTimeEq;

use chirp_core::AppError;

use crate::error::ApiError;

/// Decides whether a bearer credential is valid.
///
/// The session/identity provider behind this trait is external to the service.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, credential: &str) -> bool;
}

/// Accepts exactly one statically configured API token.
pub struct ApiTokenVerifier {
    token: String,
}

impl ApiTokenVerifier {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl CredentialVerifier for ApiTokenVerifier {
    fn verify(&self, credential: &str) -> bool {
        credential.as_bytes().ct_eq(self.token.as_bytes()).into()
    }
}

/// Whether the tweets routes sit behind the auth gate.
#[derive(Clone)]
pub enum AuthMode {
    Disabled,
    Required(Arc<dyn CredentialVerifier>),
}

impl AuthMode {
    pub fn is_required(&self) -> bool {
        matches!(self, AuthMode::Required(_))
    }
}

/// Middleware that validates `Authorization: Bearer <token>` with the configured verifier.
///
/// Runs before any extractor, so unauthenticated requests never reach validation or storage.
pub async fn require_credentials(
    State(verifier): State<Arc<dyn CredentialVerifier>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authenticated = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .is_some_and(|token| verifier.verify(token));

    if !authenticated {
        tracing::debug!(path = %request.uri().path(), "rejected unauthenticated request");
        return Err(AppError::Unauthorized.into());
    }

    Ok(next.run(request).await)
}
