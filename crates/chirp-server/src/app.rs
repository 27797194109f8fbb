use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::middleware;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use chirp_core::AppError;
use chirp_core::traits::Store;

use crate::auth::AuthMode;
use crate::config::ServerConfig;
use crate::error::translate_errors;
use crate::routes;
use crate::state::AppState;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 100 * 1024;

/// Assemble the complete request pipeline from its collaborators.
///
/// Layers, innermost first: route table, error translator, body limit, CORS, access log.
pub fn build_app<S>(store: S, auth: AuthMode, config: &ServerConfig) -> Result<Router, AppError>
where
    S: Store + 'static,
{
    let origin = HeaderValue::from_str(&config.cors_origin).map_err(|_| {
        AppError::ConfigError(format!("Invalid CORS origin '{}'", config.cors_origin))
    })?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = Arc::new(AppState {
        store,
        config: config.clone(),
    });

    let app = routes::router(state, auth)
        .layer(middleware::from_fn_with_state(
            config.environment,
            translate_errors,
        ))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}
