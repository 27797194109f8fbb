use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use chirp_core::AppError;
use chirp_core::models::NewUser;
use chirp_core::password::hash_password;
use chirp_core::traits::Store;
use chirp_core::validation::{TWEET_RULES, USER_RULES, validate};

use crate::auth::{AuthMode, require_credentials};
use crate::dto::{
    CreateUserRequest, HealthResponse, TweetEnvelope, TweetListResponse, TweetLookupResponse,
    TweetRequest, TweetResponse, UserEnvelope, UserResponse,
};
use crate::error::{ApiError, not_found};
use crate::extract::{JsonBody, TweetId};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Build the route table: tweets (optionally gated), users, health, and API docs.
///
/// `/tweets/` is served like `/tweets`. Unmatched paths and unsupported methods fall
/// through to [`not_found`].
pub fn router<S>(state: Arc<AppState<S>>, auth: AuthMode) -> Router
where
    S: Store + 'static,
{
    let collection = get(list_tweets::<S>)
        .post(create_tweet::<S>)
        .fallback(not_found);

    let mut tweets = Router::new()
        .route("/tweets", collection.clone())
        .route("/tweets/", collection)
        .route(
            "/tweets/{id}",
            get(get_tweet::<S>)
                .put(update_tweet::<S>)
                .delete(delete_tweet::<S>)
                .fallback(not_found),
        );

    if let AuthMode::Required(verifier) = auth {
        tweets = tweets.route_layer(middleware::from_fn_with_state(
            verifier,
            require_credentials,
        ));
    }

    let users = Router::new().route("/", post(create_user::<S>).fallback(not_found));

    let public = Router::new()
        .route("/health", get(health::<S>).fallback(not_found))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    public
        .merge(users)
        .merge(tweets)
        .fallback(not_found)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Tweets
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/tweets",
    responses(
        (status = 200, description = "All tweets", body = TweetListResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security((), ("bearer" = [])),
    tag = "tweets"
)]
pub async fn list_tweets<S: Store>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<impl IntoResponse, ApiError> {
    let tweets = state.store.list_tweets().await?;

    let response = TweetListResponse {
        tweets: tweets.into_iter().map(TweetResponse::from).collect(),
    };

    Ok(axum::Json(response))
}

#[utoipa::path(
    get,
    path = "/tweets/{id}",
    params(
        ("id" = i64, Path, description = "Tweet id (digits only)")
    ),
    responses(
        (status = 200, description = "Tweet details", body = TweetLookupResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security((), ("bearer" = [])),
    tag = "tweets"
)]
pub async fn get_tweet<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    TweetId(id): TweetId,
) -> Result<impl IntoResponse, ApiError> {
    let tweet = state
        .store
        .get_tweet(id)
        .await?
        .ok_or_else(|| AppError::tweet_not_found(id))?;

    Ok(axum::Json(TweetLookupResponse {
        tweet_id: tweet.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/tweets",
    request_body = TweetRequest,
    responses(
        (status = 200, description = "Tweet created", body = TweetEnvelope),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security((), ("bearer" = [])),
    tag = "tweets"
)]
pub async fn create_tweet<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    JsonBody(body): JsonBody<TweetRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate(&body, TWEET_RULES)?;
    let message = body.message.unwrap_or_default();

    let tweet = state.store.create_tweet(&message).await?;
    tracing::info!(tweet_id = tweet.id, "tweet created");

    Ok(axum::Json(TweetEnvelope {
        tweet: tweet.into(),
    }))
}

#[utoipa::path(
    put,
    path = "/tweets/{id}",
    params(
        ("id" = i64, Path, description = "Tweet id (digits only)")
    ),
    request_body = TweetRequest,
    responses(
        (status = 200, description = "Tweet updated", body = TweetEnvelope),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security((), ("bearer" = [])),
    tag = "tweets"
)]
pub async fn update_tweet<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    TweetId(id): TweetId,
    JsonBody(body): JsonBody<TweetRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate(&body, TWEET_RULES)?;
    let message = body.message.unwrap_or_default();

    let tweet = state
        .store
        .update_tweet(id, &message)
        .await?
        .ok_or_else(|| AppError::tweet_not_found(id))?;

    Ok(axum::Json(TweetEnvelope {
        tweet: tweet.into(),
    }))
}

#[utoipa::path(
    delete,
    path = "/tweets/{id}",
    params(
        ("id" = i64, Path, description = "Tweet id (digits only)")
    ),
    responses(
        (status = 204, description = "Tweet deleted"),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security((), ("bearer" = [])),
    tag = "tweets"
)]
pub async fn delete_tweet<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    TweetId(id): TweetId,
) -> Result<impl IntoResponse, ApiError> {
    if !state.store.delete_tweet(id).await? {
        return Err(AppError::tweet_not_found(id).into());
    }

    tracing::info!(tweet_id = id, "tweet deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User registered", body = UserEnvelope),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse),
        (status = 409, description = "Username or email taken", body = crate::dto::ErrorResponse),
    ),
    tag = "users"
)]
pub async fn create_user<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    JsonBody(body): JsonBody<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate(&body, USER_RULES)?;

    let password = body.password.unwrap_or_default();
    let hashed_password = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Generic(format!("Password hashing task failed: {e}")))??;

    let new_user = NewUser {
        username: body.username.unwrap_or_default(),
        email: body.email.unwrap_or_default(),
        hashed_password,
    };

    let user = state.store.create_user(&new_user).await?;
    tracing::info!(user_id = user.id, username = %user.username, "user registered");

    Ok((
        StatusCode::CREATED,
        axum::Json(UserEnvelope {
            user: UserResponse::from(user),
        }),
    ))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health<S: Store>(State(state): State<Arc<AppState<S>>>) -> impl IntoResponse {
    let db_status = match state.store.health_check().await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            "error"
        }
    };

    let (status, label) = if db_status == "ok" {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    let response = HealthResponse {
        status: label,
        database: db_status,
    };

    (status, axum::Json(response))
}
