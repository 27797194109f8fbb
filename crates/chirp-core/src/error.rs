use thiserror::Error;

/// Application-wide error types for Chirp.
#[derive(Error, Debug)]
pub enum AppError {
    /// One or more request fields failed validation.
    #[error("Bad request.")]
    ValidationError(Vec<String>),

    /// A record addressed by id does not exist.
    #[error("{resource} with the id of {id} could not be found.")]
    NotFound { resource: &'static str, id: String },

    /// No route matches the request path or method.
    #[error("The requested resource couldn't be found.")]
    RouteNotFound,

    /// The request carried no valid credential.
    #[error("Missing or invalid Authorization header. Expected: Bearer <token>")]
    Unauthorized,

    /// A uniqueness constraint rejected the write.
    #[error("{0}")]
    Conflict(String),

    /// Password hashing or hash parsing failed.
    #[error("Password hashing error: {0}")]
    PasswordHashError(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}

impl AppError {
    /// Shorthand for a missing tweet.
    pub fn tweet_not_found(id: impl ToString) -> Self {
        AppError::NotFound {
            resource: "Tweet",
            id: id.to_string(),
        }
    }

    pub fn username_taken() -> Self {
        AppError::Conflict("Username is already taken".into())
    }

    pub fn email_taken() -> Self {
        AppError::Conflict("Email is already registered".into())
    }

    /// Returns true if the failure was caused by the client's request rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::ValidationError(_)
                | AppError::NotFound { .. }
                | AppError::RouteNotFound
                | AppError::Unauthorized
                | AppError::Conflict(_)
        )
    }

    /// Human-readable messages attached to the failure, if any.
    pub fn messages(&self) -> Option<Vec<String>> {
        match self {
            AppError::ValidationError(errors) => Some(errors.clone()),
            AppError::Conflict(message) => Some(vec![message.clone()]),
            _ => None,
        }
    }
}
