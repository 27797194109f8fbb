use crate::config::ServerConfig;

/// Shared application state, available to all route handlers via `State<Arc<AppState<S>>>`.
pub struct AppState<S> {
    pub store: S,
    pub config: ServerConfig,
}
