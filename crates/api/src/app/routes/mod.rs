use axum::Router;

pub mod assets;
pub mod system;

/// Router for all endpoints except `/health`.
pub fn router() -> Router {
    Router::new().nest("/assets", assets::router())
}
