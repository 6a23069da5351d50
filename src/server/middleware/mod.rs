//! HTTP middleware: bearer-token authentication and route authorization

mod auth;
mod helpers;

pub use auth::{AuthMiddleware, AuthMiddlewareService, get_auth_context, require_auth_context};
pub use helpers::{classify_route, extract_bearer_token};
