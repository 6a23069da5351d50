//! Helper functions for middleware

use crate::auth::RouteClass;
use actix_web::http::header::{AUTHORIZATION, HeaderMap};

/// Extract a bearer token from the `Authorization` header
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Classify a request path under the configured base path
pub fn classify_route(path: &str, base_path: &str) -> RouteClass {
    if path == "/health" {
        return RouteClass::Public;
    }

    let Some(rest) = path.strip_prefix(base_path) else {
        return RouteClass::Authenticated;
    };

    match rest {
        "/login" | "/registerUser" => RouteClass::Public,
        "/users" => RouteClass::UserAdministration,
        r if r.starts_with("/users/") => RouteClass::UserAdministration,
        _ => RouteClass::Authenticated,
    }
}
