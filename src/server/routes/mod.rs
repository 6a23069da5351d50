//! HTTP route modules

pub mod auth;
pub mod devices;
pub mod users;

use actix_web::web;

/// Configure every route under the base path scope
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    auth::configure_routes(cfg);
    users::configure_routes(cfg);
    devices::configure_routes(cfg);
}
