//! Login and registration endpoints

mod login;
mod models;
mod register;

pub use login::login;
pub use models::{LoginResponse, RegisterResponse};
pub use register::register;

use actix_web::web;

/// Configure authentication routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::post().to(login))
        .route("/registerUser", web::post().to(register));
}
