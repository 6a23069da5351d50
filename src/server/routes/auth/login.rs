//! User login endpoint

use super::models::LoginResponse;
use crate::core::user_management::Credentials;
use crate::server::state::AppState;
use crate::utils::error::ServiceError;
use actix_web::{HttpResponse, web};

/// Exchange credentials for a bearer token
pub async fn login(
    state: web::Data<AppState>,
    credentials: web::Json<Credentials>,
) -> Result<HttpResponse, ServiceError> {
    let user = state.users.authenticate(credentials.into_inner()).await?;
    let issued = state.jwt.create_token(&user)?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        token: issued.token,
        token_type: "Bearer".to_string(),
        expires_in: issued.expires_in,
        user,
    }))
}
