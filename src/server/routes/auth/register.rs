//! User registration endpoint

use super::models::RegisterResponse;
use crate::core::user_management::Registration;
use crate::server::state::AppState;
use crate::utils::error::ServiceError;
use actix_web::{HttpResponse, web};

/// Register a new user
pub async fn register(
    state: web::Data<AppState>,
    form: web::Json<Registration>,
) -> Result<HttpResponse, ServiceError> {
    let user = state.users.register(form.into_inner()).await?;
    Ok(HttpResponse::Created().json(RegisterResponse { user }))
}
