//! User administration endpoints

use crate::core::user_management::{PermissionUpdate, RolesUpdate};
use crate::server::state::AppState;
use crate::utils::error::ServiceError;
use actix_web::{HttpResponse, web};
use serde_json::json;

/// Configure user administration routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/users", web::get().to(list_users))
        .route("/users/{id}", web::delete().to(delete_user))
        .route("/users/{id}/permissions", web::put().to(update_permission))
        .route("/users/{id}/roles", web::put().to(update_roles))
        .route("/users/{id}/roles/{role}", web::post().to(add_role))
        .route("/users/{id}/roles/{role}", web::delete().to(remove_role));
}

/// Every user, as a bare array
pub async fn list_users(state: web::Data<AppState>) -> Result<HttpResponse, ServiceError> {
    let users = state.users.list_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

pub async fn update_permission(
    state: web::Data<AppState>,
    id: web::Path<String>,
    update: web::Json<PermissionUpdate>,
) -> Result<HttpResponse, ServiceError> {
    let user = state
        .users
        .replace_permission(&id, update.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(user))
}

pub async fn update_roles(
    state: web::Data<AppState>,
    id: web::Path<String>,
    update: web::Json<RolesUpdate>,
) -> Result<HttpResponse, ServiceError> {
    let user = state.users.replace_roles(&id, update.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

pub async fn add_role(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ServiceError> {
    let (id, role) = path.into_inner();
    let user = state.users.add_role(&id, &role).await?;
    Ok(HttpResponse::Ok().json(user))
}

pub async fn remove_role(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ServiceError> {
    let (id, role) = path.into_inner();
    let user = state.users.remove_role(&id, &role).await?;
    Ok(HttpResponse::Ok().json(user))
}

pub async fn delete_user(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    state.users.delete_user(&id).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "User deleted successfully" })))
}
