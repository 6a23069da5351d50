//! Device endpoints

use crate::core::models::Device;
use crate::core::statistics::CSV_FILENAME;
use crate::server::state::AppState;
use crate::utils::error::ServiceError;
use crate::utils::validation::require_field;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, web};
use serde::Deserialize;

/// Configure device routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/devices", web::post().to(register_device))
        .route("/devices/statistics", web::get().to(statistics))
        .route("/devices/statistics/export", web::get().to(export_statistics));
}

/// Device registration form
#[derive(Debug, Deserialize)]
pub struct DeviceRegistration {
    #[serde(default)]
    pub serial: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub contact_id: Option<String>,
}

pub async fn register_device(
    state: web::Data<AppState>,
    form: web::Json<DeviceRegistration>,
) -> Result<HttpResponse, ServiceError> {
    let form = form.into_inner();
    let serial = require_field("serial", form.serial.as_deref())?;
    let tag = require_field("tag", form.tag.as_deref())?;
    let device = state
        .statistics
        .register_device(&Device::new(serial, tag, form.contact_id))
        .await?;
    Ok(HttpResponse::Created().json(device))
}

/// `{ statistics: [{ tag, totalDevices }] }`
pub async fn statistics(state: web::Data<AppState>) -> Result<HttpResponse, ServiceError> {
    let statistics = state.statistics.statistics().await?;
    Ok(HttpResponse::Ok().json(statistics))
}

/// Statistics as a CSV attachment
pub async fn export_statistics(state: web::Data<AppState>) -> Result<HttpResponse, ServiceError> {
    let csv = state.statistics.export_csv().await?;
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(CSV_FILENAME.to_string())],
        })
        .body(csv))
}

