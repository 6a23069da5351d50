//! HTTP server core implementation

use crate::config::{Config, CorsConfig, ServerConfig};
use crate::server::handlers::health_check;
use crate::server::middleware::AuthMiddleware;
use crate::server::routes;
use crate::server::state::AppState;
use crate::storage::StorageLayer;
use crate::utils::error::{Result, ServiceError};
use actix_cors::Cors;
use actix_web::http::{Method, header};
use actix_web::{App, HttpServer as ActixHttpServer, middleware::DefaultHeaders, web};
use std::time::Duration;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    config: ServerConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server, initializing storage
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");
        let storage = StorageLayer::new(config.storage()).await?;
        Ok(Self::with_storage(config.clone(), storage))
    }

    /// Create a server over an existing storage layer
    pub fn with_storage(config: Config, storage: StorageLayer) -> Self {
        Self {
            config: config.server().clone(),
            state: AppState::new(config, storage),
        }
    }

    /// Create the Actix-web application
    pub fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let cors = Self::build_cors(&state.config.server().cors);
        let base_path = state.config.server().base_path.clone();

        App::new()
            .app_data(state)
            .app_data(
                web::JsonConfig::default()
                    .error_handler(|err, _req| ServiceError::from(err).into()),
            )
            .app_data(
                web::PathConfig::default()
                    .error_handler(|err, _req| ServiceError::from(err).into()),
            )
            .wrap(AuthMiddleware)
            .wrap(cors)
            .wrap(DefaultHeaders::new().add(("Server", "billing-reports")))
            .wrap(TracingLogger::default())
            .route("/health", web::get().to(health_check))
            .service(web::scope(&base_path).configure(routes::configure_routes))
    }

    fn build_cors(cors_config: &CorsConfig) -> Cors {
        let mut cors = Cors::default();
        if !cors_config.enabled {
            return cors;
        }

        if cors_config.allows_all_origins() {
            cors = cors.allow_any_origin();
            cors_config.validate().unwrap_or_else(|e| {
                warn!(error = %e, "CORS Configuration Warning");
            });
        } else {
            for origin in &cors_config.allowed_origins {
                cors = cors.allowed_origin(origin);
            }
        }

        cors = cors
            .allowed_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allowed_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .expose_headers([header::CONTENT_DISPOSITION])
            .max_age(cors_config.max_age as usize);

        if cors_config.allow_credentials {
            cors = cors.supports_credentials();
        }
        cors
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);
        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .workers(self.config.worker_count())
            .client_request_timeout(Duration::from_secs(self.config.timeout))
            .bind(&bind_addr)
            .map_err(|e| Self::format_bind_error(e, &bind_addr))?
            .run();

        info!(
            "HTTP server listening on {}{}",
            bind_addr, self.config.base_path
        );
        server
            .await
            .map_err(|e| ServiceError::internal(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    fn format_bind_error(err: std::io::Error, bind_addr: &str) -> ServiceError {
        if err.kind() == std::io::ErrorKind::AddrInUse {
            ServiceError::config(format!(
                "Address {} is already in use; set server.port or SERVER_PORT to a free port",
                bind_addr
            ))
        } else {
            ServiceError::config(format!("Failed to bind {}: {}", bind_addr, err))
        }
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
