//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::storage::StorageLayer;
use crate::utils::error::{Result, ServiceError};
use std::path::Path;
use tracing::info;

/// Server builder
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
    storage: Option<StorageLayer>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Use an existing storage layer instead of connecting from configuration
    pub fn with_storage(mut self, storage: StorageLayer) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| ServiceError::config("Configuration is required"))?;

        match self.storage {
            Some(storage) => Ok(HttpServer::with_storage(config, storage)),
            None => HttpServer::new(&config).await,
        }
    }
}

/// Load configuration from `config_path` (defaults when missing) and serve until shutdown
pub async fn run_server(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path).await?;
    crate::utils::logging::init_tracing(config.logging());
    crate::config::warn_insecure_config(config.auth());

    let server = ServerBuilder::new().with_config(config).build().await?;
    let base = &server.config().base_path;
    info!("Endpoints:");
    info!("   GET    /health");
    info!("   POST   {}/login", base);
    info!("   POST   {}/registerUser", base);
    info!("   GET    {}/users", base);
    info!("   PUT    {}/users/{{id}}/permissions", base);
    info!("   PUT    {}/users/{{id}}/roles", base);
    info!("   POST   {}/users/{{id}}/roles/{{role}}", base);
    info!("   DELETE {}/users/{{id}}/roles/{{role}}", base);
    info!("   DELETE {}/users/{{id}}", base);
    info!("   POST   {}/devices", base);
    info!("   GET    {}/devices/statistics[/export]", base);

    server.start().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_requires_config() {
        let err = ServerBuilder::new().build().await.err().unwrap();
        assert!(matches!(err, ServiceError::Config(_)));
    }

    #[tokio::test]
    async fn test_build_with_memory_storage() {
        let server = ServerBuilder::new()
            .with_config(Config::default())
            .with_storage(StorageLayer::in_memory())
            .build()
            .await
            .unwrap();
        assert_eq!(server.config().base_path, "/billing-reports");
    }
}
