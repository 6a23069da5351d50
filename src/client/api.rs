//! Typed HTTP client for the admin API

use super::errors::ClientError;
use super::session::Session;
use crate::core::models::{DeviceStatistics, User};
use crate::core::user_management::{Credentials, PermissionUpdate, Registration, RolesUpdate};
use crate::server::routes::auth::{LoginResponse, RegisterResponse};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Operations the admin views need from the server
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, ClientError>;

    async fn update_permission(&self, user_id: &str, permission: &str)
    -> Result<User, ClientError>;

    /// Replace the whole role set
    async fn update_roles(&self, user_id: &str, roles: &[String]) -> Result<User, ClientError>;

    async fn add_role(&self, user_id: &str, role: &str) -> Result<User, ClientError>;

    async fn remove_role(&self, user_id: &str, role: &str) -> Result<User, ClientError>;

    async fn delete_user(&self, user_id: &str) -> Result<(), ClientError>;
}

/// reqwest-backed client bound to one server base URL
#[derive(Debug, Clone)]
pub struct HttpAdminClient {
    http: reqwest::Client,
    base: Url,
    token: Option<String>,
}

impl HttpAdminClient {
    /// `base_url` includes the base path, e.g. `http://localhost:8000/billing-reports`
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base = Url::parse(base_url)
            .map_err(|e| ClientError::Validation(format!("Invalid base URL {}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::Validation(format!(
                "Invalid base URL {}",
                base_url
            )));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base,
            token: None,
        })
    }

    /// Attach the bearer token of a session
    pub fn with_session(mut self, session: &Session) -> Self {
        self.token = Some(session.token.clone());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Register a new user
    pub async fn register(&self, form: &Registration) -> Result<User, ClientError> {
        let response: RegisterResponse = self
            .send(self.request(Method::POST, &["registerUser"])?.json(form))
            .await?;
        Ok(response.user)
    }

    /// Log in and open a session
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        let credentials = Credentials {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        };
        let response: LoginResponse = self
            .send(self.request(Method::POST, &["login"])?.json(&credentials))
            .await?;
        Ok(Session::new(response.token, response.user, response.expires_in))
    }

    pub async fn device_statistics(&self) -> Result<DeviceStatistics, ClientError> {
        self.send(self.request(Method::GET, &["devices", "statistics"])?)
            .await
    }

    /// Statistics export as raw CSV text
    pub async fn export_device_statistics(&self) -> Result<String, ClientError> {
        let response = self
            .checked(self.request(Method::GET, &["devices", "statistics", "export"])?)
            .await?;
        Ok(response.text().await?)
    }

    /// Build a request for `segments` under the base path; segments are percent-encoded
    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Validation("Base URL cannot take a path".to_string()))?
            .pop_if_empty()
            .extend(segments);

        debug!("{} {}", method, url.path());
        let mut builder = self.http.request(method, url);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    /// Send and turn non-2xx statuses into errors
    async fn checked(&self, builder: RequestBuilder) -> Result<reqwest::Response, ClientError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::from_status(status.as_u16(), error_message(status, &body)))
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = self.checked(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Network(format!("Unreadable response: {}", e)))
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ClientError> {
        self.send(self.request(method, segments)?.json(body)).await
    }
}

/// The `message` of an error body, or the raw body when it is not JSON
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    if body.trim().is_empty() {
        status.canonical_reason().unwrap_or_default().to_string()
    } else {
        body.trim().to_string()
    }
}

#[async_trait]
impl AdminApi for HttpAdminClient {
    async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        self.send(self.request(Method::GET, &["users"])?).await
    }

    async fn update_permission(
        &self,
        user_id: &str,
        permission: &str,
    ) -> Result<User, ClientError> {
        let body = PermissionUpdate {
            permissions: Some(permission.to_string()),
            version: None,
        };
        self.send_json(Method::PUT, &["users", user_id, "permissions"], &body)
            .await
    }

    async fn update_roles(&self, user_id: &str, roles: &[String]) -> Result<User, ClientError> {
        let body = RolesUpdate {
            roles: Some(roles.to_vec()),
            version: None,
        };
        self.send_json(Method::PUT, &["users", user_id, "roles"], &body)
            .await
    }

    async fn add_role(&self, user_id: &str, role: &str) -> Result<User, ClientError> {
        self.send(self.request(Method::POST, &["users", user_id, "roles", role])?)
            .await
    }

    async fn remove_role(&self, user_id: &str, role: &str) -> Result<User, ClientError> {
        self.send(self.request(Method::DELETE, &["users", user_id, "roles", role])?)
            .await
    }

    async fn delete_user(&self, user_id: &str) -> Result<(), ClientError> {
        self.checked(self.request(Method::DELETE, &["users", user_id])?)
            .await?;
        Ok(())
    }
}
