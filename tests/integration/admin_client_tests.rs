//! Admin client tests against a mock server and a live server

#[cfg(test)]
mod tests {
    use crate::common::UserFactory;
    use crate::common::fixtures::TEST_PASSWORD;
    use billing_reports::client::{
        AdminApi, ClientError, DataTable, GENERIC_ERROR_MESSAGE, HttpAdminClient,
        PermissionsView, RoleMutation, RoleToggle, RolesView, Route, RouteDecision,
        TableState, route_guard,
    };
    use billing_reports::config::Config;
    use billing_reports::core::models::User;
    use billing_reports::core::user_management::Registration;
    use billing_reports::server::{AppState, HttpServer};
    use billing_reports::storage::{MemoryStore, StorageLayer, UserDirectory};
    use chrono::Utc;
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpAdminClient {
        let mut client =
            HttpAdminClient::new(&format!("{}/billing-reports", server.uri())).unwrap();
        client.set_token(Some("test-token".to_string()));
        client
    }

    fn user_json(user: &User) -> serde_json::Value {
        serde_json::to_value(user).unwrap()
    }

    #[tokio::test]
    async fn test_list_users_sends_bearer_token() {
        let server = MockServer::start().await;
        let users = vec![UserFactory::with_roles(&["Sales"]), UserFactory::create()];
        Mock::given(method("GET"))
            .and(path("/billing-reports/users"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([
                    user_json(&users[0]),
                    user_json(&users[1])
                ])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let listed = client_for(&server).list_users().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, users[0].id);
        assert!(listed[0].roles.contains("Sales"));
    }

    #[tokio::test]
    async fn test_role_delta_paths_are_encoded() {
        let server = MockServer::start().await;
        let user = UserFactory::with_roles(&["Not view"]);
        Mock::given(method("DELETE"))
            .and(path(format!("/billing-reports/users/{}/roles/Not%20view", user.id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json(&user)))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .remove_role(&user.id.to_string(), "Not view")
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_replace_roles_body() {
        let server = MockServer::start().await;
        let user = UserFactory::with_roles(&["Finance", "Admin"]);
        Mock::given(method("PUT"))
            .and(path(format!("/billing-reports/users/{}/roles", user.id)))
            .and(body_json(json!({ "roles": ["Finance", "Admin"] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json(&user)))
            .expect(1)
            .mount(&server)
            .await;

        let updated = client_for(&server)
            .update_roles(
                &user.id.to_string(),
                &["Finance".to_string(), "Admin".to_string()],
            )
            .await
            .unwrap();
        assert_eq!(updated.roles.len(), 2);
    }

    #[tokio::test]
    async fn test_error_statuses_map_to_client_errors() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/billing-reports/users/missing/permissions"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "message": "User missing not found",
                "code": "NOT_FOUND",
                "timestamp": 0
            })))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/billing-reports/users/anyone"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "message": "One of the roles [Admin] is required",
                "code": "FORBIDDEN",
                "timestamp": 0
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/billing-reports/users"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.update_permission("missing", "View").await.unwrap_err();
        assert_eq!(err, ClientError::NotFound("User missing not found".to_string()));

        let err = client.delete_user("anyone").await.unwrap_err();
        assert!(err.requires_login());
        assert_eq!(err.banner_message(), "One of the roles [Admin] is required");

        let err = client.list_users().await.unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_network_failure_keeps_table_rows() {
        let server = MockServer::start().await;
        let user = UserFactory::create();
        Mock::given(method("GET"))
            .and(path("/billing-reports/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([user_json(&user)])))
            .mount(&server)
            .await;

        let mut table = DataTable::new(PermissionsView);
        table.load(&client_for(&server)).await.unwrap();
        assert_eq!(table.rows().len(), 1);

        // Nothing listens on port 1
        let offline = HttpAdminClient::new("http://127.0.0.1:1/billing-reports").unwrap();
        table.load(&offline).await.unwrap();
        assert_eq!(
            table.state(),
            &TableState::Error(GENERIC_ERROR_MESSAGE.to_string())
        );
        assert_eq!(table.rows().len(), 1);
        assert_eq!(table.banner(), Some(GENERIC_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn test_session_guard_after_login() {
        let server = MockServer::start().await;
        let user = UserFactory::create();
        Mock::given(method("POST"))
            .and(path("/billing-reports/login"))
            .and(body_json(json!({ "email": user.email, "password": TEST_PASSWORD })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": "signed.jwt.value",
                "token_type": "Bearer",
                "expires_in": 3600,
                "user": user_json(&user),
            })))
            .mount(&server)
            .await;

        let client = HttpAdminClient::new(&format!("{}/billing-reports", server.uri())).unwrap();
        assert_eq!(route_guard(None, Route::Roles, Utc::now()), RouteDecision::RedirectToLogin);

        let session = client.login(&user.email, TEST_PASSWORD).await.unwrap();
        assert_eq!(session.token, "signed.jwt.value");
        assert_eq!(session.user.id, user.id);
        assert_eq!(route_guard(Some(&session), Route::Roles, Utc::now()), RouteDecision::Allow);
    }

    /// Serve the real application on an ephemeral port
    fn spawn_server(config: Config, store: Arc<MemoryStore>) -> String {
        let state = actix_web::web::Data::new(AppState::new(
            config,
            StorageLayer::from_memory(store),
        ));
        let server =
            actix_web::HttpServer::new(move || HttpServer::create_app(state.clone()))
                .workers(1)
                .bind(("127.0.0.1", 0))
                .expect("bind ephemeral port");
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        format!("http://{}/billing-reports", addr)
    }

    #[actix_web::test]
    async fn test_client_against_live_server() {
        let mut config = Config::default();
        config.app.auth.rbac.enabled = true;
        let store = Arc::new(MemoryStore::new());
        let base = spawn_server(config, store.clone());

        let client = HttpAdminClient::new(&base).unwrap();
        let admin = client
            .register(&Registration {
                name: Some("Admin".to_string()),
                email: Some("admin@example.com".to_string()),
                password: Some(TEST_PASSWORD.to_string()),
                designation: None,
            })
            .await
            .unwrap();
        store
            .set_roles(admin.id, &["Admin"].iter().collect(), None)
            .await
            .unwrap();

        let session = client.login("admin@example.com", TEST_PASSWORD).await.unwrap();
        let client = client.with_session(&session);

        let mut roles = DataTable::new(RolesView::new(RoleMutation::Delta));
        roles.load(&client).await.unwrap();
        assert_eq!(roles.rows().len(), 1);

        roles.toggle_edit(admin.id).unwrap();
        roles
            .submit(&client, admin.id, &RoleToggle::Grant("Finance".to_string()))
            .await
            .unwrap();
        assert_eq!(roles.state(), &TableState::Idle);
        assert_eq!(
            roles.rows()[0].roles.as_slice(),
            ["Admin".to_string(), "Finance".to_string()]
        );

        let mut permissions = DataTable::new(PermissionsView);
        permissions.load(&client).await.unwrap();
        permissions.toggle_edit(admin.id).unwrap();
        let result = permissions
            .submit(&client, admin.id, &"   ".to_string())
            .await;
        assert!(result.is_err());
        assert_eq!(permissions.state(), &TableState::Editing(admin.id));
        assert!(permissions.banner().is_some());

        let stats = client.device_statistics().await.unwrap();
        assert!(stats.statistics.is_empty());
        let csv = client.export_device_statistics().await.unwrap();
        assert_eq!(csv, "Tag,Total Devices\r\n");
    }
}
