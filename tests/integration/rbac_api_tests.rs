//! Admin API tests over a SQLite-backed storage layer

#[cfg(test)]
mod tests {
    use crate::common::UserFactory;
    use crate::common::database::test_storage_config;
    use crate::common::fixtures::TEST_PASSWORD;
    use actix_web::http::StatusCode;
    use actix_web::{test, web};
    use billing_reports::config::Config;
    use billing_reports::core::rbac::RoleSet;
    use billing_reports::server::{AppState, HttpServer};
    use billing_reports::storage::StorageLayer;
    use billing_reports::utils::error::ErrorResponse;
    use serde_json::{Value, json};

    const BASE: &str = "/billing-reports";

    async fn sqlite_state(config: Config) -> web::Data<AppState> {
        let storage = StorageLayer::new(&test_storage_config())
            .await
            .expect("storage layer");
        web::Data::new(AppState::new(config, storage))
    }

    fn rbac_config() -> Config {
        let mut config = Config::default();
        config.app.auth.rbac.enabled = true;
        config
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(HttpServer::create_app($state.clone())).await
        };
    }

    /// Register, grant roles through the directory, log in; yields (id, token)
    macro_rules! admin_session {
        ($app:expr, $state:expr, $email:expr, $roles:expr) => {{
            let req = test::TestRequest::post()
                .uri(&format!("{}/registerUser", BASE))
                .set_json(UserFactory::registration($email))
                .to_request();
            let resp = test::call_service(&$app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
            let body: Value = test::read_body_json(resp).await;
            let id: uuid::Uuid = body["user"]["id"].as_str().unwrap().parse().unwrap();

            let roles: RoleSet = $roles.iter().collect();
            $state.storage.users.set_roles(id, &roles, None).await.unwrap();

            let req = test::TestRequest::post()
                .uri(&format!("{}/login", BASE))
                .set_json(json!({ "email": $email, "password": TEST_PASSWORD }))
                .to_request();
            let body: Value = test::call_and_read_body_json(&$app, req).await;
            assert_eq!(body["token_type"], "Bearer");
            (id, format!("Bearer {}", body["token"].as_str().unwrap()))
        }};
    }

    #[actix_web::test]
    async fn test_health_reports_database_backend() {
        let state = sqlite_state(Config::default()).await;
        let app = app!(state);
        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["backend"], "database");
        assert_eq!(body["database"], true);
    }

    #[actix_web::test]
    async fn test_admin_flow_end_to_end() {
        let state = sqlite_state(rbac_config()).await;
        let app = app!(state);
        let (_, admin) = admin_session!(app, state, "admin@example.com", ["Admin"]);
        let (clerk, _) = admin_session!(app, state, "clerk@example.com", ["Sales"]);

        let req = test::TestRequest::post()
            .uri(&format!("{}/users/{}/roles/Finance", BASE, clerk))
            .insert_header(("Authorization", admin.clone()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["roles"], json!(["Sales", "Finance"]));
        let version = body["version"].as_i64().unwrap();

        // Stale version loses
        let req = test::TestRequest::put()
            .uri(&format!("{}/users/{}/permissions", BASE, clerk))
            .insert_header(("Authorization", admin.clone()))
            .set_json(json!({ "permissions": "View", "version": version - 1 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.code, "CONFLICT");

        let req = test::TestRequest::put()
            .uri(&format!("{}/users/{}/permissions", BASE, clerk))
            .insert_header(("Authorization", admin.clone()))
            .set_json(json!({ "permissions": "View", "version": version }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["permissions"], "View");
        assert_eq!(body["version"], version + 1);

        let req = test::TestRequest::get()
            .uri(&format!("{}/users", BASE))
            .insert_header(("Authorization", admin.clone()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let emails: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u["email"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(emails, vec!["admin@example.com", "clerk@example.com"]);

        let req = test::TestRequest::delete()
            .uri(&format!("{}/users/{}", BASE, clerk))
            .insert_header(("Authorization", admin.clone()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::delete()
            .uri(&format!("{}/users/{}/roles/Finance", BASE, clerk))
            .insert_header(("Authorization", admin))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_malformed_id_is_not_found() {
        let state = sqlite_state(rbac_config()).await;
        let app = app!(state);
        let (_, admin) = admin_session!(app, state, "admin@example.com", ["Admin"]);

        let req = test::TestRequest::put()
            .uri(&format!("{}/users/not-a-uuid/roles", BASE))
            .insert_header(("Authorization", admin))
            .set_json(json!({ "roles": ["Sales"] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_login_failures() {
        let state = sqlite_state(Config::default()).await;
        let app = app!(state);
        let (_, _) = admin_session!(app, state, "someone@example.com", ["Sales"]);

        let req = test::TestRequest::post()
            .uri(&format!("{}/login", BASE))
            .set_json(json!({ "email": "someone@example.com", "password": "wrong" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.message, "Invalid email or password");

        let req = test::TestRequest::post()
            .uri(&format!("{}/registerUser", BASE))
            .set_json(UserFactory::registration("SOMEONE@example.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_enforced_catalog_rejects_unknown_role() {
        let mut config = rbac_config();
        config.app.auth.rbac.enforce_catalog = true;
        let state = sqlite_state(config).await;
        let app = app!(state);
        let (admin_id, admin) = admin_session!(app, state, "admin@example.com", ["Admin"]);

        let req = test::TestRequest::post()
            .uri(&format!("{}/users/{}/roles/Janitor", BASE, admin_id))
            .insert_header(("Authorization", admin.clone()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::put()
            .uri(&format!("{}/users/{}/permissions", BASE, admin_id))
            .insert_header(("Authorization", admin))
            .set_json(json!({ "permissions": "Edit" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
