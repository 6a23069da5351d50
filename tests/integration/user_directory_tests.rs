//! Storage integration tests on an in-memory SQLite database

#[cfg(test)]
mod tests {
    use crate::common::database::uncached;
    use crate::common::{BillingFactory, DeviceFactory, TestDatabase, UserFactory};
    use crate::{assert_err, assert_ok};
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;
    use billing_reports::core::rbac::{RoleEdit, RoleSet};
    use billing_reports::core::statistics::DeviceStatisticsService;
    use billing_reports::storage::redis::RedisPool;
    use billing_reports::storage::{BillingDocuments, DeviceInventory, UserDirectory};
    use billing_reports::storage::database::entities::{self, device, user};
    use billing_reports::utils::error::{ServiceError, classify_db_error};
    use sea_orm::EntityTrait;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_health_check_after_migration() {
        let db = TestDatabase::new().await;
        assert_ok!(db.db().health_check().await);
    }

    #[tokio::test]
    async fn test_insert_and_find_user() {
        let db = TestDatabase::new().await;
        let user = UserFactory::with_email("Ada@Example.com");
        assert_ok!(db.db().insert_user(&user).await);

        let by_id = db.db().find_user(user.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "ada@example.com");
        assert_eq!(by_id.version, 1);
        assert!(by_id.roles.is_empty());

        let by_email = db.db().find_user_by_email("ADA@example.com").await.unwrap();
        assert_eq!(by_email.map(|u| u.id), Some(user.id));
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let db = TestDatabase::new().await;
        assert_ok!(db.db().insert_user(&UserFactory::with_email("dup@example.com")).await);

        let err = assert_err!(
            db.db()
                .insert_user(&UserFactory::with_email("DUP@example.com"))
                .await
        );
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_racing_email_insert_maps_to_conflict() {
        let db = TestDatabase::new().await;
        assert_ok!(db.db().insert_user(&UserFactory::with_email("dup@example.com")).await);

        // A writer that passed the existence check before the first insert landed
        let racer = UserFactory::with_email("dup@example.com");
        let err = entities::User::insert(user::Model::from_domain_user(&racer))
            .exec_without_returning(db.db().connection())
            .await
            .unwrap_err();
        let err = classify_db_error(err);
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_racing_serial_insert_maps_to_conflict() {
        let db = TestDatabase::new().await;
        let device = DeviceFactory::tagged("retail");
        db.db().register_device(&device).await.unwrap();

        let mut racer = DeviceFactory::tagged("enterprise");
        racer.serial = device.serial.clone();
        let err = entities::Device::insert(device::Model::from_domain_device(&racer))
            .exec_without_returning(db.db().connection())
            .await
            .unwrap_err();
        assert!(matches!(classify_db_error(err), ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_users_in_creation_order() {
        let db = TestDatabase::new().await;
        let first = UserFactory::create();
        let mut second = UserFactory::create();
        second.created_at = first.created_at + chrono::Duration::seconds(1);
        db.db().insert_user(&second).await.unwrap();
        db.db().insert_user(&first).await.unwrap();

        let ids: Vec<_> = db.db().list_users().await.unwrap().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn test_set_roles_bumps_version() {
        let db = TestDatabase::new().await;
        let user = UserFactory::create();
        db.db().insert_user(&user).await.unwrap();

        let roles: RoleSet = ["Finance", "Sales"].iter().collect();
        let updated = db.db().set_roles(user.id, &roles, Some(1)).await.unwrap();
        assert_eq!(updated.version, 2);
        assert!(updated.roles.same_members(&roles));

        let stored = db.db().find_user(user.id).await.unwrap().unwrap();
        assert_eq!(stored.version, 2);
        assert!(stored.roles.same_members(&roles));
    }

    #[tokio::test]
    async fn test_stale_version_is_rejected() {
        let db = TestDatabase::new().await;
        let user = UserFactory::create();
        db.db().insert_user(&user).await.unwrap();
        db.db().set_permission(user.id, "View", Some(1)).await.unwrap();

        let err = assert_err!(db.db().set_permission(user.id, "Not view", Some(1)).await);
        assert!(matches!(err, ServiceError::Conflict(_)));

        let stored = db.db().find_user(user.id).await.unwrap().unwrap();
        assert_eq!(stored.permissions, "View");
        assert_eq!(stored.version, 2);
    }

    #[tokio::test]
    async fn test_unversioned_write_is_last_write_wins() {
        let db = TestDatabase::new().await;
        let user = UserFactory::create();
        db.db().insert_user(&user).await.unwrap();

        db.db().set_permission(user.id, "View", None).await.unwrap();
        let updated = db.db().set_permission(user.id, "Not view", None).await.unwrap();
        assert_eq!(updated.permissions, "Not view");
        assert_eq!(updated.version, 3);
    }

    #[tokio::test]
    async fn test_missing_user_is_not_found() {
        let db = TestDatabase::new().await;
        let id = uuid::Uuid::new_v4();
        let err = assert_err!(db.db().set_permission(id, "View", None).await);
        assert!(matches!(err, ServiceError::NotFound(_)));
        let err = assert_err!(
            db.db()
                .modify_roles(id, &RoleEdit::Add("Admin".into()))
                .await
        );
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_role_delta_noop_keeps_version() {
        let db = TestDatabase::new().await;
        let user = UserFactory::with_roles(&["Sales"]);
        db.db().insert_user(&user).await.unwrap();

        let same = db
            .db()
            .modify_roles(user.id, &RoleEdit::Add("Sales".into()))
            .await
            .unwrap();
        assert_eq!(same.version, 1);

        let same = db
            .db()
            .modify_roles(user.id, &RoleEdit::Remove("Admin".into()))
            .await
            .unwrap();
        assert_eq!(same.version, 1);

        let added = db
            .db()
            .modify_roles(user.id, &RoleEdit::Add("Admin".into()))
            .await
            .unwrap();
        assert_eq!(added.version, 2);
        assert_eq!(added.roles.as_slice(), ["Sales".to_string(), "Admin".to_string()]);
    }

    #[tokio::test]
    async fn test_concurrent_role_deltas_are_both_applied() {
        let db = TestDatabase::new().await;
        let user = UserFactory::create();
        db.db().insert_user(&user).await.unwrap();

        let a = db.db_arc();
        let b = db.db_arc();
        let id = user.id;
        let first =
            tokio::spawn(async move { a.modify_roles(id, &RoleEdit::Add("Finance".into())).await });
        let second =
            tokio::spawn(async move { b.modify_roles(id, &RoleEdit::Add("Sales".into())).await });
        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        let stored = db.db().find_user(id).await.unwrap().unwrap();
        assert!(stored.roles.contains("Finance"));
        assert!(stored.roles.contains("Sales"));
        assert_eq!(stored.version, 3);
    }

    #[tokio::test]
    async fn test_delete_user() {
        let db = TestDatabase::new().await;
        let user = UserFactory::create();
        db.db().insert_user(&user).await.unwrap();

        assert_ok!(db.db().delete_user(user.id).await);
        assert!(db.db().find_user(user.id).await.unwrap().is_none());

        let err = assert_err!(db.db().delete_user(user.id).await);
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_device_statistics_grouped_by_tag() {
        let db = TestDatabase::new().await;
        for tag in ["retail", "enterprise", "retail"] {
            db.db().register_device(&DeviceFactory::tagged(tag)).await.unwrap();
        }

        let stats = db.db().device_statistics().await.unwrap();
        let pairs: Vec<_> = stats.iter().map(|s| (s.tag.as_str(), s.total_devices)).collect();
        assert_eq!(pairs, vec![("enterprise", 1), ("retail", 2)]);
    }

    #[tokio::test]
    async fn test_duplicate_serial_conflicts() {
        let db = TestDatabase::new().await;
        let device = DeviceFactory::tagged("retail");
        db.db().register_device(&device).await.unwrap();

        let mut again = DeviceFactory::tagged("enterprise");
        again.serial = device.serial.clone();
        let err = assert_err!(db.db().register_device(&again).await);
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_statistics_service_export() {
        let db = TestDatabase::new().await;
        let service = DeviceStatisticsService::new(
            db.db_arc(),
            Arc::new(RedisPool::create_noop()),
            &uncached(),
        );
        service
            .register_device(&DeviceFactory::tagged("retail"))
            .await
            .unwrap();

        let csv = service.export_csv().await.unwrap();
        assert_eq!(csv, "Tag,Total Devices\r\nretail,1\r\n");
    }

    #[tokio::test]
    async fn test_billing_documents_upsert_and_journal_order() {
        let db = TestDatabase::new().await;

        db.db()
            .save_contact_profile(&BillingFactory::profile("42", "Ada"))
            .await
            .unwrap();
        db.db()
            .save_contact_profile(&BillingFactory::profile("42", "Augusta"))
            .await
            .unwrap();
        let profile = db.db().contact_profile("42").await.unwrap().unwrap();
        assert_eq!(profile.demographics.first_name, "Augusta");
        assert!(db.db().contact_profile("7").await.unwrap().is_none());

        for entry in ["opened", "billed", "paid"] {
            db.db()
                .append_journal(&BillingFactory::journal("42", entry))
                .await
                .unwrap();
        }
        db.db()
            .append_journal(&BillingFactory::journal("7", "other"))
            .await
            .unwrap();
        let entries: Vec<_> = db
            .db()
            .journals("42")
            .await
            .unwrap()
            .into_iter()
            .map(|j| j.fields["entry"].as_str().unwrap_or_default().to_string())
            .collect();
        assert_eq!(entries, vec!["opened", "billed", "paid"]);

        db.db()
            .save_subscription(&BillingFactory::subscription("42", "active"))
            .await
            .unwrap();
        db.db()
            .save_subscription(&BillingFactory::subscription("42", "expired"))
            .await
            .unwrap();
        let subscription = db.db().subscription("42").await.unwrap().unwrap();
        assert_eq!(subscription.services.len(), 1);
        assert_eq!(subscription.services[0].state, "expired");
    }
}
