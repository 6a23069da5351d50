use crate::core::models::{ContactProfile, Journal, Subscription};
use crate::storage::directory::BillingDocuments;
use crate::utils::error::{Result, ServiceError, classify_db_error};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, contact_profile, journal, subscription};
use super::types::SeaOrmDatabase;

#[async_trait]
impl BillingDocuments for SeaOrmDatabase {
    async fn save_contact_profile(&self, profile: &ContactProfile) -> Result<()> {
        debug!("Saving contact profile {}", profile.contact_id);

        let model = contact_profile::ActiveModel {
            contact_id: Set(profile.contact_id.clone()),
            document: Set(serde_json::to_value(profile)?),
            updated_at: Set(Utc::now().into()),
        };
        entities::ContactProfile::insert(model)
            .on_conflict(
                OnConflict::column(contact_profile::Column::ContactId)
                    .update_columns([
                        contact_profile::Column::Document,
                        contact_profile::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(classify_db_error)?;
        Ok(())
    }

    async fn contact_profile(&self, contact_id: &str) -> Result<Option<ContactProfile>> {
        let model = entities::ContactProfile::find_by_id(contact_id.to_string())
            .one(&self.db)
            .await
            .map_err(classify_db_error)?;

        match model {
            Some(model) => Ok(Some(serde_json::from_value(model.document)?)),
            None => Ok(None),
        }
    }

    async fn append_journal(&self, entry: &Journal) -> Result<()> {
        debug!("Appending journal for contact {}", entry.contact_id);

        let model = journal::ActiveModel {
            contact_id: Set(entry.contact_id.clone()),
            contact_code: Set(entry.contact_code.clone()),
            document: Set(serde_json::to_value(entry)?),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };
        entities::Journal::insert(model)
            .exec_without_returning(&self.db)
            .await
            .map_err(classify_db_error)?;
        Ok(())
    }

    async fn journals(&self, contact_id: &str) -> Result<Vec<Journal>> {
        let models = entities::Journal::find()
            .filter(journal::Column::ContactId.eq(contact_id))
            .order_by_asc(journal::Column::Id)
            .all(&self.db)
            .await
            .map_err(classify_db_error)?;

        models
            .into_iter()
            .map(|model| serde_json::from_value(model.document).map_err(ServiceError::from))
            .collect()
    }

    async fn save_subscription(&self, entry: &Subscription) -> Result<()> {
        debug!("Saving subscription for contact {}", entry.contact_id);

        let model = subscription::ActiveModel {
            contact_id: Set(entry.contact_id.clone()),
            document: Set(serde_json::to_value(entry)?),
            updated_at: Set(Utc::now().into()),
        };
        entities::Subscription::insert(model)
            .on_conflict(
                OnConflict::column(subscription::Column::ContactId)
                    .update_columns([
                        subscription::Column::Document,
                        subscription::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(classify_db_error)?;
        Ok(())
    }

    async fn subscription(&self, contact_id: &str) -> Result<Option<Subscription>> {
        let model = entities::Subscription::find_by_id(contact_id.to_string())
            .one(&self.db)
            .await
            .map_err(classify_db_error)?;

        match model {
            Some(model) => Ok(Some(serde_json::from_value(model.document)?)),
            None => Ok(None),
        }
    }
}
