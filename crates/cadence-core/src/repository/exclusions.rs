use crate::error::CoreError;
use crate::models::Event;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use super::{ExclusionRepository, SqliteRepository};

#[async_trait]
impl ExclusionRepository for SqliteRepository {
    async fn add_exclusion(&self, template_id: Uuid, date: NaiveDate) -> Result<(), CoreError> {
        let template: Option<Event> = sqlx::query_as("SELECT * FROM events WHERE id = $1")
            .bind(template_id)
            .fetch_optional(self.pool())
            .await?;
        let template = template.ok_or(CoreError::TemplateNotFound(template_id))?;
        if template.is_instance() || !template.is_recurring {
            return Err(CoreError::NotARecurringTemplate(template_id));
        }

        // Re-excluding a date is a no-op, not an error.
        sqlx::query(
            r#"INSERT OR IGNORE INTO event_exclusions (event_id, excluded_on, created_at)
            VALUES ($1, $2, $3)"#,
        )
        .bind(template_id)
        .bind(date)
        .bind(Utc::now())
        .execute(self.pool())
        .await?;

        Ok(())
    }

    async fn remove_exclusion(&self, template_id: Uuid, date: NaiveDate) -> Result<(), CoreError> {
        let result =
            sqlx::query("DELETE FROM event_exclusions WHERE event_id = $1 AND excluded_on = $2")
                .bind(template_id)
                .bind(date)
                .execute(self.pool())
                .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!(
                "No exclusion on {date} for template {template_id}"
            )));
        }

        Ok(())
    }

    async fn find_exclusions(&self, template_id: Uuid) -> Result<Vec<NaiveDate>, CoreError> {
        let dates = sqlx::query_scalar(
            "SELECT excluded_on FROM event_exclusions WHERE event_id = $1 ORDER BY excluded_on",
        )
        .bind(template_id)
        .fetch_all(self.pool())
        .await?;
        Ok(dates)
    }
}
