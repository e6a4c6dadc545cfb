use crate::error::CoreError;
use crate::models::Event;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashSet;
use uuid::Uuid;

use super::{MaterializationStore, SqliteRepository};

#[async_trait]
impl MaterializationStore for SqliteRepository {
    async fn load_template(&self, id: Uuid) -> Result<Option<Event>, CoreError> {
        let event = sqlx::query_as("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(event)
    }

    async fn load_instance_dates(
        &self,
        template_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HashSet<NaiveDate>, CoreError> {
        let dates: Vec<NaiveDate> = sqlx::query_scalar(
            r#"SELECT occurs_on FROM events
            WHERE parent_event_id = $1
            AND occurs_on BETWEEN $2 AND $3"#,
        )
        .bind(template_id)
        .bind(start)
        .bind(end)
        .fetch_all(self.pool())
        .await?;
        Ok(dates.into_iter().collect())
    }

    async fn load_exclusions(&self, template_id: Uuid) -> Result<HashSet<NaiveDate>, CoreError> {
        let dates: Vec<NaiveDate> =
            sqlx::query_scalar("SELECT excluded_on FROM event_exclusions WHERE event_id = $1")
                .bind(template_id)
                .fetch_all(self.pool())
                .await?;
        Ok(dates.into_iter().collect())
    }

    async fn insert_instances(&self, records: Vec<Event>) -> Result<(), CoreError> {
        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| CoreError::PersistenceFailure(e.to_string()))?;

        for record in &records {
            // A uniqueness violation here means a concurrent run won the race
            // for this date; the whole batch rolls back and the caller can
            // safely retry.
            sqlx::query(
                r#"INSERT INTO events (
                    id, title, notes, location, category, capacity, instructor,
                    start_time, end_time, is_recurring, parent_event_id, occurs_on,
                    frequency, days_of_week, end_type, end_date, occurrences,
                    created_at, updated_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)"#,
            )
            .bind(record.id)
            .bind(&record.title)
            .bind(&record.notes)
            .bind(&record.location)
            .bind(&record.category)
            .bind(record.capacity)
            .bind(&record.instructor)
            .bind(record.start_time)
            .bind(record.end_time)
            .bind(record.is_recurring)
            .bind(record.parent_event_id)
            .bind(record.occurs_on)
            .bind(record.frequency)
            .bind(&record.days_of_week)
            .bind(record.end_type)
            .bind(record.end_date)
            .bind(record.occurrences)
            .bind(record.created_at)
            .bind(record.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| CoreError::PersistenceFailure(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| CoreError::PersistenceFailure(e.to_string()))?;

        Ok(())
    }
}
