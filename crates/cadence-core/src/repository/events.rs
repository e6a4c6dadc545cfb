use crate::error::CoreError;
use crate::models::{Event, NewTemplateData};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use super::{EventRepository, SqliteRepository};

#[async_trait]
impl EventRepository for SqliteRepository {
    async fn add_template(&self, data: NewTemplateData) -> Result<Event, CoreError> {
        data.pattern.validate()?;
        if data.end_time <= data.start_time {
            return Err(CoreError::InvalidInput(
                "template end time must be after its start time".to_string(),
            ));
        }

        let (frequency, days_of_week, end_type, end_date, occurrences) = data.pattern.to_columns();
        let now = Utc::now();
        let template = Event {
            id: Uuid::now_v7(),
            title: data.title,
            notes: data.notes,
            location: data.location,
            category: data.category,
            capacity: data.capacity,
            instructor: data.instructor,
            start_time: data.start_time,
            end_time: data.end_time,
            is_recurring: true,
            parent_event_id: None,
            occurs_on: None,
            frequency: Some(frequency),
            days_of_week,
            end_type: Some(end_type),
            end_date,
            occurrences,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"INSERT INTO events (
                id, title, notes, location, category, capacity, instructor,
                start_time, end_time, is_recurring, parent_event_id, occurs_on,
                frequency, days_of_week, end_type, end_date, occurrences,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)"#,
        )
        .bind(template.id)
        .bind(&template.title)
        .bind(&template.notes)
        .bind(&template.location)
        .bind(&template.category)
        .bind(template.capacity)
        .bind(&template.instructor)
        .bind(template.start_time)
        .bind(template.end_time)
        .bind(template.is_recurring)
        .bind(template.parent_event_id)
        .bind(template.occurs_on)
        .bind(template.frequency)
        .bind(&template.days_of_week)
        .bind(template.end_type)
        .bind(template.end_date)
        .bind(template.occurrences)
        .bind(template.created_at)
        .bind(template.updated_at)
        .execute(self.pool())
        .await?;

        Ok(template)
    }

    async fn find_event_by_id(&self, id: Uuid) -> Result<Option<Event>, CoreError> {
        let event = sqlx::query_as("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(event)
    }

    async fn find_events_by_id_prefix(&self, prefix: &str) -> Result<Vec<Event>, CoreError> {
        // Ids are stored as blobs; match against their hex form with the
        // hyphens stripped from the caller's input.
        let normalized = prefix.replace('-', "").to_lowercase();
        if normalized.is_empty() || !normalized.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CoreError::InvalidInput(format!(
                "'{prefix}' is not a valid event id prefix"
            )));
        }
        let events = sqlx::query_as(
            "SELECT * FROM events WHERE lower(hex(id)) LIKE $1 || '%' ORDER BY created_at",
        )
        .bind(normalized)
        .fetch_all(self.pool())
        .await?;
        Ok(events)
    }

    async fn find_templates(&self) -> Result<Vec<Event>, CoreError> {
        let templates = sqlx::query_as(
            r#"SELECT * FROM events
            WHERE is_recurring = 1 AND parent_event_id IS NULL
            ORDER BY start_time"#,
        )
        .fetch_all(self.pool())
        .await?;
        Ok(templates)
    }

    async fn find_instances_for_template(
        &self,
        template_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Event>, CoreError> {
        let instances = sqlx::query_as(
            r#"SELECT * FROM events
            WHERE parent_event_id = $1
            AND occurs_on BETWEEN $2 AND $3
            ORDER BY start_time"#,
        )
        .bind(template_id)
        .bind(start)
        .bind(end)
        .fetch_all(self.pool())
        .await?;
        Ok(instances)
    }

    async fn delete_event(&self, id: Uuid) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("Event with id {id} not found")));
        }

        Ok(())
    }
}
