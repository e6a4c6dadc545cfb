use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{Event, NewTemplateData};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashSet;
use uuid::Uuid;

// Re-export domain modules
pub mod events;
pub mod exclusions;
pub mod materialization;

// Traits are defined in this module and implemented in respective domain modules

/// Domain-specific trait for template and instance records
#[async_trait]
pub trait EventRepository {
    async fn add_template(&self, data: NewTemplateData) -> Result<Event, CoreError>;
    async fn find_event_by_id(&self, id: Uuid) -> Result<Option<Event>, CoreError>;
    async fn find_events_by_id_prefix(&self, prefix: &str) -> Result<Vec<Event>, CoreError>;
    async fn find_templates(&self) -> Result<Vec<Event>, CoreError>;
    async fn find_instances_for_template(
        &self,
        template_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Event>, CoreError>;
    async fn delete_event(&self, id: Uuid) -> Result<(), CoreError>;
}

/// Domain-specific trait for template exclusion dates
#[async_trait]
pub trait ExclusionRepository {
    async fn add_exclusion(&self, template_id: Uuid, date: NaiveDate) -> Result<(), CoreError>;
    async fn remove_exclusion(&self, template_id: Uuid, date: NaiveDate) -> Result<(), CoreError>;
    async fn find_exclusions(&self, template_id: Uuid) -> Result<Vec<NaiveDate>, CoreError>;
}

/// The store surface the materializer consumes. The engine never talks to the
/// database directly; it loads through these four operations and writes one
/// all-or-nothing batch.
#[async_trait]
pub trait MaterializationStore {
    async fn load_template(&self, id: Uuid) -> Result<Option<Event>, CoreError>;
    /// Calendar dates of already-generated instances for the template inside
    /// the window. Keyed by date, not instance id: two instances on the same
    /// date would violate the uniqueness invariant regardless of other fields.
    async fn load_instance_dates(
        &self,
        template_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HashSet<NaiveDate>, CoreError>;
    async fn load_exclusions(&self, template_id: Uuid) -> Result<HashSet<NaiveDate>, CoreError>;
    /// Inserts every record in a single transaction. On any failure the whole
    /// batch is rolled back and `PersistenceFailure` is returned.
    async fn insert_instances(&self, records: Vec<Event>) -> Result<(), CoreError>;
}

/// Main repository trait that composes all domain traits
#[async_trait]
pub trait Repository: EventRepository + ExclusionRepository + MaterializationStore {
    // This trait automatically composes all domain-specific repositories
    // Individual domain operations are defined in their respective traits
}

/// SQLite implementation of the repository pattern
pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the database pool for internal use across modules
    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl Repository for SqliteRepository {}
