use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("Template not found: {0}")]
    TemplateNotFound(Uuid),

    #[error("Event '{0}' is not a recurring template")]
    NotARecurringTemplate(Uuid),

    #[error("Invalid recurrence pattern: {0}")]
    InvalidPattern(String),

    /// The batch insert failed and was rolled back. Nothing was committed, so
    /// the whole `generate` call is safe to retry.
    #[error("Batch write failed, no instances were committed: {0}")]
    PersistenceFailure(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Ambiguous short ID. Did you mean one of these?")]
    AmbiguousId(Vec<(String, String)>), // Vec of (ID, Title)
}
