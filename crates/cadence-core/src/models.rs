use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::pattern::RecurrencePattern;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Biweekly => write!(f, "biweekly"),
            Frequency::Monthly => write!(f, "monthly"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum EndType {
    Never,
    Date,
    Occurrences,
}

/// A row in the events table: either a recurring template or a generated
/// instance.
///
/// Template rows: `is_recurring = true`, recurrence columns populated,
/// `parent_event_id` and `occurs_on` are `None`. The template's `start_time`
/// is the first occurrence; it anchors both the time-of-day of every generated
/// instance and the phase of the biweekly cadence.
///
/// Instance rows: `parent_event_id` points back at the template (a reference,
/// not an ownership link), `occurs_on` holds the local calendar date of
/// `start_time`, recurrence columns are `None`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub notes: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub capacity: Option<i64>,
    pub instructor: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_recurring: bool,
    pub parent_event_id: Option<Uuid>,
    pub occurs_on: Option<NaiveDate>,
    pub frequency: Option<Frequency>,
    pub days_of_week: Option<String>,
    pub end_type: Option<EndType>,
    pub end_date: Option<NaiveDate>,
    pub occurrences: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// A generated instance rather than a template.
    pub fn is_instance(&self) -> bool {
        self.parent_event_id.is_some()
    }

    /// Calendar date of the first occurrence; phase anchor for biweekly math.
    pub fn anchor_date(&self) -> NaiveDate {
        self.start_time.date_naive()
    }

    /// Time-of-day every generated instance starts at.
    pub fn time_of_day(&self) -> NaiveTime {
        self.start_time.time()
    }

    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }
}

/// Data required to create a new recurring template.
#[derive(Debug, Clone)]
pub struct NewTemplateData {
    pub title: String,
    pub notes: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub capacity: Option<i64>,
    pub instructor: Option<String>,
    /// First occurrence start; anchors time-of-day and biweekly phase.
    pub start_time: DateTime<Utc>,
    /// First occurrence end; duration is derived from the difference.
    pub end_time: DateTime<Utc>,
    pub pattern: RecurrencePattern,
}

/// Result of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationOutcome {
    pub created_count: usize,
    pub created_instance_ids: Vec<Uuid>,
}
