//! # Cadence Core Library
//!
//! A recurring-event materialization engine: given a template event and a
//! recurrence pattern (daily, weekly, biweekly, monthly, with exclusion dates
//! and an end condition), deterministically expand concrete future instances
//! into a SQLite store over a rolling horizon.
//!
//! ## Guarantees
//!
//! - **Idempotent**: re-running generation over the same or overlapping
//!   horizon creates zero duplicate instances
//! - **At most one instance** per (template, calendar date), backed by a
//!   storage-level unique index
//! - **No backfill**: instances are never created with a start time in the
//!   past
//! - **All-or-nothing writes**: a generation run commits its whole batch or
//!   nothing
//!
//! ## Core Modules
//!
//! - [`pattern`]: the pure rule evaluator (should an instance exist on a
//!   date?)
//! - [`window`]: generation-window planning (horizon vs. pattern end bounds)
//! - [`materializer`]: the orchestrated generation run
//! - [`repository`]: data access layer with Repository pattern
//! - [`models`]: core data structures and transfer objects
//! - [`db`]: database connection and migration management
//! - [`error`]: error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use cadence_core::{
//!     db, materializer,
//!     models::NewTemplateData,
//!     pattern::{Cadence, EndCondition, RecurrencePattern, WeekdaySet},
//!     repository::{EventRepository, SqliteRepository},
//! };
//! use chrono::{Duration, Utc};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = db::establish_connection("events.db").await?;
//!     let repo = SqliteRepository::new(pool);
//!
//!     // Mondays, Wednesdays and Fridays, indefinitely
//!     let pattern = RecurrencePattern::new(
//!         Cadence::Weekly(WeekdaySet::from_days([1, 3, 5])?),
//!         EndCondition::Never,
//!     )?;
//!     let start = Utc::now();
//!     let template = repo
//!         .add_template(NewTemplateData {
//!             title: "Spin class".to_string(),
//!             notes: None,
//!             location: Some("Studio B".to_string()),
//!             category: Some("cycling".to_string()),
//!             capacity: Some(20),
//!             instructor: Some("Sam".to_string()),
//!             start_time: start,
//!             end_time: start + Duration::hours(1),
//!             pattern,
//!         })
//!         .await?;
//!
//!     // Materialize the next four weeks
//!     let outcome = materializer::generate(&repo, template.id, 4).await?;
//!     println!("created {} instances", outcome.created_count);
//!
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
pub mod materializer;
pub mod models;
pub mod pattern;
pub mod repository;
pub mod window;
