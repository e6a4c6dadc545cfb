//! The instance materializer: turns a recurring template into concrete,
//! dated event rows over a rolling horizon.
//!
//! A run is stateless; everything it knows about prior runs it re-reads from
//! the store (existing instance dates, exclusions). That re-read is the whole
//! idempotency mechanism and must not be replaced with a long-lived cache.
//! Under concurrent runs for the same template the duplicate check here is
//! advisory only; the unique index on `(parent_event_id, occurs_on)` is the
//! real safety net, and a violated batch rolls back as `PersistenceFailure`.

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashSet;
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::{Event, GenerationOutcome};
use crate::pattern::{EndCondition, RecurrencePattern};
use crate::repository::MaterializationStore;
use crate::window::{plan_window, GenerationWindow};

/// Materializes instances for `template_id` up to `horizon_weeks` ahead of
/// the current time. Safe to invoke repeatedly; an immediate re-run creates
/// nothing.
pub async fn generate<S>(
    store: &S,
    template_id: Uuid,
    horizon_weeks: i64,
) -> Result<GenerationOutcome, CoreError>
where
    S: MaterializationStore + ?Sized,
{
    generate_at(store, template_id, horizon_weeks, Utc::now()).await
}

/// As [`generate`], with an explicit "now" so runs are reproducible in tests.
pub async fn generate_at<S>(
    store: &S,
    template_id: Uuid,
    horizon_weeks: i64,
    now: DateTime<Utc>,
) -> Result<GenerationOutcome, CoreError>
where
    S: MaterializationStore + ?Sized,
{
    let run = RunInputs::load(store, template_id, horizon_weeks, now).await?;
    let dates = run.candidate_dates(now);

    let staged: Vec<Event> = dates
        .into_iter()
        .map(|day| instance_from_template(&run.template, day, now))
        .collect();
    let created_instance_ids: Vec<Uuid> = staged.iter().map(|event| event.id).collect();

    if !staged.is_empty() {
        store.insert_instances(staged).await?;
    }

    Ok(GenerationOutcome {
        created_count: created_instance_ids.len(),
        created_instance_ids,
    })
}

/// Dry run: the calendar dates the next [`generate`] call would materialize,
/// without writing anything.
pub async fn preview<S>(
    store: &S,
    template_id: Uuid,
    horizon_weeks: i64,
) -> Result<Vec<NaiveDate>, CoreError>
where
    S: MaterializationStore + ?Sized,
{
    preview_at(store, template_id, horizon_weeks, Utc::now()).await
}

/// As [`preview`], with an explicit "now".
pub async fn preview_at<S>(
    store: &S,
    template_id: Uuid,
    horizon_weeks: i64,
    now: DateTime<Utc>,
) -> Result<Vec<NaiveDate>, CoreError>
where
    S: MaterializationStore + ?Sized,
{
    let run = RunInputs::load(store, template_id, horizon_weeks, now).await?;
    Ok(run.candidate_dates(now))
}

/// Everything a run reads before it starts staging records.
struct RunInputs {
    template: Event,
    pattern: RecurrencePattern,
    window: GenerationWindow,
    existing: HashSet<NaiveDate>,
    exclusions: HashSet<NaiveDate>,
}

impl RunInputs {
    async fn load<S>(
        store: &S,
        template_id: Uuid,
        horizon_weeks: i64,
        now: DateTime<Utc>,
    ) -> Result<Self, CoreError>
    where
        S: MaterializationStore + ?Sized,
    {
        let template = store
            .load_template(template_id)
            .await?
            .ok_or(CoreError::TemplateNotFound(template_id))?;
        if template.is_instance() || !template.is_recurring {
            return Err(CoreError::NotARecurringTemplate(template_id));
        }

        let pattern = RecurrencePattern::for_event(&template)?;
        let window = plan_window(now, horizon_weeks, &pattern)?;
        let existing = store
            .load_instance_dates(template_id, window.start, window.end)
            .await?;
        let exclusions = store.load_exclusions(template_id).await?;

        Ok(RunInputs {
            template,
            pattern,
            window,
            existing,
            exclusions,
        })
    }

    /// Walks the window day by day, in ascending order, and collects the
    /// dates that qualify for a new instance.
    ///
    /// Skip ladder per date: excluded, pattern miss, already materialized,
    /// start already in the past (today counts as past only once the
    /// time-of-day has elapsed). The occurrence cap is a break, not a skip:
    /// once it is hit, later dates are never evaluated.
    fn candidate_dates(&self, now: DateTime<Utc>) -> Vec<NaiveDate> {
        let anchor = self.template.anchor_date();
        let time_of_day = self.template.time_of_day();

        let mut dates = Vec::new();
        for day in self.window.days() {
            if self.exclusions.contains(&day) {
                continue;
            }
            if !self.pattern.matches_on(day, anchor) {
                continue;
            }
            if self.existing.contains(&day) {
                continue;
            }
            let candidate_start = day.and_time(time_of_day).and_utc();
            if candidate_start < now {
                continue; // the engine never backfills
            }
            if let EndCondition::AfterOccurrences(cap) = self.pattern.end {
                if dates.len() >= cap as usize {
                    break;
                }
            }
            dates.push(day);
        }
        dates
    }
}

/// Builds an instance row on `day`, copying the template payload and shifting
/// the template's time-of-day and duration onto the new date.
fn instance_from_template(template: &Event, day: NaiveDate, now: DateTime<Utc>) -> Event {
    let start_time = day.and_time(template.time_of_day()).and_utc();
    Event {
        id: Uuid::now_v7(),
        title: template.title.clone(),
        notes: template.notes.clone(),
        location: template.location.clone(),
        category: template.category.clone(),
        capacity: template.capacity,
        instructor: template.instructor.clone(),
        start_time,
        end_time: start_time + template.duration(),
        is_recurring: false,
        parent_event_id: Some(template.id),
        occurs_on: Some(day),
        frequency: None,
        days_of_week: None,
        end_type: None,
        end_date: None,
        occurrences: None,
        created_at: now,
        updated_at: now,
    }
}
