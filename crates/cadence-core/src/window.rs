use chrono::{DateTime, Days, NaiveDate, Utc};

use crate::error::CoreError;
use crate::pattern::{EndCondition, RecurrencePattern};

/// Concrete calendar-date bounds for one generation run, both ends inclusive.
///
/// `end` can fall before `start` when a pattern's end date is already in the
/// past; the window is then simply empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl GenerationWindow {
    /// Every date in the window in ascending order. Ascending iteration keeps
    /// generation deterministic and restart-safe.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }
}

/// Combines the caller's horizon with the pattern's own end condition, taking
/// the more restrictive bound.
///
/// The window starts today. The horizon bound is `horizon_weeks * 7` days out,
/// inclusive. A `date` end condition caps the end at the pattern's end date;
/// an `occurrences` end condition does not bound the window by date at all —
/// the materializer enforces that cap per run while iterating.
pub fn plan_window(
    now: DateTime<Utc>,
    horizon_weeks: i64,
    pattern: &RecurrencePattern,
) -> Result<GenerationWindow, CoreError> {
    if horizon_weeks < 0 {
        return Err(CoreError::InvalidPattern(format!(
            "horizon must be non-negative, got {horizon_weeks} weeks"
        )));
    }
    pattern.validate()?;

    let start = now.date_naive();
    // horizon_weeks is caller input with no upper bound; an unchecked
    // multiply or date addition would abort on absurd values.
    let horizon_end = horizon_weeks
        .checked_mul(7)
        .and_then(|days| start.checked_add_days(Days::new(days as u64)))
        .ok_or_else(|| {
            CoreError::InvalidPattern(format!(
                "horizon of {horizon_weeks} weeks is out of range"
            ))
        })?;
    let end = match pattern.end {
        EndCondition::OnDate(end_date) => horizon_end.min(end_date),
        EndCondition::Never | EndCondition::AfterOccurrences(_) => horizon_end,
    };

    Ok(GenerationWindow { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{Cadence, WeekdaySet};
    use chrono::TimeZone;

    fn pattern(end: EndCondition) -> RecurrencePattern {
        RecurrencePattern::new(Cadence::Daily, end).unwrap()
    }

    fn at_noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_spans_horizon_weeks_inclusive() {
        let window = plan_window(at_noon(2024, 1, 1), 2, &pattern(EndCondition::Never)).unwrap();
        assert_eq!(window.start, date(2024, 1, 1));
        assert_eq!(window.end, date(2024, 1, 15));
        assert_eq!(window.days().count(), 15);
    }

    #[test]
    fn zero_horizon_is_just_today() {
        let window = plan_window(at_noon(2024, 1, 1), 0, &pattern(EndCondition::Never)).unwrap();
        assert_eq!(window.start, window.end);
        assert_eq!(window.days().collect::<Vec<_>>(), vec![date(2024, 1, 1)]);
    }

    #[test]
    fn pattern_end_date_caps_the_horizon() {
        let end = EndCondition::OnDate(date(2024, 1, 10));
        let window = plan_window(at_noon(2024, 1, 1), 4, &pattern(end)).unwrap();
        assert_eq!(window.end, date(2024, 1, 10));
    }

    #[test]
    fn horizon_caps_a_later_pattern_end_date() {
        let end = EndCondition::OnDate(date(2025, 6, 1));
        let window = plan_window(at_noon(2024, 1, 1), 1, &pattern(end)).unwrap();
        assert_eq!(window.end, date(2024, 1, 8));
    }

    #[test]
    fn past_end_date_yields_an_empty_window() {
        let end = EndCondition::OnDate(date(2023, 12, 1));
        let window = plan_window(at_noon(2024, 1, 1), 4, &pattern(end)).unwrap();
        assert_eq!(window.days().count(), 0);
    }

    #[test]
    fn occurrence_cap_does_not_bound_the_window() {
        let end = EndCondition::AfterOccurrences(3);
        let window = plan_window(at_noon(2024, 1, 1), 10, &pattern(end)).unwrap();
        assert_eq!(window.end, date(2024, 3, 11));
    }

    #[test]
    fn oversized_horizon_is_rejected_not_a_panic() {
        // An i64 this large overflows both the day multiply and NaiveDate
        // range; it must come back as an error, not abort the process.
        let result = plan_window(
            at_noon(2024, 1, 1),
            2_000_000_000,
            &pattern(EndCondition::Never),
        );
        assert!(matches!(result, Err(CoreError::InvalidPattern(_))));

        let result = plan_window(at_noon(2024, 1, 1), i64::MAX, &pattern(EndCondition::Never));
        assert!(matches!(result, Err(CoreError::InvalidPattern(_))));
    }

    #[test]
    fn negative_horizon_is_invalid() {
        let result = plan_window(at_noon(2024, 1, 1), -1, &pattern(EndCondition::Never));
        assert!(matches!(result, Err(CoreError::InvalidPattern(_))));
    }

    #[test]
    fn empty_weekday_set_is_invalid() {
        let weekly = RecurrencePattern {
            cadence: Cadence::Weekly(WeekdaySet::empty()),
            end: EndCondition::Never,
        };
        let result = plan_window(at_noon(2024, 1, 1), 2, &weekly);
        assert!(matches!(result, Err(CoreError::InvalidPattern(_))));
    }
}
