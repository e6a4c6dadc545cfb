use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::error::CoreError;
use crate::models::{EndType, Event, Frequency};

/// Set of weekdays, numbered the way the storage column is: 0=Sunday through
/// 6=Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdaySet(u8);

#[derive(Error, Debug, PartialEq)]
#[error("Invalid weekday set: {0}")]
pub struct ParseWeekdaySetError(String);

impl WeekdaySet {
    pub const fn empty() -> Self {
        WeekdaySet(0)
    }

    /// Builds a set from 0=Sunday..6=Saturday day numbers.
    pub fn from_days<I: IntoIterator<Item = u8>>(days: I) -> Result<Self, ParseWeekdaySetError> {
        let mut bits = 0u8;
        for day in days {
            if day > 6 {
                return Err(ParseWeekdaySetError(format!(
                    "day number {day} out of range 0-6"
                )));
            }
            bits |= 1 << day;
        }
        Ok(WeekdaySet(bits))
    }

    pub fn from_weekdays<I: IntoIterator<Item = Weekday>>(days: I) -> Self {
        let mut bits = 0u8;
        for day in days {
            bits |= 1 << day.num_days_from_sunday();
        }
        WeekdaySet(bits)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_sunday()) != 0
    }

    /// Day numbers in ascending order, matching the storage format.
    pub fn days(&self) -> impl Iterator<Item = u8> + '_ {
        (0u8..7).filter(|day| self.0 & (1 << day) != 0)
    }
}

impl FromStr for WeekdaySet {
    type Err = ParseWeekdaySetError;

    /// Parses the storage format: comma-separated day numbers, e.g. "1,3,5".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(WeekdaySet::empty());
        }
        let days = trimmed
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<u8>()
                    .map_err(|_| ParseWeekdaySetError(s.to_string()))
            })
            .collect::<Result<Vec<u8>, _>>()?;
        WeekdaySet::from_days(days)
    }
}

impl std::fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for day in self.days() {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{day}")?;
            first = false;
        }
        Ok(())
    }
}

/// How often a template recurs. Weekly and biweekly cadences carry the
/// weekday set they fire on; it must be non-empty, enforced by
/// [`RecurrencePattern::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cadence {
    Daily,
    Weekly(WeekdaySet),
    /// Fires on even whole-week offsets from the template anchor date, so
    /// moving the anchor shifts the whole cadence.
    Biweekly(WeekdaySet),
    /// Matches the anchor's day-of-month. Months shorter than the anchor day
    /// (anchor on the 31st, February) simply never match; no clamping or
    /// rollover.
    Monthly,
}

/// When a recurring template stops producing instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCondition {
    Never,
    /// Last calendar date instances may fall on, inclusive.
    OnDate(NaiveDate),
    /// Ceiling on instances created in a single generation run.
    AfterOccurrences(u32),
}

/// Recurrence configuration for a template.
///
/// [`RecurrencePattern::new`] and [`RecurrencePattern::for_event`] reject
/// malformed configurations; [`validate`](RecurrencePattern::validate)
/// re-checks a hand-built value. Changing a template's pattern after instances
/// exist produces inconsistent history unless the instances are regenerated;
/// the engine does not enforce this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrencePattern {
    pub cadence: Cadence,
    pub end: EndCondition,
}

impl RecurrencePattern {
    pub fn new(cadence: Cadence, end: EndCondition) -> Result<Self, CoreError> {
        let pattern = RecurrencePattern { cadence, end };
        pattern.validate()?;
        Ok(pattern)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        match self.cadence {
            Cadence::Weekly(days) | Cadence::Biweekly(days) if days.is_empty() => {
                return Err(CoreError::InvalidPattern(
                    "weekly and biweekly patterns require a non-empty weekday set".to_string(),
                ));
            }
            _ => {}
        }
        if let EndCondition::AfterOccurrences(0) = self.end {
            return Err(CoreError::InvalidPattern(
                "occurrence count must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// The rule evaluator: should an instance exist on `candidate`, given the
    /// template's anchor date? Pure date arithmetic, no I/O.
    pub fn matches_on(&self, candidate: NaiveDate, anchor: NaiveDate) -> bool {
        match self.cadence {
            Cadence::Daily => true,
            Cadence::Weekly(days) => days.contains(candidate.weekday()),
            Cadence::Biweekly(days) => {
                let weeks = (candidate - anchor).num_days().div_euclid(7);
                weeks % 2 == 0 && days.contains(candidate.weekday())
            }
            Cadence::Monthly => candidate.day() == anchor.day(),
        }
    }

    /// Reconstructs the tagged pattern from a template row's raw recurrence
    /// columns, validating as it goes.
    pub fn for_event(event: &Event) -> Result<Self, CoreError> {
        if event.is_instance() || !event.is_recurring {
            return Err(CoreError::NotARecurringTemplate(event.id));
        }
        let frequency = event
            .frequency
            .ok_or_else(|| CoreError::InvalidPattern("template has no frequency".to_string()))?;

        let cadence = match frequency {
            Frequency::Daily => Cadence::Daily,
            Frequency::Monthly => Cadence::Monthly,
            Frequency::Weekly | Frequency::Biweekly => {
                let days = event
                    .days_of_week
                    .as_deref()
                    .unwrap_or("")
                    .parse::<WeekdaySet>()
                    .map_err(|e| CoreError::InvalidPattern(e.to_string()))?;
                match frequency {
                    Frequency::Weekly => Cadence::Weekly(days),
                    _ => Cadence::Biweekly(days),
                }
            }
        };

        let end = match event.end_type.unwrap_or(EndType::Never) {
            EndType::Never => EndCondition::Never,
            EndType::Date => {
                let date = event.end_date.ok_or_else(|| {
                    CoreError::InvalidPattern("end type 'date' requires an end date".to_string())
                })?;
                EndCondition::OnDate(date)
            }
            EndType::Occurrences => {
                let count = event.occurrences.ok_or_else(|| {
                    CoreError::InvalidPattern(
                        "end type 'occurrences' requires an occurrence count".to_string(),
                    )
                })?;
                let count = u32::try_from(count).map_err(|_| {
                    CoreError::InvalidPattern("occurrence count must be positive".to_string())
                })?;
                EndCondition::AfterOccurrences(count)
            }
        };

        RecurrencePattern::new(cadence, end)
    }

    /// Flattens the pattern into the raw storage columns:
    /// (frequency, days_of_week, end_type, end_date, occurrences).
    pub fn to_columns(
        &self,
    ) -> (
        Frequency,
        Option<String>,
        EndType,
        Option<NaiveDate>,
        Option<i64>,
    ) {
        let (frequency, days) = match self.cadence {
            Cadence::Daily => (Frequency::Daily, None),
            Cadence::Weekly(days) => (Frequency::Weekly, Some(days.to_string())),
            Cadence::Biweekly(days) => (Frequency::Biweekly, Some(days.to_string())),
            Cadence::Monthly => (Frequency::Monthly, None),
        };
        let (end_type, end_date, occurrences) = match self.end {
            EndCondition::Never => (EndType::Never, None, None),
            EndCondition::OnDate(date) => (EndType::Date, Some(date), None),
            EndCondition::AfterOccurrences(count) => {
                (EndType::Occurrences, None, Some(i64::from(count)))
            }
        };
        (frequency, days, end_type, end_date, occurrences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn weekly(days: &[u8]) -> RecurrencePattern {
        RecurrencePattern::new(
            Cadence::Weekly(WeekdaySet::from_days(days.iter().copied()).unwrap()),
            EndCondition::Never,
        )
        .unwrap()
    }

    fn biweekly(days: &[u8]) -> RecurrencePattern {
        RecurrencePattern::new(
            Cadence::Biweekly(WeekdaySet::from_days(days.iter().copied()).unwrap()),
            EndCondition::Never,
        )
        .unwrap()
    }

    #[test]
    fn weekday_set_round_trips_storage_format() {
        let set: WeekdaySet = "1,3,5".parse().unwrap();
        assert_eq!(set.to_string(), "1,3,5");
        assert!(set.contains(Weekday::Mon));
        assert!(set.contains(Weekday::Wed));
        assert!(set.contains(Weekday::Fri));
        assert!(!set.contains(Weekday::Sun));
    }

    #[test]
    fn weekday_set_rejects_out_of_range_days() {
        assert!("7".parse::<WeekdaySet>().is_err());
        assert!(WeekdaySet::from_days([9]).is_err());
    }

    #[test]
    fn weekday_set_parses_empty_as_empty() {
        let set: WeekdaySet = "".parse().unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn daily_matches_any_date() {
        let pattern = RecurrencePattern::new(Cadence::Daily, EndCondition::Never).unwrap();
        assert!(pattern.matches_on(date(2024, 1, 1), date(2023, 6, 15)));
        assert!(pattern.matches_on(date(2024, 2, 29), date(2024, 1, 1)));
    }

    // 2024-01-01 is a Monday.
    #[rstest]
    #[case(date(2024, 1, 1), true)] // Monday
    #[case(date(2024, 1, 3), true)] // Wednesday
    #[case(date(2024, 1, 5), true)] // Friday
    #[case(date(2024, 1, 2), false)] // Tuesday
    #[case(date(2024, 1, 7), false)] // Sunday
    fn weekly_matches_only_configured_weekdays(#[case] candidate: NaiveDate, #[case] hit: bool) {
        let pattern = weekly(&[1, 3, 5]);
        assert_eq!(pattern.matches_on(candidate, date(2024, 1, 1)), hit);
    }

    // Anchor 2024-01-02 is a Tuesday; weekday 2.
    #[rstest]
    #[case(date(2024, 1, 2), true)] // week 0
    #[case(date(2024, 1, 9), false)] // week 1
    #[case(date(2024, 1, 16), true)] // week 2
    #[case(date(2024, 1, 23), false)] // week 3
    #[case(date(2024, 1, 30), true)] // week 4
    #[case(date(2024, 1, 17), false)] // week 2 but a Wednesday
    fn biweekly_fires_on_even_week_offsets(#[case] candidate: NaiveDate, #[case] hit: bool) {
        let pattern = biweekly(&[2]);
        assert_eq!(pattern.matches_on(candidate, date(2024, 1, 2)), hit);
    }

    #[test]
    fn biweekly_cadence_is_phased_off_the_anchor() {
        let pattern = biweekly(&[2]);
        // Shifting the anchor one week flips which weeks match.
        assert!(!pattern.matches_on(date(2024, 1, 16), date(2024, 1, 9)));
        assert!(pattern.matches_on(date(2024, 1, 23), date(2024, 1, 9)));
    }

    #[test]
    fn biweekly_partial_week_offsets_floor_toward_the_anchor() {
        let pattern = biweekly(&[2, 4]); // Tuesday and Thursday
        let anchor = date(2024, 1, 2); // Tuesday
        // Thursday of week 0: 2 days after the anchor floors to week 0.
        assert!(pattern.matches_on(date(2024, 1, 4), anchor));
        // Thursday of week 1 does not.
        assert!(!pattern.matches_on(date(2024, 1, 11), anchor));
    }

    #[rstest]
    #[case(date(2024, 2, 29), false)] // February has no 31st, even in a leap year
    #[case(date(2024, 3, 31), true)]
    #[case(date(2024, 4, 30), false)] // April has no 31st
    #[case(date(2024, 5, 31), true)]
    fn monthly_skips_months_shorter_than_the_anchor_day(
        #[case] candidate: NaiveDate,
        #[case] hit: bool,
    ) {
        let pattern = RecurrencePattern::new(Cadence::Monthly, EndCondition::Never).unwrap();
        assert_eq!(pattern.matches_on(candidate, date(2024, 1, 31)), hit);
    }

    #[test]
    fn empty_weekday_set_is_rejected_at_construction() {
        let result = RecurrencePattern::new(
            Cadence::Weekly(WeekdaySet::empty()),
            EndCondition::Never,
        );
        assert!(matches!(result, Err(CoreError::InvalidPattern(_))));

        let result = RecurrencePattern::new(
            Cadence::Biweekly(WeekdaySet::empty()),
            EndCondition::Never,
        );
        assert!(matches!(result, Err(CoreError::InvalidPattern(_))));
    }

    #[test]
    fn zero_occurrence_cap_is_rejected() {
        let result =
            RecurrencePattern::new(Cadence::Daily, EndCondition::AfterOccurrences(0));
        assert!(matches!(result, Err(CoreError::InvalidPattern(_))));
    }

    #[test]
    fn columns_round_trip_through_the_storage_shape() {
        let pattern = RecurrencePattern::new(
            Cadence::Biweekly(WeekdaySet::from_days([2, 4]).unwrap()),
            EndCondition::AfterOccurrences(5),
        )
        .unwrap();
        let (frequency, days, end_type, end_date, occurrences) = pattern.to_columns();
        assert_eq!(frequency, Frequency::Biweekly);
        assert_eq!(days.as_deref(), Some("2,4"));
        assert_eq!(end_type, EndType::Occurrences);
        assert_eq!(end_date, None);
        assert_eq!(occurrences, Some(5));
    }
}
