use anyhow::{anyhow, Result};
use cadence_core::models::Frequency;
use cadence_core::pattern::{Cadence, EndCondition, RecurrencePattern, WeekdaySet};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parses a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow!("'{input}' is not a date; expected YYYY-MM-DD"))
}

/// Parses a timestamp. All times are in the reference timezone (UTC); accepts
/// `YYYY-MM-DD HH:MM`, with seconds, or full RFC 3339.
pub fn parse_datetime(input: &str) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }
    Err(anyhow!(
        "'{input}' is not a timestamp; expected 'YYYY-MM-DD HH:MM' or RFC 3339"
    ))
}

/// Parses a weekday list: names ('mon,wed,fri'), or day numbers ('1,3,5',
/// 0=Sunday).
pub fn parse_weekdays(input: &str) -> Result<WeekdaySet> {
    let mut days: Vec<u8> = Vec::new();
    for part in input.split(',') {
        let part = part.trim().to_lowercase();
        if part.is_empty() {
            continue;
        }
        let day = match part.as_str() {
            "sun" | "sunday" => 0,
            "mon" | "monday" => 1,
            "tue" | "tues" | "tuesday" => 2,
            "wed" | "wednesday" => 3,
            "thu" | "thur" | "thurs" | "thursday" => 4,
            "fri" | "friday" => 5,
            "sat" | "saturday" => 6,
            other => other
                .parse::<u8>()
                .map_err(|_| anyhow!("'{other}' is not a weekday"))?,
        };
        days.push(day);
    }
    WeekdaySet::from_days(days).map_err(|e| anyhow!(e.to_string()))
}

/// Assembles the recurrence pattern from CLI flags, validating as the core
/// requires (weekly/biweekly need --on, --until and --count are exclusive).
pub fn build_pattern(
    frequency: Frequency,
    on: Option<&str>,
    until: Option<&str>,
    count: Option<u32>,
) -> Result<RecurrencePattern> {
    let cadence = match frequency {
        Frequency::Daily => Cadence::Daily,
        Frequency::Monthly => Cadence::Monthly,
        Frequency::Weekly | Frequency::Biweekly => {
            let days = parse_weekdays(
                on.ok_or_else(|| anyhow!("--on is required for weekly and biweekly patterns"))?,
            )?;
            match frequency {
                Frequency::Weekly => Cadence::Weekly(days),
                _ => Cadence::Biweekly(days),
            }
        }
    };

    let end = match (until, count) {
        (Some(date), None) => EndCondition::OnDate(parse_date(date)?),
        (None, Some(count)) => EndCondition::AfterOccurrences(count),
        (None, None) => EndCondition::Never,
        (Some(_), Some(_)) => return Err(anyhow!("--until and --count cannot both be set")),
    };

    Ok(RecurrencePattern::new(cadence, end)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_dates_and_rejects_garbage() {
        assert_eq!(
            parse_date("2024-01-31").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
        );
        assert!(parse_date("31/01/2024").is_err());
    }

    #[test]
    fn parses_datetimes_in_common_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap();
        assert_eq!(parse_datetime("2024-01-01 09:30").unwrap(), expected);
        assert_eq!(parse_datetime("2024-01-01 09:30:00").unwrap(), expected);
        assert_eq!(parse_datetime("2024-01-01T09:30:00Z").unwrap(), expected);
        assert!(parse_datetime("soon").is_err());
    }

    #[test]
    fn parses_weekday_names_and_numbers() {
        let by_name = parse_weekdays("mon,wed,fri").unwrap();
        let by_number = parse_weekdays("1, 3, 5").unwrap();
        assert_eq!(by_name, by_number);
        assert!(parse_weekdays("someday").is_err());
    }

    #[test]
    fn weekly_pattern_requires_days() {
        assert!(build_pattern(Frequency::Weekly, None, None, None).is_err());
        assert!(build_pattern(Frequency::Weekly, Some("mon"), None, None).is_ok());
    }

    #[test]
    fn end_conditions_are_mutually_exclusive() {
        assert!(build_pattern(Frequency::Daily, None, Some("2024-12-31"), Some(3)).is_err());
        let until = build_pattern(Frequency::Daily, None, Some("2024-12-31"), None).unwrap();
        assert_eq!(
            until.end,
            EndCondition::OnDate(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap())
        );
        let capped = build_pattern(Frequency::Daily, None, None, Some(3)).unwrap();
        assert_eq!(capped.end, EndCondition::AfterOccurrences(3));
    }
}
