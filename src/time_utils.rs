use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::errors::ValidationError;
use crate::domain::market_data::LookbackPeriod;

/// Earliest date the custom range picker accepts.
pub const EARLIEST_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2020, 1, 1) {
    Some(date) => date,
    None => panic!("invalid earliest date"),
};

const INPUT_FORMAT: &str = "%Y-%m-%d";

/// Custom from/to selection from the date range picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    /// Both ends must lie in `[2020-01-01, today]` and `to` may not precede `from`.
    pub fn new(from: NaiveDate, to: NaiveDate, today: NaiveDate) -> Result<Self, ValidationError> {
        for (name, date) in [("from", from), ("to", to)] {
            if date < EARLIEST_DATE {
                return Err(ValidationError::InvalidDateRange(format!(
                    "{} date {} is before {}",
                    name, date, EARLIEST_DATE
                )));
            }
            if date > today {
                return Err(ValidationError::InvalidDateRange(format!(
                    "{} date {} is in the future",
                    name, date
                )));
            }
        }
        if to < from {
            return Err(ValidationError::InvalidDateRange(format!(
                "end {} precedes start {}",
                to, from
            )));
        }
        Ok(Self { from, to })
    }

    /// Parse the `YYYY-MM-DD` values produced by `<input type="date">`.
    pub fn parse(from: &str, to: &str, today: NaiveDate) -> Result<Self, ValidationError> {
        Self::new(parse_input_date(from)?, parse_input_date(to)?, today)
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    /// Whole days between the two ends.
    pub fn day_count(&self) -> u64 {
        (self.to - self.from).num_days().unsigned_abs()
    }

    pub fn to_lookback(&self) -> LookbackPeriod {
        LookbackPeriod::from_day_count(self.day_count())
    }

    /// `Jan 05 - Mar 01`
    pub fn label(&self) -> String {
        format!("{} - {}", self.from.format("%b %d"), self.to.format("%b %d"))
    }
}

pub fn parse_input_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), INPUT_FORMAT)
        .map_err(|e| ValidationError::InvalidDateRange(format!("'{}': {}", value, e)))
}

/// Today's date in UTC from a millisecond clock reading.
pub fn date_from_millis(millis: u64) -> NaiveDate {
    DateTime::<Utc>::from_timestamp_millis(millis as i64)
        .map(|dt| dt.date_naive())
        .unwrap_or(EARLIEST_DATE)
}

/// Axis label for a bar timestamp, coarser for longer spans.
///
/// - span up to ~3 months -> `Jan 05`
/// - longer spans -> `Jan 2024`
pub fn format_time_label(timestamp: u64, span_days: usize) -> String {
    let Some(dt) = DateTime::<Utc>::from_timestamp_millis(timestamp as i64) else {
        return String::new();
    };
    if span_days <= 90 {
        dt.format("%b %d").to_string()
    } else {
        dt.format("%b %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn label_uses_short_month() {
        let range = DateRange::new(date(2024, 1, 5), date(2024, 3, 1), date(2024, 6, 1)).unwrap();
        assert_eq!(range.label(), "Jan 05 - Mar 01");
        assert_eq!(range.day_count(), 56);
        assert_eq!(range.to_lookback(), LookbackPeriod::ThreeMonths);
    }

    #[test]
    fn time_label_depends_on_span() {
        // 2024-01-05T00:00:00Z
        let ts = 1_704_412_800_000;
        assert_eq!(format_time_label(ts, 30), "Jan 05");
        assert_eq!(format_time_label(ts, 365), "Jan 2024");
    }

    #[test]
    fn clock_reading_maps_to_utc_date() {
        assert_eq!(date_from_millis(1_704_412_800_000), date(2024, 1, 5));
    }
}
