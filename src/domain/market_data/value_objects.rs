use crate::domain::errors::ValidationError;
use derive_more::{Constructor, Deref, DerefMut, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};

/// Milliseconds in one trading day of the synthetic calendar.
pub const DAY_MS: u64 = 24 * 60 * 60 * 1000;

/// Value Object - Price
#[derive(Debug, Clone, Copy, PartialEq, From, Into, Deref, DerefMut, Constructor, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Value Object - Volume (shares traded)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, From, Into, Deref, Constructor, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Volume(u64);

impl Volume {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Value Object - Timestamp in epoch milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Deref, Constructor, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }

    pub fn from_millis(value: u64) -> Self {
        Self(value)
    }
}

/// Value Object - OHLCV bar data
#[derive(Debug, Clone, Copy, PartialEq, Constructor, Serialize, Deserialize)]
pub struct OHLCV {
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub volume: Volume,
}

impl OHLCV {
    /// Checks the bar envelope: `low ≤ min(open, close)`, `high ≥ max(open, close)`, `low > 0`.
    pub fn is_valid(&self) -> bool {
        self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.low.value() > 0.0
    }
}

/// Value Object - Ticker symbol, always upper-case
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, DerefMut, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
pub struct Symbol(String);

impl Symbol {
    /// Parse user input: trimmed, upper-cased, letters/digits plus `.` and `-`.
    pub fn new(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidSymbol("ticker cannot be empty".into()));
        }
        if let Some(bad) = trimmed.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '.' || *c == '-')) {
            return Err(ValidationError::InvalidSymbol(format!("unexpected '{}' in {}", bad, trimmed)));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self(value.trim().to_uppercase())
    }
}

/// Value Object - Lookback period selectable in the period bar
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, StrumDisplay, EnumIter, EnumString, AsRefStr,
    Serialize, Deserialize,
)]
pub enum LookbackPeriod {
    #[strum(serialize = "1D")]
    #[serde(rename = "1D")]
    OneDay,

    #[strum(serialize = "1W")]
    #[serde(rename = "1W")]
    OneWeek,

    #[strum(serialize = "1M")]
    #[serde(rename = "1M")]
    OneMonth,

    #[strum(serialize = "3M")]
    #[serde(rename = "3M")]
    ThreeMonths,

    #[strum(serialize = "6M")]
    #[serde(rename = "6M")]
    SixMonths,

    #[default]
    #[strum(serialize = "1Y")]
    #[serde(rename = "1Y")]
    OneYear,

    #[strum(serialize = "2Y")]
    #[serde(rename = "2Y")]
    TwoYears,

    #[strum(serialize = "3Y")]
    #[serde(rename = "3Y")]
    ThreeYears,
}

impl LookbackPeriod {
    /// Number of daily bars generated for this period.
    pub fn days(&self) -> usize {
        match self {
            Self::OneDay => 1,
            Self::OneWeek => 7,
            Self::OneMonth => 30,
            Self::ThreeMonths => 90,
            Self::SixMonths => 180,
            Self::OneYear => 365,
            Self::TwoYears => 730,
            Self::ThreeYears => 1095,
        }
    }

    pub fn label(&self) -> &str {
        self.as_ref()
    }

    /// Resolve a UI label. Unknown labels fall back to the default period (`1Y`)
    /// instead of failing; the flag reports whether the fallback was taken.
    pub fn resolve(label: &str) -> (Self, bool) {
        match Self::from_str(label.trim()) {
            Ok(period) => (period, false),
            Err(_) => (Self::default(), true),
        }
    }

    /// Bucket a custom range length into the nearest preset.
    /// `1D` is never chosen: ranges shorter than a week map to `1W`.
    pub fn from_day_count(days: u64) -> Self {
        match days {
            0..=7 => Self::OneWeek,
            8..=30 => Self::OneMonth,
            31..=90 => Self::ThreeMonths,
            91..=180 => Self::SixMonths,
            181..=365 => Self::OneYear,
            366..=730 => Self::TwoYears,
            _ => Self::ThreeYears,
        }
    }

    /// All presets in period-bar order.
    pub fn presets() -> Vec<Self> {
        Self::iter().collect()
    }
}

/// Day count for a UI label, with the `1Y` fallback.
pub fn map_lookback(label: &str) -> usize {
    LookbackPeriod::resolve(label).0.days()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookback_table_matches_period_bar() {
        let days: Vec<usize> = LookbackPeriod::presets().iter().map(|p| p.days()).collect();
        assert_eq!(days, vec![1, 7, 30, 90, 180, 365, 730, 1095]);
    }

    #[test]
    fn map_lookback_uses_fallback() {
        assert_eq!(map_lookback("1M"), 30);
        assert_eq!(map_lookback("unknown"), 365);
        assert_eq!(map_lookback(""), 365);
        assert_eq!(LookbackPeriod::resolve("3Y"), (LookbackPeriod::ThreeYears, false));
        assert_eq!(LookbackPeriod::resolve("5Y"), (LookbackPeriod::OneYear, true));
    }

    #[test]
    fn day_count_buckets() {
        assert_eq!(LookbackPeriod::from_day_count(0), LookbackPeriod::OneWeek);
        assert_eq!(LookbackPeriod::from_day_count(7), LookbackPeriod::OneWeek);
        assert_eq!(LookbackPeriod::from_day_count(8), LookbackPeriod::OneMonth);
        assert_eq!(LookbackPeriod::from_day_count(90), LookbackPeriod::ThreeMonths);
        assert_eq!(LookbackPeriod::from_day_count(181), LookbackPeriod::OneYear);
        assert_eq!(LookbackPeriod::from_day_count(730), LookbackPeriod::TwoYears);
        assert_eq!(LookbackPeriod::from_day_count(731), LookbackPeriod::ThreeYears);
    }

    #[test]
    fn labels_round_trip_through_strum() {
        assert_eq!(LookbackPeriod::SixMonths.to_string(), "6M");
        assert_eq!("2Y".parse::<LookbackPeriod>(), Ok(LookbackPeriod::TwoYears));
    }

    #[test]
    fn symbol_is_upper_cased() {
        assert_eq!(Symbol::from("aapl").value(), "AAPL");
        assert_eq!(Symbol::new(" brk.b ").unwrap().value(), "BRK.B");
        assert!(matches!(Symbol::new("  "), Err(ValidationError::InvalidSymbol(_))));
        assert!(matches!(Symbol::new("AA PL"), Err(ValidationError::InvalidSymbol(_))));
    }

    #[test]
    fn cents_rounding() {
        assert_eq!(round_cents(185.006), 185.01);
        assert_eq!(round_cents(279.994), 279.99);
    }
}
