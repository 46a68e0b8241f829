use super::{Candle, CandleSeries, DAY_MS};
use crate::domain::errors::ValidationError;
use serde::Serialize;
use strum::{AsRefStr, Display as StrumDisplay};

/// Direction of the latest session relative to the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay, AsRefStr, Serialize)]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

/// Data behind the price panel: latest bar plus the session change badge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSummary {
    pub latest: Candle,
    pub previous: Option<Candle>,
    pub change: f64,
    pub change_percent: f64,
    pub sentiment: Sentiment,
}

impl PriceSummary {
    /// `None` for an empty series. Without a previous bar the change is zero.
    pub fn from_series(series: &CandleSeries) -> Option<Self> {
        let latest = series.latest()?.clone();
        let previous = series.previous().cloned();
        let (change, change_percent) = match &previous {
            Some(prior) if prior.close() != 0.0 => {
                let change = latest.close() - prior.close();
                (change, change / prior.close() * 100.0)
            }
            _ => (0.0, 0.0),
        };
        let sentiment = if change > 0.0 {
            Sentiment::Bullish
        } else if change < 0.0 {
            Sentiment::Bearish
        } else {
            Sentiment::Neutral
        };
        Some(Self { latest, previous, change, change_percent, sentiment })
    }

    /// Badge text, e.g. `+1.25 (+0.68%)`.
    pub fn change_label(&self) -> String {
        format!("{} ({}%)", format_signed(self.change), format_signed(self.change_percent))
    }
}

pub fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}

/// Two decimals with an explicit `+` for non-negative values.
pub fn format_signed(value: f64) -> String {
    if value >= 0.0 {
        format!("+{:.2}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// `1.2M`, `3.4K` or the raw count.
pub fn format_volume(volume: u64) -> String {
    if volume >= 1_000_000 {
        format!("{:.1}M", volume as f64 / 1_000_000.0)
    } else if volume >= 1_000 {
        format!("{:.1}K", volume as f64 / 1_000.0)
    } else {
        volume.to_string()
    }
}

/// Domain service for data validation
#[derive(Debug, Clone)]
pub struct DataValidationService {
    day_ms: u64,
}

impl Default for DataValidationService {
    fn default() -> Self {
        Self::new(DAY_MS)
    }
}

impl DataValidationService {
    pub fn new(day_ms: u64) -> Self {
        Self { day_ms }
    }

    /// Validate a candle with a detailed error description
    pub fn validate_candle(&self, candle: &Candle) -> Result<(), ValidationError> {
        let o = &candle.ohlcv;
        if o.high < o.open || o.high < o.close {
            return Err(ValidationError::InvalidCandle(format!(
                "high {} below body at {}",
                o.high.value(),
                candle.timestamp.value()
            )));
        }
        if o.low > o.open || o.low > o.close {
            return Err(ValidationError::InvalidCandle(format!(
                "low {} above body at {}",
                o.low.value(),
                candle.timestamp.value()
            )));
        }
        if o.low.value() <= 0.0 {
            return Err(ValidationError::InvalidCandle(format!(
                "non-positive low at {}",
                candle.timestamp.value()
            )));
        }
        Ok(())
    }

    /// Every bar valid, spaced exactly one day apart.
    pub fn validate_series(&self, series: &CandleSeries) -> Result<(), ValidationError> {
        for candle in series.candles() {
            self.validate_candle(candle)?;
        }
        for (i, pair) in series.candles().windows(2).enumerate() {
            let gap = pair[1].timestamp.value() as i128 - pair[0].timestamp.value() as i128;
            if gap != self.day_ms as i128 {
                return Err(ValidationError::InvalidSequence(format!(
                    "gap of {} ms between bars {} and {}",
                    gap,
                    i,
                    i + 1
                )));
            }
        }
        Ok(())
    }
}
