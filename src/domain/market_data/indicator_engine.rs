use super::{Candle, CandleSeries, Timestamp};
use crate::domain::errors::ValidationError;
use serde::{Deserialize, Serialize};

/// One point of a moving-average overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmaPoint {
    pub timestamp: Timestamp,
    pub value: f64,
}

/// SMA line for a single period, aligned to the bar that closes each window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmaOverlay {
    pub period: usize,
    pub points: Vec<SmaPoint>,
}

impl SmaOverlay {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn label(&self) -> String {
        format!("SMA({})", self.period)
    }

    pub fn latest(&self) -> Option<&SmaPoint> {
        self.points.last()
    }
}

/// Simple moving average of closes over a trailing window of `period` bars.
///
/// Produces `len - period + 1` points, or none when the input is shorter than
/// the window. A zero period is rejected.
pub fn compute_sma(candles: &[Candle], period: usize) -> Result<SmaOverlay, ValidationError> {
    if period == 0 {
        return Err(ValidationError::InvalidPeriod { period });
    }
    if candles.len() < period {
        return Ok(SmaOverlay { period, points: Vec::new() });
    }

    let mut points = Vec::with_capacity(candles.len() - period + 1);
    let mut window_sum: f64 = candles[..period].iter().map(Candle::close).sum();
    points.push(SmaPoint {
        timestamp: candles[period - 1].timestamp,
        value: window_sum / period as f64,
    });

    // Sliding window: drop the oldest close, add the newest.
    for i in period..candles.len() {
        window_sum += candles[i].close() - candles[i - period].close();
        points.push(SmaPoint {
            timestamp: candles[i].timestamp,
            value: window_sum / period as f64,
        });
    }

    Ok(SmaOverlay { period, points })
}

/// Stateless calculator turning a series into one overlay per requested period.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndicatorCalculator;

impl IndicatorCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn compute_sma(&self, series: &CandleSeries, period: usize) -> Result<SmaOverlay, ValidationError> {
        compute_sma(series.candles(), period)
    }

    /// Overlays for every period, computed independently and in the given order.
    pub fn compute_overlays(
        &self,
        series: &CandleSeries,
        periods: &[usize],
    ) -> Result<Vec<SmaOverlay>, ValidationError> {
        periods.iter().map(|&period| self.compute_sma(series, period)).collect()
    }
}
