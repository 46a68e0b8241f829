use super::{LookbackPeriod, OHLCV, Price, Symbol, Timestamp, Volume};
use serde::{Deserialize, Serialize};

/// Domain entity - one daily bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: Timestamp,
    pub ohlcv: OHLCV,
}

impl Candle {
    pub fn new(timestamp: Timestamp, ohlcv: OHLCV) -> Self {
        Self { timestamp, ohlcv }
    }

    pub fn is_bullish(&self) -> bool {
        self.ohlcv.close > self.ohlcv.open
    }

    pub fn is_bearish(&self) -> bool {
        self.ohlcv.close < self.ohlcv.open
    }

    pub fn body_size(&self) -> Price {
        Price::from((self.ohlcv.close.value() - self.ohlcv.open.value()).abs())
    }

    pub fn wick_high(&self) -> Price {
        Price::from(self.ohlcv.high.value() - self.ohlcv.close.value().max(self.ohlcv.open.value()))
    }

    pub fn wick_low(&self) -> Price {
        Price::from(self.ohlcv.close.value().min(self.ohlcv.open.value()) - self.ohlcv.low.value())
    }

    pub fn close(&self) -> f64 {
        self.ohlcv.close.value()
    }

    pub fn volume(&self) -> Volume {
        self.ohlcv.volume
    }
}

/// Domain entity - an immutable, chronologically ordered bar series.
///
/// A series is produced once per (symbol, lookback) request and never
/// mutated afterwards; a new request always builds a new series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandleSeries {
    symbol: Symbol,
    lookback: LookbackPeriod,
    candles: Vec<Candle>,
}

impl CandleSeries {
    pub fn new(symbol: Symbol, lookback: LookbackPeriod, candles: Vec<Candle>) -> Self {
        Self { symbol, lookback, candles }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn lookback(&self) -> LookbackPeriod {
        self.lookback
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn count(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn latest(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// The bar before the latest one, used for the session change badge.
    pub fn previous(&self) -> Option<&Candle> {
        self.candles.len().checked_sub(2).map(|idx| &self.candles[idx])
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(Candle::close).collect()
    }

    /// Lowest low and highest high across the series
    pub fn price_range(&self) -> Option<(Price, Price)> {
        let first = self.candles.first()?;
        let init = (first.ohlcv.low, first.ohlcv.high);
        Some(self.candles.iter().fold(init, |(min, max), c| {
            (
                if c.ohlcv.low < min { c.ohlcv.low } else { min },
                if c.ohlcv.high > max { c.ohlcv.high } else { max },
            )
        }))
    }

    pub fn max_volume(&self) -> Option<Volume> {
        self.candles.iter().map(Candle::volume).max()
    }
}
