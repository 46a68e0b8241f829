//! Synthetic daily OHLCV generator.
//!
//! Prices follow a random walk with a slow sinusoidal drift. Each bar opens at
//! the previous bar's unrounded close, its wicks scale with the body, and its
//! volume grows with the relative size of the move.

use super::random::RandomSource;
use super::{
    Candle, CandleSeries, DAY_MS, LookbackPeriod, OHLCV, Price, Symbol, Timestamp, Volume,
    round_cents,
};
use crate::domain::logging::LogComponent;
use crate::{log_debug, log_warn};

/// Tickers offered by the selector, with their starting prices.
pub const DEFAULT_SYMBOLS: [(&str, f64); 5] = [
    ("IBM", 280.0),
    ("AAPL", 185.0),
    ("MSFT", 420.0),
    ("GOOGL", 140.0),
    ("TSLA", 250.0),
];

/// Starting price used for tickers missing from the catalog.
pub const FALLBACK_BASE_PRICE: f64 = 280.0;

/// Smallest price a generated bar can carry after rounding.
const MIN_TICK: f64 = 0.01;

/// Ticker → base price table.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolCatalog {
    entries: Vec<(Symbol, f64)>,
    fallback_price: f64,
}

impl Default for SymbolCatalog {
    fn default() -> Self {
        Self::new(
            DEFAULT_SYMBOLS.iter().map(|(s, p)| (Symbol::from(*s), *p)).collect(),
            FALLBACK_BASE_PRICE,
        )
    }
}

impl SymbolCatalog {
    pub fn new(entries: Vec<(Symbol, f64)>, fallback_price: f64) -> Self {
        Self { entries, fallback_price }
    }

    pub fn available_symbols(&self) -> Vec<Symbol> {
        self.entries.iter().map(|(s, _)| s.clone()).collect()
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.entries.iter().any(|(s, _)| s == symbol)
    }

    /// Base price for `symbol`. Unknown tickers are not an error: they get the
    /// fallback price, and the flag tells the caller the fallback was used.
    pub fn resolve(&self, symbol: &Symbol) -> (f64, bool) {
        self.entries
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, price)| (*price, false))
            .unwrap_or((self.fallback_price, true))
    }
}

/// Tunables of the random walk.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub day_ms: u64,
    /// Amplitude of the `sin(i / trend_period)` drift, as a fraction of price.
    pub trend_amplitude: f64,
    pub trend_period: f64,
    /// Half-width of the uniform daily shock, as a fraction of price.
    pub daily_volatility: f64,
    /// Random wick allowance, as a fraction of the open.
    pub wick_fraction: f64,
    pub wick_body_multiplier: f64,
    /// Lows never drop below `open * low_floor_ratio`.
    pub low_floor_ratio: f64,
    pub base_volume: f64,
    pub volume_move_factor: f64,
    pub volume_noise: f64,
    /// Artificial delay before a generated series is delivered.
    pub simulated_latency_ms: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            day_ms: DAY_MS,
            trend_amplitude: 0.001,
            trend_period: 30.0,
            daily_volatility: 0.02,
            wick_fraction: 0.01,
            wick_body_multiplier: 1.5,
            low_floor_ratio: 0.95,
            base_volume: 1_000_000.0,
            volume_move_factor: 5.0,
            volume_noise: 0.5,
            simulated_latency_ms: 0,
        }
    }
}

impl GeneratorConfig {
    /// Volume for a bar whose close moved `movement` (= |close - open| / open),
    /// given one unit sample of noise.
    pub fn volume_for_move(&self, movement: f64, noise: f64) -> Volume {
        let multiplier = 1.0 + movement.abs() * self.volume_move_factor + noise * self.volume_noise;
        Volume::from((self.base_volume * multiplier).floor().max(0.0) as u64)
    }
}

/// Domain service producing synthetic bar series.
#[derive(Debug, Clone, Default)]
pub struct SeriesGenerator {
    config: GeneratorConfig,
    catalog: SymbolCatalog,
}

impl SeriesGenerator {
    pub fn new(config: GeneratorConfig, catalog: SymbolCatalog) -> Self {
        Self { config, catalog }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn catalog(&self) -> &SymbolCatalog {
        &self.catalog
    }

    /// Build `lookback.days()` bars ending at `now_ms`.
    ///
    /// Single pass, no shared state: the running price lives on this call's
    /// stack, so concurrent calls never observe each other.
    pub fn generate_at<R>(
        &self,
        symbol: &Symbol,
        lookback: LookbackPeriod,
        now_ms: u64,
        rng: &mut R,
    ) -> CandleSeries
    where
        R: RandomSource + ?Sized,
    {
        let (base_price, fell_back) = self.catalog.resolve(symbol);
        if fell_back {
            log_warn!(
                LogComponent::Domain("SeriesGenerator"),
                "Unknown symbol {}, using base price {:.2}",
                symbol,
                base_price
            );
        }

        let days = lookback.days();
        let start = now_ms.saturating_sub(days as u64 * self.config.day_ms);
        let mut candles = Vec::with_capacity(days);
        let mut current_price = base_price;

        for i in 0..days {
            let timestamp = Timestamp::from_millis(start + i as u64 * self.config.day_ms);
            let (candle, close) = self.next_bar(i, timestamp, current_price, rng);
            candles.push(candle);
            current_price = close;
        }

        log_debug!(
            LogComponent::Domain("SeriesGenerator"),
            "Generated {} bars for {} ({})",
            candles.len(),
            symbol,
            lookback
        );

        CandleSeries::new(symbol.clone(), lookback, candles)
    }

    /// One bar opening at `open`; also returns the unrounded close that seeds the next bar.
    fn next_bar<R>(&self, index: usize, timestamp: Timestamp, open: f64, rng: &mut R) -> (Candle, f64)
    where
        R: RandomSource + ?Sized,
    {
        let cfg = &self.config;

        let trend = (index as f64 / cfg.trend_period).sin() * cfg.trend_amplitude;
        let shock = rng.signed() * cfg.daily_volatility;
        let close = open + (trend + shock) * open;

        let body_high = open.max(close);
        let body_low = open.min(close);
        let range = (close - open).abs() * cfg.wick_body_multiplier + rng.unit() * open * cfg.wick_fraction;
        let high = body_high + rng.unit() * range;
        let low = (body_low - rng.unit() * range)
            .max(open * cfg.low_floor_ratio)
            .min(body_low);

        let movement = if open > 0.0 { (close - open).abs() / open } else { 0.0 };
        let volume = cfg.volume_for_move(movement, rng.unit());

        let tick = |value: f64| Price::from(round_cents(value).max(MIN_TICK));
        let candle = Candle::new(
            timestamp,
            OHLCV::new(tick(open), tick(high), tick(low), tick(close), volume),
        );
        (candle, close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market_data::random::{SequenceSource, ZeroSource};

    const NOW: u64 = 1_700_000_000_000;

    #[test]
    fn catalog_falls_back_for_unknown_ticker() {
        let catalog = SymbolCatalog::default();
        assert_eq!(catalog.resolve(&Symbol::from("MSFT")), (420.0, false));
        assert_eq!(catalog.resolve(&Symbol::from("NVDA")), (280.0, true));
        assert_eq!(catalog.available_symbols().len(), 5);
    }

    #[test]
    fn series_spans_lookback_and_ends_before_now() {
        let generator = SeriesGenerator::default();
        let series =
            generator.generate_at(&Symbol::from("IBM"), LookbackPeriod::OneMonth, NOW, &mut ZeroSource);
        assert_eq!(series.count(), 30);
        assert_eq!(series.candles()[0].timestamp.value(), NOW - 30 * DAY_MS);
        assert_eq!(series.latest().unwrap().timestamp.value(), NOW - DAY_MS);
    }

    #[test]
    fn first_bar_opens_at_base_price() {
        let generator = SeriesGenerator::default();
        let mut rng = SequenceSource::new(vec![0.9, 0.3, 0.6, 0.2, 0.4]);
        let series =
            generator.generate_at(&Symbol::from("TSLA"), LookbackPeriod::OneWeek, NOW, &mut rng);
        assert_eq!(series.candles()[0].ohlcv.open.value(), 250.0);
    }

    #[test]
    fn extreme_draws_keep_envelope() {
        let generator = SeriesGenerator::default();
        for sample in [0.0, 0.999_999, 0.5] {
            let mut rng = SequenceSource::new(vec![sample]);
            let series = generator.generate_at(
                &Symbol::from("GOOGL"),
                LookbackPeriod::ThreeYears,
                NOW,
                &mut rng,
            );
            assert!(series.candles().iter().all(|c| c.ohlcv.is_valid()));
        }
    }

    #[test]
    fn volume_grows_with_move() {
        let cfg = GeneratorConfig::default();
        assert_eq!(cfg.volume_for_move(0.0, 0.0).value(), 1_000_000);
        assert_eq!(cfg.volume_for_move(0.02, 0.0).value(), 1_100_000);
        assert_eq!(cfg.volume_for_move(0.0, 0.5).value(), 1_250_000);
    }
}
