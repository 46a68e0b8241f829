use crate::domain::{
    errors::AppResult,
    logging::{LogComponent, get_logger, get_time_provider},
    market_data::{
        CandleSeries, GeneratorConfig, LookbackPeriod, SeriesGenerator, Symbol, SymbolCatalog,
        repositories::SeriesSource,
    },
};
use crate::infrastructure::random::StdRngSource;
use std::cell::RefCell;

/// In-browser stand-in for a market data feed.
///
/// Bars end at the current clock reading; draws come from one seeded RNG
/// shared by every request this source serves.
pub struct SyntheticMarketData {
    generator: SeriesGenerator,
    rng: RefCell<StdRngSource>,
}

impl SyntheticMarketData {
    pub fn new(config: GeneratorConfig, catalog: SymbolCatalog, seed: u64) -> Self {
        Self {
            generator: SeriesGenerator::new(config, catalog),
            rng: RefCell::new(StdRngSource::seeded(seed)),
        }
    }

    /// Default tables, seeded from the clock.
    pub fn from_clock() -> Self {
        let seed = get_time_provider().current_timestamp();
        Self::new(GeneratorConfig::default(), SymbolCatalog::default(), seed)
    }

    pub fn generator(&self) -> &SeriesGenerator {
        &self.generator
    }
}

impl SeriesSource for SyntheticMarketData {
    async fn load_series(&self, symbol: &Symbol, lookback: LookbackPeriod) -> AppResult<CandleSeries> {
        let latency = self.generator.config().simulated_latency_ms;
        #[cfg(target_arch = "wasm32")]
        if latency > 0 {
            gloo_timers::future::sleep(std::time::Duration::from_millis(latency as u64)).await;
        }

        let now = get_time_provider().current_timestamp();
        let series = {
            let mut rng = self.rng.borrow_mut();
            self.generator.generate_at(symbol, lookback, now, &mut *rng)
        };

        get_logger().debug(
            LogComponent::Infrastructure("SyntheticMarketData"),
            &format!(
                "Served {} bars for {} {} (latency {}ms)",
                series.count(),
                symbol,
                lookback,
                latency
            ),
        );
        Ok(series)
    }
}
