use super::value_objects::{Color, SmaSettings, Viewport};
use crate::domain::market_data::services::PriceSummary;
use crate::domain::market_data::{CandleSeries, LookbackPeriod, SmaOverlay, Symbol};

/// Domain entity - what the chart currently shows
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSnapshot {
    pub symbol: Symbol,
    pub lookback: LookbackPeriod,
    pub series: CandleSeries,
    pub overlays: Vec<ChartOverlay>,
}

/// An overlay paired with the color it is drawn in.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOverlay {
    pub overlay: SmaOverlay,
    pub color: Color,
}

impl ChartSnapshot {
    pub fn new(series: CandleSeries) -> Self {
        Self {
            symbol: series.symbol().clone(),
            lookback: series.lookback(),
            series,
            overlays: Vec::new(),
        }
    }

    /// Swap in freshly computed overlays; colors come from the SMA settings.
    pub fn set_overlays(&mut self, overlays: Vec<SmaOverlay>, settings: &SmaSettings) {
        self.overlays = overlays
            .into_iter()
            .map(|overlay| {
                let color = settings.color_for(overlay.period).unwrap_or(Color::AXIS_LABEL);
                ChartOverlay { overlay, color }
            })
            .collect();
    }

    pub fn has_data(&self) -> bool {
        !self.series.is_empty()
    }

    pub fn candle_count(&self) -> usize {
        self.series.count()
    }

    pub fn summary(&self) -> Option<PriceSummary> {
        PriceSummary::from_series(&self.series)
    }

    /// Viewport fitted to the series with 5% price padding above and below.
    pub fn viewport(&self, width: u32, height: u32) -> Viewport {
        let mut viewport = Viewport::new(width, height);
        let candles = self.series.candles();
        if let (Some(first), Some(last), Some((min_price, max_price))) =
            (candles.first(), candles.last(), self.series.price_range())
        {
            let padding = (max_price.value() - min_price.value()) * 0.05;
            viewport.min_price = (min_price.value() - padding).max(0.0);
            viewport.max_price = max_price.value() + padding;
            viewport.start_time = first.timestamp.as_f64();
            viewport.end_time = last.timestamp.as_f64();
        }
        viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market_data::{
        Candle, DAY_MS, IndicatorCalculator, OHLCV, Price, Timestamp, Volume,
    };

    fn snapshot(closes: &[f64]) -> ChartSnapshot {
        let candles = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                Candle::new(
                    Timestamp::from_millis(i as u64 * DAY_MS),
                    OHLCV::new(
                        Price::from(c),
                        Price::from(c + 1.0),
                        Price::from(c - 1.0),
                        Price::from(c),
                        Volume::from(100),
                    ),
                )
            })
            .collect();
        ChartSnapshot::new(CandleSeries::new(
            Symbol::from("MSFT"),
            LookbackPeriod::OneWeek,
            candles,
        ))
    }

    #[test]
    fn viewport_pads_price_range() {
        let snap = snapshot(&[100.0, 110.0, 120.0]);
        let viewport = snap.viewport(800, 600);
        // lows 99, highs 121 -> range 22, padding 1.1
        assert!((viewport.min_price - 97.9).abs() < 1e-9);
        assert!((viewport.max_price - 122.1).abs() < 1e-9);
        assert_eq!(viewport.end_time, (2 * DAY_MS) as f64);
    }

    #[test]
    fn overlays_take_configured_colors() {
        let mut snap = snapshot(&[1.0; 25]);
        let mut settings = SmaSettings::default();
        settings.toggle(20, true);
        let overlays = IndicatorCalculator::new()
            .compute_overlays(&snap.series, &settings.enabled_periods())
            .unwrap();
        snap.set_overlays(overlays, &settings);
        assert_eq!(snap.overlays.len(), 1);
        assert_eq!(snap.overlays[0].color, Color::from_hex(0xFCD34D));
        assert_eq!(snap.overlays[0].overlay.len(), 6);
    }

    #[test]
    fn empty_snapshot_keeps_default_viewport() {
        let snap = snapshot(&[]);
        assert!(!snap.has_data());
        assert!(snap.summary().is_none());
        assert_eq!(snap.viewport(10, 10).max_price, 100.0);
    }
}
