use crate::domain::chart::{ChartSnapshot, DashboardConfig};
use crate::domain::market_data::services::{PriceSummary, format_price, format_volume};
use crate::time_utils::date_from_millis;
use serde::Serialize;

/// Use Case: flatten a snapshot into the series layout chart widgets consume
pub struct RenderChartUseCase {
    config: DashboardConfig,
}

impl RenderChartUseCase {
    pub fn new(config: DashboardConfig) -> Self {
        Self { config }
    }

    pub fn prepare_render_data(&self, snapshot: &ChartSnapshot) -> ChartRenderData {
        let candles = snapshot.series.candles();
        ChartRenderData {
            symbol: snapshot.symbol.to_string(),
            period: snapshot.lookback.label().to_string(),
            candles: candles
                .iter()
                .map(|c| {
                    [
                        c.timestamp.as_f64(),
                        c.ohlcv.open.value(),
                        c.ohlcv.high.value(),
                        c.ohlcv.low.value(),
                        c.ohlcv.close.value(),
                    ]
                })
                .collect(),
            volumes: candles
                .iter()
                .map(|c| VolumeBar {
                    point: [c.timestamp.as_f64(), c.ohlcv.volume.value() as f64],
                    bullish: c.ohlcv.close >= c.ohlcv.open,
                })
                .collect(),
            sma_lines: snapshot
                .overlays
                .iter()
                .map(|o| SmaLine {
                    label: o.overlay.label(),
                    color: o.color.to_css(),
                    points: o.overlay.points.iter().map(|p| [p.timestamp.as_f64(), p.value]).collect(),
                })
                .collect(),
            summary: snapshot.summary(),
            width: self.config.width,
            height: self.config.height,
            volume_pane_ratio: self.config.volume_pane_ratio,
        }
    }
}

/// DTO handed to the renderer and to the JS API
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRenderData {
    pub symbol: String,
    pub period: String,
    /// `[timestamp, open, high, low, close]`
    pub candles: Vec<[f64; 5]>,
    pub volumes: Vec<VolumeBar>,
    pub sma_lines: Vec<SmaLine>,
    pub summary: Option<PriceSummary>,
    pub width: u32,
    pub height: u32,
    pub volume_pane_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeBar {
    /// `[timestamp, volume]`
    pub point: [f64; 2],
    pub bullish: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmaLine {
    pub label: String,
    pub color: String,
    /// `[timestamp, value]`
    pub points: Vec<[f64; 2]>,
}

impl ChartRenderData {
    /// Shared hover tooltip for bar `index`: OHLCV plus every SMA line that
    /// has a point on that bar. `x`/`y` is the cursor position on the canvas.
    pub fn tooltip_at(&self, index: usize, x: f64, y: f64) -> Option<TooltipData> {
        let [timestamp, open, high, low, close] = *self.candles.get(index)?;
        let volume = self.volumes.get(index).map(|v| v.point[1]).unwrap_or(0.0);
        let sma = self
            .sma_lines
            .iter()
            .filter_map(|line| {
                line.points
                    .binary_search_by(|p| p[0].total_cmp(&timestamp))
                    .ok()
                    .map(|i| TooltipSma {
                        label: line.label.clone(),
                        color: line.color.clone(),
                        value: line.points[i][1],
                    })
            })
            .collect();
        Some(TooltipData {
            x,
            y,
            date: date_from_millis(timestamp as u64).format("%b %d, %Y").to_string(),
            open,
            high,
            low,
            close,
            volume,
            bullish: close >= open,
            sma,
        })
    }
}

/// Values under the cursor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipData {
    pub x: f64,
    pub y: f64,
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub bullish: bool,
    pub sma: Vec<TooltipSma>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipSma {
    pub label: String,
    pub color: String,
    pub value: f64,
}

impl TooltipData {
    /// `O 185.00  H 186.10  L 184.20  C 185.70  Vol 1.1M`
    pub fn ohlcv_line(&self) -> String {
        format!(
            "O {}  H {}  L {}  C {}  Vol {}",
            format_price(self.open),
            format_price(self.high),
            format_price(self.low),
            format_price(self.close),
            format_volume(self.volume as u64)
        )
    }
}
