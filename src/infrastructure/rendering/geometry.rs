//! Pixel geometry for the canvas chart, computed without touching the DOM.

use crate::application::use_cases::ChartRenderData;
use crate::domain::chart::Color;
use crate::domain::market_data::services::format_price;
use crate::time_utils::format_time_label;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Fixed margins around the plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub padding: f64,
    pub text_space: f64,
    pub plot_width: f64,
    pub price_top: f64,
    pub price_height: f64,
    pub volume_top: f64,
    pub volume_height: f64,
}

impl Layout {
    pub const PADDING: f64 = 40.0;
    pub const TEXT_SPACE: f64 = 70.0;
    const PANE_GAP: f64 = 10.0;

    pub fn new(width: u32, height: u32, volume_pane_ratio: f64) -> Self {
        let padding = Self::PADDING;
        let plot_width = (width as f64 - padding * 2.0 - Self::TEXT_SPACE).max(1.0);
        let inner_height = (height as f64 - padding * 2.0).max(1.0);
        let volume_height = inner_height * volume_pane_ratio.clamp(0.0, 0.9);
        let price_height = (inner_height - volume_height - Self::PANE_GAP).max(1.0);
        Self {
            padding,
            text_space: Self::TEXT_SPACE,
            plot_width,
            price_top: padding,
            price_height,
            volume_top: padding + price_height + Self::PANE_GAP,
            volume_height,
        }
    }

    pub fn right_edge(&self) -> f64 {
        self.padding + self.plot_width
    }

    /// Horizontal space given to each of `count` bars.
    pub fn slot_width(&self, count: usize) -> f64 {
        self.plot_width / count.max(1) as f64
    }

    /// Bar under canvas x-coordinate `x`, or `None` outside the plot area.
    pub fn bar_index_at(&self, x: f64, count: usize) -> Option<usize> {
        if count == 0 || !(self.padding..self.right_edge()).contains(&x) {
            return None;
        }
        let index = ((x - self.padding) / self.slot_width(count)).floor() as usize;
        Some(index.min(count - 1))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CandleGeometry {
    pub x: f64,
    pub body_width: f64,
    pub high_y: f64,
    pub low_y: f64,
    pub body_top: f64,
    pub body_height: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VolumeGeometry {
    pub x: f64,
    pub width: f64,
    pub top: f64,
    pub height: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineGeometry {
    pub label: String,
    pub color: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub position: f64,
    pub text: String,
}

/// Everything the canvas needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry {
    pub layout: Layout,
    pub min_price: f64,
    pub max_price: f64,
    pub candles: Vec<CandleGeometry>,
    pub volumes: Vec<VolumeGeometry>,
    pub lines: Vec<LineGeometry>,
    pub price_labels: Vec<AxisLabel>,
    pub time_labels: Vec<AxisLabel>,
    pub last_price: Option<AxisLabel>,
}

const PRICE_TICKS: usize = 5;
const TIME_TICKS: usize = 6;

/// Price/time to pixel mapping shared by every element.
#[derive(Debug, Clone, Copy)]
struct Scale {
    layout: Layout,
    min_price: f64,
    max_price: f64,
    first_ts: f64,
    last_ts: f64,
    slot: f64,
    count: usize,
    max_volume: f64,
}

impl Scale {
    fn price_y(&self, price: f64) -> f64 {
        let range = self.max_price - self.min_price;
        if range <= 0.0 {
            return self.layout.price_top + self.layout.price_height / 2.0;
        }
        self.layout.price_top + (self.max_price - price) / range * self.layout.price_height
    }

    fn index_x(&self, index: usize) -> f64 {
        self.layout.padding + (index as f64 + 0.5) * self.slot
    }

    /// Timestamps map linearly onto the first and last slot centres.
    fn time_x(&self, timestamp: f64) -> f64 {
        if self.count <= 1 || self.last_ts <= self.first_ts {
            return self.index_x(0);
        }
        let t = (timestamp - self.first_ts) / (self.last_ts - self.first_ts);
        self.index_x(0) + t * (self.count - 1) as f64 * self.slot
    }

    fn candle(&self, index: usize, c: &[f64; 5]) -> CandleGeometry {
        let [_, open, high, low, close] = *c;
        let open_y = self.price_y(open);
        let close_y = self.price_y(close);
        CandleGeometry {
            x: self.index_x(index),
            body_width: (self.slot * 0.7).max(1.0),
            high_y: self.price_y(high),
            low_y: self.price_y(low),
            body_top: open_y.min(close_y),
            body_height: (open_y - close_y).abs(),
            color: if close >= open { Color::BULLISH } else { Color::BEARISH },
        }
    }

    fn volume(&self, index: usize, volume: f64, bullish: bool) -> VolumeGeometry {
        let height = if self.max_volume > 0.0 {
            volume / self.max_volume * self.layout.volume_height
        } else {
            0.0
        };
        let base = if bullish { Color::BULLISH } else { Color::BEARISH };
        VolumeGeometry {
            x: self.index_x(index),
            width: (self.slot * 0.7).max(1.0),
            top: self.layout.volume_top + self.layout.volume_height - height,
            height,
            color: base.with_alpha(0.5),
        }
    }
}

impl ChartGeometry {
    pub fn bar_index_at(&self, x: f64) -> Option<usize> {
        self.layout.bar_index_at(x, self.candles.len())
    }

    /// Candle geometry switches to rayon at `parallel_threshold` bars when
    /// the `parallel` feature is on.
    pub fn compute(data: &ChartRenderData, parallel_threshold: usize) -> Self {
        let layout = Layout::new(data.width, data.height, data.volume_pane_ratio);
        let count = data.candles.len();

        let (mut min_price, mut max_price) = data
            .candles
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| (lo.min(c[3]), hi.max(c[2])));
        if count == 0 {
            min_price = 0.0;
            max_price = 0.0;
        }
        let padding = (max_price - min_price) * 0.05;
        min_price = (min_price - padding).max(0.0);
        max_price += padding;

        let scale = Scale {
            layout,
            min_price,
            max_price,
            first_ts: data.candles.first().map(|c| c[0]).unwrap_or(0.0),
            last_ts: data.candles.last().map(|c| c[0]).unwrap_or(0.0),
            slot: layout.slot_width(count),
            count,
            max_volume: data.volumes.iter().map(|v| v.point[1]).fold(0.0, f64::max),
        };

        let candles = candle_geometry(&scale, &data.candles, parallel_threshold);
        let volumes = data
            .volumes
            .iter()
            .enumerate()
            .map(|(i, v)| scale.volume(i, v.point[1], v.bullish))
            .collect();
        let lines = data
            .sma_lines
            .iter()
            .map(|line| LineGeometry {
                label: line.label.clone(),
                color: line.color.clone(),
                points: line.points.iter().map(|p| (scale.time_x(p[0]), scale.price_y(p[1]))).collect(),
            })
            .collect();

        let price_labels = if count == 0 {
            Vec::new()
        } else {
            (0..PRICE_TICKS)
                .map(|i| {
                    let price = max_price - (max_price - min_price) * i as f64 / (PRICE_TICKS - 1) as f64;
                    AxisLabel { position: scale.price_y(price), text: format_price(price) }
                })
                .collect()
        };

        let span_days = count;
        let step = (count / TIME_TICKS).max(1);
        let time_labels = data
            .candles
            .iter()
            .enumerate()
            .step_by(step)
            .map(|(i, c)| AxisLabel {
                position: scale.index_x(i),
                text: format_time_label(c[0] as u64, span_days),
            })
            .collect();

        let last_price = data.candles.last().map(|c| AxisLabel {
            position: scale.price_y(c[4]),
            text: format_price(c[4]),
        });

        Self {
            layout,
            min_price,
            max_price,
            candles,
            volumes,
            lines,
            price_labels,
            time_labels,
            last_price,
        }
    }
}

#[cfg(feature = "parallel")]
fn candle_geometry(scale: &Scale, candles: &[[f64; 5]], parallel_threshold: usize) -> Vec<CandleGeometry> {
    if candles.len() >= parallel_threshold {
        candles.par_iter().enumerate().map(|(i, c)| scale.candle(i, c)).collect()
    } else {
        candles.iter().enumerate().map(|(i, c)| scale.candle(i, c)).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn candle_geometry(scale: &Scale, candles: &[[f64; 5]], _parallel_threshold: usize) -> Vec<CandleGeometry> {
    candles.iter().enumerate().map(|(i, c)| scale.candle(i, c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::{SmaLine, VolumeBar};
    use crate::domain::market_data::DAY_MS;

    fn render_data(bars: &[(f64, f64, f64, f64)]) -> ChartRenderData {
        ChartRenderData {
            symbol: "IBM".into(),
            period: "1W".into(),
            candles: bars
                .iter()
                .enumerate()
                .map(|(i, &(o, h, l, c))| [(i as u64 * DAY_MS) as f64, o, h, l, c])
                .collect(),
            volumes: bars
                .iter()
                .enumerate()
                .map(|(i, &(o, _, _, c))| VolumeBar {
                    point: [(i as u64 * DAY_MS) as f64, 1000.0 * (i + 1) as f64],
                    bullish: c >= o,
                })
                .collect(),
            sma_lines: vec![SmaLine {
                label: "SMA(2)".into(),
                color: "#FCD34D".into(),
                points: vec![[DAY_MS as f64, 100.0]],
            }],
            summary: None,
            width: 800,
            height: 600,
            volume_pane_ratio: 0.2,
        }
    }

    #[test]
    fn candles_fill_plot_width_left_to_right() {
        let data = render_data(&[(100.0, 110.0, 95.0, 105.0), (105.0, 108.0, 90.0, 92.0)]);
        let geo = ChartGeometry::compute(&data, usize::MAX);
        assert_eq!(geo.candles.len(), 2);
        let slot = geo.layout.plot_width / 2.0;
        assert!((geo.candles[0].x - (geo.layout.padding + slot / 2.0)).abs() < 1e-9);
        assert!(geo.candles[0].x < geo.candles[1].x);
        assert_eq!(geo.candles[0].color, Color::BULLISH);
        assert_eq!(geo.candles[1].color, Color::BEARISH);
    }

    #[test]
    fn wicks_enclose_bodies() {
        let data = render_data(&[(100.0, 110.0, 95.0, 105.0), (105.0, 108.0, 90.0, 92.0)]);
        let geo = ChartGeometry::compute(&data, usize::MAX);
        for c in &geo.candles {
            assert!(c.high_y <= c.body_top);
            assert!(c.low_y >= c.body_top + c.body_height - 1e-9);
            assert!(c.high_y >= geo.layout.price_top);
            assert!(c.low_y <= geo.layout.price_top + geo.layout.price_height);
        }
    }

    #[test]
    fn tallest_volume_fills_pane() {
        let data = render_data(&[(1.0, 2.0, 0.5, 1.5), (1.5, 2.0, 1.0, 1.2), (1.2, 1.3, 1.0, 1.25)]);
        let geo = ChartGeometry::compute(&data, usize::MAX);
        let last = geo.volumes.last().unwrap();
        assert!((last.height - geo.layout.volume_height).abs() < 1e-9);
        assert!((last.top - geo.layout.volume_top).abs() < 1e-9);
    }

    #[test]
    fn sma_point_lands_on_its_bar() {
        let data = render_data(&[(100.0, 110.0, 95.0, 105.0), (105.0, 108.0, 90.0, 92.0)]);
        let geo = ChartGeometry::compute(&data, usize::MAX);
        let (x, _) = geo.lines[0].points[0];
        assert!((x - geo.candles[1].x).abs() < 1e-9);
    }

    #[test]
    fn hover_lookup_covers_both_plot_edges() {
        let data = render_data(&[
            (100.0, 110.0, 95.0, 105.0),
            (105.0, 108.0, 90.0, 92.0),
            (92.0, 99.0, 91.0, 98.0),
            (98.0, 101.0, 97.0, 97.5),
        ]);
        let geo = ChartGeometry::compute(&data, usize::MAX);
        let layout = geo.layout;

        assert_eq!(geo.bar_index_at(layout.padding), Some(0));
        assert_eq!(geo.bar_index_at(layout.right_edge() - 1e-6), Some(3));
        assert_eq!(geo.bar_index_at(layout.padding - 1.0), None);
        assert_eq!(geo.bar_index_at(layout.right_edge()), None);
        for (i, candle) in geo.candles.iter().enumerate() {
            assert_eq!(geo.bar_index_at(candle.x), Some(i));
        }
    }

    #[test]
    fn hover_lookup_on_empty_chart() {
        let layout = Layout::new(800, 600, 0.2);
        assert_eq!(layout.bar_index_at(400.0, 0), None);
    }

    #[test]
    fn empty_data_has_no_labels() {
        let geo = ChartGeometry::compute(&render_data(&[]), 0);
        assert!(geo.candles.is_empty());
        assert!(geo.price_labels.is_empty());
        assert!(geo.last_price.is_none());
    }
}
