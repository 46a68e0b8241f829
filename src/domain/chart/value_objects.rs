use crate::domain::market_data::{LookbackPeriod, Symbol};
use serde::{Serialize, Serializer};

/// Value Object - Viewport mapping data space onto canvas pixels
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub start_time: f64,
    pub end_time: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            end_time: 0.0,
            min_price: 0.0,
            max_price: 100.0,
            width: 800,
            height: 600,
        }
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, ..Default::default() }
    }

    pub fn time_range(&self) -> f64 {
        self.end_time - self.start_time
    }

    pub fn price_range(&self) -> f64 {
        self.max_price - self.min_price
    }

    /// Convert a timestamp to a screen X coordinate
    pub fn time_to_x(&self, timestamp: f64) -> f64 {
        if self.time_range() == 0.0 {
            return self.width as f64 / 2.0;
        }
        let normalized = (timestamp - self.start_time) / self.time_range();
        normalized * self.width as f64
    }

    /// Convert a price to a screen Y coordinate
    pub fn price_to_y(&self, price: f64) -> f64 {
        if self.price_range() == 0.0 {
            return self.height as f64 / 2.0;
        }
        let normalized = (price - self.min_price) / self.price_range();
        self.height as f64 * (1.0 - normalized) // Invert Y
    }
}

/// Value Object - Color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub const fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    pub fn to_hex(&self) -> u32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    pub fn with_alpha(&self, alpha: f32) -> Self {
        Self { a: alpha, ..*self }
    }

    /// CSS notation: `#RRGGBB` when opaque, `rgba(...)` otherwise.
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:06X}", self.to_hex())
        } else {
            let hex = self.to_hex();
            format!(
                "rgba({}, {}, {}, {})",
                (hex >> 16) & 0xFF,
                (hex >> 8) & 0xFF,
                hex & 0xFF,
                self.a
            )
        }
    }

    pub const BULLISH: Color = Color::from_hex(0x10B981);
    pub const BEARISH: Color = Color::from_hex(0xEF4444);
    pub const GRID: Color = Color::new(1.0, 1.0, 1.0, 0.1);
    pub const AXIS_LABEL: Color = Color::from_hex(0x9CA3AF);
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

/// One toggleable moving-average line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SmaConfig {
    pub period: usize,
    pub color: Color,
    pub enabled: bool,
}

impl SmaConfig {
    pub const fn new(period: usize, color: Color) -> Self {
        Self { period, color, enabled: false }
    }

    pub fn label(&self) -> String {
        format!("SMA({})", self.period)
    }
}

/// SMA(20) yellow, SMA(50) blue, SMA(150) purple, SMA(200) orange; all off.
pub fn default_sma_configs() -> Vec<SmaConfig> {
    vec![
        SmaConfig::new(20, Color::from_hex(0xFCD34D)),
        SmaConfig::new(50, Color::from_hex(0x60A5FA)),
        SmaConfig::new(150, Color::from_hex(0xA78BFA)),
        SmaConfig::new(200, Color::from_hex(0xFB923C)),
    ]
}

/// The SMA popover state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmaSettings {
    configs: Vec<SmaConfig>,
}

impl Default for SmaSettings {
    fn default() -> Self {
        Self::new(default_sma_configs())
    }
}

impl SmaSettings {
    pub fn new(configs: Vec<SmaConfig>) -> Self {
        Self { configs }
    }

    pub fn configs(&self) -> &[SmaConfig] {
        &self.configs
    }

    /// Flip one period on or off. Returns `false` when no such period is configured.
    pub fn toggle(&mut self, period: usize, enabled: bool) -> bool {
        match self.configs.iter_mut().find(|c| c.period == period) {
            Some(config) => {
                config.enabled = enabled;
                true
            }
            None => false,
        }
    }

    pub fn enabled(&self) -> Vec<SmaConfig> {
        self.configs.iter().filter(|c| c.enabled).copied().collect()
    }

    pub fn enabled_periods(&self) -> Vec<usize> {
        self.configs.iter().filter(|c| c.enabled).map(|c| c.period).collect()
    }

    pub fn enabled_count(&self) -> usize {
        self.configs.iter().filter(|c| c.enabled).count()
    }

    pub fn color_for(&self, period: usize) -> Option<Color> {
        self.configs.iter().find(|c| c.period == period).map(|c| c.color)
    }
}

/// Start-up state and chart dimensions of the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub default_symbol: Symbol,
    pub default_lookback: LookbackPeriod,
    pub sma: Vec<SmaConfig>,
    pub width: u32,
    pub height: u32,
    /// Share of the canvas height given to the volume pane.
    pub volume_pane_ratio: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_symbol: Symbol::from("IBM"),
            default_lookback: LookbackPeriod::OneYear,
            sma: default_sma_configs(),
            width: 800,
            height: 600,
            volume_pane_ratio: 0.2,
        }
    }
}

impl DashboardConfig {
    pub fn sma_settings(&self) -> SmaSettings {
        SmaSettings::new(self.sma.clone())
    }

    pub fn volume_pane_height(&self) -> f64 {
        self.height as f64 * self.volume_pane_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.default_symbol.value(), "IBM");
        assert_eq!(config.default_lookback.days(), 365);
        assert!((config.volume_pane_height() - 120.0).abs() < 1e-9);
        assert_eq!(config.sma_settings().configs().len(), 4);
    }

    #[test]
    fn hex_round_trip_and_css() {
        let yellow = Color::from_hex(0xFCD34D);
        assert_eq!(yellow.to_hex(), 0xFCD34D);
        assert_eq!(yellow.to_css(), "#FCD34D");
        assert_eq!(Color::from_hex(0x4B5563).with_alpha(0.4).to_css(), "rgba(75, 85, 99, 0.4)");
    }

    #[test]
    fn toggling_only_touches_one_period() {
        let mut settings = SmaSettings::default();
        assert_eq!(settings.enabled_count(), 0);
        assert!(settings.toggle(50, true));
        assert!(settings.toggle(200, true));
        assert!(!settings.toggle(7, true));
        assert_eq!(settings.enabled_periods(), vec![50, 200]);
        assert!(settings.toggle(50, false));
        assert_eq!(settings.enabled_periods(), vec![200]);
        assert_eq!(settings.color_for(200), Some(Color::from_hex(0xFB923C)));
    }

    #[test]
    fn viewport_maps_corners() {
        let viewport = Viewport {
            start_time: 0.0,
            end_time: 10.0,
            min_price: 100.0,
            max_price: 200.0,
            width: 500,
            height: 400,
        };
        assert_eq!(viewport.time_to_x(5.0), 250.0);
        assert_eq!(viewport.price_to_y(200.0), 0.0);
        assert_eq!(viewport.price_to_y(100.0), 400.0);
    }
}
