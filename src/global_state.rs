use crate::application::use_cases::{ChartRenderData, TooltipData};
use crate::domain::chart::SmaSettings;
use crate::domain::market_data::services::PriceSummary;
use crate::domain::market_data::{LookbackPeriod, Symbol};
use leptos::*;
use once_cell::sync::OnceCell;

/// Maximum number of lines kept by the in-page log console.
pub const MAX_LOG_LINES: usize = 100;

pub struct Globals {
    pub current_symbol: RwSignal<Symbol>,
    pub current_period: RwSignal<LookbackPeriod>,
    pub custom_range_label: RwSignal<Option<String>>,
    pub sma_settings: RwSignal<SmaSettings>,
    pub render_data: RwSignal<Option<ChartRenderData>>,
    pub tooltip: RwSignal<Option<TooltipData>>,
    pub price_summary: RwSignal<Option<PriceSummary>>,
    pub is_loading: RwSignal<bool>,
    pub status: RwSignal<String>,
    pub logs: RwSignal<Vec<String>>,
    pub logs_paused: RwSignal<bool>,
}

static GLOBALS: OnceCell<Globals> = OnceCell::new();

pub fn globals() -> &'static Globals {
    GLOBALS.get_or_init(|| Globals {
        current_symbol: create_rw_signal(Symbol::from("IBM")),
        current_period: create_rw_signal(LookbackPeriod::default()),
        custom_range_label: create_rw_signal(None),
        sma_settings: create_rw_signal(SmaSettings::default()),
        render_data: create_rw_signal(None),
        tooltip: create_rw_signal(None),
        price_summary: create_rw_signal(None),
        is_loading: create_rw_signal(false),
        status: create_rw_signal(String::new()),
        logs: create_rw_signal(Vec::new()),
        logs_paused: create_rw_signal(false),
    })
}

/// Append a console line, dropping the oldest beyond `cap`.
pub fn push_log_line(lines: &mut Vec<String>, line: String, cap: usize) {
    lines.push(line);
    if lines.len() > cap {
        let excess = lines.len() - cap;
        lines.drain(..excess);
    }
}
