use leptos::html::Canvas;
use leptos::*;
use std::rc::Rc;

use crate::{
    application::{DashboardService, RenderChartUseCase, status_message, use_cases::{ChartRenderData, TooltipData}},
    domain::{
        chart::{DashboardConfig, SmaSettings},
        logging::{LogComponent, LogEntry, Logger, get_logger, get_time_provider},
        market_data::{
            LookbackPeriod, Symbol,
            services::{PriceSummary, Sentiment, format_price, format_volume},
        },
    },
    global_state::{MAX_LOG_LINES, push_log_line},
    infrastructure::{
        SyntheticMarketData,
        rendering::{CanvasRenderer, geometry::Layout},
    },
    time_utils::{DateRange, EARLIEST_DATE, date_from_millis},
};

pub const CANVAS_ID: &str = "stock-chart-canvas";

crate::global_signals! {
    pub current_symbol => current_symbol: Symbol,
    pub current_period => current_period: LookbackPeriod,
    pub custom_range_label => custom_range_label: Option<String>,
    pub sma_settings => sma_settings: SmaSettings,
    pub render_data => render_data: Option<ChartRenderData>,
    pub tooltip => tooltip: Option<TooltipData>,
    pub price_summary => price_summary: Option<PriceSummary>,
    pub is_loading => is_loading: bool,
    pub status => status: String,
    pub logs => logs: Vec<String>,
    pub logs_paused => logs_paused: bool,
}

type Service = Rc<DashboardService<SyntheticMarketData>>;

/// 🌉 Bridge logger: console output plus the in-page log console
pub struct DashboardLogger {
    console: crate::infrastructure::services::ConsoleLogger,
}

impl DashboardLogger {
    pub fn new(console: crate::infrastructure::services::ConsoleLogger) -> Self {
        Self { console }
    }
}

impl Logger for DashboardLogger {
    fn log(&self, entry: LogEntry) {
        if !self.console.accepts(entry.level) {
            return;
        }
        let line = entry.format_line();
        self.console.log(entry);
        if !logs_paused().get_untracked() {
            logs().update(|lines| push_log_line(lines, line, MAX_LOG_LINES));
        }
    }
}

/// Start a load for the current symbol and period; the newest call wins.
fn request_load(service: Service, render: Rc<RenderChartUseCase>) {
    let symbol = current_symbol().get_untracked();
    let period = current_period().get_untracked();
    is_loading().set(true);
    status().set(format!("Loading {} {}…", symbol, period));

    spawn_local(async move {
        match service.load(symbol, period).await {
            Ok(snapshot) => {
                price_summary().set(snapshot.summary());
                render_data().set(Some(render.prepare_render_data(&snapshot)));
                status().set(format!("{} bars", snapshot.candle_count()));
                is_loading().set(false);
            }
            // a newer load owns the loading flag now
            Err(e) if e.is_superseded() => {}
            Err(e) => {
                status().set(status_message(&e));
                is_loading().set(false);
            }
        }
    });
}

fn today() -> chrono::NaiveDate {
    date_from_millis(get_time_provider().current_timestamp())
}

/// 🦀 Main dashboard component
#[component]
pub fn App() -> impl IntoView {
    let config = DashboardConfig::default();
    current_symbol().set(config.default_symbol.clone());
    current_period().set(config.default_lookback);
    sma_settings().set(config.sma_settings());

    let service: Service = Rc::new(DashboardService::new(
        SyntheticMarketData::from_clock(),
        config.sma_settings(),
    ));
    let render = Rc::new(RenderChartUseCase::new(config.clone()));
    let symbols: Vec<String> = service
        .source()
        .generator()
        .catalog()
        .available_symbols()
        .into_iter()
        .map(|s| s.to_string())
        .collect();

    {
        let service = Rc::clone(&service);
        let render = Rc::clone(&render);
        create_effect(move |_| {
            let _ = (current_symbol().get(), current_period().get());
            request_load(Rc::clone(&service), Rc::clone(&render));
        });
    }

    let on_toggle: Rc<dyn Fn(usize, bool)> = {
        let service = Rc::clone(&service);
        let render = Rc::clone(&render);
        Rc::new(move |period: usize, enabled: bool| {
            match service.toggle_sma(period, enabled) {
                Ok(snapshot) => {
                    sma_settings().set(service.settings());
                    if let Some(snapshot) = snapshot {
                        render_data().set(Some(render.prepare_render_data(&snapshot)));
                    }
                }
                Err(e) => status().set(status_message(&e)),
            }
        })
    };

    view! {
        <style>{STYLES}</style>
        <div class="dashboard">
            <Header symbols=symbols />
            <div class="toolbar">
                <PeriodBar />
                <DateRangePicker />
                <SmaPopover on_toggle=on_toggle />
            </div>
            <ChartContainer width=config.width height=config.height />
            <DebugConsole />
        </div>
    }
}

/// 📊 Ticker selector and price panel
#[component]
fn Header(symbols: Vec<String>) -> impl IntoView {
    view! {
        <div class="header">
            <select
                class="ticker-select"
                prop:value=move || current_symbol().get().to_string()
                on:change=move |ev| match Symbol::new(&event_target_value(&ev)) {
                    Ok(symbol) => {
                        get_logger().info(
                            LogComponent::Presentation("Header"),
                            &format!("Ticker changed to {}", symbol),
                        );
                        current_symbol().set(symbol);
                    }
                    Err(e) => {
                        get_logger().warn(LogComponent::Presentation("Header"), &e.to_string());
                        status().set(e.to_string());
                    }
                }
            >
                {symbols
                    .into_iter()
                    .map(|s| view! { <option value=s.clone()>{s.clone()}</option> })
                    .collect_view()}
            </select>
            <PricePanel />
        </div>
    }
}

#[component]
fn PricePanel() -> impl IntoView {
    view! {
        <div class="price-panel">
            {move || match price_summary().get() {
                Some(summary) => {
                    let tone = match summary.sentiment {
                        Sentiment::Bullish => "up",
                        Sentiment::Bearish => "down",
                        Sentiment::Neutral => "flat",
                    };
                    let ohlcv = summary.latest.ohlcv;
                    view! {
                        <div class="price-main">
                            <span class="price-value">{format!("${}", format_price(ohlcv.close.value()))}</span>
                            <span class=format!("change {}", tone)>{summary.change_label()}</span>
                            <span class=format!("sentiment {}", tone)>{summary.sentiment.to_string()}</span>
                        </div>
                        <div class="price-details">
                            <span>"O " {format_price(ohlcv.open.value())}</span>
                            <span>"H " {format_price(ohlcv.high.value())}</span>
                            <span>"L " {format_price(ohlcv.low.value())}</span>
                            <span>"C " {format_price(ohlcv.close.value())}</span>
                            <span>"Vol " {format_volume(ohlcv.volume.value())}</span>
                        </div>
                    }
                    .into_view()
                }
                None => view! { <div class="price-main">"—"</div> }.into_view(),
            }}
        </div>
    }
}

/// Preset lookback buttons
#[component]
fn PeriodBar() -> impl IntoView {
    view! {
        <div class="period-bar">
            {LookbackPeriod::presets()
                .into_iter()
                .map(|period| {
                    view! {
                        <button
                            class="period-btn"
                            class:active=move || {
                                current_period().get() == period && custom_range_label().get().is_none()
                            }
                            on:click=move |_| {
                                custom_range_label().set(None);
                                current_period().set(period);
                            }
                        >
                            {period.label().to_string()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

/// Custom from/to range, bucketed into the nearest preset on Apply.
#[component]
fn DateRangePicker() -> impl IntoView {
    let from = create_rw_signal(String::new());
    let to = create_rw_signal(String::new());
    let error = create_rw_signal(None::<String>);
    let max_date = today().format("%Y-%m-%d").to_string();
    let min_date = EARLIEST_DATE.format("%Y-%m-%d").to_string();

    let apply = move |_| match DateRange::parse(&from.get_untracked(), &to.get_untracked(), today()) {
        Ok(range) => {
            let period = range.to_lookback();
            get_logger().info(
                LogComponent::Presentation("DateRangePicker"),
                &format!("{} ({} days) -> {}", range.label(), range.day_count(), period),
            );
            error.set(None);
            custom_range_label().set(Some(range.label()));
            current_period().set(period);
        }
        Err(e) => error.set(Some(e.to_string())),
    };

    view! {
        <div class="date-range">
            <input
                type="date"
                min=min_date.clone()
                max=max_date.clone()
                prop:value=move || from.get()
                on:input=move |ev| from.set(event_target_value(&ev))
            />
            <input
                type="date"
                min=move || if from.get().is_empty() { min_date.clone() } else { from.get() }
                max=max_date
                prop:value=move || to.get()
                on:input=move |ev| to.set(event_target_value(&ev))
            />
            <button
                class="debug-btn"
                on:click=move |_| {
                    from.set(String::new());
                    to.set(String::new());
                    error.set(None);
                    custom_range_label().set(None);
                }
            >
                "Clear"
            </button>
            <button
                class="debug-btn"
                disabled=move || from.get().is_empty() || to.get().is_empty()
                on:click=apply
            >
                "Apply"
            </button>
            {move || custom_range_label().get().map(|label| view! { <span class="range-label">{label}</span> })}
            {move || error.get().map(|msg| view! { <span class="range-error">{msg}</span> })}
        </div>
    }
}

/// SMA checkboxes with an enabled-count badge
#[component]
fn SmaPopover(on_toggle: Rc<dyn Fn(usize, bool)>) -> impl IntoView {
    let open = create_rw_signal(false);

    view! {
        <div class="sma-popover">
            <button class="debug-btn" on:click=move |_| open.update(|o| *o = !*o)>
                "SMA"
                <Show when=move || { sma_settings().with(|s| s.enabled_count() > 0) }>
                    <span class="badge">{move || sma_settings().with(|s| s.enabled_count())}</span>
                </Show>
            </button>
            <Show when=move || open.get()>
                <div class="sma-menu">
                    {sma_settings()
                        .get_untracked()
                        .configs()
                        .iter()
                        .map(|config| {
                            let period = config.period;
                            let color = config.color.to_css();
                            let on_toggle = Rc::clone(&on_toggle);
                            view! {
                                <label class="sma-option">
                                    <input
                                        type="checkbox"
                                        prop:checked=move || {
                                            sma_settings().with(|s| s.enabled_periods().contains(&period))
                                        }
                                        on:change=move |ev| on_toggle(period, event_target_checked(&ev))
                                    />
                                    <span class="swatch" style:background=color></span>
                                    {config.label()}
                                </label>
                            }
                        })
                        .collect_view()}
                </div>
            </Show>
        </div>
    }
}

/// 🎯 Bar and SMA values under the cursor, if any.
fn hover_at(x: f64, y: f64, width: u32, height: u32) -> Option<TooltipData> {
    render_data().with_untracked(|data| {
        let data = data.as_ref()?;
        let index = Layout::new(width, height, data.volume_pane_ratio).bar_index_at(x, data.candles.len())?;
        data.tooltip_at(index, x, y)
    })
}

/// 🎨 Canvas chart with loading overlay, hover tooltip and SMA legend
#[component]
fn ChartContainer(width: u32, height: u32) -> impl IntoView {
    let canvas_ref = create_node_ref::<Canvas>();

    create_effect(move |_| {
        let data = render_data().get();
        tooltip().set(None);
        if canvas_ref.get().is_none() {
            return;
        }
        if let Some(data) = data {
            let renderer = CanvasRenderer::new(CANVAS_ID, width, height);
            if let Err(e) = renderer.render(&data) {
                get_logger().error(LogComponent::Presentation("ChartContainer"), &e.to_string());
                status().set(e.to_string());
            }
        }
    });

    view! {
        <div class="chart-container">
            <div class="chart-wrapper">
                <canvas
                    id=CANVAS_ID
                    node_ref=canvas_ref
                    width=width.to_string()
                    height=height.to_string()
                    on:mousemove=move |ev: web_sys::MouseEvent| {
                        tooltip().set(hover_at(ev.offset_x() as f64, ev.offset_y() as f64, width, height));
                    }
                    on:mouseleave=move |_| tooltip().set(None)
                />
                {move || tooltip().get().map(|tip| {
                    let line_class = if tip.bullish { "tooltip-ohlc up" } else { "tooltip-ohlc down" };
                    let ohlcv = tip.ohlcv_line();
                    view! {
                        <div
                            class="chart-tooltip"
                            style:left=format!("{}px", tip.x + 14.0)
                            style:top=format!("{}px", tip.y + 14.0)
                        >
                            <div class="tooltip-date">{tip.date}</div>
                            <div class=line_class>{ohlcv}</div>
                            {tip
                                .sma
                                .into_iter()
                                .map(|sma| {
                                    view! {
                                        <div style:color=sma.color>
                                            {format!("{} {}", sma.label, format_price(sma.value))}
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                })}
                <Show when=move || is_loading().get()>
                    <div class="loading-overlay">"Loading…"</div>
                </Show>
            </div>
            <div class="sma-legend">
                {move || {
                    render_data()
                        .get()
                        .map(|data| {
                            data.sma_lines
                                .into_iter()
                                .map(|line| {
                                    view! {
                                        <span class="legend-item" style:color=line.color>{line.label}</span>
                                    }
                                })
                                .collect_view()
                        })
                }}
            </div>
            <div class="status">{move || status().get()}</div>
        </div>
    }
}

/// 🐛 Debug console fed by the domain logger
#[component]
fn DebugConsole() -> impl IntoView {
    view! {
        <div class="debug-console">
            <div class="debug-header">
                <span>"Log console"</span>
                <div>
                    <button
                        class="debug-btn"
                        on:click=move |_| logs_paused().update(|p| *p = !*p)
                    >
                        {move || if logs_paused().get() { "Resume" } else { "Pause" }}
                    </button>
                    <button class="debug-btn" on:click=move |_| logs().set(Vec::new())>
                        "Clear"
                    </button>
                </div>
            </div>
            <div class="debug-log">
                {move || {
                    logs()
                        .get()
                        .into_iter()
                        .map(|line| view! { <div class="log-line">{line}</div> })
                        .collect_view()
                }}
            </div>
        </div>
    }
}

const STYLES: &str = r#"
.dashboard {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
    background: #0b1220;
    min-height: 100vh;
    padding: 20px;
    color: #e5e7eb;
}
.header, .toolbar {
    display: flex;
    align-items: center;
    gap: 16px;
    flex-wrap: wrap;
    margin-bottom: 12px;
}
.ticker-select {
    background: #1f2937;
    color: white;
    border: 1px solid #374151;
    border-radius: 6px;
    padding: 6px 10px;
    font-size: 16px;
}
.price-main { display: flex; gap: 10px; align-items: baseline; }
.price-value { font-size: 24px; font-weight: 700; }
.change.up, .tooltip-ohlc.up { color: #10B981; }
.change.down, .tooltip-ohlc.down { color: #EF4444; }
.sentiment {
    font-size: 11px;
    font-weight: 600;
    border-radius: 4px;
    padding: 1px 6px;
    background: #374151;
}
.sentiment.up { background: rgba(16, 185, 129, 0.2); color: #10B981; }
.sentiment.down { background: rgba(239, 68, 68, 0.2); color: #EF4444; }
.price-details { display: flex; gap: 12px; font-size: 12px; color: #9CA3AF; }
.period-bar { display: flex; gap: 4px; }
.period-btn, .debug-btn {
    background: #1f2937;
    color: #e5e7eb;
    border: 1px solid #374151;
    padding: 4px 10px;
    border-radius: 5px;
    cursor: pointer;
    font-size: 12px;
}
.period-btn.active { background: #2563eb; border-color: #2563eb; }
.date-range { display: flex; gap: 6px; align-items: center; }
.range-error { color: #EF4444; font-size: 12px; }
.sma-popover { position: relative; }
.badge {
    margin-left: 6px;
    background: #2563eb;
    border-radius: 8px;
    padding: 0 6px;
}
.sma-menu {
    position: absolute;
    z-index: 10;
    background: #1f2937;
    border: 1px solid #374151;
    border-radius: 6px;
    padding: 8px;
    display: flex;
    flex-direction: column;
    gap: 6px;
}
.swatch { display: inline-block; width: 10px; height: 10px; border-radius: 2px; margin: 0 6px; }
.chart-wrapper { position: relative; display: inline-block; }
.loading-overlay {
    position: absolute;
    inset: 0;
    display: flex;
    align-items: center;
    justify-content: center;
    background: rgba(17, 24, 39, 0.7);
}
.chart-tooltip {
    position: absolute;
    pointer-events: none;
    background: rgba(17, 24, 39, 0.95);
    border: 1px solid #374151;
    border-radius: 6px;
    padding: 6px 8px;
    font-size: 11px;
    white-space: nowrap;
    z-index: 5;
}
.tooltip-date { color: #9CA3AF; margin-bottom: 2px; }
.sma-legend { display: flex; gap: 12px; font-size: 12px; margin: 6px 0; }
.status { color: #9CA3AF; font-size: 13px; }
.debug-console {
    background: rgba(0, 0, 0, 0.6);
    border-radius: 8px;
    padding: 12px;
    max-height: 240px;
    overflow-y: auto;
    border: 1px solid #374151;
    margin-top: 16px;
}
.debug-header { display: flex; justify-content: space-between; margin-bottom: 8px; }
.debug-log { font-family: 'Courier New', monospace; font-size: 11px; line-height: 1.3; }
"#;
