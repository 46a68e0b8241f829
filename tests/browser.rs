#![cfg(target_arch = "wasm32")]

use stock_chart_wasm::application::{DashboardService, RenderChartUseCase};
use stock_chart_wasm::domain::chart::DashboardConfig;
use stock_chart_wasm::domain::logging::{LogComponent, LogLevel, Logger};
use stock_chart_wasm::domain::market_data::{LookbackPeriod, Symbol};
use stock_chart_wasm::infrastructure::SyntheticMarketData;
use stock_chart_wasm::infrastructure::rendering::CanvasRenderer;
use stock_chart_wasm::infrastructure::services::ConsoleLogger;
use stock_chart_wasm::presentation::StockChartApi;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn console_logger_writes_without_panicking() {
    let logger = ConsoleLogger::new(LogLevel::Trace);
    logger.info(LogComponent::Infrastructure("Test"), "hello from the browser");
    logger.error(LogComponent::Infrastructure("Test"), "error line");
}

#[wasm_bindgen_test]
async fn canvas_renderer_draws_loaded_series() {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    canvas.set_id("test-canvas");
    document.body().unwrap().append_child(&canvas).unwrap();

    let config = DashboardConfig::default();
    let service = DashboardService::new(SyntheticMarketData::from_clock(), config.sma_settings());
    let snapshot = service.load(Symbol::from("IBM"), LookbackPeriod::SixMonths).await.unwrap();
    let data = RenderChartUseCase::new(config).prepare_render_data(&snapshot);

    CanvasRenderer::new("test-canvas", 800, 600).render(&data).unwrap();
    assert_eq!(canvas.width(), 800);
}

#[wasm_bindgen_test]
fn renderer_reports_missing_canvas() {
    let data = RenderChartUseCase::new(DashboardConfig::default()).prepare_render_data(
        &stock_chart_wasm::domain::chart::ChartSnapshot::new(
            stock_chart_wasm::domain::market_data::CandleSeries::new(
                Symbol::from("IBM"),
                LookbackPeriod::OneWeek,
                Vec::new(),
            ),
        ),
    );
    assert!(CanvasRenderer::new("no-such-canvas", 10, 10).render(&data).is_err());
}

#[wasm_bindgen_test]
async fn js_api_generates_series() {
    let api = StockChartApi::new("unused-canvas".into());
    let value = JsFuture::from(api.generate_series("TSLA".into(), "1M".into())).await.unwrap();
    let json: serde_json::Value = serde_json::from_str(&value.as_string().unwrap()).unwrap();
    assert_eq!(json["candles"].as_array().unwrap().len(), 30);

    assert_eq!(StockChartApi::lookback_days("bogus"), 365);
    assert_eq!(StockChartApi::period_for_date_range("2024-01-01", "2024-01-20").unwrap(), "1M");
    assert_eq!(api.available_symbols(), vec!["IBM", "AAPL", "MSFT", "GOOGL", "TSLA"]);
}
