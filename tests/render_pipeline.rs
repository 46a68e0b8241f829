use stock_chart_wasm::application::{DashboardService, RenderChartUseCase};
use stock_chart_wasm::domain::chart::{Color, DashboardConfig};
use stock_chart_wasm::domain::market_data::{GeneratorConfig, LookbackPeriod, Symbol, SymbolCatalog};
use stock_chart_wasm::infrastructure::SyntheticMarketData;
use stock_chart_wasm::infrastructure::rendering::ChartGeometry;

#[test]
fn loaded_snapshot_flows_into_geometry() {
    let config = DashboardConfig::default();
    let service = DashboardService::new(
        SyntheticMarketData::new(GeneratorConfig::default(), SymbolCatalog::default(), 21),
        config.sma_settings(),
    );
    futures::executor::block_on(service.load(Symbol::from("MSFT"), LookbackPeriod::OneYear)).unwrap();
    let snapshot = service.toggle_sma(50, true).unwrap().unwrap();

    let data = RenderChartUseCase::new(config).prepare_render_data(&snapshot);
    assert_eq!(data.candles.len(), 365);
    assert_eq!(data.sma_lines.len(), 1);
    assert_eq!(data.sma_lines[0].points.len(), 316);

    let geometry = ChartGeometry::compute(&data, 100);
    assert_eq!(geometry.candles.len(), 365);
    assert_eq!(geometry.volumes.len(), 365);
    assert_eq!(geometry.lines[0].points.len(), 316);
    assert!(geometry.candles.iter().all(|c| c.color == Color::BULLISH || c.color == Color::BEARISH));
    assert!(geometry.candles.windows(2).all(|w| w[0].x < w[1].x));
    assert!(!geometry.time_labels.is_empty());
    assert_eq!(geometry.price_labels.len(), 5);
}

#[test]
fn json_payload_uses_tuple_layout() {
    let config = DashboardConfig::default();
    let service = DashboardService::new(
        SyntheticMarketData::new(GeneratorConfig::default(), SymbolCatalog::default(), 4),
        config.sma_settings(),
    );
    let snapshot =
        futures::executor::block_on(service.load(Symbol::from("AAPL"), LookbackPeriod::OneWeek)).unwrap();
    let data = RenderChartUseCase::new(config).prepare_render_data(&snapshot);

    let json: serde_json::Value = serde_json::to_value(&data).unwrap();
    assert_eq!(json["symbol"], "AAPL");
    assert_eq!(json["period"], "1W");
    assert_eq!(json["candles"].as_array().unwrap().len(), 7);
    assert_eq!(json["candles"][0].as_array().unwrap().len(), 5);
    assert_eq!(json["candles"][0][1], 185.0);
    assert!(json["summary"]["change"].is_number());
}
