use chrono::NaiveDate;
use js_sys::Promise;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::application::{DashboardService, RenderChartUseCase, status_message};
use crate::domain::{
    chart::DashboardConfig,
    errors::{AppError, AppResult},
    logging::{LogComponent, get_logger, get_time_provider},
    market_data::{Candle, LookbackPeriod, Symbol, compute_sma, map_lookback},
};
use crate::infrastructure::{SyntheticMarketData, rendering::CanvasRenderer};
use crate::time_utils::{DateRange, date_from_millis};

/// JavaScript bridge over the dashboard service.
#[wasm_bindgen]
pub struct StockChartApi {
    service: Rc<DashboardService<SyntheticMarketData>>,
    render_use_case: Rc<RenderChartUseCase>,
    renderer: CanvasRenderer,
}

#[wasm_bindgen]
impl StockChartApi {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: String) -> Self {
        let config = DashboardConfig::default();
        let renderer = CanvasRenderer::new(canvas_id, config.width, config.height);
        Self {
            service: Rc::new(DashboardService::new(SyntheticMarketData::from_clock(), config.sma_settings())),
            render_use_case: Rc::new(RenderChartUseCase::new(config)),
            renderer,
        }
    }

    /// Resolves to the render data JSON of the new series. Superseded calls
    /// reject with a status message.
    #[wasm_bindgen(js_name = generateSeries)]
    pub fn generate_series(&self, symbol: String, period: String) -> Promise {
        let service = Rc::clone(&self.service);
        let render = Rc::clone(&self.render_use_case);
        future_to_promise(async move {
            let (lookback, fell_back) = LookbackPeriod::resolve(&period);
            if fell_back {
                get_logger().warn(
                    LogComponent::Presentation("StockChartApi"),
                    &format!("Unknown period '{}', using {}", period, lookback),
                );
            }
            let symbol = Symbol::new(&symbol).map_err(|e| to_js(e.into()))?;
            let snapshot = service
                .load(symbol, lookback)
                .await
                .map_err(to_js)?;
            let json = serde_json::to_string(&render.prepare_render_data(&snapshot))
                .map_err(|e| to_js(e.into()))?;
            Ok(JsValue::from_str(&json))
        })
    }

    /// Enable or disable one SMA period and return the refreshed render data
    /// (`null` before the first load).
    #[wasm_bindgen(js_name = toggleSma)]
    pub fn toggle_sma(&self, period: usize, enabled: bool) -> Result<JsValue, JsValue> {
        match self.service.toggle_sma(period, enabled).map_err(to_js)? {
            Some(snapshot) => {
                let data = self.render_use_case.prepare_render_data(&snapshot);
                serde_json::to_string(&data)
                    .map(|json| JsValue::from_str(&json))
                    .map_err(|e| to_js(e.into()))
            }
            None => Ok(JsValue::NULL),
        }
    }

    /// Draw the current snapshot onto the canvas.
    pub fn render(&self) -> Result<(), JsValue> {
        let Some(snapshot) = self.service.snapshot() else {
            return Ok(());
        };
        self.renderer
            .render(&self.render_use_case.prepare_render_data(&snapshot))
            .map_err(|e| to_js(e.into()))
    }

    #[wasm_bindgen(js_name = computeSma)]
    pub fn compute_sma(candles_json: &str, period: usize) -> Result<String, JsValue> {
        sma_json(candles_json, period).map_err(to_js)
    }

    /// Preset label (`1W`..`3Y`) for a custom `YYYY-MM-DD` range.
    #[wasm_bindgen(js_name = periodForDateRange)]
    pub fn period_for_date_range(from: &str, to: &str) -> Result<String, JsValue> {
        let today = date_from_millis(get_time_provider().current_timestamp());
        period_for_range(from, to, today)
            .map(|p| p.to_string())
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = lookbackDays)]
    pub fn lookback_days(label: &str) -> usize {
        map_lookback(label)
    }

    #[wasm_bindgen(js_name = availableSymbols)]
    pub fn available_symbols(&self) -> Vec<String> {
        self.service
            .source()
            .generator()
            .catalog()
            .available_symbols()
            .into_iter()
            .map(|s| s.to_string())
            .collect()
    }
}

/// SMA of a JSON candle array, serialized back to JSON points.
pub fn sma_json(candles_json: &str, period: usize) -> AppResult<String> {
    let candles: Vec<Candle> = serde_json::from_str(candles_json)?;
    let overlay = compute_sma(&candles, period)?;
    Ok(serde_json::to_string(&overlay.points)?)
}

pub fn period_for_range(from: &str, to: &str, today: NaiveDate) -> AppResult<LookbackPeriod> {
    Ok(DateRange::parse(from, to, today)?.to_lookback())
}

fn to_js(error: AppError) -> JsValue {
    if !error.is_superseded() {
        get_logger().error(LogComponent::Presentation("StockChartApi"), &error.to_string());
    }
    JsValue::from_str(&status_message(&error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{DomainError, PresentationError, ValidationError};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    #[test]
    fn sma_json_round_trip() {
        let candles = r#"[
            {"timestamp": 1, "ohlcv": {"open": 1.0, "high": 1.0, "low": 1.0, "close": 1.0, "volume": 5}},
            {"timestamp": 2, "ohlcv": {"open": 2.0, "high": 2.0, "low": 2.0, "close": 3.0, "volume": 5}}
        ]"#;
        assert_eq!(sma_json(candles, 2).unwrap(), r#"[{"timestamp":2,"value":2.0}]"#);
    }

    #[test]
    fn sma_json_rejects_bad_input() {
        assert!(matches!(
            sma_json("not json", 2),
            Err(AppError::Presentation(PresentationError::Serialization(_)))
        ));
        assert_eq!(
            sma_json("[]", 0),
            Err(AppError::Domain(DomainError::Validation(ValidationError::InvalidPeriod { period: 0 })))
        );
    }

    #[test]
    fn date_range_maps_to_preset() {
        assert_eq!(period_for_range("2024-06-01", "2024-06-05", today()), Ok(LookbackPeriod::OneWeek));
        assert_eq!(period_for_range("2024-01-01", "2024-06-29", today()), Ok(LookbackPeriod::SixMonths));
        assert_eq!(period_for_range("2021-01-01", "2024-06-29", today()), Ok(LookbackPeriod::ThreeYears));
        assert!(period_for_range("2019-12-31", "2024-01-01", today()).is_err());
        assert!(period_for_range("2024-05-01", "2024-04-01", today()).is_err());
    }
}
