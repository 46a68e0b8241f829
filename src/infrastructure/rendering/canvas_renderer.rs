use super::geometry::{CandleGeometry, ChartGeometry};
use crate::application::use_cases::ChartRenderData;
use crate::domain::{
    chart::Color,
    errors::PresentationError,
    logging::{LogComponent, get_logger},
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const BACKGROUND: &str = "#111827";
const FONT: &str = "11px sans-serif";

/// Canvas 2D renderer for charts - Infrastructure implementation
pub struct CanvasRenderer {
    canvas_id: String,
    width: u32,
    height: u32,
    parallel_threshold: usize,
}

impl CanvasRenderer {
    pub fn new(canvas_id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            canvas_id: canvas_id.into(),
            width,
            height,
            parallel_threshold: 250,
        }
    }

    /// Get canvas element and context
    fn get_canvas_context(&self) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), PresentationError> {
        let unavailable = |what: &str| PresentationError::CanvasUnavailable(format!("{} ({})", what, self.canvas_id));
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| unavailable("no document"))?;
        let canvas = document
            .get_element_by_id(&self.canvas_id)
            .ok_or_else(|| unavailable("canvas element not found"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| unavailable("element is not a canvas"))?;

        canvas.set_width(self.width);
        canvas.set_height(self.height);

        let context = canvas
            .get_context("2d")
            .map_err(|_| unavailable("failed to get 2D context"))?
            .ok_or_else(|| unavailable("2D context missing"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| unavailable("failed to cast to 2D context"))?;

        Ok((canvas, context))
    }

    /// Draw candles, volume, SMA lines and both axes.
    pub fn render(&self, data: &ChartRenderData) -> Result<(), PresentationError> {
        let (_canvas, context) = self.get_canvas_context()?;
        let geometry = ChartGeometry::compute(
            &ChartRenderData { width: self.width, height: self.height, ..data.clone() },
            self.parallel_threshold,
        );

        context.clear_rect(0.0, 0.0, self.width as f64, self.height as f64);
        context.set_fill_style(&JsValue::from_str(BACKGROUND));
        context.fill_rect(0.0, 0.0, self.width as f64, self.height as f64);

        if geometry.candles.is_empty() {
            self.render_no_data_message(&context).map_err(js_error)?;
            return Ok(());
        }

        self.render_grid(&context, &geometry);
        for volume in &geometry.volumes {
            context.set_fill_style(&JsValue::from_str(&volume.color.to_css()));
            context.fill_rect(volume.x - volume.width / 2.0, volume.top, volume.width, volume.height);
        }
        for candle in &geometry.candles {
            self.render_single_candle(&context, candle);
        }
        for line in &geometry.lines {
            if line.points.len() < 2 {
                continue;
            }
            context.set_stroke_style(&JsValue::from_str(&line.color));
            context.set_line_width(1.5);
            context.begin_path();
            for (i, &(x, y)) in line.points.iter().enumerate() {
                if i == 0 {
                    context.move_to(x, y);
                } else {
                    context.line_to(x, y);
                }
            }
            context.stroke();
        }
        self.render_axes(&context, &geometry).map_err(js_error)?;

        get_logger().debug(
            LogComponent::Infrastructure("CanvasRenderer"),
            &format!(
                "Rendered {} {}: {} candles, {} SMA lines",
                data.symbol,
                data.period,
                geometry.candles.len(),
                geometry.lines.len()
            ),
        );
        Ok(())
    }

    fn render_single_candle(&self, context: &CanvasRenderingContext2d, candle: &CandleGeometry) {
        let color = JsValue::from_str(&candle.color.to_css());
        context.set_stroke_style(&color);
        context.set_fill_style(&color);
        context.set_line_width(1.0);

        context.begin_path();
        context.move_to(candle.x, candle.high_y);
        context.line_to(candle.x, candle.low_y);
        context.stroke();

        let left = candle.x - candle.body_width / 2.0;
        if candle.body_height < 1.0 {
            // Doji
            context.begin_path();
            context.move_to(left, candle.body_top);
            context.line_to(left + candle.body_width, candle.body_top);
            context.stroke();
        } else {
            context.fill_rect(left, candle.body_top, candle.body_width, candle.body_height);
        }
    }

    fn render_grid(&self, context: &CanvasRenderingContext2d, geometry: &ChartGeometry) {
        context.set_stroke_style(&JsValue::from_str(&Color::GRID.to_css()));
        context.set_line_width(1.0);
        for label in &geometry.price_labels {
            context.begin_path();
            context.move_to(geometry.layout.padding, label.position);
            context.line_to(geometry.layout.right_edge(), label.position);
            context.stroke();
        }
    }

    fn render_axes(&self, context: &CanvasRenderingContext2d, geometry: &ChartGeometry) -> Result<(), JsValue> {
        let layout = &geometry.layout;
        context.set_font(FONT);
        context.set_fill_style(&JsValue::from_str(&Color::AXIS_LABEL.to_css()));

        for label in &geometry.price_labels {
            context.fill_text(&label.text, layout.right_edge() + 8.0, label.position + 4.0)?;
        }
        let time_y = layout.volume_top + layout.volume_height + 16.0;
        for label in &geometry.time_labels {
            context.fill_text(&label.text, label.position - 18.0, time_y)?;
        }

        if let Some(last) = &geometry.last_price {
            let accent = JsValue::from_str(&Color::BULLISH.to_css());
            context.set_stroke_style(&accent);
            context.set_line_dash(&js_sys::Array::of2(&4.0.into(), &4.0.into()))?;
            context.begin_path();
            context.move_to(layout.padding, last.position);
            context.line_to(layout.right_edge(), last.position);
            context.stroke();
            context.set_line_dash(&js_sys::Array::new())?;
            context.set_fill_style(&accent);
            context.fill_text(&last.text, layout.right_edge() + 8.0, last.position + 4.0)?;
        }
        Ok(())
    }

    fn render_no_data_message(&self, context: &CanvasRenderingContext2d) -> Result<(), JsValue> {
        context.set_fill_style(&JsValue::from_str("#ffffff"));
        context.set_font("16px sans-serif");
        context.fill_text("No chart data available", 50.0, self.height as f64 / 2.0)?;

        get_logger().warn(LogComponent::Infrastructure("CanvasRenderer"), "No candle data to render");
        Ok(())
    }
}

fn js_error(value: JsValue) -> PresentationError {
    PresentationError::CanvasUnavailable(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}
