use quickcheck_macros::quickcheck;
use stock_chart_wasm::domain::errors::ValidationError;
use stock_chart_wasm::domain::market_data::{
    Candle, CandleSeries, DAY_MS, IndicatorCalculator, LookbackPeriod, OHLCV, Price, SeriesGenerator,
    Symbol, Timestamp, Volume, compute_sma,
};
use stock_chart_wasm::infrastructure::StdRngSource;

fn flat_candle(i: usize, close: f64) -> Candle {
    Candle::new(
        Timestamp::from_millis(i as u64 * DAY_MS),
        OHLCV::new(
            Price::from(close),
            Price::from(close),
            Price::from(close),
            Price::from(close),
            Volume::from(1),
        ),
    )
}

fn series_from(closes: &[u16]) -> Vec<Candle> {
    closes.iter().enumerate().map(|(i, &c)| flat_candle(i, c as f64 / 10.0 + 1.0)).collect()
}

#[quickcheck]
fn overlay_length_law(closes: Vec<u16>, period: u8) -> bool {
    let period = period as usize % 40 + 1;
    let candles = series_from(&closes);
    let overlay = compute_sma(&candles, period).unwrap();
    overlay.len() == (candles.len() + 1).saturating_sub(period)
}

#[quickcheck]
fn overlay_matches_naive_mean(closes: Vec<u16>, period: u8) -> bool {
    let period = period as usize % 10 + 1;
    let candles = series_from(&closes);
    let overlay = compute_sma(&candles, period).unwrap();
    overlay.points.iter().enumerate().all(|(k, point)| {
        let window = &candles[k..k + period];
        let mean = window.iter().map(Candle::close).sum::<f64>() / period as f64;
        (point.value - mean).abs() < 1e-6 && point.timestamp == candles[k + period - 1].timestamp
    })
}

#[test]
fn computing_twice_gives_identical_overlays() {
    let series = SeriesGenerator::default().generate_at(
        &Symbol::from("IBM"),
        LookbackPeriod::OneYear,
        1_700_000_000_000,
        &mut StdRngSource::seeded(5),
    );
    let calc = IndicatorCalculator::new();
    let before = series.clone();
    assert_eq!(calc.compute_sma(&series, 50).unwrap(), calc.compute_sma(&series, 50).unwrap());
    assert_eq!(series, before);
}

#[test]
fn period_equal_to_length_yields_mean_of_all_closes() {
    let candles: Vec<Candle> = [10.0, 20.0, 30.0, 40.0].iter().enumerate().map(|(i, &c)| flat_candle(i, c)).collect();
    let overlay = compute_sma(&candles, 4).unwrap();
    assert_eq!(overlay.len(), 1);
    assert_eq!(overlay.points[0].value, 25.0);
    assert_eq!(overlay.points[0].timestamp, candles[3].timestamp);
}

#[test]
fn period_longer_than_series_is_empty() {
    let candles: Vec<Candle> = (0..4).map(|i| flat_candle(i, 1.0)).collect();
    assert!(compute_sma(&candles, 5).unwrap().is_empty());

    let week = CandleSeries::new(Symbol::from("AAPL"), LookbackPeriod::OneWeek, candles);
    let overlays = IndicatorCalculator::new().compute_overlays(&week, &[20, 50, 150, 200]).unwrap();
    assert!(overlays.iter().all(|o| o.is_empty()));
}

#[test]
fn zero_period_is_an_error() {
    let candles: Vec<Candle> = (0..4).map(|i| flat_candle(i, 1.0)).collect();
    assert_eq!(compute_sma(&candles, 0), Err(ValidationError::InvalidPeriod { period: 0 }));
}
