use super::{CandleSeries, LookbackPeriod, Symbol};
use crate::domain::errors::AppError;
use std::future::Future;

/// Interface for obtaining a bar series.
///
/// The synthetic source never fails, but the contract is asynchronous and
/// fallible so a real feed can slot in behind it.
pub trait SeriesSource {
    fn load_series(
        &self,
        symbol: &Symbol,
        lookback: LookbackPeriod,
    ) -> impl Future<Output = Result<CandleSeries, AppError>>;
}
