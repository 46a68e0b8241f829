use crate::{
    application::request_tracker::RequestTracker,
    domain::{
        chart::{ChartSnapshot, SmaSettings},
        errors::{AppError, AppResult, ApplicationError},
        logging::{LogComponent, LogLevel, get_logger},
        market_data::{
            IndicatorCalculator, LookbackPeriod, Symbol, repositories::SeriesSource,
        },
    },
};
use futures::future::{AbortHandle, Abortable};
use std::cell::RefCell;

/// Application service behind the dashboard.
///
/// Owns the series source, the SMA settings and the snapshot currently on
/// screen. Methods take `&self` so overlapping loads can be driven from
/// independent tasks on the same thread; the request tracker decides which of
/// them gets to publish.
pub struct DashboardService<S: SeriesSource> {
    source: S,
    tracker: RequestTracker,
    calculator: IndicatorCalculator,
    settings: RefCell<SmaSettings>,
    snapshot: RefCell<Option<ChartSnapshot>>,
    in_flight: RefCell<Option<AbortHandle>>,
}

impl<S: SeriesSource> DashboardService<S> {
    pub fn new(source: S, settings: SmaSettings) -> Self {
        Self {
            source,
            tracker: RequestTracker::new(),
            calculator: IndicatorCalculator::new(),
            settings: RefCell::new(settings),
            snapshot: RefCell::new(None),
            in_flight: RefCell::new(None),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn tracker(&self) -> &RequestTracker {
        &self.tracker
    }

    pub fn settings(&self) -> SmaSettings {
        self.settings.borrow().clone()
    }

    pub fn snapshot(&self) -> Option<ChartSnapshot> {
        self.snapshot.borrow().clone()
    }

    /// Generate a fresh series and publish it with overlays for the enabled periods.
    ///
    /// Starting a load aborts the previous one. A load that was aborted, or
    /// that finishes after a newer one started, resolves to an error for which
    /// [`AppError::is_superseded`] holds and leaves the snapshot untouched.
    pub async fn load(&self, symbol: Symbol, lookback: LookbackPeriod) -> AppResult<ChartSnapshot> {
        let ticket = self.tracker.begin();
        let (handle, registration) = AbortHandle::new_pair();
        if let Some(previous) = self.in_flight.borrow_mut().replace(handle) {
            previous.abort();
        }

        get_logger().info(
            LogComponent::Application("DashboardService"),
            &format!("📡 Request #{} for {} ({})", ticket.id(), symbol, lookback),
        );

        let series = match Abortable::new(self.source.load_series(&symbol, lookback), registration).await {
            Ok(result) => result?,
            Err(_aborted) => {
                get_logger().debug(
                    LogComponent::Application("DashboardService"),
                    &format!("Request #{} aborted", ticket.id()),
                );
                return Err(ApplicationError::Cancelled.into());
            }
        };

        if let Err(stale) = self.tracker.check(ticket) {
            get_logger().log_with_metadata(
                LogLevel::Debug,
                LogComponent::Application("DashboardService"),
                "Discarding stale result",
                &stale.to_string(),
            );
            return Err(stale.into());
        }
        self.in_flight.borrow_mut().take();

        let mut snapshot = ChartSnapshot::new(series);
        self.apply_overlays(&mut snapshot)?;
        *self.snapshot.borrow_mut() = Some(snapshot.clone());

        get_logger().info(
            LogComponent::Application("DashboardService"),
            &format!(
                "✅ Request #{} published {} bars, {} overlays",
                ticket.id(),
                snapshot.candle_count(),
                snapshot.overlays.len()
            ),
        );
        Ok(snapshot)
    }

    /// Enable or disable one SMA period. Only the overlays are recomputed;
    /// the bars on screen stay exactly as they were.
    pub fn toggle_sma(&self, period: usize, enabled: bool) -> AppResult<Option<ChartSnapshot>> {
        if !self.settings.borrow_mut().toggle(period, enabled) {
            get_logger().warn(
                LogComponent::Application("DashboardService"),
                &format!("No SMA configured for period {}", period),
            );
        }

        let mut current = self.snapshot.borrow_mut();
        match current.as_mut() {
            Some(snapshot) => {
                self.apply_overlays(snapshot)?;
                Ok(Some(snapshot.clone()))
            }
            None => Ok(None),
        }
    }

    fn apply_overlays(&self, snapshot: &mut ChartSnapshot) -> AppResult<()> {
        let settings = self.settings.borrow();
        let overlays = self
            .calculator
            .compute_overlays(&snapshot.series, &settings.enabled_periods())?;
        snapshot.set_overlays(overlays, &settings);
        Ok(())
    }
}

/// Text for the status line under the chart.
pub fn status_message(error: &AppError) -> String {
    match error {
        AppError::Application(ApplicationError::StaleRequest { .. } | ApplicationError::Cancelled) => {
            "Loading newer data…".to_string()
        }
        AppError::Application(ApplicationError::DataLoadingFailed(reason)) => {
            format!("Could not load chart data: {}", reason)
        }
        other => format!("Error: {}", other),
    }
}
