use derive_more::{Display, From};

/// Root error type for the entire application
#[derive(Debug, Clone, PartialEq, Display, From)]
pub enum AppError {
    #[display(fmt = "Domain Error: {}", _0)]
    Domain(DomainError),
    #[display(fmt = "Application Error: {}", _0)]
    Application(ApplicationError),
    #[display(fmt = "Presentation Error: {}", _0)]
    Presentation(PresentationError),
}

/// Domain layer specific errors
#[derive(Debug, Clone, PartialEq, Display, From)]
pub enum DomainError {
    #[display(fmt = "Validation: {}", _0)]
    Validation(ValidationError),
}

/// Validation errors from domain services
#[derive(Debug, Clone, PartialEq, Display)]
pub enum ValidationError {
    #[display(fmt = "Invalid period {}: period must be greater than zero", period)]
    InvalidPeriod { period: usize },
    #[display(fmt = "Invalid candle: {}", _0)]
    InvalidCandle(String),
    #[display(fmt = "Invalid sequence: {}", _0)]
    InvalidSequence(String),
    #[display(fmt = "Invalid symbol: {}", _0)]
    InvalidSymbol(String),
    #[display(fmt = "Invalid date range: {}", _0)]
    InvalidDateRange(String),
}

/// Application layer errors
#[derive(Debug, Clone, PartialEq, Display)]
pub enum ApplicationError {
    /// A newer load superseded this one before it completed.
    #[display(fmt = "Stale request #{} discarded (current is #{})", requested, current)]
    StaleRequest { requested: u64, current: u64 },
    #[display(fmt = "Request cancelled")]
    Cancelled,
    #[display(fmt = "Data loading failed: {}", _0)]
    DataLoadingFailed(String),
}

/// Presentation layer errors
#[derive(Debug, Clone, PartialEq, Display)]
pub enum PresentationError {
    #[display(fmt = "Serialization failed: {}", _0)]
    Serialization(String),
    #[display(fmt = "Canvas unavailable: {}", _0)]
    CanvasUnavailable(String),
}

impl std::error::Error for AppError {}
impl std::error::Error for DomainError {}
impl std::error::Error for ValidationError {}
impl std::error::Error for ApplicationError {}
impl std::error::Error for PresentationError {}

impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> Self {
        AppError::Domain(DomainError::Validation(error))
    }
}

impl From<serde_json::Error> for PresentationError {
    fn from(error: serde_json::Error) -> Self {
        PresentationError::Serialization(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError::Presentation(error.into())
    }
}

impl AppError {
    /// Superseded or aborted loads are expected during rapid input and are not failures.
    pub fn is_superseded(&self) -> bool {
        matches!(
            self,
            AppError::Application(ApplicationError::StaleRequest { .. } | ApplicationError::Cancelled)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_lifts_into_app_error() {
        let err: AppError = ValidationError::InvalidPeriod { period: 0 }.into();
        assert_eq!(
            err.to_string(),
            "Domain Error: Validation: Invalid period 0: period must be greater than zero"
        );
    }

    #[test]
    fn superseded_requests_are_not_failures() {
        let stale: AppError = ApplicationError::StaleRequest { requested: 1, current: 2 }.into();
        assert!(stale.is_superseded());
        let failed: AppError = ApplicationError::DataLoadingFailed("boom".into()).into();
        assert!(!failed.is_superseded());
    }

    #[test]
    fn question_mark_flows_through_layers() {
        fn inner() -> Result<(), ValidationError> {
            Err(ValidationError::InvalidSymbol(String::new()))
        }
        fn outer() -> AppResult<()> {
            inner()?;
            Ok(())
        }
        assert!(matches!(
            outer(),
            Err(AppError::Domain(DomainError::Validation(ValidationError::InvalidSymbol(_))))
        ));
    }
}
