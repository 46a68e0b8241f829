pub mod chart_service;
pub mod request_tracker;
pub mod use_cases;

pub use chart_service::*;
pub use request_tracker::*;
pub use use_cases::*;
