pub mod market_data;
pub mod random;
pub mod rendering;
pub mod services;

pub use market_data::SyntheticMarketData;
pub use random::StdRngSource;
