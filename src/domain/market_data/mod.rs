//! Market data aggregate: bars, series, the synthetic generator and SMA overlays.

pub mod entities;
pub mod generator;
pub mod indicator_engine;
pub mod random;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use generator::{GeneratorConfig, SeriesGenerator, SymbolCatalog};
pub use indicator_engine::*;
pub use value_objects::*;
