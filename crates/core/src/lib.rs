pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod indicator;
pub mod observation;
pub mod scoring;

pub use catalog::Catalog;
pub use config::Config;
pub use dashboard::*;
pub use error::*;
pub use indicator::*;
pub use observation::Observation;
pub use scoring::*;
