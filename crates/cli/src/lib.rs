//! lccqa command-line driver: configuration, attribute-table loading and the
//! per-region pipeline behind the `lccqa` binary.

pub mod config;
pub mod pipeline;
pub mod source;

pub use config::Config;
pub use pipeline::{run_region, write_report, Engine, RegionReport};
