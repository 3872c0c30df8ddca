//! Store configuration
//!
//! - `PropsConfig` - per-instance parameters (file path, key suffix, defaults)
//! - `PropsConfigBuilder` - fluent construction with config directory resolution

mod types;

pub use types::{PropsConfig, PropsConfigBuilder};
