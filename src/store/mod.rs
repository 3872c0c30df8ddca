//! Property store module
//!
//! This module contains the [`PropertyStore`] struct which is the primary entry point
//! for reading, writing and persisting properties.

mod builder;
mod core;
mod io;

pub use builder::PropertyStoreBuilder;
pub use self::core::PropertyStore;
