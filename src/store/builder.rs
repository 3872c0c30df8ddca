//! Builder for PropertyStore
//!
//! This module contains [`PropertyStoreBuilder`] which provides a fluent API
//! for creating a [`PropertyStore`](super::PropertyStore).

use crate::config::PropsConfigBuilder;
use crate::error::Result;
use crate::storage::PropertiesStorage;
use std::path::PathBuf;

use super::PropertyStore;

/// Builder for creating a [`PropertyStore`] with a fluent API.
///
/// # Example
///
/// ```rust,no_run
/// use propstore::PropertyStore;
///
/// let store = PropertyStore::builder("my-app")
///     .config_dir("~/.config/my-app")
///     .file_name("ui.properties")
///     .suffix(".fr")
///     .open()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct PropertyStoreBuilder {
    config_builder: PropsConfigBuilder,
}

impl PropertyStoreBuilder {
    /// Create a new builder; `app_name` names the default config directory and file
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            config_builder: PropsConfigBuilder::new(app_name),
        }
    }

    /// Set the configuration directory.
    ///
    /// Supports `~` expansion for home directory.
    pub fn config_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_builder = self.config_builder.config_dir(path);
        self
    }

    /// Set the file name (default: "{app_name}.properties").
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.file_name(name);
        self
    }

    /// Set the full file path.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_builder = self.config_builder.path(path);
        self
    }

    /// Set the key suffix.
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.suffix(suffix);
        self
    }

    /// Set the value returned for absent string properties.
    pub fn default_string(mut self, value: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.default_string(value);
        self
    }

    /// Set the value returned for absent integer properties.
    pub fn default_int(mut self, value: i32) -> Self {
        self.config_builder = self.config_builder.default_int(value);
        self
    }

    /// Set the header comment written on store.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.header(header);
        self
    }

    /// Write no header comment on store.
    pub fn no_header(mut self) -> Self {
        self.config_builder = self.config_builder.no_header();
        self
    }

    /// Do not stamp written files with the current time.
    pub fn without_timestamp(mut self) -> Self {
        self.config_builder = self.config_builder.without_timestamp();
        self
    }

    /// Build an empty [`PropertyStore`] without reading the file.
    pub fn build(self) -> PropertyStore<PropertiesStorage> {
        PropertyStore::new(self.config_builder.build())
    }

    /// Build the [`PropertyStore`] and load its file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(self) -> Result<PropertyStore<PropertiesStorage>> {
        PropertyStore::open(self.config_builder.build())
    }
}

impl PropertyStore<PropertiesStorage> {
    /// Create a new builder for a `.properties` backed store
    pub fn builder(app_name: impl Into<String>) -> PropertyStoreBuilder {
        PropertyStoreBuilder::new(app_name)
    }
}
