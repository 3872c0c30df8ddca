//! Core types for propstore

use std::path::{Path, PathBuf};

use crate::storage::{PropertiesStorage, StorageBackend};

/// Configuration for a [`PropertyStore`](crate::PropertyStore)
///
/// Every field is a per-instance parameter that stays fixed for the life of
/// the store.
#[derive(Debug, Clone)]
pub struct PropsConfig<S: StorageBackend = PropertiesStorage> {
    /// File the store loads from and persists to
    pub path: PathBuf,

    /// Appended to every logical key to form the physical key
    pub suffix: String,

    /// Returned by `get_string` when a key is absent
    pub default_string: String,

    /// Returned by `get_int` when a key is absent
    pub default_int: i32,

    /// Comment written at the top of the file on store (`None` writes no comment)
    pub header: Option<String>,

    /// Storage backend implementation
    pub storage: S,
}

impl PropsConfig<PropertiesStorage> {
    /// Create a configuration for the given file with default values
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            suffix: String::new(),
            default_string: String::new(),
            default_int: -1,
            header: Some(String::new()),
            storage: PropertiesStorage::new(),
        }
    }

    /// Create a new builder for PropsConfig
    ///
    /// # Example
    /// ```rust
    /// use propstore::PropsConfig;
    ///
    /// let config = PropsConfig::builder("my-app")
    ///     .config_dir("~/.config/my-app")
    ///     .file_name("ui.properties")
    ///     .suffix(".fr")
    ///     .build();
    /// assert!(config.path.ends_with("ui.properties"));
    /// ```
    pub fn builder(app_name: impl Into<String>) -> PropsConfigBuilder {
        PropsConfigBuilder::new(app_name)
    }
}

impl<S: StorageBackend> PropsConfig<S> {
    /// Swap the storage backend, keeping every other field
    pub fn with_storage<T: StorageBackend>(self, storage: T) -> PropsConfig<T> {
        PropsConfig {
            path: self.path,
            suffix: self.suffix,
            default_string: self.default_string,
            default_int: self.default_int,
            header: self.header,
            storage,
        }
    }

    /// Directory holding the properties file
    pub fn dir(&self) -> Option<&Path> {
        self.path.parent()
    }
}

/// Builder for creating PropsConfig with a fluent API
#[derive(Debug, Clone)]
pub struct PropsConfigBuilder {
    app_name: String,
    config_dir: Option<PathBuf>,
    file_name: Option<String>,
    path: Option<PathBuf>,
    suffix: String,
    default_string: String,
    default_int: i32,
    header: Option<String>,
    timestamp: bool,
}

fn expand_home(path: PathBuf) -> PathBuf {
    if !path.starts_with("~") {
        return path;
    }
    match dirs::home_dir() {
        Some(home) => home.join(path.strip_prefix("~").unwrap_or(&path)),
        None => path,
    }
}

impl PropsConfigBuilder {
    /// Create a new builder; `app_name` names the default config directory and file
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            config_dir: None,
            file_name: None,
            path: None,
            suffix: String::new(),
            default_string: String::new(),
            default_int: -1,
            header: Some(String::new()),
            timestamp: true,
        }
    }

    /// Set the configuration directory
    ///
    /// Supports `~` expansion for home directory.
    pub fn config_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_dir = Some(expand_home(path.into()));
        self
    }

    /// Set the file name inside the config directory (default: "{app_name}.properties")
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    /// Set the full file path, ignoring `config_dir` and `file_name`
    ///
    /// Supports `~` expansion for home directory.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(expand_home(path.into()));
        self
    }

    /// Set the key suffix (e.g. ".fr" stores "lang" as "lang.fr")
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Set the value returned for absent string properties (default: "")
    pub fn default_string(mut self, value: impl Into<String>) -> Self {
        self.default_string = value.into();
        self
    }

    /// Set the value returned for absent integer properties (default: -1)
    pub fn default_int(mut self, value: i32) -> Self {
        self.default_int = value;
        self
    }

    /// Set the header comment written on store
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Write no header comment on store
    pub fn no_header(mut self) -> Self {
        self.header = None;
        self
    }

    /// Do not stamp written files with the current time
    pub fn without_timestamp(mut self) -> Self {
        self.timestamp = false;
        self
    }

    /// Build the PropsConfig
    ///
    /// Without an explicit path or `config_dir`, the file lives in the system
    /// config directory for the app.
    pub fn build(self) -> PropsConfig<PropertiesStorage> {
        let path = self.path.unwrap_or_else(|| {
            let dir = self.config_dir.unwrap_or_else(|| {
                dirs::config_dir()
                    .map(|d| d.join(&self.app_name))
                    .unwrap_or_else(|| PathBuf::from("."))
            });
            let file = self
                .file_name
                .unwrap_or_else(|| format!("{}.properties", self.app_name));
            dir.join(file)
        });

        let storage = if self.timestamp {
            PropertiesStorage::new()
        } else {
            PropertiesStorage::without_timestamp()
        };

        PropsConfig {
            path,
            suffix: self.suffix,
            default_string: self.default_string,
            default_int: self.default_int,
            header: self.header,
            storage,
        }
    }
}
