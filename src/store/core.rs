use crate::config::PropsConfig;
use crate::error::{Error, Result};
use crate::events::{EventManager, ListenerId, PropertyChange};
use crate::properties::PropertyMap;
use crate::storage::{PropertiesStorage, StorageBackend};
use crate::sync::RwLockExt;

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::RwLock;

/// File-backed key/value store with typed accessors and change listeners.
///
/// Every logical key passed to the store is suffixed with the configured
/// [`suffix`](PropsConfig::suffix) before lookup or storage, so several stores
/// with different suffixes can share one file.
///
/// # Example
///
/// ```rust,no_run
/// use propstore::{PropertyStore, PropsConfig};
///
/// let store = PropertyStore::open(PropsConfig::new("/tmp/app.properties"))?;
/// store.set_property("theme", Some("dark"));
/// assert_eq!(store.get_string("theme"), "dark");
/// store.store()?;
/// # Ok::<(), propstore::Error>(())
/// ```
pub struct PropertyStore<S: StorageBackend = PropertiesStorage> {
    /// Configuration
    pub(crate) config: PropsConfig<S>,

    /// Physical key -> value
    pub(crate) entries: RwLock<PropertyMap>,

    /// Change listeners
    pub(crate) events: EventManager,
}

impl<S: StorageBackend> PropertyStore<S> {
    /// Create an empty store without touching the file
    pub fn new(config: PropsConfig<S>) -> Self {
        Self {
            config,
            entries: RwLock::new(PropertyMap::new()),
            events: EventManager::new(),
        }
    }

    /// Create a store and load its file
    ///
    /// A missing file yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(config: PropsConfig<S>) -> Result<Self> {
        let store = Self::new(config);
        store.load()?;
        Ok(store)
    }

    /// Get the store configuration
    pub fn config(&self) -> &PropsConfig<S> {
        &self.config
    }

    /// Get the file the store persists to
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Get the key suffix
    pub fn suffix(&self) -> &str {
        &self.config.suffix
    }

    /// Physical key for a logical key (`name` + suffix)
    ///
    /// Key listeners match on physical keys, so use this when registering one
    /// for a suffixed store.
    pub fn physical_key(&self, name: &str) -> String {
        format!("{name}{}", self.config.suffix)
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Check whether a property is set
    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .read_recovered()
            .contains_key(&self.physical_key(name))
    }

    /// Get a property value, `None` if unset
    pub fn get_property(&self, name: &str) -> Option<String> {
        self.entries
            .read_recovered()
            .get(&self.physical_key(name))
            .cloned()
    }

    /// Get a property value, or the configured default string if unset
    pub fn get_string(&self, name: &str) -> String {
        self.get_property(name)
            .unwrap_or_else(|| self.config.default_string.clone())
    }

    /// Get a boolean property, `false` if unset
    ///
    /// Only "true" (any ASCII case) is true; every other value is false.
    pub fn get_bool(&self, name: &str) -> bool {
        self.get_bool_or(name, false)
    }

    /// Get a boolean property, or `default` if unset
    pub fn get_bool_or(&self, name: &str, default: bool) -> bool {
        match self.get_property(name) {
            Some(value) => value.eq_ignore_ascii_case("true"),
            None => default,
        }
    }

    /// Get an integer property, or the configured default integer if unset
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInt`] if the stored value is not a base-10 integer.
    pub fn get_int(&self, name: &str) -> Result<i32> {
        self.get_int_or(name, self.config.default_int)
    }

    /// Get an integer property, or `default` if unset
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInt`] if the stored value is not a base-10 integer.
    pub fn get_int_or(&self, name: &str, default: i32) -> Result<i32> {
        let Some(value) = self.get_property(name) else {
            return Ok(default);
        };
        value.parse::<i32>().map_err(|source| Error::InvalidInt {
            key: self.physical_key(name),
            value,
            source,
        })
    }

    /// Logical keys set in this store's namespace, sorted
    ///
    /// With a suffix, only physical keys ending in it are listed, with the
    /// suffix stripped.
    pub fn keys(&self) -> Vec<String> {
        let suffix = self.config.suffix.as_str();
        let mut keys: Vec<String> = self
            .entries
            .read_recovered()
            .keys()
            .filter_map(|key| key.strip_suffix(suffix).map(str::to_string))
            .collect();
        keys.sort();
        keys
    }

    /// Copy of every physical entry, sorted by key
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries
            .read_recovered()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Number of physical entries (all namespaces)
    pub fn len(&self) -> usize {
        self.entries.read_recovered().len()
    }

    /// True when the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.read_recovered().is_empty()
    }

    // -------------------------------------------------------------------------
    // Writes
    // -------------------------------------------------------------------------

    /// Set or remove a property
    ///
    /// `None` removes the key. Listeners are notified in both cases, with the
    /// physical key and no old value. Nothing is written to disk.
    pub fn set_property(&self, key: &str, value: Option<&str>) {
        let full_key = self.physical_key(key);
        {
            let mut entries = self.entries.write_recovered();
            match value {
                Some(value) => {
                    entries.insert(full_key.clone(), value.to_string());
                }
                None => {
                    entries.remove(&full_key);
                }
            }
        }
        self.events
            .notify(&PropertyChange::key(full_key, value.map(str::to_string)));
    }

    /// Set a string property
    pub fn set_string(&self, key: &str, value: &str) {
        self.set_property(key, Some(value));
    }

    /// Set a boolean property ("true" / "false")
    pub fn set_bool(&self, key: &str, value: bool) {
        self.set_property(key, Some(if value { "true" } else { "false" }));
    }

    /// Set an integer property
    pub fn set_int(&self, key: &str, value: i32) {
        self.set_property(key, Some(&value.to_string()));
    }

    /// Remove a property
    pub fn remove(&self, key: &str) {
        self.set_property(key, None);
    }

    /// Remove every entry (all namespaces) and notify a reload
    pub fn clear(&self) {
        self.entries.write_recovered().clear();
        self.events.notify(&PropertyChange::reload());
    }

    // -------------------------------------------------------------------------
    // Listeners
    // -------------------------------------------------------------------------

    /// Register a listener called for every change, including reloads
    pub fn add_listener<F>(&self, callback: F) -> ListenerId
    where
        F: Fn(&PropertyChange) + Send + Sync + 'static,
    {
        self.events.on_change(callback)
    }

    /// Register a listener for one exact physical key
    ///
    /// The name is matched literally, see [`physical_key`](Self::physical_key).
    pub fn add_key_listener<F>(&self, name: &str, callback: F) -> ListenerId
    where
        F: Fn(&PropertyChange) + Send + Sync + 'static,
    {
        self.events.watch(name, callback)
    }

    /// Unregister a global listener; unknown ids are ignored
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.events.remove(id)
    }

    /// Unregister a key listener; unknown ids are ignored
    pub fn remove_key_listener(&self, name: &str, id: ListenerId) -> bool {
        self.events.unwatch(name, id)
    }

    /// Get the event manager
    pub fn events(&self) -> &EventManager {
        &self.events
    }
}

impl<S: StorageBackend> std::fmt::Debug for PropertyStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyStore")
            .field("path", &self.config.path)
            .field("suffix", &self.config.suffix)
            .field("entries", &self.len())
            .field("events", &self.events)
            .finish()
    }
}
