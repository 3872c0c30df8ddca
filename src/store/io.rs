use crate::error::Result;
use crate::events::PropertyChange;
use crate::storage::StorageBackend;
use crate::store::core::PropertyStore;
use crate::sync::RwLockExt;

use log::{debug, error, info};

impl<S: StorageBackend> PropertyStore<S> {
    /// Load the properties file, replacing the in-memory entries.
    ///
    /// A missing file is not an error: the store is left as is. On success a
    /// reload notification (`key == None`) is sent to global listeners.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is malformed. The
    /// in-memory entries are left untouched in that case, and calling `load`
    /// again retries from scratch.
    pub fn load(&self) -> Result<()> {
        let path = &self.config.path;
        debug!("Loading properties from {}", path.display());

        if !path.exists() {
            info!("{} does not exist, nothing to load", path.display());
            return Ok(());
        }

        let loaded = self
            .config
            .storage
            .read(path)
            .inspect_err(|e| error!("Cannot read properties: {e}"))?;

        let count = loaded.len();
        *self.entries.write_recovered() = loaded;
        debug!("Loaded {count} properties from {}", path.display());

        self.events.notify(&PropertyChange::reload());
        Ok(())
    }

    /// Write every entry to the properties file.
    ///
    /// Missing parent directories are created and existing content is
    /// replaced. Listeners are not notified.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written. Calling
    /// `store` again retries from scratch.
    pub fn store(&self) -> Result<()> {
        let path = &self.config.path;
        let entries = self.entries.read_recovered();

        self.config
            .storage
            .write(path, &entries, self.config.header.as_deref())
            .inspect_err(|e| error!("Cannot write properties: {e}"))?;

        debug!("Stored {} properties to {}", entries.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::PropsConfig;
    use crate::error::Error;
    use crate::store::PropertyStore;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file_is_ok() {
        let dir = tempdir().unwrap();
        let store = PropertyStore::new(PropsConfig::new(dir.path().join("none.properties")));
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        store.add_listener(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        store.load().unwrap();

        assert!(store.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_load_replaces_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.properties");
        std::fs::write(&path, "a=1\n").unwrap();

        let store = PropertyStore::new(PropsConfig::new(&path));
        store.set_property("stale", Some("x"));
        store.load().unwrap();

        assert_eq!(store.get_string("a"), "1");
        assert!(!store.contains("stale"));
    }

    #[test]
    fn test_failed_load_keeps_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.properties");
        std::fs::write(&path, "a=\\uXYZW\n").unwrap();

        let store = PropertyStore::new(PropsConfig::new(&path));
        store.set_property("kept", Some("yes"));

        let err = store.load().unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));
        assert_eq!(store.get_string("kept"), "yes");
    }

    #[test]
    fn test_store_into_directory_path_fails() {
        let dir = tempdir().unwrap();
        let store = PropertyStore::new(PropsConfig::new(dir.path()));
        store.set_property("a", Some("1"));

        let err = store.store().unwrap_err();
        assert!(err.is_io_error());
    }
}
