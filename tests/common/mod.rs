//! Common test utilities for propstore integration tests
//!
//! Provides a temp-dir backed fixture and helpers for inspecting the file.

#![allow(dead_code)]

use propstore::{PropertyChange, PropertyMap, PropertyStore, PropsConfig};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Install a test logger once; later calls are no-ops
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// =============================================================================
// Test Fixtures
// =============================================================================

/// Test fixture that provides a temporary directory and a store file path
pub struct TestFixture {
    pub temp_dir: TempDir,
}

impl TestFixture {
    /// Create a new test fixture
    pub fn new() -> Self {
        init_logging();
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Path of the properties file (inside a not-yet-created subdirectory)
    pub fn props_path(&self) -> PathBuf {
        self.temp_dir.path().join("conf").join("app.properties")
    }

    /// Configuration for the fixture file with the given suffix
    pub fn config(&self, suffix: &str) -> PropsConfig {
        PropsConfig::builder("test-app")
            .path(self.props_path())
            .suffix(suffix)
            .build()
    }

    /// Open a store over the fixture file
    pub fn open(&self, suffix: &str) -> PropertyStore {
        PropertyStore::open(self.config(suffix)).expect("Failed to open store")
    }

    /// Write raw content to the fixture file
    pub fn write_raw(&self, content: impl AsRef<[u8]>) {
        let path = self.props_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    /// Raw file content, if the file exists
    pub fn read_raw(&self) -> Option<String> {
        std::fs::read_to_string(self.props_path()).ok()
    }

    /// Parsed file content, if the file exists
    pub fn read_entries(&self) -> Option<PropertyMap> {
        self.read_raw()
            .map(|content| propstore::properties::parse(&content).unwrap())
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Register a global listener that records every change
pub fn record_changes(store: &PropertyStore) -> Arc<Mutex<Vec<PropertyChange>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    store.add_listener(move |change| sink.lock().unwrap().push(change.clone()));
    seen
}
