//! Store Workflow Integration Tests
//!
//! Tests for the complete property lifecycle:
//! - Opening, setting and persisting properties
//! - Reloading from disk
//! - Suffix namespacing over a shared file
//! - Listener notifications

mod common;

use common::{TestFixture, record_changes};
use propstore::{PropertyChange, PropertyStore};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_open_missing_file_gives_empty_store() {
    let fixture = TestFixture::new();
    let store = fixture.open("");

    assert!(store.is_empty());
    assert_eq!(store.get_string("anything"), "");
    assert!(fixture.read_raw().is_none());
}

#[test]
fn test_store_then_fresh_load_round_trips() {
    let fixture = TestFixture::new();
    let store = fixture.open("");
    store.set_string("name", "Jane Doe");
    store.set_bool("ui.dark", true);
    store.set_int("window.width", 1280);
    store.set_string("path", "C:\\Users\\jane");
    store.set_string("greeting", "héllo wörld = 1 # 2");
    store.store().unwrap();

    let reopened = fixture.open("");
    assert_eq!(reopened.snapshot(), store.snapshot());
    assert_eq!(reopened.get_string("greeting"), "héllo wörld = 1 # 2");
    assert_eq!(reopened.get_int("window.width").unwrap(), 1280);
    assert!(reopened.get_bool("ui.dark"));
}

#[test]
fn test_store_creates_parent_directories() {
    let fixture = TestFixture::new();
    assert!(!fixture.props_path().parent().unwrap().exists());

    let store = fixture.open("");
    store.set_string("a", "1");
    store.store().unwrap();

    assert!(fixture.props_path().exists());
}

#[test]
fn test_stored_file_format() {
    let fixture = TestFixture::new();
    let store = PropertyStore::builder("test-app")
        .path(fixture.props_path())
        .header("app settings")
        .without_timestamp()
        .build();
    store.set_string("b", "2");
    store.set_string("a", "1");
    store.store().unwrap();

    assert_eq!(fixture.read_raw().unwrap(), "#app settings\na=1\nb=2\n");
}

#[test]
fn test_removed_key_is_not_persisted() {
    let fixture = TestFixture::new();
    let store = fixture.open("");
    store.set_string("keep", "1");
    store.set_string("drop", "2");
    store.remove("drop");
    store.store().unwrap();

    let entries = fixture.read_entries().unwrap();
    assert!(entries.contains_key("keep"));
    assert!(!entries.contains_key("drop"));
}

#[test]
fn test_load_picks_up_external_changes() {
    let fixture = TestFixture::new();
    fixture.write_raw("a=1\nb=2\n");
    let store = fixture.open("");
    assert_eq!(store.len(), 2);

    fixture.write_raw("a=10\n");
    store.load().unwrap();

    assert_eq!(store.get_int("a").unwrap(), 10);
    assert!(!store.contains("b"));
}

// =============================================================================
// Suffix Namespacing
// =============================================================================

#[test]
fn test_suffixes_share_one_file() {
    let fixture = TestFixture::new();

    let fr = fixture.open(".fr");
    fr.set_string("lang", "fr");
    fr.store().unwrap();

    let entries = fixture.read_entries().unwrap();
    assert_eq!(entries.get("lang.fr").map(String::as_str), Some("fr"));
    assert!(!entries.contains_key("lang"));

    let de = fixture.open(".de");
    assert!(!de.contains("lang"));
    assert_eq!(de.get_string("lang"), "");
    assert_eq!(de.len(), 1);

    let plain = fixture.open("");
    assert_eq!(plain.get_string("lang.fr"), "fr");
}

#[test]
fn test_keys_lists_own_namespace() {
    let fixture = TestFixture::new();
    fixture.write_raw("lang.fr=fr\ntitle.fr=Titre\nlang.de=de\n");

    let fr = fixture.open(".fr");
    assert_eq!(fr.keys(), vec!["lang".to_string(), "title".to_string()]);
    assert_eq!(fr.get_string("title"), "Titre");
}

// =============================================================================
// Listeners
// =============================================================================

#[test]
fn test_listener_scenario() {
    let fixture = TestFixture::new();
    fixture.write_raw("x=0\n");
    let store = fixture.open(".s");
    let seen = record_changes(&store);

    store.set_property("x", Some("1"));
    {
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], PropertyChange::key("x.s", Some("1".into())));
    }

    let scoped = Arc::new(AtomicUsize::new(0));
    let s = scoped.clone();
    store.add_key_listener(&store.physical_key("x"), move |_| {
        s.fetch_add(1, Ordering::SeqCst);
    });
    store.set_property("y", Some("2"));
    assert_eq!(scoped.load(Ordering::SeqCst), 0);

    store.load().unwrap();
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 3);
    assert!(seen[2].is_reload());
    assert_eq!(scoped.load(Ordering::SeqCst), 0);
}

#[test]
fn test_removed_listener_is_not_called() {
    let fixture = TestFixture::new();
    let store = fixture.open("");
    let calls = Arc::new(AtomicUsize::new(0));
    let c = calls.clone();
    let id = store.add_listener(move |_| {
        c.fetch_add(1, Ordering::SeqCst);
    });

    store.set_string("a", "1");
    assert!(store.remove_listener(id));
    assert!(!store.remove_listener(id));
    store.set_string("a", "2");

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_store_does_not_notify() {
    let fixture = TestFixture::new();
    let store = fixture.open("");
    store.set_string("a", "1");
    let seen = record_changes(&store);

    store.store().unwrap();

    assert!(seen.lock().unwrap().is_empty());
}
