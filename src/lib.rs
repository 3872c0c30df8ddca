//! # propstore - file-backed property store
//!
//! A small key/value store for application preferences, persisted as a
//! `.properties` file.
//!
//! ## Features
//!
//! - **Typed Accessors**: string, boolean and integer getters with configurable defaults
//! - **Key Suffixes**: namespace one file into variants (e.g. `lang.fr`, `lang.de`)
//! - **Change Events**: global and per-key listeners, notified synchronously
//! - **Persistence**: load on open, store on demand, parent directories created as needed
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use propstore::PropertyStore;
//!
//! # fn example() -> propstore::Result<()> {
//! let store = PropertyStore::builder("my-app")
//!     .config_dir("~/.config/my-app")
//!     .open()?;
//!
//! store.add_listener(|change| match &change.key {
//!     Some(key) => println!("{key} -> {:?}", change.new_value),
//!     None => println!("reloaded"),
//! });
//!
//! store.set_bool("ui.dark_mode", true);
//! store.set_int("window.width", 1280);
//! assert!(store.get_bool("ui.dark_mode"));
//! assert_eq!(store.get_int_or("window.width", 800)?, 1280);
//!
//! store.store()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Key Suffixes
//!
//! Every logical key is stored as `key + suffix`. Two stores over the same
//! file with suffixes `.fr` and `.de` see different values for `lang`:
//!
//! ```rust,no_run
//! use propstore::PropertyStore;
//!
//! # fn example() -> propstore::Result<()> {
//! let fr = PropertyStore::builder("my-app").suffix(".fr").open()?;
//! fr.set_string("lang", "fr"); // stored as "lang.fr"
//! fr.store()?;
//!
//! let de = PropertyStore::builder("my-app").suffix(".de").open()?;
//! assert_eq!(de.get_string("lang"), ""); // "lang.de" is unset
//! # Ok(())
//! # }
//! ```
//!
//! Key listeners match the physical key; build it with
//! [`PropertyStore::physical_key`].

mod error;
mod events;
pub mod properties;
pub mod storage;
mod store;
mod sync;

pub mod config;

pub use config::{PropsConfig, PropsConfigBuilder};
pub use error::{Error, Result};
pub use events::{ChangeCallback, EventManager, ListenerId, PropertyChange};
pub use properties::PropertyMap;
pub use storage::{PropertiesStorage, StorageBackend};
pub use store::{PropertyStore, PropertyStoreBuilder};
