#![forbid(unsafe_code)]
//! Runtime-switchable localization for Rust.
//!
//! Applications keep their UI strings in per-component native tables and
//! store translations in sibling files per locale. This crate provides the
//! three pieces that make switching locales at runtime work:
//!
//! - a [`LocalizationManager`] owning the current locale and broadcasting
//!   changes to a weakly-held, dynamically registered set of tables;
//! - [`StringTable`], a loadable/savable key/value table that merges a
//!   per-locale overlay file over its native content under a configurable
//!   [`OverlayPolicy`];
//! - a deterministic path derivation mapping a table's logical identity to
//!   the translation file it must load.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use langswitch::{Configuration, LocalizationManager, ResourceSource, StringTable};
//!
//! let manager = LocalizationManager::create_default(Configuration {
//!     translations_root: "localization".to_string(),
//!     ..Configuration::default()
//! })?;
//!
//! let table = StringTable::new();
//! table.load_native(ResourceSource::file("localization/app.xml"), &manager)?;
//!
//! // every registered table reloads its overlay; keys fall back per policy
//! manager.change_locale_name("de-DE");
//! println!("{}", table.get_or("greeting", "Hello"));
//! # Ok::<(), langswitch::Error>(())
//! ```
//!
//! # On-disk layout
//!
//! Translations live under `<translations root>/<locale>/`, one file per
//! native table, named after the table with the translation extension:
//!
//! ```text
//! localization/
//! ├── app.xml              native table
//! ├── de-DE/
//! │   └── app.tsd          German overlay
//! └── fr/
//!     └── app.tsd          French overlay
//! ```
//!
//! The encoding is pluggable behind [`TableCodec`]; XML (default) and CSV
//! codecs ship with the crate.

pub mod catalog;
pub mod config;
pub mod error;
pub mod formats;
pub mod locale;
pub mod manager;
pub mod paths;
pub mod resource_file;
pub mod table;
pub mod target;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    config::{Configuration, OverlayPolicy},
    error::Error,
    formats::{CsvTableCodec, XmlTableCodec},
    locale::Locale,
    manager::LocalizationManager,
    resource_file::{ResourceFile, scan_resource_files},
    table::StringTable,
    target::{LocalizableResource, LocaleChangeEvent, LocalizationTarget},
    traits::TableCodec,
    types::{ResourceSource, TextRecord},
};
