//! The localizable string table.
//!
//! A [`StringTable`] holds the merged view of a native key/value table and,
//! while a valid locale is active, the translation overlay for that locale.
//! Tables register themselves with a [`LocalizationManager`] when the native
//! content is loaded and from then on follow every locale change the manager
//! broadcasts.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use crate::config::OverlayPolicy;
use crate::error::Error;
use crate::formats::XmlTableCodec;
use crate::locale::Locale;
use crate::manager::LocalizationManager;
use crate::paths;
use crate::target::{LocaleChangeEvent, LocalizableResource, LocalizationTarget};
use crate::traits::TableCodec;
use crate::types::ResourceSource;
use crate::types::TextRecord;

/// A string-keyed table with native content and per-locale overlays.
///
/// Created through [`StringTable::new`] (XML encoding) or
/// [`StringTable::with_codec`]; always handled as an `Rc` because the
/// manager needs a weak reference for its subscriber list. Interior
/// mutability keeps the whole surface `&self`; the table is single-writer
/// by contract and not thread-safe.
pub struct StringTable<C: TableCodec + 'static = XmlTableCodec> {
    codec: C,
    weak_self: Weak<StringTable<C>>,
    source: RefCell<Option<ResourceSource>>,
    translations_dir: RefCell<String>,
    manager: RefCell<Option<Rc<LocalizationManager>>>,
    entries: RefCell<IndexMap<String, String>>,
    current_locale: RefCell<Locale>,
    loaded_locale: RefCell<Locale>,
    loaded: Cell<bool>,
}

impl StringTable<XmlTableCodec> {
    /// Creates an empty table using the default XML encoding.
    pub fn new() -> Rc<Self> {
        Self::with_codec(XmlTableCodec)
    }
}

impl<C: TableCodec + 'static> StringTable<C> {
    /// Creates an empty table using the given encoding.
    pub fn with_codec(codec: C) -> Rc<Self> {
        Rc::new_cyclic(|weak| StringTable {
            codec,
            weak_self: weak.clone(),
            source: RefCell::new(None),
            translations_dir: RefCell::new(String::new()),
            manager: RefCell::new(None),
            entries: RefCell::new(IndexMap::new()),
            current_locale: RefCell::new(Locale::invalid()),
            loaded_locale: RefCell::new(Locale::invalid()),
            loaded: Cell::new(false),
        })
    }

    /// The locale the table is supposed to present.
    pub fn current_locale(&self) -> Locale {
        self.current_locale.borrow().clone()
    }

    /// The last locale whose translation file actually existed and parsed;
    /// invalid while native content is presented. Diverges from
    /// [`current_locale`](Self::current_locale) when a translation file was
    /// missing.
    pub fn loaded_locale(&self) -> Locale {
        self.loaded_locale.borrow().clone()
    }

    /// The manager this table is bound to, once native content is loaded.
    pub fn manager(&self) -> Option<Rc<LocalizationManager>> {
        self.manager.borrow().clone()
    }

    /// The source the native content was loaded from.
    pub fn source(&self) -> Option<ResourceSource> {
        self.source.borrow().clone()
    }

    /// Explicit directory for this table's translation files, overriding
    /// the convention derived from the source identity. Set before loading
    /// translations; empty means "derive from the identity".
    pub fn set_translations_dir(&self, dir: impl Into<String>) {
        *self.translations_dir.borrow_mut() = dir.into();
    }

    pub fn translations_dir(&self) -> String {
        self.translations_dir.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    /// Looks up the current value of a key.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Looks up a key, falling back to `default` when absent.
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Cheap structural check that `path` holds a native table in this
    /// table's encoding: the file exists, is non-empty, and its first
    /// structural marker matches. Never fails; problems are logged as
    /// warnings and reported as `false`.
    pub fn can_load_native(&self, path: &Path) -> bool {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(_) => return false,
        };
        if !metadata.is_file() || metadata.len() == 0 {
            return false;
        }

        match File::open(path) {
            Ok(file) => {
                let decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
                    .bom_override(true)
                    .build(file);
                self.codec.sniff(BufReader::new(decoder))
            }
            Err(err) => {
                log::warn!("cannot probe native table {}: {err}", path.display());
                false
            }
        }
    }

    /// Structural check for an in-memory native table.
    pub fn can_load_native_bytes(&self, bytes: &[u8]) -> bool {
        !bytes.is_empty() && self.codec.sniff(bytes)
    }

    /// Loads native content from `source` and binds the table to `manager`.
    ///
    /// Existing entries are reset, duplicate keys within the native content
    /// keep their first occurrence (logged), and the loaded locale falls
    /// back to invalid. Binding registers the table as a subscriber exactly
    /// once; the binding is permanent, and a later attempt to bind a
    /// different manager fails with [`Error::InvalidState`]. If the
    /// manager's locale is already valid, the matching translation is
    /// loaded before this call returns.
    pub fn load_native(
        &self,
        source: ResourceSource,
        manager: &Rc<LocalizationManager>,
    ) -> Result<(), Error> {
        *self.source.borrow_mut() = Some(source);
        self.reload_native()?;
        self.bind_manager(manager)?;

        // registration synchronizes a first-time binding; a reload under an
        // existing binding catches up here
        let current = self.current_locale();
        if current.is_valid() && current != self.loaded_locale() {
            if let Err(err) = self.load_translation(&current) {
                log::error!(
                    "failed to load translation for locale `{}`: {err}",
                    current.identifier()
                );
            }
        }

        Ok(())
    }

    /// Loads the translation overlay for `locale` over the native content.
    ///
    /// Returns `Ok(false)` without failing when `locale` is invalid or its
    /// translation file does not exist; both cases apply the configured
    /// [`OverlayPolicy`] to every key, since there is no overlay to merge.
    /// A file that exists but cannot be parsed is a real failure and
    /// propagates. On success the current and loaded locales both become
    /// `locale`.
    pub fn load_translation(&self, locale: &Locale) -> Result<bool, Error> {
        let manager = self.require_manager()?;
        let policy = manager.configuration().overlay_policy;

        if !locale.is_valid() {
            log::warn!("cannot load a translation for the invalid locale");
            self.apply_policy_to_all(policy);
            return Ok(false);
        }

        // the requested locale is current from here on, even if its file
        // turns out to be missing
        *self.current_locale.borrow_mut() = locale.clone();

        let path = self.translation_file_path(locale)?;
        if !path.is_file() {
            log::warn!("translation file {} is not found", path.display());
            self.apply_policy_to_all(policy);
            return Ok(false);
        }

        self.merge_translation(&path, policy)?;
        *self.loaded_locale.borrow_mut() = locale.clone();

        Ok(true)
    }

    /// Saves the full current snapshot as the translation of the current
    /// locale. Requires a valid current locale.
    pub fn save_translation(&self) -> Result<(), Error> {
        let current = self.current_locale();
        if !current.is_valid() {
            log::warn!("no locale is loaded to save the translation for");
            return Err(Error::invalid_state(
                "no locale is loaded to save the translation for",
            ));
        }

        let path = self.translation_file_path(&current)?;
        let records: Vec<TextRecord> = self
            .entries
            .borrow()
            .iter()
            .map(|(key, value)| TextRecord::new(key.clone(), value.clone()))
            .collect();

        self.codec.write_records(&records, &path).map_err(|err| {
            log::error!("translation file {} saving failed: {err}", path.display());
            err
        })
    }

    /// Creates an empty translation file for `locale` unless one already
    /// exists, creating the locale directory as needed.
    pub fn create_translation(&self, locale: &Locale) -> Result<(), Error> {
        let path = self.translation_file_path(locale)?;
        if path.exists() {
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        self.codec.write_records(&[], &path)
    }

    /// Deletes the translation file for `locale` if it exists, removing the
    /// locale directory too when it becomes empty.
    pub fn delete_translation(&self, locale: &Locale) -> Result<(), Error> {
        let path = self.translation_file_path(locale)?;
        if !path.exists() {
            return Ok(());
        }

        fs::remove_file(&path)?;

        if let Some(parent) = path.parent() {
            let is_empty = fs::read_dir(parent)
                .map(|mut entries| entries.next().is_none())
                .unwrap_or(false);
            if is_empty {
                fs::remove_dir(parent)?;
            }
        }

        Ok(())
    }

    /// All current entries, sorted case-insensitively by key. Downstream
    /// tooling renders these sequences as tables and relies on the order.
    pub fn enumerate(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .entries
            .borrow()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        pairs.sort_by(|a, b| {
            a.0.to_lowercase()
                .cmp(&b.0.to_lowercase())
                .then_with(|| a.0.cmp(&b.0))
        });
        pairs
    }

    /// Updates values of keys that already exist; unknown keys are ignored,
    /// never inserted. Only allowed while a valid locale is current — the
    /// native content is not editable through this surface.
    pub fn update_translations<I>(&self, pairs: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        if !self.current_locale().is_valid() {
            return Err(Error::NotSupported(
                "cannot update the native language table".to_string(),
            ));
        }

        let mut entries = self.entries.borrow_mut();
        for (key, value) in pairs {
            if let Some(slot) = entries.get_mut(&key) {
                *slot = value;
            }
        }

        Ok(())
    }

    /// Derives the on-disk path of `locale`'s translation file for this
    /// table. Pure; no filesystem access.
    pub fn translation_file_path(&self, locale: &Locale) -> Result<PathBuf, Error> {
        let source = self.source.borrow();
        let Some(source) = source.as_ref() else {
            return Err(Error::path_resolution("source is not initialized"));
        };
        let manager = self.require_manager()?;

        paths::translation_file_path(
            &source.identity(),
            locale,
            manager.configuration(),
            &self.translations_dir.borrow(),
            self.codec.native_extension(),
            self.codec.translation_extension(),
        )
    }

    // Parses the native source from scratch, replacing all entries.
    fn reload_native(&self) -> Result<(), Error> {
        let source = self.source.borrow().clone();
        let Some(source) = source else {
            return Err(Error::invalid_state("source is not initialized"));
        };

        let records = match &source {
            ResourceSource::File(path) => {
                if !path.is_file() {
                    log::error!("native table file {} is not found", path.display());
                    return Err(Error::Io(io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("native table file {} is not found", path.display()),
                    )));
                }
                self.codec.read_records(path).map_err(|err| {
                    log::error!("native table {} loading failed: {err}", path.display());
                    err
                })?
            }
            ResourceSource::Embedded { bytes, .. } => self.codec.parse(bytes.as_ref())?,
        };

        self.loaded.set(true);
        *self.loaded_locale.borrow_mut() = Locale::invalid();

        let mut entries = self.entries.borrow_mut();
        entries.clear();
        for record in records {
            if record.key.is_empty() {
                continue;
            }
            if entries.contains_key(&record.key) {
                log::warn!("native table contains duplicate key `{}`", record.key);
                continue;
            }
            entries.insert(record.key, record.value);
        }

        Ok(())
    }

    // Permanently binds the table to a manager and registers it as a
    // subscriber. Idempotent for the same manager.
    fn bind_manager(&self, manager: &Rc<LocalizationManager>) -> Result<(), Error> {
        {
            let bound = self.manager.borrow();
            if let Some(existing) = bound.as_ref() {
                if Rc::ptr_eq(existing, manager) {
                    return Ok(());
                }
                return Err(Error::invalid_state(
                    "the localization manager binding cannot be reset",
                ));
            }
        }

        *self.manager.borrow_mut() = Some(Rc::clone(manager));

        if let Some(table) = self.weak_self.upgrade() {
            manager.add_target(table);
        }

        Ok(())
    }

    fn require_manager(&self) -> Result<Rc<LocalizationManager>, Error> {
        self.manager
            .borrow()
            .clone()
            .ok_or_else(|| Error::invalid_state("no localization manager is bound"))
    }

    // Merges one overlay file into the entries under `policy`.
    fn merge_translation(&self, path: &Path, policy: OverlayPolicy) -> Result<(), Error> {
        if !self.loaded.get() {
            return Err(Error::invalid_state("native table is not loaded"));
        }

        let records = self.codec.read_records(path).map_err(|err| {
            log::error!("translation file {} loading failed: {err}", path.display());
            err
        })?;

        let mut untouched: HashSet<String>;
        {
            let mut entries = self.entries.borrow_mut();
            untouched = entries.keys().cloned().collect();
            for record in records {
                // replace only existing keys; an overlay never introduces
                // new ones, and its first occurrence of a key wins
                if untouched.remove(&record.key) {
                    entries.insert(record.key, record.value);
                }
            }
        }

        self.apply_policy(untouched.drain(), policy);
        Ok(())
    }

    fn apply_policy_to_all(&self, policy: OverlayPolicy) {
        let keys: Vec<String> = self.entries.borrow().keys().cloned().collect();
        self.apply_policy(keys, policy);
    }

    fn apply_policy<I: IntoIterator<Item = String>>(&self, keys: I, policy: OverlayPolicy) {
        match policy {
            OverlayPolicy::KeepNative => {}
            OverlayPolicy::ClearNative => {
                let mut entries = self.entries.borrow_mut();
                for key in keys {
                    if let Some(value) = entries.get_mut(&key) {
                        value.clear();
                    }
                }
            }
            OverlayPolicy::RemoveNative => {
                let mut entries = self.entries.borrow_mut();
                for key in keys {
                    entries.shift_remove(&key);
                }
            }
        }
    }
}

impl<C: TableCodec + 'static> LocalizationTarget for StringTable<C> {
    fn current_locale(&self) -> Locale {
        StringTable::current_locale(self)
    }

    fn on_localization_changed(
        &self,
        manager: &LocalizationManager,
        event: &LocaleChangeEvent,
    ) -> Result<(), Error> {
        let bound = self.require_manager()?;
        if StringTable::current_locale(self) == event.new_locale
            || !std::ptr::eq(Rc::as_ptr(&bound), manager)
        {
            return Ok(());
        }

        if event.new_locale.is_valid() {
            self.load_translation(&event.new_locale)?;
        } else {
            *self.current_locale.borrow_mut() = Locale::invalid();
            self.reload_native()?;
        }

        // consistency check, not an enforced invariant
        if StringTable::current_locale(self) != event.new_locale {
            log::warn!(
                "locale change did not converge for `{}`",
                event.new_locale.identifier()
            );
        }

        Ok(())
    }
}

impl<C: TableCodec + 'static> LocalizableResource for StringTable<C> {
    fn native_extension(&self) -> &'static str {
        self.codec.native_extension()
    }

    fn translation_extension(&self) -> &'static str {
        self.codec.translation_extension()
    }

    fn source_identity(&self) -> Option<String> {
        self.source.borrow().as_ref().map(ResourceSource::identity)
    }

    fn load_translation(&self, locale: &Locale) -> Result<bool, Error> {
        StringTable::load_translation(self, locale)
    }

    fn save_translation(&self) -> Result<(), Error> {
        StringTable::save_translation(self)
    }

    fn create_translation(&self, locale: &Locale) -> Result<(), Error> {
        StringTable::create_translation(self, locale)
    }

    fn delete_translation(&self, locale: &Locale) -> Result<(), Error> {
        StringTable::delete_translation(self, locale)
    }

    fn enumerate(&self) -> Vec<(String, String)> {
        StringTable::enumerate(self)
    }

    fn update_translations(&self, pairs: &[(String, String)]) -> Result<(), Error> {
        StringTable::update_translations(self, pairs.iter().cloned())
    }
}
