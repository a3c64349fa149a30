//! Batch-editing collaborator over individual resource files.
//!
//! A [`ResourceFile`] wraps one native table file together with an isolated
//! [`LocalizationManager`] rooted at the file's own directory, so tooling
//! can edit translations for many unrelated files without touching any
//! global locale state. Translated views are loaded lazily, one table per
//! locale, and cached.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::{Configuration, OverlayPolicy};
use crate::error::Error;
use crate::locale::Locale;
use crate::manager::LocalizationManager;
use crate::table::StringTable;
use crate::traits::TableCodec;
use crate::types::ResourceSource;

/// One localizable file and its per-locale translated views.
///
/// The file's directory doubles as the translations root, and missing
/// overlay values are surfaced as empty strings (`ClearNative`) so an
/// editor shows untranslated keys as blank cells.
pub struct ResourceFile<C: TableCodec + Clone + 'static> {
    codec: C,
    full_path: PathBuf,
    manager: Option<Rc<LocalizationManager>>,
    native: Option<Rc<StringTable<C>>>,
    translations: RefCell<HashMap<String, Rc<StringTable<C>>>>,
}

impl<C: TableCodec + Clone + 'static> ResourceFile<C> {
    pub fn new(codec: C) -> Self {
        ResourceFile {
            codec,
            full_path: PathBuf::new(),
            manager: None,
            native: None,
            translations: RefCell::new(HashMap::new()),
        }
    }

    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    pub fn file_name(&self) -> String {
        self.full_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn directory_path(&self) -> String {
        self.full_path
            .parent()
            .map(|dir| dir.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn is_loaded(&self) -> bool {
        self.native.is_some()
    }

    /// The isolated manager owning this file's locale state.
    pub fn manager(&self) -> Option<&Rc<LocalizationManager>> {
        self.manager.as_ref()
    }

    /// The native table, once loaded.
    pub fn native(&self) -> Option<&Rc<StringTable<C>>> {
        self.native.as_ref()
    }

    /// Loads the native content of `path`.
    ///
    /// Returns `Ok(false)` when the file does not look like a native table
    /// in this codec's encoding; real load failures propagate.
    pub fn load(&mut self, path: &Path) -> Result<bool, Error> {
        self.reset();
        self.full_path = path.to_path_buf();

        let configuration = Configuration {
            default_locale: None,
            // the file's own directory locates its translations
            translations_root: self.directory_path(),
            overlay_policy: OverlayPolicy::ClearNative,
        };
        let manager = LocalizationManager::create_isolated(configuration);

        let table = StringTable::with_codec(self.codec.clone());
        if !table.can_load_native(path) {
            return Ok(false);
        }
        table.load_native(ResourceSource::file(path), &manager)?;

        self.manager = Some(manager);
        self.native = Some(table);

        Ok(true)
    }

    /// The translated view of this file for `locale`, loading it on first
    /// use. The view is cached only when the translation file existed;
    /// a view with no backing file is still returned so its (empty) values
    /// can be displayed and edited.
    pub fn translation(&self, locale: &Locale) -> Result<Option<Rc<StringTable<C>>>, Error> {
        let manager = self
            .manager
            .clone()
            .ok_or_else(|| Error::invalid_state("resource file is not loaded"))?;

        if let Some(existing) = self.translations.borrow().get(locale.identifier()) {
            return Ok(Some(existing.clone()));
        }

        let table = StringTable::with_codec(self.codec.clone());
        if !table.can_load_native(&self.full_path) {
            return Ok(None);
        }
        table.load_native(ResourceSource::file(&self.full_path), &manager)?;

        if table.load_translation(locale)? {
            self.translations
                .borrow_mut()
                .insert(locale.identifier().to_string(), table.clone());
        }

        Ok(Some(table))
    }

    /// Entries of the native table, sorted by key.
    pub fn native_entries(&self) -> Option<Vec<(String, String)>> {
        self.native.as_ref().map(|table| table.enumerate())
    }

    /// Entries of the translated view for `locale`, sorted by key.
    pub fn translation_entries(&self, locale: &Locale) -> Result<Option<Vec<(String, String)>>, Error> {
        Ok(self.translation(locale)?.map(|table| table.enumerate()))
    }

    /// Applies `pairs` to the translated view for `locale` and saves it,
    /// creating the translation file first if it does not exist yet.
    pub fn save_translations(
        &self,
        locale: &Locale,
        pairs: &[(String, String)],
    ) -> Result<(), Error> {
        let Some(native) = self.native.as_ref() else {
            return Ok(());
        };

        // an existing file guarantees the subsequent load succeeds and caches
        native.create_translation(locale)?;

        if let Some(table) = self.translation(locale)? {
            table.update_translations(pairs.iter().cloned())?;
            table.save_translation()?;
        }

        Ok(())
    }

    /// Creates an empty translation file for `locale` if none exists.
    pub fn create_translation(&self, locale: &Locale) -> Result<(), Error> {
        match self.native.as_ref() {
            Some(native) => native.create_translation(locale),
            None => Ok(()),
        }
    }

    /// Deletes the translation file for `locale` and drops its cached view.
    pub fn delete_translation(&self, locale: &Locale) -> Result<(), Error> {
        let Some(native) = self.native.as_ref() else {
            return Ok(());
        };
        native.delete_translation(locale)?;
        self.translations.borrow_mut().remove(locale.identifier());
        Ok(())
    }

    fn reset(&mut self) {
        self.full_path = PathBuf::new();
        self.manager = None;
        self.native = None;
        self.translations.borrow_mut().clear();
    }
}

/// Recursively scans `root` for loadable native table files.
///
/// Files are filtered by the codec's native extension and probed with
/// [`StringTable::can_load_native`]; files that fail to load are logged and
/// skipped. The `cancel` flag is polled between per-file operations — a
/// pending file load is never interrupted, matching the crate-wide rule
/// that individual load calls are not cancellable.
pub fn scan_resource_files<C: TableCodec + Clone + 'static>(
    root: &Path,
    codec: C,
    cancel: &AtomicBool,
) -> Result<Vec<ResourceFile<C>>, Error> {
    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    'scan: while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            if cancel.load(Ordering::Relaxed) {
                break 'scan;
            }

            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
                continue;
            }

            let matches_extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case(codec.native_extension()))
                .unwrap_or(false);
            if !matches_extension {
                continue;
            }

            let mut file = ResourceFile::new(codec.clone());
            match file.load(&path) {
                Ok(true) => found.push(file),
                Ok(false) => {}
                Err(err) => log::warn!("skipping {}: {err}", path.display()),
            }
        }
    }

    Ok(found)
}
