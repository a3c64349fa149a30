//! The process-wide authority for the current locale.
//!
//! A [`LocalizationManager`] owns the current locale, a weakly-held list of
//! subscribed [`LocalizationTarget`]s, and the enumeration of locales
//! available on disk. Changing the locale synchronously notifies every live
//! subscriber in registration order; dead subscribers are pruned during the
//! same pass.

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::Configuration;
use crate::error::Error;
use crate::locale::Locale;
use crate::paths;
use crate::target::{LocaleChangeEvent, LocalizationTarget};

// one-time construction flag for the default manager; the manager itself is
// passed by reference, never stored in a global
static DEFAULT_CREATED: AtomicBool = AtomicBool::new(false);

/// Owner of the current locale and broadcaster of locale changes.
///
/// Managers are shared via `Rc`; tables keep a strong reference to their
/// manager while the manager only ever holds tables weakly, so registry
/// membership never extends a table's lifetime.
pub struct LocalizationManager {
    configuration: Configuration,
    current_locale: RefCell<Locale>,
    targets: RefCell<Vec<Weak<dyn LocalizationTarget>>>,
    observers: RefCell<Vec<Box<dyn Fn(&LocaleChangeEvent)>>>,
}

impl LocalizationManager {
    /// Creates the application-wide default manager.
    ///
    /// Succeeds exactly once per process; every later call fails with
    /// [`Error::AlreadyInitialized`]. Independently constructed tables all
    /// converge on this one manager's locale without explicit wiring, which
    /// is why a second default must fail loudly.
    pub fn create_default(configuration: Configuration) -> Result<Rc<Self>, Error> {
        if DEFAULT_CREATED.swap(true, Ordering::SeqCst) {
            return Err(Error::AlreadyInitialized);
        }
        Ok(Self::create_isolated(configuration))
    }

    /// Creates an independent manager for a scope that must not share the
    /// global locale state, e.g. tooling that manages files outside the
    /// default translations tree.
    pub fn create_isolated(configuration: Configuration) -> Rc<Self> {
        let current = configuration
            .default_locale
            .clone()
            .unwrap_or_else(Locale::invalid);

        Rc::new(LocalizationManager {
            configuration,
            current_locale: RefCell::new(current),
            targets: RefCell::new(Vec::new()),
            observers: RefCell::new(Vec::new()),
        })
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn current_locale(&self) -> Locale {
        self.current_locale.borrow().clone()
    }

    /// Switches the current locale and broadcasts the change.
    ///
    /// A no-op when `locale` equals the current one (by identifier), so
    /// repeated calls cost nothing. Subscribers are notified synchronously
    /// in registration order; a failing subscriber is logged and skipped,
    /// never allowed to block the rest. Entries whose target has been
    /// dropped are removed during the pass. After the broadcast the
    /// manager's own observers run.
    pub fn change_locale(&self, locale: Locale) {
        if *self.current_locale.borrow() == locale {
            return;
        }

        let old_locale = self.current_locale.replace(locale.clone());
        let event = LocaleChangeEvent::new(Some(old_locale), locale);

        let mut index = 0;
        loop {
            // the borrow must not be held across the handler call: a
            // handler may re-enter the manager
            let upgraded = {
                let targets = self.targets.borrow();
                match targets.get(index) {
                    Some(weak) => weak.upgrade(),
                    None => break,
                }
            };

            match upgraded {
                Some(target) => {
                    if event.new_locale != target.current_locale() {
                        if let Err(err) = target.on_localization_changed(self, &event) {
                            log::error!("locale change notification failed: {err}");
                        }
                    }
                    index += 1;
                }
                None => {
                    self.targets.borrow_mut().remove(index);
                }
            }
        }

        for observer in self.observers.borrow().iter() {
            observer(&event);
        }
    }

    /// Switches the current locale by identifier. Unparsable names switch
    /// to the invalid locale, i.e. back to native text.
    pub fn change_locale_name(&self, name: &str) {
        self.change_locale(Locale::from_name(name));
    }

    /// Registers a locale-change observer that is not itself a table.
    ///
    /// Observers are owned by the manager for its whole lifetime. Do not
    /// register closures capturing objects that should be droppable while
    /// the manager lives; subscribe a [`LocalizationTarget`] instead.
    pub fn on_locale_changed(&self, observer: impl Fn(&LocaleChangeEvent) + 'static) {
        self.observers.borrow_mut().push(Box::new(observer));
    }

    /// Subscribes a target for locale-change notifications.
    ///
    /// Only a weak reference is kept. If the manager's locale already
    /// differs from the target's, the target is synchronized immediately
    /// and synchronously, so a late joiner does not wait for the next
    /// explicit change.
    pub fn add_target(&self, target: Rc<dyn LocalizationTarget>) {
        self.targets.borrow_mut().push(Rc::downgrade(&target));

        let current = self.current_locale();
        if current != target.current_locale() {
            let event = LocaleChangeEvent::new(None, current);
            if let Err(err) = target.on_localization_changed(self, &event) {
                log::error!("locale change notification failed for a new target: {err}");
            }
        }
    }

    /// Unsubscribes a target. Returns whether it was found.
    pub fn remove_target(&self, target: &Rc<dyn LocalizationTarget>) -> bool {
        let needle = Rc::downgrade(target);
        let mut targets = self.targets.borrow_mut();
        match targets.iter().position(|weak| weak.ptr_eq(&needle)) {
            Some(index) => {
                targets.remove(index);
                true
            }
            None => false,
        }
    }

    /// Number of subscriber entries, including dead ones not yet pruned.
    pub fn target_count(&self) -> usize {
        self.targets.borrow().len()
    }

    /// Locales that have translations on disk.
    ///
    /// Scans the immediate subdirectories of the translations root, keeping
    /// those whose name parses to a valid locale and that contain at least
    /// one file. Sorted by display name; the configured default locale is
    /// prepended when not already present.
    pub fn available_locales(&self) -> Vec<Locale> {
        let mut locales = Vec::new();

        if let Some(root) = self.translations_directory() {
            if let Ok(dir_entries) = fs::read_dir(&root) {
                for entry in dir_entries.flatten() {
                    let path = entry.path();
                    if !path.is_dir() {
                        continue;
                    }

                    let has_files = fs::read_dir(&path)
                        .map(|mut inner| inner.any(|e| e.map(|e| e.path().is_file()).unwrap_or(false)))
                        .unwrap_or(false);
                    if !has_files {
                        continue;
                    }

                    let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                        continue;
                    };
                    let locale = Locale::from_name(&name);
                    if !locale.is_valid() {
                        log::warn!("directory `{name}` does not name a valid locale");
                        continue;
                    }

                    locales.push(locale);
                }
            }
        }

        locales.sort_by(|a, b| a.display_name().cmp(b.display_name()));

        if let Some(default) = &self.configuration.default_locale {
            if !locales.contains(default) {
                locales.insert(0, default.clone());
            }
        }

        locales
    }

    /// The resolved translations root directory, if one is configured.
    pub fn translations_directory(&self) -> Option<PathBuf> {
        paths::resolve_translations_root(&self.configuration.translations_root)
    }

    /// The directory holding one locale's translation files.
    pub fn locale_directory(&self, locale_name: &str) -> Option<PathBuf> {
        if locale_name.is_empty() {
            return None;
        }
        Some(self.translations_directory()?.join(locale_name))
    }
}
