//! Contracts between the localization manager and the resources it notifies.

use crate::error::Error;
use crate::locale::Locale;
use crate::manager::LocalizationManager;

/// Payload of a locale change broadcast.
#[derive(Debug, Clone)]
pub struct LocaleChangeEvent {
    /// The locale that was current before the change. `None` for the
    /// synthetic event sent to a target on registration.
    pub old_locale: Option<Locale>,

    /// The locale being switched to.
    pub new_locale: Locale,
}

impl LocaleChangeEvent {
    pub fn new(old_locale: Option<Locale>, new_locale: Locale) -> Self {
        LocaleChangeEvent {
            old_locale,
            new_locale,
        }
    }
}

/// Receives locale-change notifications from a [`LocalizationManager`].
///
/// The manager holds targets weakly: registration never keeps a target
/// alive, and a dropped target is pruned during the next broadcast.
pub trait LocalizationTarget {
    /// The locale this target currently presents.
    fn current_locale(&self) -> Locale;

    /// Reacts to a locale change. Errors are logged by the manager and do
    /// not stop the broadcast to other targets.
    fn on_localization_changed(
        &self,
        manager: &LocalizationManager,
        event: &LocaleChangeEvent,
    ) -> Result<(), Error>;
}

/// A loadable/savable keyed string table with native-plus-overlay semantics.
///
/// Implemented by every concrete table type; batch tooling works against
/// this surface without knowing the encoding.
pub trait LocalizableResource: LocalizationTarget {
    /// File extension of the native table encoding.
    fn native_extension(&self) -> &'static str;

    /// File extension of translated tables.
    fn translation_extension(&self) -> &'static str;

    /// The logical identity the table was loaded from, if any.
    fn source_identity(&self) -> Option<String>;

    /// Loads the overlay for `locale` and merges it over the native values.
    /// Returns `Ok(false)` when the locale is invalid or its file is
    /// missing; both apply the configured overlay policy instead.
    fn load_translation(&self, locale: &Locale) -> Result<bool, Error>;

    /// Saves the current snapshot as the translation of the current locale.
    fn save_translation(&self) -> Result<(), Error>;

    /// Creates an empty translation file for `locale` if none exists.
    fn create_translation(&self, locale: &Locale) -> Result<(), Error>;

    /// Deletes the translation file for `locale` if it exists.
    fn delete_translation(&self, locale: &Locale) -> Result<(), Error>;

    /// All current entries, sorted case-insensitively by key.
    fn enumerate(&self) -> Vec<(String, String)>;

    /// Updates values of existing keys; unknown keys are ignored.
    fn update_translations(&self, pairs: &[(String, String)]) -> Result<(), Error>;
}
