//! Manager configuration.

use serde::{Deserialize, Serialize};

use crate::locale::Locale;

/// Reconciliation rule for native keys that a translation overlay omits.
///
/// Applied on every translation load, including loads where the overlay file
/// is missing entirely (in which case it applies to every key).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayPolicy {
    /// Keys absent from the overlay keep their native value.
    #[default]
    KeepNative,

    /// Keys absent from the overlay are set to the empty string.
    ClearNative,

    /// Keys absent from the overlay are removed while the locale is active.
    RemoveNative,
}

/// Immutable settings a [`LocalizationManager`](crate::LocalizationManager)
/// is constructed from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Configuration {
    /// Locale selected when the manager is created, and prepended to the
    /// available-locale listing. `None` starts on native text.
    pub default_locale: Option<Locale>,

    /// Root directory holding one subdirectory per locale. Relative paths
    /// resolve against the running executable's directory.
    pub translations_root: String,

    /// Overlay reconciliation rule for all tables under this manager.
    pub overlay_policy: OverlayPolicy,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            default_locale: None,
            translations_root: "localization".to_string(),
            overlay_policy: OverlayPolicy::KeepNative,
        }
    }
}
