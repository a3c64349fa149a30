//! Locale identity values.
//!
//! A [`Locale`] is an immutable pair of a BCP 47 identifier and a display
//! name. A distinguished invalid locale stands for "use native text, no
//! overlay"; it is the fallback everywhere a locale name fails to parse.

use std::cmp::Ordering;
use std::fmt::Display;

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::catalog;

/// Display name of the invalid locale, shown wherever native text is meant.
const NATIVE_DISPLAY_NAME: &str = "[Native]";

/// An immutable language/region value.
///
/// Locales compare equal by identifier alone; display names are cosmetic.
/// Construction never fails — an unparsable name yields [`Locale::invalid`].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Locale {
    identifier: String,
    display_name: String,
}

impl Locale {
    /// Parses a locale from its identifier (e.g. `"en-US"`).
    ///
    /// The identifier is canonicalized (`pt_br` → `pt-BR`). Names that do
    /// not parse as a language identifier, and the undetermined tag `und`,
    /// yield the invalid locale with an empty identifier.
    pub fn from_name(name: &str) -> Self {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Self::invalid();
        }

        match trimmed.parse::<LanguageIdentifier>() {
            Ok(langid) if langid.language.as_str() != "und" => {
                let identifier = langid.to_string();
                let display_name = catalog::describe(&identifier);
                Locale {
                    identifier,
                    display_name,
                }
            }
            _ => Self::invalid(),
        }
    }

    /// The invalid locale: no identifier, native text only.
    pub fn invalid() -> Self {
        Locale {
            identifier: String::new(),
            display_name: NATIVE_DISPLAY_NAME.to_string(),
        }
    }

    /// Creates a locale with an explicit display name override.
    pub fn with_display_name(name: &str, display_name: impl Into<String>) -> Self {
        let mut locale = Self::from_name(name);
        locale.display_name = display_name.into();
        locale
    }

    /// The locale of the current process environment, if one is set and
    /// parses; the invalid locale otherwise.
    pub fn system() -> Self {
        match sys_locale::get_locale() {
            Some(name) => Self::from_name(&name),
            None => Self::invalid(),
        }
    }

    /// All catalog locales, sorted by display name for locale selectors.
    pub fn all_locales() -> impl Iterator<Item = Locale> {
        let mut locales: Vec<Locale> = catalog::all()
            .map(|(identifier, display_name)| Locale {
                identifier: identifier.to_string(),
                display_name: display_name.to_string(),
            })
            .collect();
        locales.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        locales.into_iter()
    }

    /// A locale is valid iff it carries a non-empty identifier.
    pub fn is_valid(&self) -> bool {
        !self.identifier.is_empty()
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl PartialEq for Locale {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl Eq for Locale {}

impl std::hash::Hash for Locale {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.identifier.hash(state);
    }
}

// Identifier ordering keeps locale lists deterministic; display sorting is
// done explicitly where lists are shown.
impl PartialOrd for Locale {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Locale {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identifier.cmp(&other.identifier)
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name)
    }
}
