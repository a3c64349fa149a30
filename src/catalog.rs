//! Static catalog of locale identifiers known to the crate.
//!
//! Rust has no runtime culture database, so display names come from a
//! built-in table of common BCP 47 tags. Identifiers absent from the table
//! fall back to a name composed from their base language, or to the
//! identifier itself.

use std::collections::HashMap;

use lazy_static::lazy_static;
use unic_langid::LanguageIdentifier;

/// Known locale identifiers and their English display names.
///
/// Ordered by identifier for readability; consumers sort by display name.
const KNOWN_LOCALES: &[(&str, &str)] = &[
    ("af", "Afrikaans"),
    ("am", "Amharic"),
    ("ar", "Arabic"),
    ("ar-EG", "Arabic (Egypt)"),
    ("ar-SA", "Arabic (Saudi Arabia)"),
    ("az", "Azerbaijani"),
    ("be", "Belarusian"),
    ("bg", "Bulgarian"),
    ("bn", "Bangla"),
    ("bs", "Bosnian"),
    ("ca", "Catalan"),
    ("cs", "Czech"),
    ("cs-CZ", "Czech (Czechia)"),
    ("cy", "Welsh"),
    ("da", "Danish"),
    ("da-DK", "Danish (Denmark)"),
    ("de", "German"),
    ("de-AT", "German (Austria)"),
    ("de-CH", "German (Switzerland)"),
    ("de-DE", "German (Germany)"),
    ("el", "Greek"),
    ("el-GR", "Greek (Greece)"),
    ("en", "English"),
    ("en-AU", "English (Australia)"),
    ("en-CA", "English (Canada)"),
    ("en-GB", "English (United Kingdom)"),
    ("en-IE", "English (Ireland)"),
    ("en-IN", "English (India)"),
    ("en-NZ", "English (New Zealand)"),
    ("en-US", "English (United States)"),
    ("en-ZA", "English (South Africa)"),
    ("es", "Spanish"),
    ("es-AR", "Spanish (Argentina)"),
    ("es-CL", "Spanish (Chile)"),
    ("es-CO", "Spanish (Colombia)"),
    ("es-ES", "Spanish (Spain)"),
    ("es-MX", "Spanish (Mexico)"),
    ("et", "Estonian"),
    ("eu", "Basque"),
    ("fa", "Persian"),
    ("fi", "Finnish"),
    ("fi-FI", "Finnish (Finland)"),
    ("fil", "Filipino"),
    ("fr", "French"),
    ("fr-BE", "French (Belgium)"),
    ("fr-CA", "French (Canada)"),
    ("fr-CH", "French (Switzerland)"),
    ("fr-FR", "French (France)"),
    ("ga", "Irish"),
    ("gl", "Galician"),
    ("gu", "Gujarati"),
    ("he", "Hebrew"),
    ("he-IL", "Hebrew (Israel)"),
    ("hi", "Hindi"),
    ("hi-IN", "Hindi (India)"),
    ("hr", "Croatian"),
    ("hu", "Hungarian"),
    ("hu-HU", "Hungarian (Hungary)"),
    ("hy", "Armenian"),
    ("hy-AM", "Armenian (Armenia)"),
    ("id", "Indonesian"),
    ("is", "Icelandic"),
    ("it", "Italian"),
    ("it-CH", "Italian (Switzerland)"),
    ("it-IT", "Italian (Italy)"),
    ("ja", "Japanese"),
    ("ja-JP", "Japanese (Japan)"),
    ("ka", "Georgian"),
    ("kk", "Kazakh"),
    ("km", "Khmer"),
    ("kn", "Kannada"),
    ("ko", "Korean"),
    ("ko-KR", "Korean (Korea)"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("mk", "Macedonian"),
    ("ml", "Malayalam"),
    ("mn", "Mongolian"),
    ("mr", "Marathi"),
    ("ms", "Malay"),
    ("mt", "Maltese"),
    ("nb", "Norwegian Bokmål"),
    ("ne", "Nepali"),
    ("nl", "Dutch"),
    ("nl-BE", "Dutch (Belgium)"),
    ("nl-NL", "Dutch (Netherlands)"),
    ("nn", "Norwegian Nynorsk"),
    ("pa", "Punjabi"),
    ("pl", "Polish"),
    ("pl-PL", "Polish (Poland)"),
    ("pt", "Portuguese"),
    ("pt-BR", "Portuguese (Brazil)"),
    ("pt-PT", "Portuguese (Portugal)"),
    ("ro", "Romanian"),
    ("ro-RO", "Romanian (Romania)"),
    ("ru", "Russian"),
    ("ru-RU", "Russian (Russia)"),
    ("si", "Sinhala"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("sq", "Albanian"),
    ("sr", "Serbian"),
    ("sv", "Swedish"),
    ("sv-SE", "Swedish (Sweden)"),
    ("sw", "Swahili"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("th", "Thai"),
    ("th-TH", "Thai (Thailand)"),
    ("tr", "Turkish"),
    ("tr-TR", "Turkish (Türkiye)"),
    ("uk", "Ukrainian"),
    ("uk-UA", "Ukrainian (Ukraine)"),
    ("ur", "Urdu"),
    ("uz", "Uzbek"),
    ("vi", "Vietnamese"),
    ("vi-VN", "Vietnamese (Vietnam)"),
    ("zh", "Chinese"),
    ("zh-CN", "Chinese (China)"),
    ("zh-HK", "Chinese (Hong Kong)"),
    ("zh-TW", "Chinese (Taiwan)"),
    ("zu", "Zulu"),
];

lazy_static! {
    static ref DISPLAY_NAMES: HashMap<&'static str, &'static str> =
        KNOWN_LOCALES.iter().copied().collect();
}

/// Returns the display name for an exactly matching catalog entry.
pub fn display_name(identifier: &str) -> Option<&'static str> {
    DISPLAY_NAMES.get(identifier).copied()
}

/// Returns a human-readable name for any locale identifier.
///
/// Exact catalog matches win; otherwise the name is composed from the base
/// language entry plus the region tag (`de-LI` → `German (LI)`); identifiers
/// with no catalog coverage at all are returned verbatim.
pub fn describe(identifier: &str) -> String {
    if let Some(name) = display_name(identifier) {
        return name.to_string();
    }

    if let Ok(langid) = identifier.parse::<LanguageIdentifier>() {
        if let Some(base) = display_name(langid.language.as_str()) {
            return match langid.region {
                Some(region) => format!("{} ({})", base, region),
                None => base.to_string(),
            };
        }
    }

    identifier.to_string()
}

/// Iterates over all catalog entries as (identifier, display name) pairs.
pub fn all() -> impl Iterator<Item = (&'static str, &'static str)> {
    KNOWN_LOCALES.iter().copied()
}
