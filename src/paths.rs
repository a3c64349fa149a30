//! Translation file path derivation.
//!
//! Maps a native resource's logical identity plus a target locale onto the
//! translation file the table must load. The derivation is pure: it never
//! touches the filesystem, and identical inputs always produce identical
//! paths. On-disk layout is `<root>/<locale identifier>/<derived name>.<ext>`.

use std::path::PathBuf;

use crate::config::Configuration;
use crate::error::Error;
use crate::locale::Locale;

/// Builds the logical identity of a table embedded in a module, in the form
/// `/{module};component/{dotted.path}.{extension}`.
///
/// The dotted path expands into nested directories during derivation, so
/// `component_identity("myapp", "settings.general", "xml")` localizes to
/// `<root>/<locale>/settings/general.tsd`.
pub fn component_identity(module: &str, dotted_path: &str, extension: &str) -> String {
    format!("/{module};component/{dotted_path}.{extension}")
}

/// Resolves the configured translations root to a directory path.
///
/// Empty configuration yields `None`. Relative roots resolve against the
/// running executable's directory, falling back to the path as given when
/// that directory is unknown.
pub fn resolve_translations_root(configured: &str) -> Option<PathBuf> {
    if configured.is_empty() {
        return None;
    }

    let path = PathBuf::from(configured);
    if path.is_absolute() {
        return Some(path);
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            return Some(dir.join(path));
        }
    }

    Some(path)
}

/// Derives the translation file path for `identity` under `locale`.
///
/// Without an override directory, dotted component identities become nested
/// directories (all `.`-separated segments except the filename stem and
/// extension), a leading `;`-separated module qualifier is stripped, and a
/// repeated qualifier prefix on the identity is dropped case-insensitively.
/// With an override directory, only the trailing file name of the identity
/// is kept and the override directory is prepended instead.
///
/// Fails with [`Error::PathResolution`] when the identity is empty or lacks
/// the native extension, when the locale is invalid, or when no translations
/// root is configured.
pub fn translation_file_path(
    identity: &str,
    locale: &Locale,
    config: &Configuration,
    override_dir: &str,
    native_extension: &str,
    translation_extension: &str,
) -> Result<PathBuf, Error> {
    if identity.is_empty() {
        return Err(Error::path_resolution("resource identity is empty"));
    }

    let mut name = identity.replace('\\', "/");

    if override_dir.is_empty() {
        let mut qualifier = String::new();
        if let Some(sep) = name.rfind(';') {
            qualifier = name[..sep].trim_start_matches('/').to_string();
            name = name[sep + 1..].to_string();
        }

        if let Some(rest) = name.strip_prefix("component/") {
            let mut rest = rest.to_string();

            // an identity repeating its module qualifier as a namespace
            // prefix collapses onto the qualifier-relative part
            if !qualifier.is_empty() {
                let prefix = format!("{qualifier}.");
                if starts_with_ignore_ascii_case(&rest, &prefix) {
                    rest = rest[prefix.len()..].to_string();
                }
            }

            name = expand_dotted_segments(&rest);
        }
    } else {
        // keep only the trailing file name of the identity: drop directory
        // segments first, then any dotted-namespace prefix
        if let Some(slash) = name.rfind('/') {
            name = name[slash + 1..].to_string();
        }
        if let Some(last) = name.rfind('.') {
            if let Some(prev) = name[..last].rfind('.') {
                name = name[prev + 1..].to_string();
            }
        }

        let dir = override_dir.replace('\\', "/");
        name = format!("{}/{}", dir.trim_end_matches('/'), name);
    }

    let mut name = name.trim_start_matches('/').to_string();

    // avoid double-prefixing when the identity already encodes the root
    let root = config.translations_root.replace('\\', "/");
    let root = root.trim_start_matches('/').trim_end_matches('/');
    if !root.is_empty() {
        let prefix = format!("{root}/");
        if starts_with_ignore_ascii_case(&name, &prefix) {
            name = name[prefix.len()..].to_string();
        }
    }

    if !locale.is_valid() {
        return Err(Error::path_resolution(format!(
            "cannot derive a translation path for the invalid locale (identity `{identity}`)"
        )));
    }

    let root_dir = resolve_translations_root(&config.translations_root).ok_or_else(|| {
        Error::path_resolution(format!(
            "no translations root is configured (identity `{identity}`)"
        ))
    })?;

    // swap the native suffix for the translation suffix
    let native_suffix = format!(".{native_extension}");
    if ends_with_ignore_ascii_case(&name, &native_suffix) {
        name.truncate(name.len() - native_suffix.len());
    } else {
        return Err(Error::path_resolution(format!(
            "identity `{identity}` does not end with the native `.{native_extension}` extension"
        )));
    }
    name.push('.');
    name.push_str(translation_extension);

    let mut path = root_dir.join(locale.identifier());
    for segment in name.split('/').filter(|segment| !segment.is_empty()) {
        path.push(segment);
    }

    Ok(path)
}

fn starts_with_ignore_ascii_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn ends_with_ignore_ascii_case(value: &str, suffix: &str) -> bool {
    value
        .len()
        .checked_sub(suffix.len())
        .and_then(|start| value.get(start..))
        .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix))
}

// Dotted-namespace identities nest into directories: every `.` except the
// extension separator becomes a path separator.
fn expand_dotted_segments(name: &str) -> String {
    match name.rfind('.') {
        Some(last) => {
            let (head, tail) = name.split_at(last);
            format!("{}{}", head.replace('.', "/"), tail)
        }
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OverlayPolicy;

    fn config(root: &str) -> Configuration {
        Configuration {
            default_locale: None,
            translations_root: root.to_string(),
            overlay_policy: OverlayPolicy::KeepNative,
        }
    }

    fn derive(identity: &str, locale: &str, root: &str, override_dir: &str) -> PathBuf {
        translation_file_path(
            identity,
            &Locale::from_name(locale),
            &config(root),
            override_dir,
            "xml",
            "tsd",
        )
        .expect("derivation should succeed")
    }

    #[test]
    fn test_component_identity_form() {
        assert_eq!(
            component_identity("myapp", "settings.general", "xml"),
            "/myapp;component/settings.general.xml"
        );
    }

    #[test]
    fn test_absolute_file_identity_under_root() {
        let path = derive("/opt/app/loc/app.xml", "en-US", "/opt/app/loc", "");
        assert_eq!(path, PathBuf::from("/opt/app/loc/en-US/app.tsd"));
    }

    #[test]
    fn test_component_identity_expands_dots() {
        let path = derive(
            "/myapp;component/settings.general.xml",
            "de-DE",
            "/opt/loc",
            "",
        );
        assert_eq!(path, PathBuf::from("/opt/loc/de-DE/settings/general.tsd"));
    }

    #[test]
    fn test_repeated_qualifier_prefix_is_dropped() {
        let path = derive(
            "/MyApp;component/myapp.settings.general.xml",
            "fr",
            "/opt/loc",
            "",
        );
        assert_eq!(path, PathBuf::from("/opt/loc/fr/settings/general.tsd"));
    }

    #[test]
    fn test_root_duplication_is_stripped() {
        let path = derive("/opt/loc/nested/app.xml", "fr", "/opt/loc", "");
        assert_eq!(path, PathBuf::from("/opt/loc/fr/nested/app.tsd"));
    }

    #[test]
    fn test_root_duplication_is_case_insensitive() {
        let path = derive("/OPT/LOC/app.xml", "fr", "/opt/loc", "");
        assert_eq!(path, PathBuf::from("/opt/loc/fr/app.tsd"));
    }

    #[test]
    fn test_override_directory_keeps_only_file_name() {
        let path = derive(
            "/myapp;component/myapp.settings.general.xml",
            "en",
            "/opt/loc",
            "extra/translations",
        );
        assert_eq!(
            path,
            PathBuf::from("/opt/loc/en/extra/translations/general.tsd")
        );
    }

    #[test]
    fn test_missing_native_extension_fails() {
        let result = translation_file_path(
            "/opt/loc/app.txt",
            &Locale::from_name("en"),
            &config("/opt/loc"),
            "",
            "xml",
            "tsd",
        );
        assert!(matches!(result, Err(Error::PathResolution(_))));
    }

    #[test]
    fn test_native_extension_match_is_case_insensitive() {
        let path = derive("/opt/loc/app.XML", "en", "/opt/loc", "");
        assert_eq!(path, PathBuf::from("/opt/loc/en/app.tsd"));
    }

    #[test]
    fn test_invalid_locale_fails() {
        let result = translation_file_path(
            "/opt/loc/app.xml",
            &Locale::invalid(),
            &config("/opt/loc"),
            "",
            "xml",
            "tsd",
        );
        assert!(matches!(result, Err(Error::PathResolution(_))));
    }

    #[test]
    fn test_unconfigured_root_fails() {
        let result = translation_file_path(
            "/opt/loc/app.xml",
            &Locale::from_name("en"),
            &config(""),
            "",
            "xml",
            "tsd",
        );
        assert!(matches!(result, Err(Error::PathResolution(_))));
    }

    #[test]
    fn test_empty_identity_fails() {
        let result = translation_file_path(
            "",
            &Locale::from_name("en"),
            &config("/opt/loc"),
            "",
            "xml",
            "tsd",
        );
        assert!(matches!(result, Err(Error::PathResolution(_))));
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let first = derive("/opt/loc/app.xml", "en-US", "/opt/loc", "");
        let second = derive("/opt/loc/app.xml", "en-US", "/opt/loc", "");
        assert_eq!(first, second);
    }

    #[test]
    fn test_locale_change_affects_only_locale_segment() {
        let en = derive("/opt/loc/app.xml", "en", "/opt/loc", "");
        let de = derive("/opt/loc/app.xml", "de", "/opt/loc", "");
        assert_eq!(en, PathBuf::from("/opt/loc/en/app.tsd"));
        assert_eq!(de, PathBuf::from("/opt/loc/de/app.tsd"));
    }

    #[test]
    fn test_resolve_translations_root() {
        assert_eq!(resolve_translations_root(""), None);
        assert_eq!(
            resolve_translations_root("/opt/loc"),
            Some(PathBuf::from("/opt/loc"))
        );
        // relative roots resolve against the executable directory
        let relative = resolve_translations_root("localization").expect("relative root resolves");
        assert!(relative.ends_with("localization"));
    }
}
