//! End-to-end locale switching over real files.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use indoc::indoc;
use langswitch::{
    Configuration, Error, Locale, LocalizationManager, OverlayPolicy, ResourceSource, StringTable,
};
use tempfile::TempDir;

const NATIVE: &str = indoc! {r#"
    <StringTable>
        <String Key="A" Value="a"/>
        <String Key="B" Value="b"/>
    </StringTable>
"#};

fn setup(policy: OverlayPolicy) -> (TempDir, Rc<LocalizationManager>, Rc<StringTable>) {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path().to_path_buf();

    let native_path = root.join("app.xml");
    fs::write(&native_path, NATIVE).expect("write native");

    let manager = LocalizationManager::create_isolated(Configuration {
        default_locale: None,
        translations_root: root.to_str().expect("utf-8 root").to_string(),
        overlay_policy: policy,
    });

    let table = StringTable::new();
    table
        .load_native(ResourceSource::file(&native_path), &manager)
        .expect("load native");

    (dir, manager, table)
}

fn write_overlay(root: &Path, locale: &str, pairs: &[(&str, &str)]) -> PathBuf {
    let dir = root.join(locale);
    fs::create_dir_all(&dir).expect("locale dir");
    let path = dir.join("app.tsd");

    let mut content = String::from("<StringTable>\n");
    for (key, value) in pairs {
        content.push_str(&format!("    <String Key=\"{key}\" Value=\"{value}\"/>\n"));
    }
    content.push_str("</StringTable>\n");
    fs::write(&path, content).expect("write overlay");
    path
}

#[test]
fn switching_between_two_locales_converges_on_the_second() {
    let (dir, manager, table) = setup(OverlayPolicy::KeepNative);
    write_overlay(dir.path(), "de", &[("A", "a-de"), ("B", "b-de")]);
    write_overlay(dir.path(), "fr", &[("A", "a-fr"), ("B", "b-fr")]);

    manager.change_locale(Locale::from_name("de"));
    manager.change_locale(Locale::from_name("fr"));

    assert_eq!(table.loaded_locale().identifier(), "fr");
    assert_eq!(table.get("A"), Some("a-fr".to_string()));
    assert_eq!(table.get("B"), Some("b-fr".to_string()));
}

#[test]
fn change_locale_is_broadcast_once() {
    let (dir, manager, table) = setup(OverlayPolicy::KeepNative);
    write_overlay(dir.path(), "de", &[("A", "a-de")]);

    let broadcasts = Rc::new(RefCell::new(0));
    let counter = broadcasts.clone();
    manager.on_locale_changed(move |_| *counter.borrow_mut() += 1);

    let de = Locale::from_name("de");
    manager.change_locale(de.clone());
    // deleting the overlay proves the second call performs no file I/O
    fs::remove_file(dir.path().join("de").join("app.tsd")).expect("remove overlay");
    manager.change_locale(de);

    assert_eq!(*broadcasts.borrow(), 1);
    assert_eq!(table.get("A"), Some("a-de".to_string()));
}

#[test]
fn policy_matrix_over_partial_overlay() {
    for (policy, expected_a, expected_b) in [
        (OverlayPolicy::KeepNative, "x", Some("b".to_string())),
        (OverlayPolicy::ClearNative, "x", Some(String::new())),
        (OverlayPolicy::RemoveNative, "x", None),
    ] {
        let (dir, manager, table) = setup(policy);
        write_overlay(dir.path(), "de", &[("A", "x")]);

        manager.change_locale(Locale::from_name("de"));

        assert_eq!(table.get("A"), Some(expected_a.to_string()), "{policy:?}");
        assert_eq!(table.get("B"), expected_b, "{policy:?}");
    }
}

#[test]
fn switching_back_to_invalid_restores_native_text() {
    let (dir, manager, table) = setup(OverlayPolicy::RemoveNative);
    write_overlay(dir.path(), "de", &[("A", "a-de")]);

    manager.change_locale(Locale::from_name("de"));
    assert_eq!(table.len(), 1);

    manager.change_locale(Locale::invalid());
    assert_eq!(table.len(), 2);
    assert_eq!(table.get("A"), Some("a".to_string()));
    assert_eq!(table.get("B"), Some("b".to_string()));
    assert!(!table.loaded_locale().is_valid());
}

#[test]
fn create_then_load_round_trip_applies_policy_to_empty_overlay() {
    let (_dir, _manager, table) = setup(OverlayPolicy::ClearNative);
    let de = Locale::from_name("de");

    table.create_translation(&de).expect("create");
    assert!(table.load_translation(&de).expect("load"));

    assert_eq!(table.loaded_locale().identifier(), "de");
    for (_, value) in table.enumerate() {
        assert_eq!(value, "");
    }
}

#[test]
fn missing_translation_file_keeps_prior_loaded_locale() {
    let (dir, manager, table) = setup(OverlayPolicy::KeepNative);
    write_overlay(dir.path(), "de", &[("A", "a-de")]);

    manager.change_locale(Locale::from_name("de"));
    assert_eq!(table.loaded_locale().identifier(), "de");

    // no file for "fr": current follows the request, loaded does not
    manager.change_locale(Locale::from_name("fr"));
    assert_eq!(table.current_locale().identifier(), "fr");
    assert_eq!(table.loaded_locale().identifier(), "de");
    assert_eq!(table.get("A"), Some("a-de".to_string()));
}

#[test]
fn dropped_table_is_pruned_on_next_change() {
    let (dir, manager, table) = setup(OverlayPolicy::KeepNative);
    write_overlay(dir.path(), "de", &[("A", "a-de")]);

    let second = StringTable::new();
    second
        .load_native(ResourceSource::file(dir.path().join("app.xml")), &manager)
        .expect("load second");
    assert_eq!(manager.target_count(), 2);

    drop(second);
    manager.change_locale(Locale::from_name("de"));

    assert_eq!(manager.target_count(), 1);
    assert_eq!(table.get("A"), Some("a-de".to_string()));
}

#[test]
fn several_tables_follow_the_same_manager() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();

    for name in ["menu", "dialogs"] {
        let content = format!(
            "<StringTable>\n    <String Key=\"title\" Value=\"{name}\"/>\n</StringTable>\n"
        );
        fs::write(root.join(format!("{name}.xml")), content).expect("write native");

        let locale_dir = root.join("de");
        fs::create_dir_all(&locale_dir).expect("locale dir");
        fs::write(
            locale_dir.join(format!("{name}.tsd")),
            format!("<StringTable>\n    <String Key=\"title\" Value=\"{name}-de\"/>\n</StringTable>\n"),
        )
        .expect("write overlay");
    }

    let manager = LocalizationManager::create_isolated(Configuration {
        default_locale: None,
        translations_root: root.to_str().expect("utf-8 root").to_string(),
        overlay_policy: OverlayPolicy::KeepNative,
    });

    let menu = StringTable::new();
    menu.load_native(ResourceSource::file(root.join("menu.xml")), &manager)
        .expect("load menu");
    let dialogs = StringTable::new();
    dialogs
        .load_native(ResourceSource::file(root.join("dialogs.xml")), &manager)
        .expect("load dialogs");

    manager.change_locale(Locale::from_name("de"));
    assert_eq!(menu.get("title"), Some("menu-de".to_string()));
    assert_eq!(dialogs.get("title"), Some("dialogs-de".to_string()));

    manager.change_locale(Locale::invalid());
    assert_eq!(menu.get("title"), Some("menu".to_string()));
    assert_eq!(dialogs.get("title"), Some("dialogs".to_string()));
}

#[test]
fn corrupt_overlay_propagates_but_does_not_block_other_tables() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();

    fs::write(root.join("good.xml"), NATIVE).expect("write native");
    fs::write(root.join("bad.xml"), NATIVE).expect("write native");

    let locale_dir = root.join("de");
    fs::create_dir_all(&locale_dir).expect("locale dir");
    fs::write(
        locale_dir.join("good.tsd"),
        "<StringTable>\n    <String Key=\"A\" Value=\"a-de\"/>\n</StringTable>\n",
    )
    .expect("write good overlay");
    fs::write(locale_dir.join("bad.tsd"), "<StringTable><String ").expect("write bad overlay");

    let manager = LocalizationManager::create_isolated(Configuration {
        default_locale: None,
        translations_root: root.to_str().expect("utf-8 root").to_string(),
        overlay_policy: OverlayPolicy::KeepNative,
    });

    let bad = StringTable::new();
    bad.load_native(ResourceSource::file(root.join("bad.xml")), &manager)
        .expect("load bad");
    let good = StringTable::new();
    good.load_native(ResourceSource::file(root.join("good.xml")), &manager)
        .expect("load good");

    // the broadcast swallows the bad table's parse failure and reaches the
    // good one; a direct load on the bad table surfaces the error
    manager.change_locale(Locale::from_name("de"));
    assert_eq!(good.get("A"), Some("a-de".to_string()));

    let result = bad.load_translation(&Locale::from_name("de"));
    assert!(matches!(result, Err(Error::XmlParse(_))));
}

#[test]
fn default_locale_is_applied_to_late_joining_tables() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    fs::write(root.join("app.xml"), NATIVE).expect("write native");
    write_overlay(root, "de", &[("A", "a-de")]);

    let manager = LocalizationManager::create_isolated(Configuration {
        default_locale: Some(Locale::from_name("de")),
        translations_root: root.to_str().expect("utf-8 root").to_string(),
        overlay_policy: OverlayPolicy::KeepNative,
    });

    let table = StringTable::new();
    table
        .load_native(ResourceSource::file(root.join("app.xml")), &manager)
        .expect("load native");

    assert_eq!(table.loaded_locale().identifier(), "de");
    assert_eq!(table.get("A"), Some("a-de".to_string()));
}

#[test]
fn updates_are_saved_and_survive_a_locale_round_trip() {
    let (dir, manager, table) = setup(OverlayPolicy::KeepNative);
    write_overlay(dir.path(), "de", &[("A", "a-de")]);

    manager.change_locale(Locale::from_name("de"));
    table
        .update_translations(vec![("A".to_string(), "edited".to_string())])
        .expect("update");
    table.save_translation().expect("save");

    manager.change_locale(Locale::invalid());
    assert_eq!(table.get("A"), Some("a".to_string()));

    manager.change_locale(Locale::from_name("de"));
    assert_eq!(table.get("A"), Some("edited".to_string()));
}
