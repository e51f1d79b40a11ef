//! Integration tests for the shelf-core public interface.
//!
//! These exercise the codec, the shortcut mapping and the store together
//! against real files in a temporary Steam layout.

use shelf_core::platform::{list_user_ids, shortcuts_path};
use shelf_core::vdf::DiagnosticKind;
use shelf_core::{
    decode, decode_strict, decode_with_diagnostics, encode, generate_id, shortcut, KeyValue,
    Section, ShelfError, ShortcutRecord, ShortcutStore, StoreOptions,
};
use tempfile::TempDir;

/// Create a fake Steam root with one user directory.
fn create_steam_root(user_id: u32) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    std::fs::create_dir_all(
        temp_dir
            .path()
            .join("userdata")
            .join(user_id.to_string())
            .join("config"),
    )
    .unwrap();
    temp_dir
}

fn sample_records() -> Vec<ShortcutRecord> {
    let mut celeste = ShortcutRecord::new("Celeste", "\"/games/celeste/Celeste\"", "\"/games/celeste/\"");
    celeste.add_tag("Favorites");
    celeste.last_play_time = 1_700_000_000;

    let mut hades = ShortcutRecord::new("Hades", "C:\\Games\\Hades\\Hades.exe", "C:\\Games\\Hades");
    hades.launch_options = "-vulkan".to_string();
    hades.is_hidden = 1;

    vec![celeste, hades, ShortcutRecord::new("Untitled", "", "")]
}

#[test]
fn test_appid_always_has_high_bit() {
    for (name, exe) in [("", ""), ("Game", "game.exe"), ("A", "/very/long/path/to/a")] {
        let id = generate_id(name, exe);
        assert_eq!(id & 0x8000_0000, 0x8000_0000);
        assert_eq!(id, generate_id(name, exe));
    }
}

#[test]
fn test_simple_string_bytes() {
    let mut root = Section::new();
    root.insert("name".into(), "test".into());

    let bytes = encode(&root);
    assert_eq!(bytes, b"\x01name\x00test\x00\x08");
    assert_eq!(decode(&bytes), root);
}

#[test]
fn test_integer_width_selection() {
    let mut root = Section::new();
    root.insert("zero".into(), 0i64.into());
    root.insert("big".into(), i64::MAX.into());

    let bytes = encode(&root);
    assert_eq!(&bytes[..10], b"\x02zero\x00\x00\x00\x00\x00");
    assert_eq!(bytes[10], 0x07);
}

#[test]
fn test_negative_one_reads_back_unsigned() {
    let mut root = Section::new();
    root.insert("n".into(), (-1i32).into());

    let decoded = decode(&encode(&root));
    assert_eq!(decoded["n"], KeyValue::Int32(4_294_967_295));
}

#[test]
fn test_records_roundtrip_through_tree() {
    let records = sample_records();
    let tree = shortcut::to_list(&records);

    let list = tree["shortcuts"].as_section().unwrap();
    let keys: Vec<_> = list.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["0", "1", "2"]);

    let decoded = decode(&encode(&tree));
    assert_eq!(shortcut::from_list(&decoded), records);
}

#[test]
fn test_empty_tags_survive_roundtrip() {
    let record = ShortcutRecord::new("NoTags", "x", "/");
    let decoded = decode(&encode(&shortcut::to_list(&[record])));

    let entry = decoded["shortcuts"].as_section().unwrap()["0"]
        .as_section()
        .unwrap();
    assert_eq!(entry.get("tags"), Some(&KeyValue::Section(Section::new())));
}

#[test]
fn test_truncated_string_keeps_partial_value() {
    let decoded = decode(b"\x01name\x00incomplete");
    assert_eq!(decoded["name"], KeyValue::String("incomplete".into()));
}

#[test]
fn test_strict_decode_names_offending_field() {
    let mut bytes = encode(&shortcut::to_list(&sample_records()));
    // Cut inside the first record, just after the appid tag and key.
    let cut = bytes
        .windows(b"appid\x00".len())
        .position(|w| w == b"appid\x00")
        .unwrap()
        + b"appid\x00".len()
        + 2;
    bytes.truncate(cut);

    match decode_strict(&bytes) {
        Err(ShelfError::Malformed { path, kind, .. }) => {
            assert_eq!(path, "shortcuts.0.appid");
            assert_eq!(kind, DiagnosticKind::TruncatedInteger { width: 4 });
        }
        other => panic!("expected malformed error, got {:?}", other),
    }

    let lenient = decode_with_diagnostics(&bytes);
    assert!(!lenient.is_clean());
    assert_eq!(shortcut::from_list(&lenient.section)[0].appid, 0);
}

#[test]
fn test_store_roundtrip_in_steam_layout() {
    let steam_root = create_steam_root(42);
    assert_eq!(list_user_ids(steam_root.path()).unwrap(), vec![42]);

    let path = shortcuts_path(steam_root.path(), 42);
    let mut store = ShortcutStore::open(&path, StoreOptions::default()).unwrap();
    assert!(store.is_empty());

    for record in sample_records() {
        store.add(record);
    }
    store.save().unwrap();

    let reopened = ShortcutStore::open(&path, StoreOptions::default().strict(true)).unwrap();
    assert_eq!(reopened.records(), sample_records().as_slice());
    assert_eq!(reopened.records()[0].tag_names().collect::<Vec<_>>(), vec!["Favorites"]);
}

#[test]
fn test_store_save_keeps_backup_of_previous_file() {
    let steam_root = create_steam_root(7);
    let path = shortcuts_path(steam_root.path(), 7);

    let mut store = ShortcutStore::open(&path, StoreOptions::default()).unwrap();
    store.add(ShortcutRecord::new("First", "first.exe", "/"));
    store.save().unwrap();
    let first_bytes = std::fs::read(&path).unwrap();

    store.add(ShortcutRecord::new("Second", "second.exe", "/"));
    store.save().unwrap();

    let backup = std::fs::read(path.with_extension("vdf.bak")).unwrap();
    assert_eq!(backup, first_bytes);
    assert_eq!(ShortcutStore::open(&path, StoreOptions::default()).unwrap().len(), 2);
}

#[test]
fn test_store_without_backup_writes_single_file() {
    let steam_root = create_steam_root(7);
    let path = shortcuts_path(steam_root.path(), 7);
    let options = StoreOptions::default().keep_backup(false);

    let mut store = ShortcutStore::open(&path, options).unwrap();
    store.add(ShortcutRecord::new("Only", "only.exe", "/"));
    store.save().unwrap();
    store.save().unwrap();

    let files: Vec<_> = std::fs::read_dir(path.parent().unwrap())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(files, vec!["shortcuts.vdf".to_string()]);
}

#[test]
fn test_validation_rejects_empty_scalar_key() {
    let mut root = Section::new();
    root.insert(String::new(), "orphan".into());

    assert!(matches!(
        shelf_core::vdf::validate(&root),
        Err(ShelfError::Validation { .. })
    ));
    // The encoder itself still accepts it.
    assert_eq!(encode(&root), b"\x01\x00orphan\x00\x08");
}
