use serde_json::json;
use tempfile::tempdir;

use rulescope_store::session::{FileStorage, MemoryStorage};
use rulescope_store::store::{ImportMode, RulesetStore};

fn manifest_with_two_rulesets() -> serde_json::Value {
    json!({
        "name": "Spotlight",
        "version": "1.4.0",
        "manifest_version": 3,
        "permissions": ["declarativeNetRequest"],
        "declarative_net_request": {
            "rule_resources": [
                {"path": "rules/ads.json", "id": 1, "enabled": true},
                {"path": "rules/track.json", "id": 2, "enabled": false}
            ]
        }
    })
}

fn memory_store() -> RulesetStore {
    RulesetStore::new(Box::new(MemoryStorage::new()))
}

#[test]
fn fresh_store_is_empty_and_first_visit() {
    let store = memory_store();
    assert!(store.rulesets().is_empty());
    assert!(store.is_first_visit());
}

#[test]
fn import_derives_entries_in_manifest_order() {
    let mut store = memory_store();
    store.import_rulesets(&manifest_with_two_rulesets(), ImportMode::Append);

    let entries = store.rulesets();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].file_name, "ads.json");
    assert_eq!(entries[0].file_path, "rules/ads.json");
    assert_eq!(entries[0].id, json!(1));
    assert!(entries[0].enabled);
    assert_eq!(entries[1].file_name, "track.json");
    assert!(!entries[1].enabled);
}

#[test]
fn pathless_file_name_is_the_whole_path() {
    let mut store = memory_store();
    let manifest = json!({
        "declarative_net_request": {
            "rule_resources": [{"path": "flat.json", "id": "r1", "enabled": true}]
        }
    });
    store.import_rulesets(&manifest, ImportMode::Append);
    assert_eq!(store.rulesets()[0].file_name, "flat.json");
}

#[test]
fn manifest_without_dnr_section_is_a_noop() {
    let mut store = memory_store();
    store.import_rulesets(&manifest_with_two_rulesets(), ImportMode::Append);
    store.import_rulesets(&json!({"name": "bare"}), ImportMode::Replace);
    // Even in replace mode nothing is cleared when there is nothing to import.
    assert_eq!(store.rulesets().len(), 2);
}

#[test]
fn append_mode_duplicates_on_reimport() {
    let mut store = memory_store();
    let manifest = manifest_with_two_rulesets();
    store.import_rulesets(&manifest, ImportMode::Append);
    store.import_rulesets(&manifest, ImportMode::Append);
    assert_eq!(store.rulesets().len(), 4);
    assert_eq!(store.rulesets()[2].file_name, "ads.json");
}

#[test]
fn replace_mode_discards_previous_entries() {
    let mut store = memory_store();
    store.import_rulesets(&manifest_with_two_rulesets(), ImportMode::Append);
    let other = json!({
        "declarative_net_request": {
            "rule_resources": [{"path": "rules/social.json", "id": 9, "enabled": true}]
        }
    });
    store.import_rulesets(&other, ImportMode::Replace);
    assert_eq!(store.rulesets().len(), 1);
    assert_eq!(store.rulesets()[0].file_name, "social.json");
}

#[test]
fn malformed_descriptors_are_skipped() {
    let mut store = memory_store();
    let manifest = json!({
        "declarative_net_request": {
            "rule_resources": [
                {"id": 1, "enabled": true},
                {"path": "rules/ok.json", "id": 2, "enabled": false},
                "bogus"
            ]
        }
    });
    store.import_rulesets(&manifest, ImportMode::Append);
    assert_eq!(store.rulesets().len(), 1);
    assert_eq!(store.rulesets()[0].file_name, "ok.json");
}

#[test]
fn clearing_is_idempotent() {
    let mut store = memory_store();
    store.import_rulesets(&manifest_with_two_rulesets(), ImportMode::Append);
    store.clear_rulesets();
    assert!(store.rulesets().is_empty());
    store.clear_rulesets();
    assert!(store.rulesets().is_empty());
}

#[test]
fn toggle_flips_and_flips_back() {
    let mut store = memory_store();
    store.import_rulesets(&manifest_with_two_rulesets(), ImportMode::Append);

    assert!(store.toggle_ruleset("ads.json"));
    assert!(!store.rulesets()[0].enabled);
    assert!(store.toggle_ruleset("ads.json"));
    assert!(store.rulesets()[0].enabled);
}

#[test]
fn toggle_with_unknown_name_changes_nothing() {
    let mut store = memory_store();
    store.import_rulesets(&manifest_with_two_rulesets(), ImportMode::Append);
    let before: Vec<bool> = store.rulesets().iter().map(|e| e.enabled).collect();

    assert!(!store.toggle_ruleset("missing.json"));
    let after: Vec<bool> = store.rulesets().iter().map(|e| e.enabled).collect();
    assert_eq!(before, after);
}

#[test]
fn toggle_with_duplicate_file_names_hits_the_first_match() {
    let mut store = memory_store();
    let manifest = json!({
        "declarative_net_request": {
            "rule_resources": [
                {"path": "a/rules.json", "id": 1, "enabled": true},
                {"path": "b/rules.json", "id": 2, "enabled": true}
            ]
        }
    });
    store.import_rulesets(&manifest, ImportMode::Append);
    store.toggle_ruleset("rules.json");
    assert!(!store.rulesets()[0].enabled);
    assert!(store.rulesets()[1].enabled);
}

#[test]
fn state_survives_reconstruction_over_the_same_session_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");

    {
        let mut store = RulesetStore::new(Box::new(FileStorage::new(path.clone())));
        store.import_rulesets(&manifest_with_two_rulesets(), ImportMode::Append);
        store.toggle_ruleset("track.json");
        store.set_first_visit(false);
    }

    let store = RulesetStore::new(Box::new(FileStorage::new(path)));
    assert!(!store.is_first_visit());
    let entries = store.rulesets();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].file_name, "ads.json");
    assert!(entries[0].enabled);
    assert_eq!(entries[1].file_name, "track.json");
    assert!(entries[1].enabled);
    assert_eq!(entries[1].id, json!(2));
}

#[test]
fn persisted_snapshot_uses_the_original_wire_names() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");

    let mut store = RulesetStore::new(Box::new(FileStorage::new(path.clone())));
    store.import_rulesets(&manifest_with_two_rulesets(), ImportMode::Append);

    let raw = std::fs::read_to_string(&path).unwrap();
    let snapshot: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let list: serde_json::Value =
        serde_json::from_str(snapshot["rulesetFilePaths"].as_str().unwrap()).unwrap();
    assert_eq!(list[0]["rulesetFileName"], json!("ads.json"));
    assert_eq!(list[0]["rulesetFilePath"], json!("rules/ads.json"));
    assert_eq!(list[0]["rulesetId"], json!(1));
    assert_eq!(list[0]["isEnabled"], json!(true));
    assert_eq!(snapshot["isFirstVisit"], json!("true"));
}

#[test]
fn corrupt_session_file_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{definitely not json").unwrap();

    let store = RulesetStore::new(Box::new(FileStorage::new(path)));
    assert!(store.rulesets().is_empty());
    assert!(store.is_first_visit());
}
