use std::collections::{BTreeMap, BTreeSet};
use std::fs;

use intake_core::{standard_catalog, Advance, OnboardingFlow, ProfileStorage};
use intake_domain::{AnswerValue, ProfileRecord, GOALS_KEY};
use intake_storage_json::JsonProfileStorage;
use tempfile::tempdir;

fn sample_record(name: &str) -> ProfileRecord {
    let mut answers = BTreeMap::new();
    answers.insert("fullName".to_string(), AnswerValue::Text(name.to_string()));
    answers.insert(
        GOALS_KEY.to_string(),
        AnswerValue::Selections(BTreeSet::from(["Flexibility".to_string()])),
    );
    ProfileRecord::new(answers)
}

#[test]
fn json_storage_saves_and_loads_profile() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonProfileStorage::new(dir.path().join("profile")).expect("create storage");

    assert!(storage.load_profile().expect("load").is_none());
    assert!(!storage.is_flow_complete().expect("marker"));

    let record = sample_record("Ana");
    storage.persist_profile(&record).expect("persist");
    storage.mark_flow_complete().expect("mark");

    let loaded = storage.load_profile().expect("load").expect("profile");
    assert_eq!(loaded, record);
    assert!(storage.is_flow_complete().expect("marker"));
    assert!(storage.profile_path().exists());
    assert!(!storage.profile_path().with_extension("json.tmp").exists());
}

#[test]
fn json_storage_backs_up_overwritten_profiles() {
    let dir = tempdir().expect("tempdir");
    let storage =
        JsonProfileStorage::with_retention(dir.path().to_path_buf(), 2).expect("create storage");

    storage.persist_profile(&sample_record("First")).expect("first");
    assert!(storage.list_backups().expect("backups").is_empty());

    storage.persist_profile(&sample_record("Second")).expect("second");
    let backups = storage.list_backups().expect("backups");
    assert_eq!(backups.len(), 1);
    assert!(backups[0].created_at.is_some());

    let backed_up: ProfileRecord =
        serde_json::from_str(&fs::read_to_string(&backups[0].path).expect("read backup"))
            .expect("parse backup");
    assert_eq!(backed_up.text("fullName"), Some("First"));

    let current = storage.load_profile().expect("load").expect("profile");
    assert_eq!(current.text("fullName"), Some("Second"));
}

#[test]
fn rapid_overwrites_keep_distinct_backups_up_to_retention() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonProfileStorage::new(dir.path().to_path_buf()).expect("create storage");

    for name in ["First", "Second", "Third", "Fourth", "Fifth"] {
        storage.persist_profile(&sample_record(name)).expect("persist");
    }

    let backups = storage.list_backups().expect("backups");
    assert_eq!(backups.len(), 3);
    let names: BTreeSet<&str> = backups.iter().map(|backup| backup.name.as_str()).collect();
    assert_eq!(names.len(), 3);

    let contents: Vec<String> = backups
        .iter()
        .map(|backup| {
            let record: ProfileRecord =
                serde_json::from_str(&fs::read_to_string(&backup.path).expect("read backup"))
                    .expect("parse backup");
            record.text("fullName").expect("name").to_string()
        })
        .collect();
    assert_eq!(contents, vec!["Fourth", "Third", "Second"]);

    let current = storage.load_profile().expect("load").expect("profile");
    assert_eq!(current.text("fullName"), Some("Fifth"));
}

#[test]
fn json_storage_discard_and_reset_remove_files() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonProfileStorage::new(dir.path().to_path_buf()).expect("create storage");

    storage.persist_profile(&sample_record("Ana")).expect("persist");
    storage.discard_profile().expect("discard");
    assert!(storage.load_profile().expect("load").is_none());
    storage.discard_profile().expect("discard is idempotent");

    storage.persist_profile(&sample_record("Ana")).expect("persist");
    storage.mark_flow_complete().expect("mark");
    storage.reset().expect("reset");
    assert!(!storage.is_flow_complete().expect("marker"));
    assert!(storage.load_profile().expect("load").is_none());
}

#[test]
fn json_storage_reports_corrupt_profile() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonProfileStorage::new(dir.path().to_path_buf()).expect("create storage");
    fs::write(storage.profile_path(), "{ not json").expect("write");

    assert!(storage.load_profile().is_err());
}

#[test]
fn standard_flow_persists_through_json_storage() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonProfileStorage::new(dir.path().to_path_buf()).expect("create storage");
    let catalog = standard_catalog(false).expect("catalog");
    let mut flow = OnboardingFlow::new(&catalog);

    let mut outcome = flow.advance(&storage).expect("advance");
    while !matches!(outcome, Advance::Completed(_)) {
        if let Advance::Blocked(_) = outcome {
            flow.toggle_option(GOALS_KEY, "Better sleep");
        }
        if flow.position() == 5 {
            flow.select_frequency(3);
        }
        outcome = flow.advance(&storage).expect("advance");
    }

    let stored = storage.load_profile().expect("load").expect("profile");
    assert_eq!(stored.frequency(), Some(3));
    assert!(stored.goals().expect("goals").contains("Better sleep"));
    let marker = storage.load_marker().expect("marker").expect("marker present");
    assert!(marker.completed);
}
