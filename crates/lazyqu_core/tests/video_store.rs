use chrono::NaiveDate;
use lazyqu_core::{
    BlobStorage, MemoryBlobStorage, NewVideoPlan, RepoError, SqliteBlobStorage, UploadDay,
    VideoId, VideoStore, DEFAULT_STORAGE_KEY,
};

fn week(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

fn new_video(title: &str, week_start: &str) -> NewVideoPlan {
    NewVideoPlan {
        title: title.to_string(),
        description: "A video about testing".to_string(),
        tags: vec!["a".to_string(), "b".to_string()],
        week_start: week(week_start),
        upload_day: UploadDay::Monday,
    }
}

fn empty_store() -> VideoStore<MemoryBlobStorage> {
    VideoStore::load(MemoryBlobStorage::new(), DEFAULT_STORAGE_KEY)
}

#[test]
fn add_to_empty_store_returns_generated_record() {
    let mut store = empty_store();
    let created = store.add(new_video("My First Video", "2025-01-05")).unwrap();

    let all = store.all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], created);
    assert_eq!(all[0].title, "My First Video");
    assert_eq!(all[0].description, "A video about testing");
    assert_eq!(all[0].tags, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(all[0].week_start, week("2025-01-05"));
    assert!(!all[0].id.as_str().is_empty());
}

#[test]
fn add_assigns_fresh_ids_and_persists_each_time() {
    let mut store = empty_store();
    let first = store.add(new_video("First", "2025-01-05")).unwrap();
    let second = store.add(new_video("Second", "2025-01-05")).unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(store.len(), 2);
    assert_eq!(store.storage().save_count(), 2);
}

#[test]
fn add_rejects_blank_tags_without_writing() {
    let mut store = empty_store();
    let mut input = new_video("Blank tag", "2025-01-05");
    input.tags.push(" ".to_string());

    let err = store.add(input).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(store.is_empty());
    assert_eq!(store.storage().save_count(), 0);
}

#[test]
fn update_replaces_fields_but_keeps_created_at() {
    let mut store = empty_store();
    let created = store.add(new_video("Draft title", "2025-01-05")).unwrap();

    let mut edited = created.clone();
    edited.title = "Final title".to_string();
    edited.week_start = week("2025-01-12");
    edited.upload_day = UploadDay::Friday;
    edited.created_at = chrono::Utc::now() + chrono::Duration::days(30);

    let saved = store.update(edited).unwrap();
    assert_eq!(saved.created_at, created.created_at);

    let stored = store.get(&created.id).unwrap();
    assert_eq!(stored.title, "Final title");
    assert_eq!(stored.week_start, week("2025-01-12"));
    assert_eq!(stored.upload_day, UploadDay::Friday);
    assert_eq!(stored.created_at, created.created_at);
}

#[test]
fn update_unknown_id_signals_not_found_and_leaves_collection() {
    let mut store = empty_store();
    let created = store.add(new_video("Keep me", "2025-01-05")).unwrap();
    let before = store.all();
    let saves_before = store.storage().save_count();

    let mut ghost = created.clone();
    ghost.id = VideoId::new("missing");
    ghost.title = "Ghost".to_string();

    assert_eq!(
        store.update(ghost).unwrap_err(),
        RepoError::NotFound(VideoId::new("missing"))
    );
    assert_eq!(store.all(), before);
    assert_eq!(store.storage().save_count(), saves_before);
}

#[test]
fn remove_deletes_present_and_ignores_absent() {
    let mut store = empty_store();
    let created = store.add(new_video("Delete me", "2025-01-05")).unwrap();

    assert!(store.remove(&VideoId::new("absent")).is_none());
    assert_eq!(store.len(), 1);

    let removed = store.remove(&created.id).unwrap();
    assert_eq!(removed.id, created.id);
    assert!(store.is_empty());
}

#[test]
fn remove_by_week_removes_all_and_only_matching_records() {
    let mut store = empty_store();
    store.add(new_video("A", "2025-01-05")).unwrap();
    let kept = store.add(new_video("B", "2025-01-12")).unwrap();
    store.add(new_video("C", "2025-01-05")).unwrap();

    let removed = store.remove_by_week(week("2025-01-05"));
    assert_eq!(removed, 2);
    assert_eq!(store.all(), vec![kept]);

    assert_eq!(store.remove_by_week(week("2025-03-02")), 0);
    assert_eq!(store.len(), 1);
}

#[test]
fn all_returns_a_defensive_copy() {
    let mut store = empty_store();
    store.add(new_video("Original", "2025-01-05")).unwrap();

    let mut copy = store.all();
    copy[0].title = "Mutated".to_string();
    copy.clear();

    assert_eq!(store.len(), 1);
    assert_eq!(store.all()[0].title, "Original");
}

#[test]
fn persisted_blob_reloads_identically() {
    let mut store = empty_store();
    store.add(new_video("One", "2025-01-05")).unwrap();
    store.add(new_video("Two", "2025-01-12")).unwrap();
    let before = store.all();

    let blob = store.storage().blob(DEFAULT_STORAGE_KEY).unwrap().to_string();
    let reloaded = VideoStore::load(
        MemoryBlobStorage::new().with_blob(DEFAULT_STORAGE_KEY, blob),
        DEFAULT_STORAGE_KEY,
    );
    assert_eq!(reloaded.all(), before);
}

#[test]
fn sqlite_backed_store_round_trips_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planner.db");

    let before = {
        let storage = SqliteBlobStorage::open(&path).unwrap();
        let mut store = VideoStore::load(storage, DEFAULT_STORAGE_KEY);
        store.add(new_video("Persisted", "2025-01-05")).unwrap();
        store.all()
    };

    let storage = SqliteBlobStorage::open(&path).unwrap();
    let store = VideoStore::load(storage, DEFAULT_STORAGE_KEY);
    assert_eq!(store.all(), before);
    assert!(!store.is_degraded());
}

#[test]
fn malformed_or_incompatible_blobs_load_as_empty() {
    let blobs = [
        "not json".to_string(),
        r#"{"videos": []}"#.to_string(),
        r#"[{"id": "1", "title": "No dates"}]"#.to_string(),
        duplicate_id_blob(),
    ];

    for blob in blobs {
        let store = VideoStore::load(
            MemoryBlobStorage::new().with_blob(DEFAULT_STORAGE_KEY, blob.clone()),
            DEFAULT_STORAGE_KEY,
        );
        assert!(store.is_empty(), "blob should be discarded: {blob}");
    }
}

#[test]
fn read_failure_starts_empty_and_degraded() {
    let storage = MemoryBlobStorage::new().with_blob(DEFAULT_STORAGE_KEY, "[]");
    storage.faults().set_fail_reads(true);

    let store = VideoStore::load(storage, DEFAULT_STORAGE_KEY);
    assert!(store.is_empty());
    assert!(store.is_degraded());
    assert!(store.is_memory_only());
}

#[test]
fn read_failure_never_overwrites_stored_records() {
    let mut seeded = empty_store();
    seeded.add(new_video("Kept One", "2025-01-05")).unwrap();
    seeded.add(new_video("Kept Two", "2025-01-12")).unwrap();
    let blob = seeded.storage().blob(DEFAULT_STORAGE_KEY).unwrap().to_string();

    let storage = MemoryBlobStorage::new().with_blob(DEFAULT_STORAGE_KEY, blob.clone());
    let faults = storage.faults();
    faults.set_fail_reads(true);
    let mut store = VideoStore::load(storage, DEFAULT_STORAGE_KEY);
    faults.set_fail_reads(false);

    let created = store.add(new_video("Session Only", "2025-01-05")).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(&created.id).unwrap().title, "Session Only");
    store.remove_by_week(week("2025-01-05"));

    assert!(store.is_degraded());
    assert_eq!(store.storage().save_count(), 0);
    assert_eq!(store.storage().blob(DEFAULT_STORAGE_KEY), Some(blob.as_str()));

    let reloaded = VideoStore::load(
        MemoryBlobStorage::new().with_blob(DEFAULT_STORAGE_KEY, blob),
        DEFAULT_STORAGE_KEY,
    );
    let titles: Vec<String> = reloaded.all().into_iter().map(|video| video.title).collect();
    assert_eq!(titles, vec!["Kept One", "Kept Two"]);
}

#[test]
fn write_failure_keeps_memory_authoritative_until_recovery() {
    let mut store = empty_store();
    let faults = store.storage().faults();
    faults.set_fail_writes(true);

    let created = store.add(new_video("Offline", "2025-01-05")).unwrap();
    assert!(store.is_degraded());
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(&created.id).unwrap().title, "Offline");
    assert!(store.storage().load(DEFAULT_STORAGE_KEY).unwrap().is_none());

    faults.set_fail_writes(false);
    store.add(new_video("Online", "2025-01-05")).unwrap();
    assert!(!store.is_degraded());

    let blob = store.storage().blob(DEFAULT_STORAGE_KEY).unwrap();
    let saved: Vec<serde_json::Value> = serde_json::from_str(blob).unwrap();
    assert_eq!(saved.len(), 2);
}

fn duplicate_id_blob() -> String {
    serde_json::json!([
        {
            "id": "same",
            "title": "First copy",
            "description": "Duplicate identifiers",
            "weekStart": "2025-01-05",
            "createdAt": "2025-01-01T00:00:00Z"
        },
        {
            "id": "same",
            "title": "Second copy",
            "description": "Duplicate identifiers",
            "weekStart": "2025-01-05",
            "createdAt": "2025-01-01T00:00:00Z"
        }
    ])
    .to_string()
}
