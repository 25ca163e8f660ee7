use chrono::{NaiveDate, TimeZone, Utc};
use lazyqu_core::{select_week, UploadDay, VideoId, VideoPlan};

fn plan(id: &str, week_start: &str) -> VideoPlan {
    VideoPlan {
        id: VideoId::new(id),
        title: format!("Video {id}"),
        description: "Planned for the filter tests".to_string(),
        tags: Vec::new(),
        week_start: NaiveDate::parse_from_str(week_start, "%Y-%m-%d").unwrap(),
        upload_day: UploadDay::default(),
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
    }
}

#[test]
fn select_week_returns_matching_records_in_stored_order() {
    let videos = vec![
        plan("1", "2025-01-05"),
        plan("2", "2025-01-12"),
        plan("3", "2025-01-05"),
    ];

    let selected = select_week(&videos, "2025-01-05");
    let ids: Vec<&str> = selected.iter().map(|video| video.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
}

#[test]
fn empty_selection_yields_empty_sequence() {
    let videos = vec![plan("1", "2025-01-05")];
    assert!(select_week(&videos, "").is_empty());
    assert!(select_week(&[], "").is_empty());
}

#[test]
fn malformed_or_unmatched_selection_yields_empty_sequence() {
    let videos = vec![plan("1", "2025-01-05")];
    assert!(select_week(&videos, "2025-1-5").is_empty());
    assert!(select_week(&videos, "2025-01-19").is_empty());
}

#[test]
fn padded_selection_does_not_match() {
    let videos = vec![plan("1", "2025-01-05")];
    assert_eq!(select_week(&videos, "2025-01-05").len(), 1);
    assert!(select_week(&videos, " 2025-01-05 ").is_empty());
    assert!(select_week(&videos, "2025-01-05\t").is_empty());
}

#[test]
fn select_week_does_not_touch_input() {
    let videos = vec![plan("1", "2025-01-05"), plan("2", "2025-01-12")];
    let snapshot = videos.clone();
    let _ = select_week(&videos, "2025-01-12");
    assert_eq!(videos, snapshot);
}
