// Unit tests for archive retention behavior

use chrono::Utc;
use voicenote::recorder::{ArchiveMode, Recording, RecordingArchive};

fn recording(uri: &str) -> Recording {
    Recording {
        uri: uri.to_string(),
        recorded_at: Utc::now(),
        duration_secs: 1.5,
    }
}

#[test]
fn test_keep_all_preserves_insertion_order() {
    let mut archive = RecordingArchive::new(ArchiveMode::KeepAll);
    assert!(archive.is_empty());

    archive.push(recording("a.wav"));
    archive.push(recording("b.wav"));
    archive.push(recording("c.wav"));

    assert_eq!(archive.len(), 3);

    let uris: Vec<String> = archive.list().into_iter().map(|r| r.uri).collect();
    assert_eq!(uris, vec!["a.wav", "b.wav", "c.wav"]);
    assert_eq!(archive.latest().unwrap().uri, "c.wav");
}

#[test]
fn test_latest_only_overwrites() {
    let mut archive = RecordingArchive::new(ArchiveMode::LatestOnly);

    archive.push(recording("a.wav"));
    assert_eq!(archive.len(), 1);

    archive.push(recording("b.wav"));
    assert_eq!(archive.len(), 1);
    assert_eq!(archive.latest().unwrap().uri, "b.wav");
    assert!(!archive.contains_uri("a.wav"));
}

#[test]
fn test_contains_uri() {
    let mut archive = RecordingArchive::new(ArchiveMode::KeepAll);
    archive.push(recording("a.wav"));

    assert!(archive.contains_uri("a.wav"));
    assert!(!archive.contains_uri("b.wav"));
}

#[test]
fn test_clear() {
    let mut archive = RecordingArchive::new(ArchiveMode::KeepAll);
    archive.push(recording("a.wav"));
    archive.push(recording("b.wav"));

    archive.clear();

    assert!(archive.is_empty());
    assert!(archive.latest().is_none());
}

#[test]
fn test_modes_report_themselves() {
    assert_eq!(
        RecordingArchive::new(ArchiveMode::KeepAll).mode(),
        ArchiveMode::KeepAll
    );
    assert_eq!(
        RecordingArchive::new(ArchiveMode::LatestOnly).mode(),
        ArchiveMode::LatestOnly
    );
}
