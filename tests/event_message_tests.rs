// Tests for the JSON shapes published to subscribers

use voicenote::events::messages::{RecordingSavedMessage, StateChangedMessage};

#[test]
fn test_state_changed_serialization() {
    let msg = StateChangedMessage {
        state: "idle".to_string(),
        previous: "recording".to_string(),
        reason: "interruption".to_string(),
        timestamp: "2026-08-07T14:30:00Z".to_string(),
    };

    let json = serde_json::to_string(&msg).unwrap();
    assert!(json.contains("\"state\":\"idle\""));
    assert!(json.contains("\"previous\":\"recording\""));
    assert!(json.contains("\"reason\":\"interruption\""));

    let deserialized: StateChangedMessage = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized.state, "idle");
    assert_eq!(deserialized.previous, "recording");
    assert_eq!(deserialized.reason, "interruption");
    assert_eq!(deserialized.timestamp, "2026-08-07T14:30:00Z");
}

#[test]
fn test_recording_saved_serialization() {
    let msg = RecordingSavedMessage {
        uri: "/tmp/recordings/note-1234.wav".to_string(),
        duration_secs: 12.5,
        timestamp: "2026-08-07T14:30:05Z".to_string(),
    };

    let json = serde_json::to_string(&msg).unwrap();
    assert!(json.contains("note-1234.wav"));
    assert!(json.contains("12.5"));

    let deserialized: RecordingSavedMessage = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized.uri, "/tmp/recordings/note-1234.wav");
    assert_eq!(deserialized.duration_secs, 12.5);
}

#[test]
fn test_state_changed_deserialization_from_wire() {
    let json = r#"{
        "state": "recording",
        "previous": "idle",
        "reason": "user",
        "timestamp": "2026-08-07T09:00:00Z"
    }"#;

    let msg: StateChangedMessage = serde_json::from_str(json).unwrap();
    assert_eq!(msg.state, "recording");
    assert_eq!(msg.previous, "idle");
    assert_eq!(msg.reason, "user");
}
