use anxiety_copilot::services::transcript::{
    EntryBody, MemoryTranscript, Role, TerminalTranscript, Transcript, TranscriptEntry,
};
use serde_json::json;

#[test]
fn basic_transcript_flow() {
    let transcript = MemoryTranscript::new();
    assert!(transcript.is_empty());

    transcript.push_user("hello").unwrap();
    transcript.push_assistant("Hi! What's on your mind?").unwrap();
    transcript
        .push_suggestions(vec!["Breathing exercise".to_string()])
        .unwrap();

    let entries = transcript.entries();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].role, Role::User);
    assert_eq!(entries[1].role, Role::Assistant);
    assert_eq!(
        entries[2].body,
        EntryBody::Suggestions {
            items: vec!["Breathing exercise".to_string()]
        }
    );
}

#[test]
fn test_clones_share_history() {
    let transcript = MemoryTranscript::new();
    let view = transcript.clone();
    transcript.push_user("one").unwrap();
    assert_eq!(view.len(), 1);
    assert_eq!(view.entries(), vec![TranscriptEntry::user("one")]);
}

#[test]
fn test_entries_serialize_with_kind_tag() {
    let text = serde_json::to_value(TranscriptEntry::assistant("Try this.")).unwrap();
    assert_eq!(
        text,
        json!({"role": "assistant", "kind": "text", "text": "Try this."})
    );

    let suggestions = serde_json::to_value(TranscriptEntry::suggestions(vec![
        "Breathing exercise".to_string(),
        "Journaling".to_string(),
    ]))
    .unwrap();
    assert_eq!(
        suggestions,
        json!({
            "role": "assistant",
            "kind": "suggestions",
            "items": ["Breathing exercise", "Journaling"]
        })
    );

    let parsed: TranscriptEntry =
        serde_json::from_value(json!({"role": "user", "kind": "text", "text": "hi"})).unwrap();
    assert_eq!(parsed, TranscriptEntry::user("hi"));
}

#[test]
fn test_terminal_rendering() {
    let transcript = TerminalTranscript::new(Vec::new());
    transcript.push_user("I feel anxious").unwrap();
    transcript.push_assistant("Try deep breathing.").unwrap();
    transcript
        .push_suggestions(vec!["Breathing exercise".to_string(), "Journaling".to_string()])
        .unwrap();
    transcript.notice("+10 XP (total 10, streak 1)").unwrap();

    let output = String::from_utf8(transcript.into_inner()).unwrap();
    assert_eq!(
        output,
        "you> I feel anxious\n\
         copilot> Try deep breathing.\n   \
         suggestions:\n   \
         1. Breathing exercise\n   \
         2. Journaling\n\
         -- +10 XP (total 10, streak 1)\n"
    );
}
