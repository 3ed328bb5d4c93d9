use anxiety_copilot::services::fallback::{
    FallbackResponder, Intent, RuleBasedResponder, TOPIC_MENU, detect_intent, generate_reply,
};

#[test]
fn test_detect_intent() {
    assert_eq!(detect_intent("Hello there"), Intent::Greeting);
    assert_eq!(detect_intent("I feel anxious"), Intent::Panic);
    assert_eq!(detect_intent("I can't breathe properly"), Intent::Panic);
    assert_eq!(detect_intent("I have a big exam tomorrow"), Intent::SchoolStress);
    assert_eq!(detect_intent("I can never fall asleep, no sleep at all"), Intent::Sleep);
    assert_eq!(detect_intent("I feel so lonely"), Intent::Lonely);
    assert_eq!(detect_intent("Everything is too much right now"), Intent::Overwhelmed);
    assert_eq!(detect_intent("thank you!"), Intent::Thanks);
    assert_eq!(detect_intent("purple elephants"), Intent::Unknown);
}

#[test]
fn test_intent_is_case_and_punctuation_insensitive() {
    assert_eq!(detect_intent("PANIC!!!"), Intent::Panic);
    assert_eq!(detect_intent("hey, you there?"), Intent::Greeting);
    assert_eq!(detect_intent("I can\u{2019}t breathe"), Intent::Panic);
}

#[test]
fn test_crisis_language_wins() {
    assert_eq!(
        detect_intent("hi, I'm anxious and I want to hurt myself"),
        Intent::Crisis
    );
    let reply = generate_reply(Intent::Crisis);
    assert!(reply.text.contains("crisis line"));
    assert!(reply.suggest.is_empty());
}

#[test]
fn test_panic_ranks_above_school_stress() {
    assert_eq!(detect_intent("I'm nervous about my exam"), Intent::Panic);
}

#[test]
fn test_recognised_intents_have_no_suggestions() {
    for intent in [
        Intent::Crisis,
        Intent::Panic,
        Intent::SchoolStress,
        Intent::Sleep,
        Intent::Lonely,
        Intent::Overwhelmed,
        Intent::Greeting,
        Intent::Thanks,
    ] {
        let reply = generate_reply(intent);
        assert!(!reply.text.is_empty(), "{intent:?} has no text");
        assert!(reply.suggest.is_empty(), "{intent:?} carries suggestions");
    }
}

#[test]
fn test_unknown_offers_topic_menu() {
    let reply = RuleBasedResponder.respond("qwerty");
    assert!(reply.text.contains("Tell me a bit more"));
    assert_eq!(reply.suggest, TOPIC_MENU);
}

#[test]
fn test_responder_is_deterministic() {
    let responder = RuleBasedResponder;
    assert_eq!(responder.respond("I feel anxious"), responder.respond("I feel anxious"));
    assert_eq!(
        responder.respond("I feel anxious").text,
        generate_reply(Intent::Panic).text
    );
}
