// src/services/fallback.rs
use crate::message::Reply;

/// Produces a reply without touching the network. Used when the backend
/// cannot be reached or answers with something unusable.
pub trait FallbackResponder {
    fn respond(&self, text: &str) -> Reply;
}

impl<F> FallbackResponder for F
where
    F: Fn(&str) -> Reply,
{
    fn respond(&self, text: &str) -> Reply {
        self(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Crisis,
    Panic,
    SchoolStress,
    Sleep,
    Lonely,
    Overwhelmed,
    Greeting,
    Thanks,
    Unknown,
}

const CRISIS_PHRASES: &[&str] = &[
    "kill myself",
    "suicide",
    "suicidal",
    "end it all",
    "hurt myself",
    "self harm",
    "self-harm",
    "want to die",
    "don't want to live",
];
const PANIC_PHRASES: &[&str] = &["can't breathe", "heart racing", "heart is racing"];
const PANIC_WORDS: &[&str] = &[
    "panic", "panicking", "anxious", "anxiety", "nervous", "scared", "afraid", "worried",
    "worry", "shaking",
];
const SCHOOL_WORDS: &[&str] = &[
    "exam", "exams", "test", "tests", "homework", "school", "grades", "study", "studying",
    "finals", "teacher", "class",
];
const SLEEP_WORDS: &[&str] = &[
    "sleep", "insomnia", "tired", "awake", "nightmare", "nightmares", "exhausted",
];
const LONELY_WORDS: &[&str] = &[
    "sad", "lonely", "alone", "cry", "crying", "depressed", "nobody", "unhappy",
];
const OVERWHELM_PHRASES: &[&str] = &["too much"];
const OVERWHELM_WORDS: &[&str] = &["overwhelmed", "stressed", "stress", "pressure", "burnout"];
const GREETING_WORDS: &[&str] = &["hi", "hello", "hey", "hiya", "yo"];
const THANKS_WORDS: &[&str] = &["thanks", "thank", "thx", "ty"];

/// Topics offered when nothing in the message was recognised.
pub const TOPIC_MENU: &[&str] = &[
    "Breathing exercise",
    "Grounding 5-4-3-2-1",
    "Trouble sleeping",
    "Exam stress",
];

pub fn detect_intent(msg: &str) -> Intent {
    let msg_lower = msg.to_lowercase().replace('\u{2019}', "'");
    let words: Vec<&str> = msg_lower
        .split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '-'))
        .filter(|w| !w.is_empty())
        .collect();

    let has_word = |list: &[&str]| words.iter().any(|w| list.contains(w));
    let has_phrase = |list: &[&str]| list.iter().any(|p| msg_lower.contains(p));

    if has_phrase(CRISIS_PHRASES) {
        Intent::Crisis
    } else if has_phrase(PANIC_PHRASES) || has_word(PANIC_WORDS) {
        Intent::Panic
    } else if has_word(SCHOOL_WORDS) {
        Intent::SchoolStress
    } else if has_word(SLEEP_WORDS) {
        Intent::Sleep
    } else if has_word(LONELY_WORDS) {
        Intent::Lonely
    } else if has_phrase(OVERWHELM_PHRASES) || has_word(OVERWHELM_WORDS) {
        Intent::Overwhelmed
    } else if has_word(THANKS_WORDS) {
        Intent::Thanks
    } else if has_word(GREETING_WORDS) {
        Intent::Greeting
    } else {
        Intent::Unknown
    }
}

/// Keyword-matching responder that works offline.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedResponder;

impl FallbackResponder for RuleBasedResponder {
    fn respond(&self, text: &str) -> Reply {
        generate_reply(detect_intent(text))
    }
}

pub fn generate_reply(intent: Intent) -> Reply {
    use Intent::*;

    match intent {
        Crisis => Reply::plain(
            "I'm really glad you told me. You deserve support right now: please reach out \
             to someone you trust or call your local emergency number or a crisis line.",
        ),
        Panic => Reply::plain(
            "That sounds really uncomfortable, and it will pass. Try breathing in for 4, \
             holding for 4, and breathing out for 6, a few times in a row.",
        ),
        SchoolStress => Reply::plain(
            "School pressure is a lot. Pick just one small task, set a 10-minute timer, \
             and give yourself a short break when it rings.",
        ),
        Sleep => Reply::plain(
            "Racing thoughts at night are common. Put the screen away, relax your shoulders \
             and jaw, and slowly count your breaths back from 50.",
        ),
        Lonely => Reply::plain(
            "I'm sorry you're feeling this way; your feelings make sense. Could you send a \
             quick message to someone you like, even just to say hi?",
        ),
        Overwhelmed => Reply::plain(
            "When everything piles up, write it all down and circle only the next step. \
             You don't have to solve it all today.",
        ),
        Greeting => Reply::plain("Hi! I'm here to help you feel calmer. What's on your mind?"),
        Thanks => Reply::plain("Anytime. I'm proud of you for taking care of yourself."),
        Unknown => Reply::plain(
            "I'm here with you. Tell me a bit more about what's going on, or pick \
             something to start with.",
        )
        .with_suggestions(TOPIC_MENU.iter().copied()),
    }
}
