// src/services/transcript.rs
use std::{
    io::{self, Stdout, Write},
    sync::{Arc, Mutex, PoisonError, RwLock},
};

use serde::{Deserialize, Serialize};

use crate::error::TranscriptError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// What an entry shows. Suggestions are their own variant so renderers
/// never have to inspect text to find them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EntryBody {
    Text { text: String },
    Suggestions { items: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub role: Role,
    #[serde(flatten)]
    pub body: EntryBody,
}

impl TranscriptEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            body: EntryBody::Text { text: text.into() },
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            body: EntryBody::Text { text: text.into() },
        }
    }

    pub fn suggestions(items: Vec<String>) -> Self {
        Self {
            role: Role::Assistant,
            body: EntryBody::Suggestions { items },
        }
    }
}

/// Append-only conversation history.
pub trait Transcript {
    fn push(&self, entry: TranscriptEntry) -> Result<(), TranscriptError>;

    fn push_user(&self, text: &str) -> Result<(), TranscriptError> {
        self.push(TranscriptEntry::user(text))
    }

    fn push_assistant(&self, text: &str) -> Result<(), TranscriptError> {
        self.push(TranscriptEntry::assistant(text))
    }

    fn push_suggestions(&self, items: Vec<String>) -> Result<(), TranscriptError> {
        self.push(TranscriptEntry::suggestions(items))
    }
}

/// Transcript kept in memory. Clones share the same history.
#[derive(Debug, Clone, Default)]
pub struct MemoryTranscript {
    inner: Arc<RwLock<Vec<TranscriptEntry>>>,
}

impl MemoryTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of the history
    pub fn entries(&self) -> Vec<TranscriptEntry> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Transcript for MemoryTranscript {
    fn push(&self, entry: TranscriptEntry) -> Result<(), TranscriptError> {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
        Ok(())
    }
}

/// Renders entries as lines of text, one chat turn after another.
#[derive(Debug)]
pub struct TerminalTranscript<W = Stdout> {
    out: Mutex<W>,
}

impl TerminalTranscript<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalTranscript<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Status line that is not part of the conversation.
    pub fn notice(&self, text: &str) -> Result<(), TranscriptError> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(out, "-- {text}")?;
        out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write> Transcript for TerminalTranscript<W> {
    fn push(&self, entry: TranscriptEntry) -> Result<(), TranscriptError> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        match (entry.role, entry.body) {
            (Role::User, EntryBody::Text { text }) => writeln!(out, "you> {text}")?,
            (Role::Assistant, EntryBody::Text { text }) => writeln!(out, "copilot> {text}")?,
            (_, EntryBody::Suggestions { items }) => {
                writeln!(out, "   suggestions:")?;
                for (i, item) in items.iter().enumerate() {
                    writeln!(out, "   {}. {item}", i + 1)?;
                }
            }
        }
        out.flush()?;
        Ok(())
    }
}
