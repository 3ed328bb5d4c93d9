// src/services/dispatcher.rs
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use super::{
    backend::BackendClient,
    fallback::{FallbackResponder, RuleBasedResponder},
    transcript::Transcript,
};
use crate::{
    config::ClientConfig,
    error::{BackendError, DispatchError},
    message::{ChatRequest, Progress, Reply},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Backend,
    Fallback,
}

/// Result of one dispatch, after the transcript has been updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub reply: Reply,
    pub source: ReplySource,
    pub progress: Option<Progress>,
}

/// Sends user messages to the backend and turns whatever comes back (or
/// doesn't) into transcript entries.
pub struct Dispatcher<F = RuleBasedResponder> {
    backend: BackendClient,
    fallback: F,
    user_id: String,
    thinking_delay: Duration,
    // Held for a whole exchange so two sends never interleave their entries.
    turn: Mutex<()>,
}

impl Dispatcher<RuleBasedResponder> {
    pub fn from_config(config: &ClientConfig) -> Result<Self, BackendError> {
        Self::new(config, RuleBasedResponder)
    }
}

impl<F: FallbackResponder> Dispatcher<F> {
    pub fn new(config: &ClientConfig, fallback: F) -> Result<Self, BackendError> {
        Ok(Self {
            backend: BackendClient::new(config)?,
            fallback,
            user_id: config.user_id.clone(),
            thinking_delay: config.thinking_delay,
            turn: Mutex::new(()),
        })
    }

    pub fn backend(&self) -> &BackendClient {
        &self.backend
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Runs one exchange for `input`. Blank input is ignored and yields
    /// `Ok(None)`. Backend failures never surface here: they are logged and
    /// replaced by the fallback reply. Only a failing transcript is an error.
    pub async fn dispatch<T>(
        &self,
        input: &str,
        transcript: &T,
    ) -> Result<Option<Outcome>, DispatchError>
    where
        T: Transcript + ?Sized,
    {
        let text = input.trim();
        if text.is_empty() {
            debug!("ignoring blank input");
            return Ok(None);
        }

        let span = info_span!("dispatch", id = %Uuid::new_v4());
        self.exchange(text, transcript)
            .instrument(span)
            .await
            .map(Some)
    }

    async fn exchange<T>(&self, text: &str, transcript: &T) -> Result<Outcome, DispatchError>
    where
        T: Transcript + ?Sized,
    {
        let _turn = self.turn.lock().await;

        transcript.push_user(text)?;

        if !self.thinking_delay.is_zero() {
            tokio::time::sleep(self.thinking_delay).await;
        }

        let request = ChatRequest::new(&self.user_id, text);
        let outcome = match self.backend.send(&request).await {
            Ok(response) => Outcome {
                progress: response.progress(),
                reply: response.into_reply(),
                source: ReplySource::Backend,
            },
            Err(e) => {
                warn!(error = %e, "backend failed, using fallback");
                Outcome {
                    reply: self.fallback.respond(text),
                    source: ReplySource::Fallback,
                    progress: None,
                }
            }
        };

        transcript.push_assistant(&outcome.reply.text)?;
        if !outcome.reply.suggest.is_empty() {
            transcript.push_suggestions(outcome.reply.suggest.clone())?;
        }

        info!(source = ?outcome.source, "reply delivered");
        Ok(outcome)
    }
}
