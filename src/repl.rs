// src/repl.rs
use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{info, warn};

use crate::{
    error::DispatchError,
    services::{
        backend::BackendClient,
        dispatcher::Dispatcher,
        fallback::FallbackResponder,
        transcript::TerminalTranscript,
    },
};

pub const WELCOME: &str = "Anxiety Copilot. Type a message, or /help for commands.";
pub const HELP: &str = "/progress shows your XP, /quit leaves. Anything else is sent to the copilot.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Say(&'a str),
    Progress,
    Help,
    Quit,
    Unknown(&'a str),
}

impl<'a> Command<'a> {
    pub fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        match trimmed {
            "/quit" | "/exit" => Command::Quit,
            "/progress" => Command::Progress,
            "/help" => Command::Help,
            cmd if cmd.starts_with('/') => Command::Unknown(cmd),
            _ => Command::Say(line),
        }
    }
}

/// Reads lines until EOF or `/quit`, dispatching every non-command line.
pub async fn run<F, R, W>(
    dispatcher: &Dispatcher<F>,
    input: R,
    transcript: &TerminalTranscript<W>,
) -> Result<(), DispatchError>
where
    F: FallbackResponder,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    transcript.notice(WELCOME)?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await.map_err(DispatchError::Input)? {
        match Command::parse(&line) {
            Command::Quit => break,
            Command::Help => transcript.notice(HELP)?,
            Command::Unknown(cmd) => transcript.notice(&format!("unknown command {cmd}, try /help"))?,
            Command::Progress => show_progress(dispatcher, transcript).await?,
            Command::Say(text) => {
                let outcome = dispatcher.dispatch(text, transcript).await?;
                if let Some(progress) = outcome.and_then(|o| o.progress) {
                    transcript.notice(&progress.to_string())?;
                }
            }
        }
    }

    info!("chat session ended");
    Ok(())
}

async fn show_progress<F, W>(
    dispatcher: &Dispatcher<F>,
    transcript: &TerminalTranscript<W>,
) -> Result<(), DispatchError>
where
    F: FallbackResponder,
    W: Write,
{
    match dispatcher.backend().progress(dispatcher.user_id()).await {
        Ok(report) => transcript.notice(&report.progress.to_string())?,
        Err(e) => {
            warn!(error = %e, "could not fetch progress");
            transcript.notice("progress is unavailable while the copilot is offline")?;
        }
    }
    Ok(())
}

/// Startup probe. A dead backend is not fatal: dispatches fall back.
pub async fn check_health(backend: &BackendClient) -> bool {
    match backend.health().await {
        Ok(health) => {
            info!(status = %health.status, message = %health.message, "backend is up");
            true
        }
        Err(e) => {
            warn!(error = %e, endpoint = %backend.endpoint(), "backend health check failed, replies will come from the offline responder");
            false
        }
    }
}
