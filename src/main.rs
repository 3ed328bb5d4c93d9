use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tracing_subscriber::{EnvFilter, fmt};

use anxiety_copilot::{
    config::{self, ClientConfig},
    repl,
    services::{dispatcher::Dispatcher, transcript::TerminalTranscript},
};

/// Terminal chat with the Anxiety Copilot. Falls back to offline replies
/// when the backend is unreachable.
///
/// Every option can also come from its COPILOT_* environment variable or a
/// .env file; flags win.
#[derive(Parser, Debug)]
#[command(name = "anxiety-copilot", version)]
struct Cli {
    /// Chat endpoint of the copilot backend [env: COPILOT_ENDPOINT]
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Identifier sent with every message [env: COPILOT_USER_ID]
    #[arg(long)]
    user_id: Option<String>,

    /// Pause before each reply, in milliseconds [env: COPILOT_THINKING_DELAY_MS]
    #[arg(long, value_name = "MS")]
    thinking_delay_ms: Option<String>,

    /// Give up on the backend after this many milliseconds [env: COPILOT_TIMEOUT_MS]
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<String>,

    /// Do not probe the backend's health route on startup
    #[arg(long)]
    skip_health_check: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    // Flag values keyed like the environment variables they override.
    fn flag(&self, key: &str) -> Option<String> {
        match key {
            config::ENV_ENDPOINT => self.endpoint.clone(),
            config::ENV_USER_ID => self.user_id.clone(),
            config::ENV_THINKING_DELAY_MS => self.thinking_delay_ms.clone(),
            config::ENV_TIMEOUT_MS => self.timeout_ms.clone(),
            _ => None,
        }
    }

    fn client_config(&self) -> anyhow::Result<ClientConfig> {
        ClientConfig::from_env_with(|key| self.flag(key)).context("invalid configuration")
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let config = cli.client_config()?;
    tracing::debug!(?config, "starting chat client");

    let dispatcher =
        Dispatcher::from_config(&config).context("failed to build the backend HTTP client")?;

    if !cli.skip_health_check {
        repl::check_health(dispatcher.backend()).await;
    }

    let transcript = TerminalTranscript::stdout();
    let stdin = BufReader::new(tokio::io::stdin());
    repl::run(&dispatcher, stdin, &transcript)
        .await
        .context("chat session failed")?;

    Ok(())
}
