//! `cms-credentials`: hash and verify passwords with the configured policy.
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cms_backend_lib::{
    auth::CredentialService,
    config::{Settings, DEFAULT_CONFIG_FILE},
    AppState,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Exit status for rejected input, e.g. an empty password
const USAGE_EXIT: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "cms-credentials", version, about = "Password hashing and verification")]
struct Cli {
    /// Path to the TOML config file; must exist when given. Defaults to an optional `cms.toml`.
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hash a password (read from stdin when --password is omitted)
    Hash {
        #[arg(long)]
        password: Option<String>,
    },
    /// Verify a password against a stored hash
    Verify {
        #[arg(long)]
        hash: String,
        #[arg(long)]
        password: Option<String>,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check a password against the configured strength requirements
    Check {
        #[arg(long)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_required(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::load_from(DEFAULT_CONFIG_FILE)
            .with_context(|| format!("loading settings from {DEFAULT_CONFIG_FILE}"))?,
    };
    init_tracing(&settings.log_level, cli.log_json);

    let state = AppState::new(settings)?;
    info!(algorithm = state.settings.hashing.algorithm.ident(), "credential backend ready");

    match cli.command {
        Command::Hash { password } => {
            let password = password_or_stdin(password)?;
            let status = run_hash(state.credentials.as_ref(), &password).await?;
            Ok(ExitCode::from(status))
        }
        Command::Verify { hash, password, json } => {
            let password = password_or_stdin(password)?;
            let outcome = state.credentials.verify(&password, &hash).await;
            if json {
                let body = serde_json::json!({
                    "outcome": outcome,
                    "code": u8::from(outcome),
                });
                println!("{body}");
            } else {
                println!("{} {}", u8::from(outcome), outcome.as_str());
            }
            Ok(exit_for(outcome.is_match()))
        }
        Command::Check { password } => {
            let password = password_or_stdin(password)?;
            let ok = state
                .credentials
                .password_ok(&password, &state.settings.password_requirements);
            println!("{}", if ok { "ok" } else { "too weak" });
            Ok(exit_for(ok))
        }
    }
}

// Returns the process exit status; system faults propagate as errors.
async fn run_hash(credentials: &dyn CredentialService, password: &str) -> anyhow::Result<u8> {
    match credentials.create(password).await {
        Ok(hash) => {
            println!("{hash}");
            Ok(0)
        }
        Err(err) if err.is_caller_error() => {
            eprintln!("{}", err.sanitized_message());
            Ok(USAGE_EXIT)
        }
        Err(err) => Err(err.into()),
    }
}

fn init_tracing(level: &str, json: bool) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

// A missing password is treated as empty; the backend then reports it as invalid.
fn password_or_stdin(password: Option<String>) -> anyhow::Result<String> {
    if let Some(p) = password {
        return Ok(p);
    }
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn exit_for(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
