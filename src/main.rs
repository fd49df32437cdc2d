use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use authcheck::config;
use authcheck::gate::{self, GateDecision, RouteGuard};
use authcheck::{AuthChecker, AuthConfig, AuthError, CheckEndpoint, LocalStorage, StoredCredential};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Auth(#[from] AuthError),
}

#[derive(Parser, Debug)]
#[command(name = "authcheck", about = "Check a stored bearer token against an authorization endpoint")]
struct Cli {
    /// Overrides `AUTH_BASE_URL`.
    #[arg(long)]
    base_url: Option<String>,

    /// `verify-token`, `authorize`, or any other path on the authority. Overrides `AUTH_CHECK_ENDPOINT`.
    #[arg(long)]
    endpoint: Option<String>,

    /// Overrides `AUTH_STORAGE_KEY`.
    #[arg(long)]
    storage_key: Option<String>,

    /// Overrides `AUTH_STORAGE_PATH`.
    #[arg(long)]
    storage_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Exit 0 if the stored token is accepted, 1 otherwise.
    Check {
        #[arg(long)]
        detailed: bool,
    },
    /// Decide whether navigation to a path may proceed.
    Gate {
        path: String,
        /// Protected prefix; repeatable. Without any, the whole app is gated.
        #[arg(long = "protect")]
        protected: Vec<String>,
    },
    Token(TokenCommand),
}

#[derive(Args, Debug)]
struct TokenCommand {
    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Subcommand, Debug)]
enum TokenSubcommand {
    Set { value: String },
    Clear,
    Show,
}

impl Cli {
    /// Storage key and path: explicit flags first, then the environment.
    fn storage_settings(&self) -> (String, PathBuf) {
        let (key, path) = config::storage_from_env();
        (
            self.storage_key.clone().unwrap_or(key),
            self.storage_path.clone().unwrap_or(path),
        )
    }

    fn config(&self) -> Result<AuthConfig, AuthError> {
        let mut config = AuthConfig::from_env_with_base_url(self.base_url.as_deref())?;
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = CheckEndpoint::parse(endpoint)?;
        }
        (config.storage_key, config.storage_path) = self.storage_settings();
        Ok(config)
    }

    fn checker(&self) -> Result<AuthChecker, AuthError> {
        let config = self.config()?;
        let source = StoredCredential::new(LocalStorage::open(&config.storage_path), config.storage_key.clone());
        AuthChecker::new(&config, Arc::new(source))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match run(&cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}

/// Returns `Ok(false)` for a negative answer, which maps to exit code 1.
async fn run(cli: &Cli) -> Result<bool, CliError> {
    match &cli.command {
        Command::Check { detailed } => {
            let checker = cli.checker()?;
            if *detailed {
                let outcome = checker.probe().await;
                println!("{outcome}");
                Ok(outcome.is_accepted())
            } else {
                let authorized = checker.is_authorized().await;
                println!("{}", if authorized { "authorized" } else { "unauthorized" });
                Ok(authorized)
            }
        }
        Command::Gate { path, protected } => {
            let checker = cli.checker()?;
            let decision = if protected.is_empty() {
                gate::enter(&checker).await
            } else {
                let guard = protected.iter().fold(RouteGuard::new(), |guard, prefix| guard.protect(prefix));
                guard.navigate(path, &checker).await
            };
            println!("{}", render_decision(&decision));
            Ok(decision.is_proceed())
        }
        Command::Token(token) => {
            let (key, path) = cli.storage_settings();
            let storage = LocalStorage::open(path);
            match &token.command {
                TokenSubcommand::Set { value } => {
                    storage.set(&key, value).await?;
                    tracing::info!(%key, path = %storage.path().display(), "token stored");
                    Ok(true)
                }
                TokenSubcommand::Clear => Ok(storage.remove(&key).await?),
                TokenSubcommand::Show => {
                    let value = storage.get(&key).await?;
                    let found = value.is_some();
                    println!("{}", authcheck::bearer_value(value));
                    Ok(found)
                }
            }
        }
    }
}

fn render_decision(decision: &GateDecision) -> String {
    match decision {
        GateDecision::Proceed => "proceed".to_owned(),
        GateDecision::Redirect { to, notice: Some(notice) } => format!("redirect {to}: {notice}"),
        GateDecision::Redirect { to, notice: None } => format!("redirect {to}"),
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
