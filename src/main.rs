//! Resilient login CLI
//!
//! Submits one login to the configured authentication endpoint and prints the
//! classified outcome.
//!
//! ```text
//! credentials ─▶ LoginService ─▶ Invoker ─▶ LoginClient ─▶ endpoint
//!                      │            ▲  └─ backoff ─┘
//!                      ▼            │
//!                   Outcome    Ctrl+C cancels
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use resilient_login::auth::{Credentials, LoginService, Outcome};
use resilient_login::config::{load_config, LoginConfig};
use resilient_login::observability::{logging, metrics};
use resilient_login::CancelSignal;

#[derive(Parser)]
#[command(name = "resilient-login")]
#[command(about = "Log in to an authentication endpoint with retries", long_about = None)]
struct Cli {
    /// Account email.
    #[arg(short, long)]
    email: String,

    /// Account password.
    #[arg(short, long)]
    password: String,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the endpoint URL.
    #[arg(short, long)]
    url: Option<String>,

    /// Override the retry budget.
    #[arg(long)]
    max_retries: Option<u32>,

    /// Print the outcome as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => LoginConfig::default(),
    };
    if let Some(url) = cli.url {
        config.endpoint.url = url;
    }
    if let Some(max_retries) = cli.max_retries {
        config.retries.max_retries = max_retries;
    }

    logging::init_logging(&config.observability)?;
    metrics::set_enabled(config.observability.metrics_enabled);

    let credentials = Credentials::new(cli.email, cli.password);
    if !credentials.is_complete() {
        eprintln!("Email and password are required");
        return Ok(ExitCode::FAILURE);
    }

    let service = LoginService::from_config(&config)?;

    tracing::info!(
        endpoint = %config.endpoint.url,
        max_retries = config.retries.max_retries,
        initial_interval_ms = config.retries.initial_interval_ms,
        backoff_multiplier = config.retries.backoff_multiplier,
        "Configuration loaded"
    );

    let cancel = CancelSignal::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Cancel signal received");
            on_ctrl_c.trigger();
        }
    });

    let outcome = service.login_until_cancelled(&credentials, &cancel).await;
    print_outcome(&outcome, cli.json)?;

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_outcome(outcome: &Outcome, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    match outcome {
        Outcome::Success(session) => {
            println!("{}", session.message);
            if let Some(name) = &session.display_name {
                println!("Logged in as {}", name);
            }
            println!("token: {}", session.token);
        }
        Outcome::Failure(failure) => {
            eprintln!("Error ({}): {}", failure.kind, failure.message);
            for field in &failure.field_errors {
                eprintln!("  {}: {}", field.field, field.message);
            }
        }
    }
    Ok(())
}
