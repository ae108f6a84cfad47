//! ---
//! si_section: "06-front-ends"
//! si_subsection: "binary"
//! si_type: "source"
//! si_scope: "code"
//! si_description: "Control CLI for students and contacts."
//! si_version: "v0.1.0"
//! si_owner: "tbd"
//! ---
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use si_common::AppConfig;
use si_core::{failure_message, Renderer};
use si_logging as logging;
use si_model::{HintViolation, Operation, Outcome};
use si_net::{GatewayError, HttpGateway};
use tokio::runtime::Runtime;

mod contacts;
mod students;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "StudentInfo student and contact administration",
    long_about = None
)]
struct Cli {
    /// Configuration file (defaults to configs/studentinfo.toml when present).
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    /// Backend base URL, including any deployment prefix.
    #[arg(long = "backend-url", value_name = "URL", global = true)]
    backend_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(subcommand, about = "Student records")]
    Students(students::StudentsCommand),
    #[command(subcommand, about = "Contacts of a student")]
    Contacts(contacts::ContactsCommand),
}

/// Everything a command needs to talk to the backend and print results.
pub struct Backend {
    pub gateway: HttpGateway,
    pub renderer: Renderer,
    pub runtime: Runtime,
}

impl Backend {
    fn connect(config: &AppConfig) -> Result<Self> {
        let gateway = HttpGateway::new(&config.backend).context("unable to build HTTP client")?;
        let renderer = Renderer::new(gateway.endpoints().clone());
        let runtime = Runtime::new().context("unable to build async runtime")?;
        Ok(Self {
            gateway,
            renderer,
            runtime,
        })
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut candidates: Vec<PathBuf> = cli.config.iter().cloned().collect();
    candidates.extend(AppConfig::DEFAULT_CANDIDATES.iter().map(PathBuf::from));
    let mut config = AppConfig::load(&candidates)?;
    if cli.backend_url.is_some() {
        config.apply_overrides(cli.backend_url.clone());
        config.validate()?;
    }
    Ok(config)
}

/// Turn a gateway failure into the text the console would have shown.
pub fn call_failed(operation: Operation, err: GatewayError) -> anyhow::Error {
    tracing::debug!(operation = operation.as_str(), error = %err, "command failed");
    anyhow!(failure_message(operation, &err))
}

/// Print a successful outcome, or fail with its message.
pub fn report(outcome: Outcome) -> Result<()> {
    if outcome.ok {
        println!("{}", outcome.message);
        Ok(())
    } else {
        Err(anyhow!(outcome.message))
    }
}

/// Reject a submission whose fields break their input hints.
pub fn check_hints(violations: Vec<HintViolation>) -> Result<()> {
    match violations.first() {
        Some(violation) => Err(anyhow!(violation.message)),
        None => Ok(()),
    }
}

/// Ask before a destructive action. Anything but yes, or a closed stdin, declines.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    print!("{prompt} [y/N]: ");
    io::stdout()
        .flush()
        .context("failed to flush prompt to stdout")?;
    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .context("failed to read response from stdin")?;
    if read == 0 {
        println!();
        return Ok(false);
    }
    Ok(matches!(
        input.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let backend = Backend::connect(&config)?;
    match cli.command {
        Commands::Students(cmd) => students::run(cmd, &backend)?,
        Commands::Contacts(cmd) => contacts::run(cmd, &backend)?,
    }
    Ok(())
}
