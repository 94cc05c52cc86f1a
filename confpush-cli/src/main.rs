//! Command-line front end for confpush.

mod error;
mod loader;
mod prompt;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use owo_colors::OwoColorize;

use confpush::{DeviceOutcome, Mode, RunOptions, fleet};

use crate::error::CliError;
use crate::prompt::ConsoleOperator;

/// Push configuration changes or run operational commands against a
/// fleet of Junos devices over NETCONF.
#[derive(Parser)]
#[command(name = "confpush", version, about)]
struct Cli {
    /// Operating mode.
    #[arg(short, long, value_enum, default_value = "select")]
    mode: ModeArg,

    /// Work-order JSON file. Prompted for when omitted.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Save operational command outputs to per-device text files.
    #[arg(short, long)]
    save: bool,

    /// NETCONF port on the devices.
    #[arg(long, default_value_t = confpush::DEFAULT_PORT)]
    port: u16,

    /// Connect and reply timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// Configuration-change mode.
    Config,
    /// Read-only operational mode.
    Oper,
    /// Choose interactively at startup.
    Select,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let path = match cli.file {
        Some(path) => path,
        None => PathBuf::from(prompt::ask_input_path()?),
    };

    let order = loader::load_work_order(&path)?;
    log::debug!(
        "loaded work order {} ({} devices, {} commands)",
        order.reference,
        order.devices.len(),
        order.commands.len()
    );

    let mode = match cli.mode {
        ModeArg::Config => Mode::Configuration,
        ModeArg::Oper => Mode::Operational,
        ModeArg::Select => prompt::select_mode()?,
    };

    prompt::print_summary(&order);

    if !prompt::confirm("Continue with sending of commands?")? {
        println!(
            "{}",
            "Quitting, no commands or config items were sent.".yellow()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let credentials = prompt::ask_credentials()?;

    let options = RunOptions {
        port: cli.port,
        timeout: Duration::from_secs(cli.timeout),
        capture_root: cli.save.then(|| PathBuf::from(".")),
    };

    let mut operator = ConsoleOperator;
    let outcomes = fleet::run(&order, mode, &credentials, &options, &mut operator).await?;

    if cli.save && mode == Mode::Operational {
        println!("Outputs written under: {}", order.reference);
    }

    Ok(print_run_summary(&outcomes))
}

/// Print one line per device and pick the process exit code.
fn print_run_summary(outcomes: &[DeviceOutcome]) -> ExitCode {
    let mut failed = false;

    println!("\n{}", "Run summary:".green());
    for outcome in outcomes {
        if outcome.is_clean() {
            let state = match outcome.mode {
                Mode::Configuration if outcome.committed => "committed",
                Mode::Configuration => "reverted",
                Mode::Operational => "ok",
            };
            println!("  {}  {}", outcome.device, state.green());
        } else {
            failed = true;
            let steps: Vec<&str> = outcome
                .errors
                .iter()
                .map(|e| e.step.as_str())
                .collect();
            println!(
                "  {}  {} ({})",
                outcome.device,
                "errors".red(),
                steps.join(", ")
            );
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
