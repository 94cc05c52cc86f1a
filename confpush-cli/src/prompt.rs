//! Interactive console prompts and colored output.

use dialoguer::{Confirm, Input, Select};
use owo_colors::OwoColorize;

use confpush::{Credentials, Mode, Operator, WorkOrder};

use crate::error::CliError;

/// Ask for the work-order file path when it was not given as a flag.
pub fn ask_input_path() -> Result<String, CliError> {
    Ok(Input::new()
        .with_prompt("Work-order file path")
        .interact_text()?)
}

/// Choose between configuration and operational mode.
pub fn select_mode() -> Result<Mode, CliError> {
    let choice = Select::new()
        .with_prompt("Choose a mode")
        .items(&["configuration", "operational"])
        .default(0)
        .interact()?;

    Ok(match choice {
        0 => Mode::Configuration,
        _ => Mode::Operational,
    })
}

/// Run-level yes/no gate.
pub fn confirm(message: &str) -> Result<bool, CliError> {
    Ok(Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()?)
}

/// Prompt for the username and hidden password. The pair is reused for
/// every device in the run.
pub fn ask_credentials() -> Result<Credentials, CliError> {
    let username: String = Input::new().with_prompt("Enter username").interact_text()?;
    let password = rpassword::prompt_password("Enter password: ")?;

    Ok(Credentials::new(username.trim(), password))
}

/// Print the work order before asking to continue.
pub fn print_summary(order: &WorkOrder) {
    println!("{}", "Description:".green());
    println!("{}\n", order.description);
    println!("{}", "Reference:".green());
    println!("{}\n", order.reference);
    println!("{}", "Devices:".green());
    for device in &order.devices {
        println!("\t{device}");
    }
    println!("{}", "Commands:".green());
    for command in &order.commands {
        println!("\t{command}");
    }
    println!();
}

/// Console implementation of the workflow decision points.
#[derive(Default)]
pub struct ConsoleOperator;

impl Operator for ConsoleOperator {
    fn confirm_commit(&mut self, device: &str, diff: &str) -> bool {
        println!("\n{}", format!("Config diff for {device}:").yellow());
        println!("{}", diff.yellow());

        // A failed prompt declines the commit; the workflow then
        // discards the staged change.
        Confirm::new()
            .with_prompt(format!("Commit changes to {device}?"))
            .default(false)
            .interact()
            .unwrap_or(false)
    }

    fn show_output(&mut self, _device: &str, _command: &str, output: &str) {
        println!("{}", output.green());
    }
}
