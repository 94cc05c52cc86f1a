//! Fleet run example
//!
//! Pushes one configuration command to a single device and asks on the
//! console before committing.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example fleet_run -- 192.0.2.1 admin secret
//! ```

use std::env;
use std::io::{self, BufRead, Write};

use confpush::{Credentials, Mode, Operator, RunOptions, WorkOrder, fleet};

struct ConsolePrompt;

impl Operator for ConsolePrompt {
    fn confirm_commit(&mut self, device: &str, diff: &str) -> bool {
        println!("Diff for {device}:\n{diff}");
        print!("Commit changes to {device}? (y/n): ");
        io::stdout().flush().ok();

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer).ok();
        answer.trim().eq_ignore_ascii_case("y")
    }

    fn show_output(&mut self, _device: &str, _command: &str, output: &str) {
        println!("{output}");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let (Some(host), Some(user), Some(password)) = (args.next(), args.next(), args.next()) else {
        eprintln!("usage: fleet_run <host> <user> <password>");
        std::process::exit(1);
    };

    let order = WorkOrder {
        description: "example loopback description".to_string(),
        reference: "EXAMPLE-1".to_string(),
        devices: vec![host],
        commands: vec!["set interfaces lo0 description example".to_string()],
    };

    let outcomes = fleet::run(
        &order,
        Mode::Configuration,
        &Credentials::new(user, password),
        &RunOptions::default(),
        &mut ConsolePrompt,
    )
    .await?;

    for outcome in &outcomes {
        println!(
            "{}: committed={} errors={}",
            outcome.device,
            outcome.committed,
            outcome.errors.len()
        );
    }
    Ok(())
}
