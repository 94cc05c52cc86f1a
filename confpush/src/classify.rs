//! Command verb whitelisting per operating mode.
//!
//! Every command in a work order is checked against the active mode's
//! verb set before any device is contacted. The check is all-or-nothing
//! across the whole work order.

use std::fmt;

/// Operating mode for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Stage, confirm, and commit configuration changes.
    Configuration,
    /// Run read-only operational commands.
    Operational,
}

impl Mode {
    /// Verbs allowed as the first token of a command in this mode.
    pub fn allowed_verbs(&self) -> &'static [&'static str] {
        match self {
            Mode::Configuration => &["set", "delete", "activate", "deactivate"],
            Mode::Operational => &["show"],
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Configuration => f.write_str("configuration"),
            Mode::Operational => f.write_str("operational"),
        }
    }
}

/// Return every command whose first whitespace-delimited token is not an
/// allowed verb for `mode`. An empty result means the whole list passed.
///
/// The match is case-sensitive and exact; a command with no leading token
/// is invalid. No side effects.
pub fn rejected_commands(commands: &[String], mode: Mode) -> Vec<String> {
    commands
        .iter()
        .filter(|command| match command.split_whitespace().next() {
            Some(verb) => !mode.allowed_verbs().contains(&verb),
            None => true,
        })
        .cloned()
        .collect()
}
