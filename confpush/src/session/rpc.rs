//! Remote operations and their Junos XML payloads.

use crate::error::Step;

/// One remote operation against a device.
///
/// Each operation renders to the body of an `<rpc>` element. Text
/// embedded in a payload is XML-escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcOp {
    /// Acquire the exclusive configuration lock.
    Lock,

    /// Stage the commands as an uncommitted candidate change. The
    /// commands are joined with a single newline at this boundary.
    Load { commands: Vec<String> },

    /// Validate the candidate configuration.
    Validate,

    /// Compare the candidate against the running configuration.
    Compare,

    /// Commit the candidate, recording `comment` in the commit log.
    Commit { comment: String },

    /// Revert the candidate.
    Discard,

    /// Release the configuration lock.
    Unlock,

    /// Run one read-only operational command.
    Command { command: String },
}

impl RpcOp {
    /// The workflow step this operation serves.
    pub fn step(&self) -> Step {
        match self {
            RpcOp::Lock => Step::Lock,
            RpcOp::Load { .. } => Step::Load,
            RpcOp::Validate => Step::Validate,
            RpcOp::Compare => Step::Diff,
            RpcOp::Commit { .. } => Step::Commit,
            RpcOp::Discard => Step::Discard,
            RpcOp::Unlock => Step::Unlock,
            RpcOp::Command { .. } => Step::Command,
        }
    }

    /// Render the operation as the body of an `<rpc>` element.
    pub fn to_xml(&self) -> String {
        match self {
            RpcOp::Lock => "<lock-configuration/>".to_string(),
            RpcOp::Load { commands } => format!(
                "<load-configuration action=\"set\" format=\"text\">\
                 <configuration-set>{}</configuration-set>\
                 </load-configuration>",
                xml_escape(&commands.join("\n"))
            ),
            RpcOp::Validate => "<validate><source><candidate/></source></validate>".to_string(),
            RpcOp::Compare => {
                "<get-configuration compare=\"rollback\" rollback=\"0\" format=\"text\"/>"
                    .to_string()
            }
            RpcOp::Commit { comment } => {
                format!("<commit><comment>{}</comment></commit>", xml_escape(comment))
            }
            RpcOp::Discard => "<discard-changes/>".to_string(),
            RpcOp::Unlock => "<unlock-configuration/>".to_string(),
            RpcOp::Command { command } => format!(
                "<command format=\"ascii\">{}</command>",
                xml_escape(command)
            ),
        }
    }
}

/// Escape text for embedding in XML element content.
fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_joins_commands_with_newlines() {
        let op = RpcOp::Load {
            commands: vec![
                "set interfaces lo0 description mgmt".to_string(),
                "delete interfaces ge-0/0/1".to_string(),
            ],
        };
        let xml = op.to_xml();
        assert!(xml.contains(
            "<configuration-set>set interfaces lo0 description mgmt\n\
             delete interfaces ge-0/0/1</configuration-set>"
        ));
        assert!(xml.starts_with("<load-configuration action=\"set\" format=\"text\">"));
    }

    #[test]
    fn test_commit_carries_escaped_comment() {
        let op = RpcOp::Commit {
            comment: "CHG-1042 <phase 1 & 2>".to_string(),
        };
        assert_eq!(
            op.to_xml(),
            "<commit><comment>CHG-1042 &lt;phase 1 &amp; 2&gt;</comment></commit>"
        );
    }

    #[test]
    fn test_command_payload_is_ascii_formatted() {
        let op = RpcOp::Command {
            command: "show version".to_string(),
        };
        assert_eq!(op.to_xml(), "<command format=\"ascii\">show version</command>");
    }

    #[test]
    fn test_operations_map_to_their_step() {
        assert_eq!(RpcOp::Lock.step(), Step::Lock);
        assert_eq!(RpcOp::Validate.step(), Step::Validate);
        assert_eq!(RpcOp::Compare.step(), Step::Diff);
        assert_eq!(RpcOp::Discard.step(), Step::Discard);
        assert_eq!(RpcOp::Unlock.step(), Step::Unlock);
        assert_eq!(
            RpcOp::Load { commands: vec![] }.step(),
            Step::Load
        );
        assert_eq!(
            RpcOp::Commit { comment: String::new() }.step(),
            Step::Commit
        );
        assert_eq!(
            RpcOp::Command { command: String::new() }.step(),
            Step::Command
        );
    }
}
