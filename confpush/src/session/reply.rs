//! Structured result of one remote operation.

use std::sync::LazyLock;

use regex::Regex;

static RPC_REPLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<rpc-reply[^>]*>(.*)</rpc-reply>").unwrap());

static RPC_ERROR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<rpc-error>(.*?)</rpc-error>").unwrap());

static ERROR_MESSAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<error-message[^>]*>(.*?)</error-message>").unwrap());

static CONFIG_OUTPUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<configuration-output>(.*?)</configuration-output>").unwrap());

static OUTPUT_TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?output>").unwrap());

/// Parsed reply to one remote operation.
///
/// Ephemeral: consumed by the workflow step that requested it and never
/// retained across steps.
#[derive(Debug, Clone)]
pub struct RpcReply {
    /// Body of the `<rpc-reply>` element.
    pub data: String,

    /// Message of the first rpc-error of severity error, if any.
    /// Warning-severity errors pass through.
    pub error: Option<String>,
}

impl RpcReply {
    /// Parse a raw reply frame.
    pub fn parse(raw: &str) -> Self {
        let data = RPC_REPLY
            .captures(raw)
            .map(|c| c[1].to_string())
            .unwrap_or_else(|| raw.to_string());
        let error = severe_rpc_error(&data);

        Self { data, error }
    }

    /// True when the device reported success.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Diff text from a compare reply: the body of the
    /// `<configuration-output>` element.
    pub fn configuration_output(&self) -> Option<String> {
        CONFIG_OUTPUT.captures(&self.data).map(|c| c[1].to_string())
    }

    /// Operational command output with the `<output>` wrapper markup
    /// removed.
    pub fn command_output(&self) -> String {
        OUTPUT_TAGS.replace_all(&self.data, "").into_owned()
    }
}

/// First rpc-error of severity error, if any.
fn severe_rpc_error(data: &str) -> Option<String> {
    let block = RPC_ERROR
        .captures_iter(data)
        .find(|c| !c[1].contains("<error-severity>warning</error-severity>"))?;

    let message = ERROR_MESSAGE
        .captures(&block[1])
        .map(|c| c[1].trim().to_string())
        .unwrap_or_else(|| "device returned an rpc-error".to_string());
    Some(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extracts_reply_body() {
        let reply = RpcReply::parse(
            "<rpc-reply message-id=\"101\" xmlns=\"urn:ietf:params:xml:ns:netconf:base:1.0\">\
             <ok/></rpc-reply>",
        );
        assert_eq!(reply.data, "<ok/>");
        assert!(reply.is_ok());
    }

    #[test]
    fn test_error_severity_error_is_surfaced() {
        let reply = RpcReply::parse(
            "<rpc-reply><rpc-error>\
             <error-severity>error</error-severity>\
             <error-message>\nsyntax error\n</error-message>\
             </rpc-error></rpc-reply>",
        );
        assert_eq!(reply.error.as_deref(), Some("syntax error"));
        assert!(!reply.is_ok());
    }

    #[test]
    fn test_warning_severity_passes_through() {
        let reply = RpcReply::parse(
            "<rpc-reply><rpc-error>\
             <error-severity>warning</error-severity>\
             <error-message>statement ignored</error-message>\
             </rpc-error><ok/></rpc-reply>",
        );
        assert!(reply.is_ok());
    }

    #[test]
    fn test_error_without_message_gets_a_placeholder() {
        let reply = RpcReply::parse(
            "<rpc-reply><rpc-error><error-severity>error</error-severity></rpc-error></rpc-reply>",
        );
        assert_eq!(reply.error.as_deref(), Some("device returned an rpc-error"));
    }

    #[test]
    fn test_configuration_output_extraction() {
        let reply = RpcReply::parse(
            "<rpc-reply><configuration-information>\
             <configuration-output>\n[edit interfaces]\n+  lo0 { }\n</configuration-output>\
             </configuration-information></rpc-reply>",
        );
        assert_eq!(
            reply.configuration_output().as_deref(),
            Some("\n[edit interfaces]\n+  lo0 { }\n")
        );
    }

    #[test]
    fn test_command_output_strips_wrapper_markup() {
        let reply = RpcReply::parse(
            "<rpc-reply><output>\nHostname: router\nModel: mx960\n</output></rpc-reply>",
        );
        assert_eq!(reply.command_output(), "\nHostname: router\nModel: mx960\n");
    }
}
