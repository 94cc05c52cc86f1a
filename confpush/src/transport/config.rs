//! NETCONF connection configuration.

use std::time::Duration;

use secrecy::SecretString;

/// Default NETCONF-over-SSH port.
pub const DEFAULT_PORT: u16 = 830;

/// Username and password used for every device in one run.
///
/// The password is held as a [`SecretString`] so it is redacted from
/// debug output and never logged.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Username for password authentication.
    pub username: String,

    /// Password, redacted everywhere but the authentication call.
    pub password: SecretString,
}

impl Credentials {
    /// Create credentials from plain text, wrapping the password.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// Connection settings for one device session.
///
/// Host keys are not verified: targets are addressed by IP literal on
/// management networks, matching common NETCONF tooling.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Target host, an IPv4 or IPv6 literal.
    pub host: String,

    /// NETCONF SSH port (default: 830).
    pub port: u16,

    /// Credentials for authentication.
    pub credentials: Credentials,

    /// Timeout applied to connect and to each reply read.
    pub timeout: Duration,
}

impl TransportConfig {
    /// Create a configuration with the default port and a 30 second
    /// timeout.
    pub fn new(host: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            credentials,
            timeout: Duration::from_secs(30),
        }
    }

    /// Set the NETCONF port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the connect and reply timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
