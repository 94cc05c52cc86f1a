//! NETCONF-over-SSH transport implementation using russh.

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use russh::client::{self, Handle, Msg};
use russh::keys::PublicKey;
use russh::{Channel, ChannelMsg, Disconnect};
use secrecy::ExposeSecret;

use super::config::TransportConfig;
use super::frame::{EOM, FrameBuffer};
use crate::error::ConnectionError;

/// Client hello advertising the base:1.0 capability.
const CLIENT_HELLO: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
<hello xmlns=\"urn:ietf:params:xml:ns:netconf:base:1.0\">\
<capabilities><capability>urn:ietf:params:xml:ns:netconf:base:1.0</capability></capabilities>\
</hello>";

/// One NETCONF-over-SSH connection to a single device.
pub struct NetconfTransport {
    /// The russh session handle.
    session: Handle<NetconfHandler>,

    /// Channel running the netconf subsystem.
    channel: Channel<Msg>,

    /// Receive buffer with end-of-message framing.
    buffer: FrameBuffer,

    /// Timeout for connect and each reply read.
    timeout: Duration,
}

impl NetconfTransport {
    /// Connect, authenticate with the configured password, start the
    /// `netconf` subsystem, and complete the hello exchange.
    pub async fn connect(config: &TransportConfig) -> Result<Self, ConnectionError> {
        let ssh_config = Arc::new(client::Config {
            inactivity_timeout: Some(config.timeout),
            ..Default::default()
        });

        let mut session = tokio::time::timeout(
            config.timeout,
            client::connect(
                ssh_config,
                (config.host.as_str(), config.port),
                NetconfHandler,
            ),
        )
        .await
        .map_err(|_| ConnectionError::Timeout(config.timeout))?
        .map_err(ConnectionError::Ssh)?;

        let credentials = &config.credentials;
        let authenticated = session
            .authenticate_password(
                &credentials.username,
                credentials.password.expose_secret(),
            )
            .await
            .map_err(ConnectionError::Ssh)?
            .success();

        if !authenticated {
            return Err(ConnectionError::AuthenticationFailed {
                user: credentials.username.clone(),
            });
        }

        let channel = session
            .channel_open_session()
            .await
            .map_err(ConnectionError::Ssh)?;

        channel
            .request_subsystem(true, "netconf")
            .await
            .map_err(|_| ConnectionError::SubsystemFailed)?;

        let mut transport = Self {
            session,
            channel,
            buffer: FrameBuffer::new(),
            timeout: config.timeout,
        };
        transport.hello().await?;

        Ok(transport)
    }

    /// Exchange hellos: read the server's capabilities, answer with ours.
    async fn hello(&mut self) -> Result<(), ConnectionError> {
        let server_hello = self.read_frame().await.map_err(|e| {
            ConnectionError::HelloFailed {
                message: e.to_string(),
            }
        })?;

        if !server_hello.contains("<hello") {
            return Err(ConnectionError::HelloFailed {
                message: "server did not send a hello".to_string(),
            });
        }
        debug!("server hello received ({} bytes)", server_hello.len());

        self.send_frame(CLIENT_HELLO).await
    }

    /// Send one framed message.
    pub async fn send_frame(&mut self, payload: &str) -> Result<(), ConnectionError> {
        let mut message = Vec::with_capacity(payload.len() + EOM.len());
        message.extend_from_slice(payload.as_bytes());
        message.extend_from_slice(EOM);

        self.channel
            .data(&message[..])
            .await
            .map_err(ConnectionError::Ssh)?;
        Ok(())
    }

    /// Read one framed message, bounded by the configured timeout.
    pub async fn read_frame(&mut self) -> Result<String, ConnectionError> {
        loop {
            if let Some(frame) = self.buffer.take_frame() {
                return Ok(String::from_utf8_lossy(&frame).into_owned());
            }

            let msg = tokio::time::timeout(self.timeout, self.channel.wait())
                .await
                .map_err(|_| ConnectionError::Timeout(self.timeout))?;

            match msg {
                Some(ChannelMsg::Data { ref data }) => self.buffer.extend(data),
                Some(ChannelMsg::ExtendedData { ref data, .. }) => self.buffer.extend(data),
                Some(ChannelMsg::Eof) | Some(ChannelMsg::Close) | None => {
                    return Err(ConnectionError::Disconnected);
                }
                Some(_) => {}
            }
        }
    }

    /// Close the connection. Consumes the transport.
    pub async fn close(self) -> Result<(), ConnectionError> {
        self.session
            .disconnect(Disconnect::ByApplication, "", "en")
            .await
            .map_err(ConnectionError::Ssh)?;
        Ok(())
    }
}

/// russh client handler. Host keys are accepted without verification;
/// targets are addressed by IP literal on management networks.
struct NetconfHandler;

impl client::Handler for NetconfHandler {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        _server_public_key: &PublicKey,
    ) -> std::result::Result<bool, Self::Error> {
        Ok(true)
    }
}
