//! Device sessions: one authenticated NETCONF connection per device.
//!
//! A session wraps exactly one connection and exposes a single "execute
//! remote operation, get structured reply" primitive with a uniform
//! error contract. It is owned exclusively by the workflow processing
//! that device and closed on every exit path.

mod reply;
mod rpc;

pub use reply::RpcReply;
pub use rpc::RpcOp;

use std::future::Future;

use log::{debug, warn};

use crate::error::{ConnectionError, OperationError};
use crate::transport::{NetconfTransport, TransportConfig};

/// A request/reply session against a single device.
///
/// The workflows are written against this trait so they can be
/// exercised without a live device.
pub trait Session: Send {
    /// Execute one remote operation and return its structured reply.
    ///
    /// A device-reported error is surfaced as an [`OperationError`]
    /// carrying the operation's purpose, so the caller can decide
    /// whether the failure is recoverable.
    fn execute(
        &mut self,
        op: RpcOp,
    ) -> impl Future<Output = Result<RpcReply, OperationError>> + Send;

    /// Close the connection. Idempotent, safe to call multiple times.
    fn close(&mut self) -> impl Future<Output = Result<(), ConnectionError>> + Send;

    /// Whether the connection is still open.
    fn is_open(&self) -> bool;
}

/// The real NETCONF-over-SSH session.
pub struct NetconfSession {
    /// Transport handle, `None` once closed.
    transport: Option<NetconfTransport>,

    /// Device address, kept for log messages.
    host: String,

    /// Incrementing rpc message id.
    message_id: u64,
}

impl NetconfSession {
    /// Connect and authenticate to one device.
    ///
    /// Failure is fatal for that device only: the fleet driver records
    /// it in the device's outcome and proceeds to the next device.
    pub async fn open(config: &TransportConfig) -> Result<Self, ConnectionError> {
        let transport = NetconfTransport::connect(config).await?;
        debug!("netconf session open to {}:{}", config.host, config.port);

        Ok(Self {
            transport: Some(transport),
            host: config.host.clone(),
            message_id: 100,
        })
    }
}

impl Session for NetconfSession {
    async fn execute(&mut self, op: RpcOp) -> Result<RpcReply, OperationError> {
        let step = op.step();
        self.message_id += 1;
        let request = format!(
            "<rpc message-id=\"{}\" xmlns=\"urn:ietf:params:xml:ns:netconf:base:1.0\">{}</rpc>",
            self.message_id,
            op.to_xml()
        );

        let transport = self
            .transport
            .as_mut()
            .ok_or(OperationError::Closed { step })?;

        transport
            .send_frame(&request)
            .await
            .map_err(|source| OperationError::Transport { step, source })?;

        let raw = transport
            .read_frame()
            .await
            .map_err(|source| OperationError::Transport { step, source })?;

        let reply = RpcReply::parse(&raw);
        if let Some(message) = &reply.error {
            return Err(OperationError::Rpc {
                step,
                message: message.clone(),
            });
        }

        Ok(reply)
    }

    async fn close(&mut self) -> Result<(), ConnectionError> {
        if let Some(transport) = self.transport.take() {
            debug!("closing netconf session to {}", self.host);
            transport.close().await?;
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.transport.is_some()
    }
}

impl Drop for NetconfSession {
    fn drop(&mut self) {
        if self.transport.is_some() {
            warn!("netconf session to {} dropped without close()", self.host);
        }
    }
}
