//! NETCONF-over-SSH transport layer.
//!
//! This module provides the low-level connection management: SSH connect
//! and authentication, the netconf subsystem channel, and end-of-message
//! framing.

pub mod config;
mod frame;
mod ssh;

pub use config::{Credentials, DEFAULT_PORT, TransportConfig};
pub use frame::FrameBuffer;
pub use ssh::NetconfTransport;
