pub mod config;
pub mod handshake;

pub use config::{ConfigError, HandshakeConfig, RenderConfig};
