// glowfly-api: Async Rust client for the LightFx pixel board HTTP API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::DeviceClient;
pub use error::Error;
pub use models::{DeviceConfig, DeviceStatus, FxUpdate, FxUpdateAck, TaskReport};
pub use transport::TransportConfig;
