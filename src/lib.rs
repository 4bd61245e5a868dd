pub mod client;
pub mod config;
pub mod service;
pub mod telemetry;

pub use client::payeezy::PayeezyClient;
pub use client::ProcessorClient;
pub use config::{GatewayMeta, Settings};
pub use service::gateway::contract::{CcOffsitePayments, CcPayments};
pub use service::gateway::error::GatewayError;
pub use service::gateway::service::Service as GatewayService;
