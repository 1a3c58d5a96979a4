//! Paper Galgame — engine facade.
//!
//! Wires the bounded contexts together for a host: boots from configuration,
//! exposes the presentation-boundary actions, and installs logging.

pub mod config;
pub mod engine;
pub mod error;
pub mod telemetry;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::EngineError;
