//! The AGORA engine — a single-writer facade over the trust registry, the
//! voting engine, and the decision graph.
//!
//! Every mutating operation is applied atomically and in a strict total
//! order; the identity-authenticated boundary passes the caller and the
//! current time in, and the engine never reads a clock of its own. A fixed
//! sequence of (operation, timestamp) pairs therefore replays to identical
//! state on any machine.

pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod shared;

pub use config::{ConfigError, EngineConfig};
pub use engine::{AgoraEngine, FinalizeResult};
pub use error::EngineError;
pub use logging::init_tracing;
pub use shared::SharedEngine;
