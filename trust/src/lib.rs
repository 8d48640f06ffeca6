//! Trust registry for the AGORA governance engine.
//!
//! Governance members grant trust one unit at a time; a member's base voting
//! weight is `1 + trust_score`. Scores only ever increase and user records
//! are never deleted.

pub mod error;
pub mod registry;

pub use error::TrustError;
pub use registry::{TrustRegistry, User};
