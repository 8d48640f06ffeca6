//! Fundamental types for the AGORA governance engine.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: member addresses, timestamps, sequential identifiers, vote
//! weights, governance parameters, and the error-kind taxonomy.

pub mod address;
pub mod error;
pub mod ids;
pub mod params;
pub mod time;

pub use address::MemberAddress;
pub use error::ErrorKind;
pub use ids::{CategoryId, NodeId, ProposalId, Weight};
pub use params::GovParams;
pub use time::Timestamp;
