//! Liquid-democracy voting for the AGORA engine.
//!
//! Proposal → vote → finalize, with per-category delegation:
//! - **Per-category delegation** (a member entrusts one delegate per topic)
//! - **Transitive resolution** with cycle detection and a max-depth limit
//! - **Single attribution** — each member's weight counts toward at most one
//!   cast vote per proposal; a direct vote takes precedence over a delegate
//!
//! Vote weight is trust-based (`1 + trust_score`), not one-member-one-vote;
//! the trust registry is a collaborator supplied at cast time.

pub mod delegation;
pub mod engine;
pub mod error;
pub mod proposal;

pub use delegation::{DelegationResolver, DelegationSnapshot};
pub use engine::{FinalizeOutcome, VotingEngine};
pub use error::GovernanceError;
pub use proposal::{Proposal, ProposalPhase};
