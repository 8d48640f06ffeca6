//! Governance parameters — every tunable value in one place.
//!
//! Embedders override these through the engine config; the defaults are the
//! intended AGORA configuration.

use serde::{Deserialize, Serialize};

/// All parameters of the governance engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GovParams {
    // ── Voting ───────────────────────────────────────────────────────────
    /// How long a proposal accepts votes, from creation. Default: 3 days.
    pub voting_period_secs: u64,

    /// Cooling-off period after voting closes before a proposal may be
    /// finalized. Default: 1 day.
    pub finalize_delay_secs: u64,

    /// Trust granted per `add_trust` call. Default: 1.
    pub trust_unit: u64,

    // ── Delegation ───────────────────────────────────────────────────────
    /// Maximum transitive delegation-chain depth. Chains longer than this
    /// (or containing a cycle) contribute zero weight. Default: 10.
    pub max_delegation_depth: usize,

    // ── Decision-graph priority ──────────────────────────────────────────
    /// Confidence multiplier for a freshly added, unreinforced conclusion.
    /// Default: 0.7 — a new decision is discounted against its raw vote
    /// weight until corroborated.
    pub decay_base_confidence: f64,

    /// Lower bound of the decay multiplier; old conclusions never score
    /// below `base_weight × floor`. Default: 0.1.
    pub decay_floor: f64,

    /// Half-life of the staleness decay: the confidence multiplier halves
    /// every this many seconds. Default: 30 days.
    pub decay_half_life_secs: u64,

    /// Incoming edge weight corresponding to +1.0 of corroboration
    /// multiplier. Default: 1000.
    pub corroboration_scale: u64,

    /// Upper bound of the corroboration multiplier. Default: 2.0.
    pub corroboration_cap: f64,
}

impl GovParams {
    /// AGORA defaults — the intended configuration for a live deployment.
    pub fn agora_defaults() -> Self {
        Self {
            voting_period_secs: 3 * 24 * 3600, // 3 days
            finalize_delay_secs: 24 * 3600,    // 1 day
            trust_unit: 1,

            max_delegation_depth: 10,

            decay_base_confidence: 0.7,
            decay_floor: 0.1,
            decay_half_life_secs: 30 * 24 * 3600, // 30 days
            corroboration_scale: 1000,
            corroboration_cap: 2.0,
        }
    }
}

/// Default is the AGORA configuration.
impl Default for GovParams {
    fn default() -> Self {
        Self::agora_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = GovParams::default();
        assert_eq!(p.voting_period_secs, 259_200);
        assert_eq!(p.finalize_delay_secs, 86_400);
        assert_eq!(p.max_delegation_depth, 10);
        assert!(p.decay_base_confidence > p.decay_floor);
    }
}
