//! Priority scoring factors — staleness decay and corroboration boost.
//!
//! A fresh, unreinforced conclusion is worth `base_confidence` (0.7 by
//! default) of its raw vote weight; the multiplier halves every half-life
//! and never drops below the floor. Corroboration converts incoming edge
//! weight into a bounded boost. Both factors are pure in their inputs, so
//! priority is reproducible for a given `now`.

use agora_types::{GovParams, Weight};

/// Staleness multiplier for a conclusion `elapsed_secs` old:
/// `max(floor, base_confidence × 0.5^(elapsed / half_life))`.
pub fn decay_factor(elapsed_secs: u64, params: &GovParams) -> f64 {
    if params.decay_half_life_secs == 0 {
        return params.decay_floor;
    }
    let exponent = elapsed_secs as f64 / params.decay_half_life_secs as f64;
    let decayed = params.decay_base_confidence * 0.5_f64.powf(exponent);
    decayed.max(params.decay_floor)
}

/// Corroboration multiplier for a node with `incoming` total edge weight:
/// `min(cap, incoming / scale)`.
pub fn corroboration_factor(incoming: Weight, params: &GovParams) -> f64 {
    if params.corroboration_scale == 0 {
        return 0.0;
    }
    let normalized = incoming as f64 / params.corroboration_scale as f64;
    normalized.min(params.corroboration_cap)
}
