// Per-game clean-sheet probability for goalkeepers and defenders.

use pitchcast_core::config::{tier_value, CleanSheetConfig};
use pitchcast_core::Role;

use crate::age_curve::damped;

/// Tier base probability, nudged by age, clamped to `[0, max_probability]`.
/// Roles that do not earn clean-sheet points always get 0.
pub fn clean_sheet_probability(
    role: Role,
    tier: u8,
    age_modifier: f64,
    cs_age_effect_ratio: f64,
    config: &CleanSheetConfig,
) -> f64 {
    if !role.earns_clean_sheet() {
        return 0.0;
    }
    let base = tier_value(&config.probability_by_tier, tier, 0.0);
    let p = base * damped(age_modifier, cs_age_effect_ratio);
    if !p.is_finite() {
        return 0.0;
    }
    p.clamp(0.0, config.max_probability.max(0.0))
}
