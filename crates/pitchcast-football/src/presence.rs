// Expected season appearances.

use pitchcast_core::config::{tier_value, AgeCurveConfig, PresenceConfig};
use pitchcast_core::Role;

/// Appearances assumed when a role has no default table.
const FALLBACK_DEFAULT_PRESENCES: f64 = 24.0;

/// Presence multiplier derived from the age modifier, with separate growth
/// and decline ratios and caps.
pub fn age_presence_factor(age_modifier: f64, config: &AgeCurveConfig) -> f64 {
    if age_modifier > 1.0 {
        let growth = 1.0 + (age_modifier - 1.0) * config.presence_growth_ratio;
        growth.min(config.presence_growth_cap)
    } else if age_modifier < 1.0 {
        let decline = 1.0 - (1.0 - age_modifier) * config.presence_decline_ratio;
        decline.max(config.presence_decline_cap)
    } else {
        1.0
    }
}

/// Base appearances for a role/tier when there is no usable history.
pub fn default_presences(role: Role, tier: u8, config: &PresenceConfig) -> f64 {
    config
        .default_by_role
        .get(&role)
        .map(|table| tier_value(table, tier, FALLBACK_DEFAULT_PRESENCES))
        .unwrap_or(FALLBACK_DEFAULT_PRESENCES)
}

/// Expected appearances, rounded and clamped to the configured bounds.
///
/// `historical` is the weighted appearances-per-season figure; `None` (or a
/// non-positive value) selects the role/tier default table.
pub fn estimate_presences(
    historical: Option<f64>,
    role: Role,
    tier: u8,
    age_modifier: f64,
    config: &PresenceConfig,
    age_config: &AgeCurveConfig,
) -> u32 {
    let base = match historical {
        Some(apps) if apps > 0.0 => apps,
        _ => default_presences(role, tier, config),
    };
    let estimate = base
        * tier_value(&config.factor_by_tier, tier, 1.0)
        * age_presence_factor(age_modifier, age_config);

    let min = config.min_projected_presences;
    let max = config.max_projected_presences.max(min);
    if !estimate.is_finite() {
        return min;
    }
    (estimate.round().max(0.0) as u32).clamp(min, max)
}
