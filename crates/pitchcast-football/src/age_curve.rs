// Role-specific age curve: growth before the peak window, decline after it.

use pitchcast_core::config::AgeCurveParams;
use pitchcast_core::StatBundle;

/// Age multiplier for a player. Missing age or missing curve is neutral (1.0).
///
/// Below `peak_start` the modifier grows by `growth_factor` per year, capped at
/// `young_cap`; above `peak_end` it shrinks by `decline_factor` per year,
/// floored at `old_cap`.
pub fn age_modifier(age: Option<u32>, params: Option<&AgeCurveParams>) -> f64 {
    let (Some(age), Some(p)) = (age, params) else {
        return 1.0;
    };
    let age = f64::from(age);
    let peak_start = f64::from(p.peak_start);
    let peak_end = f64::from(p.peak_end);

    if age < peak_start {
        (1.0 + (peak_start - age) * p.growth_factor).min(p.young_cap)
    } else if age > peak_end {
        (1.0 - (age - peak_end) * p.decline_factor).max(p.old_cap)
    } else {
        1.0
    }
}

/// Apply `modifier` at `ratio` strength: `1 + (modifier - 1) * ratio`.
pub fn damped(modifier: f64, ratio: f64) -> f64 {
    1.0 + (modifier - 1.0) * ratio
}

/// Scale the rating at reduced strength and goals/assists at full strength.
pub fn apply_age(bundle: StatBundle, modifier: f64, mv_effect_ratio: f64) -> StatBundle {
    StatBundle {
        avg_rating: bundle.avg_rating * damped(modifier, mv_effect_ratio),
        goals_scored: bundle.goals_scored * modifier,
        assists: bundle.assists * modifier,
        ..bundle
    }
}
