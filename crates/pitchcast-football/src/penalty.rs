// Penalty-taker classification and penalty reprojection.
//
// A player with enough historical attempts is treated as the team's
// designated taker: their attempts come from the team's expected penalty volume
// instead of their own per-game history, and the conversion rate is blended
// toward a league default when the sample is small.

use pitchcast_core::config::PenaltyConfig;
use pitchcast_core::{HistoricalSeasonStat, StatBundle};
use tracing::debug;

use crate::age_curve::damped;

/// Result of the penalty stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenaltyOutcome {
    pub bundle: StatBundle,
    pub designated_taker: bool,
    /// Projected conversion rate; only set for designated takers.
    pub conversion_rate: Option<f64>,
}

/// Inputs the resolver needs beyond the bundle and history.
#[derive(Debug, Clone, Copy)]
pub struct PenaltyContext {
    pub offensive_multiplier: f64,
    pub age_modifier: f64,
    pub conversion_effect_ratio: f64,
}

/// Sum attempts and conversions over the lookback window, most recent first.
/// Conversions are capped at attempts.
pub fn penalty_totals(seasons: &[HistoricalSeasonStat], lookback: Option<usize>) -> (u32, u32) {
    let window = lookback.unwrap_or(seasons.len());
    let (taken, scored) = seasons
        .iter()
        .take(window)
        .fold((0u32, 0u32), |(t, s), season| {
            (t + season.penalties_taken, s + season.penalties_scored)
        });
    (taken, scored.min(taken))
}

/// Conversion rate from `scored` of `taken`, blended with the default rate
/// below the reliability threshold, nudged by age and clamped.
pub fn conversion_rate(
    taken: u32,
    scored: u32,
    age_modifier: f64,
    effect_ratio: f64,
    config: &PenaltyConfig,
) -> f64 {
    let personal = if taken > 0 {
        f64::from(scored) / f64::from(taken)
    } else {
        config.default_penalty_conversion_rate
    };
    let base = if taken >= config.min_penalties_for_reliable_rate {
        personal
    } else {
        (personal + config.default_penalty_conversion_rate) / 2.0
    };
    (base * damped(age_modifier, effect_ratio))
        .clamp(config.min_conversion_rate, config.max_conversion_rate)
}

/// Override penalty fields for designated takers; otherwise only recompute
/// misses so that scored + missed == taken.
pub fn resolve_penalties(
    bundle: StatBundle,
    seasons: &[HistoricalSeasonStat],
    ctx: PenaltyContext,
    config: &PenaltyConfig,
) -> PenaltyOutcome {
    let (total_taken, total_scored) = penalty_totals(seasons, config.lookback_seasons);

    if total_taken > 0 && total_taken >= config.min_penalties_taken_threshold {
        let team_per_game =
            config.league_avg_penalties_awarded_per_team_game * ctx.offensive_multiplier;
        let taken = (team_per_game * config.penalty_taker_share * ctx.age_modifier).max(0.0);
        let rate = conversion_rate(
            total_taken,
            total_scored,
            ctx.age_modifier,
            ctx.conversion_effect_ratio,
            config,
        );
        let scored = taken * rate;
        let missed = taken - scored;
        let goals_scored = (bundle.goals_scored + (scored - bundle.penalties_scored)).max(0.0);

        debug!(
            "designated taker: {}/{} historical, projected {:.3} taken/game at {:.3}",
            total_scored, total_taken, taken, rate
        );

        return PenaltyOutcome {
            bundle: StatBundle {
                goals_scored,
                penalties_taken: taken,
                penalties_scored: scored,
                penalties_missed: missed,
                ..bundle
            },
            designated_taker: true,
            conversion_rate: Some(rate),
        };
    }

    let taken = bundle.penalties_taken.max(0.0);
    let scored = bundle.penalties_scored.clamp(0.0, taken);
    PenaltyOutcome {
        bundle: StatBundle {
            penalties_taken: taken,
            penalties_scored: scored,
            penalties_missed: taken - scored,
            ..bundle
        },
        designated_taker: false,
        conversion_rate: None,
    }
}
