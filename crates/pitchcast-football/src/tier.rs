// Team-strength tier adjustment of offensive and defensive rates.

use pitchcast_core::config::TierConfig;
use pitchcast_core::{Role, StatBundle};

/// Scale offensive rates by the tier's offensive multiplier and goals
/// conceded (goalkeepers and defenders) by the defensive multiplier.
///
/// Defenders without a recorded goals-conceded rate start from the league
/// average before scaling.
pub fn apply_tier(bundle: StatBundle, role: Role, tier: u8, config: &TierConfig) -> StatBundle {
    let offensive = config.offensive(tier);
    let defensive = config.defensive(tier);

    let goals_conceded = match role {
        Role::Goalkeeper => bundle.goals_conceded * defensive,
        Role::Defender => {
            let base = if bundle.goals_conceded > 0.0 {
                bundle.goals_conceded
            } else {
                config.league_avg_goals_conceded_per_game
            };
            base * defensive
        }
        Role::Midfielder | Role::Attacker => bundle.goals_conceded,
    };

    StatBundle {
        goals_scored: bundle.goals_scored * offensive,
        assists: bundle.assists * offensive,
        penalties_taken: bundle.penalties_taken * offensive,
        goals_conceded,
        ..bundle
    }
}
