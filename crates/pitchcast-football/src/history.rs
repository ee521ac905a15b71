// Weighted multi-season aggregation into per-game rates.
//
// Each season is normalized to per-game values, converted for league
// difficulty, then blended with its season weight. Seasons with zero games
// still count toward the appearances average but not toward rates.

use pitchcast_core::config::HistoryConfig;
use pitchcast_core::{HistoricalSeasonStat, StatBundle};
use tracing::debug;

use crate::weights::season_weights;

/// Output of the aggregation stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedHistory {
    pub bundle: StatBundle,
    /// Weighted average of games played per season.
    pub appearances: f64,
    /// Total season weight that contributed to rate stats.
    pub rate_weight: f64,
}

/// Per-game rates for one season after league conversion.
fn season_rates(season: &HistoricalSeasonStat, config: &HistoryConfig) -> StatBundle {
    let games = f64::from(season.games_played);
    let per_game = |count: u32| f64::from(count) / games;
    let conversion = config.conversion_for(&season.league);

    let taken = per_game(season.penalties_taken);
    let scored = per_game(season.penalties_scored);

    StatBundle {
        avg_rating: season.avg_rating * conversion.avg_rating,
        goals_scored: per_game(season.goals_scored) * conversion.goals_scored,
        assists: per_game(season.assists) * conversion.assists,
        yellow_cards: per_game(season.yellow_cards),
        red_cards: per_game(season.red_cards),
        own_goals: per_game(season.own_goals),
        penalties_taken: taken,
        penalties_scored: scored,
        penalties_missed: (taken - scored).max(0.0),
        penalties_saved: per_game(season.penalties_saved),
        goals_conceded: per_game(season.goals_conceded),
    }
}

/// Aggregate `seasons` (most recent first) using explicit `weights`.
///
/// `weights` must have one entry per season. When no season has games the
/// rates stay zero and the caller is expected to switch to the no-history
/// path.
pub fn aggregate_with_weights(
    seasons: &[HistoricalSeasonStat],
    weights: &[f64],
    config: &HistoryConfig,
) -> WeightedHistory {
    let mut sum = StatBundle::default();
    let mut rate_weight = 0.0;
    let mut appearances = 0.0;

    for (season, &weight) in seasons.iter().zip(weights) {
        appearances += weight * f64::from(season.games_played);
        if season.games_played == 0 {
            continue;
        }
        let rates = season_rates(season, config);
        rate_weight += weight;
        sum.avg_rating += weight * rates.avg_rating;
        sum.goals_scored += weight * rates.goals_scored;
        sum.assists += weight * rates.assists;
        sum.yellow_cards += weight * rates.yellow_cards;
        sum.red_cards += weight * rates.red_cards;
        sum.own_goals += weight * rates.own_goals;
        sum.penalties_taken += weight * rates.penalties_taken;
        sum.penalties_scored += weight * rates.penalties_scored;
        sum.penalties_missed += weight * rates.penalties_missed;
        sum.penalties_saved += weight * rates.penalties_saved;
        sum.goals_conceded += weight * rates.goals_conceded;
    }

    let bundle = if rate_weight > 0.0 {
        StatBundle {
            avg_rating: sum.avg_rating / rate_weight,
            goals_scored: sum.goals_scored / rate_weight,
            assists: sum.assists / rate_weight,
            yellow_cards: sum.yellow_cards / rate_weight,
            red_cards: sum.red_cards / rate_weight,
            own_goals: sum.own_goals / rate_weight,
            penalties_taken: sum.penalties_taken / rate_weight,
            penalties_scored: sum.penalties_scored / rate_weight,
            penalties_missed: sum.penalties_missed / rate_weight,
            penalties_saved: sum.penalties_saved / rate_weight,
            goals_conceded: sum.goals_conceded / rate_weight,
        }
    } else {
        StatBundle::default()
    };

    WeightedHistory {
        bundle,
        appearances,
        rate_weight,
    }
}

/// Aggregate up to `max_seasons_lookback` seasons with the configured decay.
pub fn aggregate(seasons: &[HistoricalSeasonStat], config: &HistoryConfig) -> WeightedHistory {
    let window = &seasons[..seasons.len().min(config.max_seasons_lookback)];
    let weights = season_weights(window.len(), config.season_decay_factor);
    let result = aggregate_with_weights(window, &weights, config);
    debug!(
        "aggregated {} seasons: appearances={:.2}, rate_weight={:.3}",
        window.len(),
        result.appearances,
        result.rate_weight
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitchcast_core::config::LeagueConversion;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn season(
        league: &str,
        games: u32,
        rating: f64,
        goals: u32,
        assists: u32,
    ) -> HistoricalSeasonStat {
        HistoricalSeasonStat {
            season: "2023-24".into(),
            team: "Team".into(),
            league: league.into(),
            games_played: games,
            avg_rating: rating,
            goals_scored: goals,
            assists,
            ..Default::default()
        }
    }

    #[test]
    fn single_season_is_plain_per_game() {
        let config = HistoryConfig::default();
        let seasons = vec![season("Serie A", 30, 6.5, 9, 6)];
        let result = aggregate(&seasons, &config);
        assert!(approx_eq(result.bundle.goals_scored, 0.3, 1e-12));
        assert!(approx_eq(result.bundle.assists, 0.2, 1e-12));
        assert!(approx_eq(result.bundle.avg_rating, 6.5, 1e-12));
        assert!(approx_eq(result.appearances, 30.0, 1e-12));
    }

    #[test]
    fn explicit_weights_blend_rates() {
        let config = HistoryConfig::default();
        let seasons = vec![season("Serie A", 20, 7.0, 10, 0), season("Serie A", 20, 6.0, 0, 0)];
        let result = aggregate_with_weights(&seasons, &[0.75, 0.25], &config);
        assert!(approx_eq(result.bundle.goals_scored, 0.375, 1e-12));
        assert!(approx_eq(result.bundle.avg_rating, 6.75, 1e-12));
        assert!(approx_eq(result.appearances, 20.0, 1e-12));
    }

    #[test]
    fn zero_game_season_counts_for_appearances_only() {
        let config = HistoryConfig::default();
        let seasons = vec![season("Serie A", 0, 0.0, 0, 0), season("Serie A", 30, 6.0, 6, 0)];
        let result = aggregate_with_weights(&seasons, &[0.5, 0.5], &config);
        // Rates are renormalized over the season that had games.
        assert!(approx_eq(result.bundle.goals_scored, 0.2, 1e-12));
        assert!(approx_eq(result.bundle.avg_rating, 6.0, 1e-12));
        assert!(approx_eq(result.appearances, 15.0, 1e-12));
        assert!(approx_eq(result.rate_weight, 0.5, 1e-12));
    }

    #[test]
    fn all_empty_seasons_leave_rates_zero() {
        let config = HistoryConfig::default();
        let seasons = vec![season("Serie A", 0, 0.0, 0, 0), season("Serie A", 0, 0.0, 0, 0)];
        let result = aggregate(&seasons, &config);
        assert_eq!(result.bundle, StatBundle::default());
        assert_eq!(result.appearances, 0.0);
        assert_eq!(result.rate_weight, 0.0);
    }

    #[test]
    fn league_conversion_applies_to_goals_assists_rating() {
        let mut config = HistoryConfig::default();
        config.league_conversion.insert(
            "Serie B".into(),
            LeagueConversion {
                goals_scored: 0.5,
                assists: 0.8,
                avg_rating: 0.9,
            },
        );
        let seasons = vec![season("Serie B", 10, 7.0, 4, 5)];
        let result = aggregate(&seasons, &config);
        assert!(approx_eq(result.bundle.goals_scored, 0.2, 1e-12));
        assert!(approx_eq(result.bundle.assists, 0.4, 1e-12));
        assert!(approx_eq(result.bundle.avg_rating, 6.3, 1e-12));
    }

    #[test]
    fn lookback_caps_seasons() {
        let mut config = HistoryConfig::default();
        config.max_seasons_lookback = 1;
        let seasons = vec![season("Serie A", 30, 6.0, 3, 0), season("Serie A", 30, 6.0, 30, 0)];
        let result = aggregate(&seasons, &config);
        assert!(approx_eq(result.bundle.goals_scored, 0.1, 1e-12));
    }

    #[test]
    fn missed_penalties_derived_per_season() {
        let config = HistoryConfig::default();
        let mut s = season("Serie A", 20, 6.5, 5, 0);
        s.penalties_taken = 4;
        s.penalties_scored = 3;
        let result = aggregate(&[s], &config);
        assert!(approx_eq(result.bundle.penalties_taken, 0.2, 1e-12));
        assert!(approx_eq(result.bundle.penalties_scored, 0.15, 1e-12));
        assert!(approx_eq(result.bundle.penalties_missed, 0.05, 1e-12));
    }
}
