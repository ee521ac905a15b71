// End-to-end projection scenarios through the public `Projector` API.

use chrono::NaiveDate;
use pitchcast_core::config::EngineConfig;
use pitchcast_core::{HistoricalSeasonStat, Player, Role, ScoringProfile, TeamRef};
use pitchcast_football::{ProjectionSource, Projector};

// ===========================================================================
// Test helpers
// ===========================================================================

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 8, 1).unwrap()
}

fn player(id: &str, role: Role, birth: (i32, u32, u32), tier: Option<u8>) -> Player {
    Player {
        id: id.into(),
        name: format!("Player {id}"),
        role,
        birth_date: NaiveDate::from_ymd_opt(birth.0, birth.1, birth.2),
        team: Some(TeamRef {
            name: "Club".into(),
            tier,
        }),
    }
}

fn season(label: &str, games: u32, rating: f64) -> HistoricalSeasonStat {
    HistoricalSeasonStat {
        season: label.into(),
        team: "Club".into(),
        league: "Serie A".into(),
        games_played: games,
        avg_rating: rating,
        ..Default::default()
    }
}

fn profile(rules: &[(&str, f64)]) -> ScoringProfile {
    ScoringProfile {
        name: "Test League".into(),
        clean_sheet_rating_threshold: Some(6.0),
        rules: rules.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
    }
}

/// Linear decay keeps the weighted appearances exact for identical seasons.
fn linear_config() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.history.season_decay_factor = 1.0;
    config
}

// ===========================================================================
// Scenarios
// ===========================================================================

#[test]
fn prime_attacker_on_top_team() {
    let projector = Projector::new(linear_config(), reference_date());
    let attacker = player("att", Role::Attacker, (1996, 1, 1), Some(1));
    let history: Vec<_> = ["2023-24", "2022-23", "2021-22"]
        .iter()
        .map(|label| HistoricalSeasonStat {
            goals_scored: 9,
            ..season(label, 30, 6.5)
        })
        .collect();

    let result = projector.project(&attacker, &history, &profile(&[("goal_by_attacker", 3.0)]));

    assert_eq!(result.source, ProjectionSource::History);
    assert_eq!(result.age, Some(28));
    assert_eq!(result.age_modifier, 1.0);
    assert!(!result.penalty_taker);
    assert_eq!(result.penalty_conversion_rate, None);
    // 30 appearances * tier-1 presence factor 1.05 = 31.5 -> 32
    assert_eq!(result.expected_presences, 32);

    // rating + goal bonus * 0.3 goals/game * tier-1 offensive multiplier 1.2
    let per_game = 6.5 + 3.0 * 0.3 * 1.2;
    assert!(approx_eq(result.fantasy_points_per_game, per_game, 1e-9));
    assert!(approx_eq(result.total_fantasy_points, per_game * 32.0, 1e-6));
    assert!(approx_eq(result.seasonal_totals["goals_scored"], 0.36 * 32.0, 1e-9));
    assert!(approx_eq(result.seasonal_totals["avg_rating"], 6.5, 1e-9));
}

#[test]
fn goalkeeper_clean_sheet_needs_rating_threshold() {
    let projector = Projector::new(EngineConfig::default(), reference_date());
    let keeper = player("gk", Role::Goalkeeper, (1994, 3, 10), Some(3));

    let with_bonus = profile(&[("clean_sheet_goalkeeper", 1.0)]);
    let without_bonus = profile(&[("clean_sheet_goalkeeper", 0.0)]);

    let history_for = |rating: f64| {
        vec![HistoricalSeasonStat {
            goals_conceded: 36,
            ..season("2023-24", 36, rating)
        }]
    };

    // Good rating: the clean-sheet bonus is present
    let high = history_for(6.4);
    let a = projector.project(&keeper, &high, &with_bonus);
    let b = projector.project(&keeper, &high, &without_bonus);
    assert!(approx_eq(a.clean_sheet_probability, 0.25, 1e-12));
    assert!(approx_eq(
        a.fantasy_points_per_game - b.fantasy_points_per_game,
        0.25,
        1e-9
    ));

    // Below-threshold rating: identical stats, no clean-sheet points
    let low = history_for(5.6);
    let c = projector.project(&keeper, &low, &with_bonus);
    let d = projector.project(&keeper, &low, &without_bonus);
    assert!(approx_eq(c.clean_sheet_probability, 0.25, 1e-12));
    assert_eq!(c.fantasy_points_per_game, d.fantasy_points_per_game);
}

#[test]
fn profile_without_threshold_uses_engine_default() {
    let mut config = EngineConfig::default();
    config.clean_sheet.default_rating_threshold = 7.0;
    let projector = Projector::new(config, reference_date());
    let defender = player("def", Role::Defender, (1995, 6, 1), Some(1));
    let history = vec![season("2023-24", 30, 6.5)];

    let mut no_threshold = profile(&[("clean_sheet_defender", 1.0)]);
    no_threshold.clean_sheet_rating_threshold = None;
    let mut zero_bonus = no_threshold.clone();
    zero_bonus.rules.insert("clean_sheet_defender".into(), 0.0);

    let a = projector.project(&defender, &history, &no_threshold);
    let b = projector.project(&defender, &history, &zero_bonus);
    // 6.5 < 7.0 engine default, so no bonus
    assert_eq!(a.fantasy_points_per_game, b.fantasy_points_per_game);
}

#[test]
fn no_history_returns_complete_result() {
    let projector = Projector::new(EngineConfig::default(), reference_date());
    let rookie = player("new", Role::Defender, (2005, 2, 2), None);

    let result = projector.project(&rookie, &[], &ScoringProfile::default());

    assert_eq!(result.source, ProjectionSource::DefaultTable);
    assert_eq!(result.tier, 3);
    assert!(!result.penalty_taker);
    assert_eq!(result.penalty_conversion_rate, None);
    assert!(result.rating_per_game > 0.0);
    assert!(result.fantasy_points_per_game.is_finite());
    assert!((5..=38).contains(&result.expected_presences));
    assert!(approx_eq(
        result.total_fantasy_points,
        result.fantasy_points_per_game * f64::from(result.expected_presences),
        1e-9
    ));
    for key in [
        "avg_rating",
        "goals_scored",
        "assists",
        "yellow_cards",
        "red_cards",
        "own_goals",
        "penalties_taken",
        "penalties_scored",
        "penalties_missed",
        "penalties_saved",
        "goals_conceded",
        "clean_sheet_probability",
    ] {
        let value = result.seasonal_totals.get(key).copied();
        assert!(value.is_some_and(f64::is_finite), "missing or non-finite {key}");
    }
    // Young defender: age curve growth lifts the clean-sheet probability
    assert!(result.age_modifier > 1.0);
    assert!(result.clean_sheet_probability > 0.25);
}

#[test]
fn midfielder_with_penalty_volume_is_designated_taker() {
    let projector = Projector::new(EngineConfig::default(), reference_date());
    let mid = player("mid", Role::Midfielder, (1998, 1, 1), Some(2));
    let history = vec![
        HistoricalSeasonStat {
            goals_scored: 5,
            penalties_taken: 2,
            penalties_scored: 1,
            ..season("2023-24", 30, 6.3)
        },
        HistoricalSeasonStat {
            goals_scored: 4,
            penalties_taken: 2,
            penalties_scored: 2,
            ..season("2022-23", 30, 6.2)
        },
        HistoricalSeasonStat {
            goals_scored: 3,
            penalties_taken: 2,
            penalties_scored: 1,
            ..season("2021-22", 30, 6.1)
        },
    ];

    let result = projector.project(&mid, &history, &ScoringProfile::default());

    assert!(result.penalty_taker);
    let presences = f64::from(result.expected_presences);
    let taken_per_game = result.seasonal_totals["penalties_taken"] / presences;
    // League average * tier-2 offensive multiplier * taker share, age 26 neutral
    let expected = 0.25 * 1.1 * 0.85;
    assert!(approx_eq(taken_per_game, expected, 1e-9));
    // Not the raw personal average of 2 per 30 games
    assert!(!approx_eq(taken_per_game, 2.0 / 30.0, 1e-3));

    let scored = result.seasonal_totals["penalties_scored"];
    let missed = result.seasonal_totals["penalties_missed"];
    assert!(approx_eq(scored + missed, result.seasonal_totals["penalties_taken"], 1e-9));
    assert!(approx_eq(scored / result.seasonal_totals["penalties_taken"], 4.0 / 6.0, 1e-9));
    // Six attempts clear the reliability threshold: raw 4/6, age-neutral
    let rate = result.penalty_conversion_rate.unwrap();
    assert!(approx_eq(rate, 4.0 / 6.0, 1e-12));
}

#[test]
fn projection_is_deterministic() {
    let projector = Projector::new(EngineConfig::default(), reference_date());
    let attacker = player("det", Role::Attacker, (1992, 11, 30), Some(4));
    let history = vec![
        HistoricalSeasonStat {
            goals_scored: 11,
            assists: 4,
            yellow_cards: 5,
            penalties_taken: 4,
            penalties_scored: 3,
            ..season("2023-24", 33, 6.6)
        },
        HistoricalSeasonStat {
            league: "Serie B".into(),
            goals_scored: 14,
            assists: 2,
            ..season("2022-23", 35, 6.8)
        },
    ];
    let p = profile(&[("goal", 3.0), ("assist", 1.0)]);

    let first = projector.project(&attacker, &history, &p);
    let second = projector.project(&attacker, &history, &p);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn presences_stay_in_bounds_for_all_tiers_and_ages() {
    let projector = Projector::new(EngineConfig::default(), reference_date());
    for role in Role::ALL {
        for tier in 1..=5u8 {
            for birth_year in [1984, 1990, 1996, 2002, 2007] {
                let p = player("b", role, (birth_year, 5, 5), Some(tier));
                for games in [0, 3, 20, 38] {
                    let history = vec![season("2023-24", games, 6.0)];
                    let result = projector.project(&p, &history, &ScoringProfile::default());
                    assert!(
                        (5..=38).contains(&result.expected_presences),
                        "{role} tier {tier} born {birth_year} games {games}"
                    );
                }
            }
        }
    }
}

#[test]
fn out_of_range_tier_is_neutral() {
    let projector = Projector::new(EngineConfig::default(), reference_date());
    let a = projector.project(
        &player("t", Role::Attacker, (1997, 1, 1), Some(9)),
        &[season("2023-24", 30, 6.0)],
        &ScoringProfile::default(),
    );
    let b = projector.project(
        &player("t", Role::Attacker, (1997, 1, 1), None),
        &[season("2023-24", 30, 6.0)],
        &ScoringProfile::default(),
    );
    assert_eq!(a.tier, 3);
    assert_eq!(a.total_fantasy_points, b.total_fantasy_points);
}
