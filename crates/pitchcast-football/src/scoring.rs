// Fantasy-point scoring of a per-game stat bundle.
//
// Scoring keys vary between league profiles, so every event resolves through
// an ordered list of candidate keys and ends at a hard-coded default.

use pitchcast_core::{Role, ScoringProfile, StatBundle};

// ---------------------------------------------------------------------------
// Rule resolution
// ---------------------------------------------------------------------------

/// An event's candidate keys, in priority order, and its fallback value.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub keys: &'static [&'static str],
    pub default: f64,
}

pub const ASSIST: Rule = Rule {
    keys: &["assist", "assist_standard"],
    default: 1.0,
};
pub const YELLOW_CARD: Rule = Rule {
    keys: &["yellow_card", "ammonizione"],
    default: -0.5,
};
pub const RED_CARD: Rule = Rule {
    keys: &["red_card", "espulsione"],
    default: -1.0,
};
pub const OWN_GOAL: Rule = Rule {
    keys: &["own_goal", "autogol"],
    default: -2.0,
};
/// Extra on top of the goal bonus; penalty goals are already in goals_scored.
pub const PENALTY_SCORED: Rule = Rule {
    keys: &["penalty_scored"],
    default: 0.0,
};
pub const PENALTY_MISSED: Rule = Rule {
    keys: &["penalty_missed", "rigore_sbagliato"],
    default: -3.0,
};
pub const PENALTY_SAVED: Rule = Rule {
    keys: &["penalty_saved", "rigore_parato"],
    default: 3.0,
};
pub const GOAL_CONCEDED: Rule = Rule {
    keys: &["goal_conceded", "goals_conceded", "gol_subito"],
    default: -1.0,
};

/// Goal bonus keys for a role, most specific first.
pub fn goal_rule(role: Role) -> Rule {
    let keys: &'static [&'static str] = match role {
        Role::Goalkeeper => &["goal_by_goalkeeper", "goal_goalkeeper", "goalkeeper_goal", "goal"],
        Role::Defender => &["goal_by_defender", "goal_defender", "defender_goal", "goal"],
        Role::Midfielder => &["goal_by_midfielder", "goal_midfielder", "midfielder_goal", "goal"],
        Role::Attacker => &["goal_by_attacker", "goal_attacker", "attacker_goal", "goal"],
    };
    Rule { keys, default: 3.0 }
}

/// Clean-sheet bonus keys for a role; `None` for roles that never earn one.
pub fn clean_sheet_rule(role: Role) -> Option<Rule> {
    match role {
        Role::Goalkeeper => Some(Rule {
            keys: &["clean_sheet_goalkeeper", "clean_sheet_gk", "clean_sheet"],
            default: 1.0,
        }),
        Role::Defender => Some(Rule {
            keys: &["clean_sheet_defender", "clean_sheet_def", "clean_sheet"],
            default: 0.5,
        }),
        Role::Midfielder | Role::Attacker => None,
    }
}

/// First candidate key present in the profile with a finite value, else
/// `default`.
pub fn resolve_rule(profile: &ScoringProfile, keys: &[&str], default: f64) -> f64 {
    keys.iter()
        .find_map(|key| profile.rule(key))
        .unwrap_or(default)
}

fn points(profile: &ScoringProfile, rule: Rule) -> f64 {
    resolve_rule(profile, rule.keys, rule.default)
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Per-game fantasy points for `bundle`: the rating plus every event bonus
/// and malus. Clean sheets are not scored here.
pub fn fantasy_points(bundle: &StatBundle, profile: &ScoringProfile, role: Role) -> f64 {
    let mut total = bundle.avg_rating;
    total += bundle.goals_scored * points(profile, goal_rule(role));
    total += bundle.assists * points(profile, ASSIST);
    total += bundle.yellow_cards * points(profile, YELLOW_CARD);
    total += bundle.red_cards * points(profile, RED_CARD);
    total += bundle.own_goals * points(profile, OWN_GOAL);
    total += bundle.penalties_scored * points(profile, PENALTY_SCORED);
    total += bundle.penalties_missed * points(profile, PENALTY_MISSED);

    if role == Role::Goalkeeper {
        total += bundle.penalties_saved * points(profile, PENALTY_SAVED);
        total += bundle.goals_conceded * points(profile, GOAL_CONCEDED);
    }

    total
}

/// Expected per-game clean-sheet points. Zero below the rating threshold:
/// the bonus only applies to at least an average individual performance.
pub fn clean_sheet_points(
    probability: f64,
    rating: f64,
    threshold: f64,
    profile: &ScoringProfile,
    role: Role,
) -> f64 {
    let Some(rule) = clean_sheet_rule(role) else {
        return 0.0;
    };
    if rating < threshold {
        return 0.0;
    }
    probability * points(profile, rule)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn profile(rules: &[(&str, f64)]) -> ScoringProfile {
        ScoringProfile {
            name: "test".into(),
            clean_sheet_rating_threshold: None,
            rules: rules.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    #[test]
    fn resolve_walks_candidates_in_order() {
        let p = profile(&[("goal", 2.0), ("goal_attacker", 3.5)]);
        let rule = goal_rule(Role::Attacker);
        assert!(approx_eq(resolve_rule(&p, rule.keys, rule.default), 3.5, 1e-12));

        let p = profile(&[("goal", 2.0)]);
        assert!(approx_eq(resolve_rule(&p, rule.keys, rule.default), 2.0, 1e-12));

        let p = profile(&[]);
        assert!(approx_eq(resolve_rule(&p, rule.keys, rule.default), 3.0, 1e-12));
    }

    #[test]
    fn non_finite_rule_falls_through() {
        let p = profile(&[("assist", f64::INFINITY), ("assist_standard", 0.5)]);
        assert!(approx_eq(resolve_rule(&p, ASSIST.keys, ASSIST.default), 0.5, 1e-12));
    }

    #[test]
    fn rating_is_the_base_score() {
        let bundle = StatBundle {
            avg_rating: 6.25,
            ..Default::default()
        };
        assert!(approx_eq(fantasy_points(&bundle, &profile(&[]), Role::Midfielder), 6.25, 1e-12));
    }

    #[test]
    fn event_bonuses_and_maluses() {
        let bundle = StatBundle {
            avg_rating: 6.0,
            goals_scored: 0.5,
            assists: 0.2,
            yellow_cards: 0.2,
            red_cards: 0.1,
            own_goals: 0.1,
            penalties_missed: 0.1,
            ..Default::default()
        };
        let p = profile(&[("goal_by_midfielder", 4.0)]);
        // 6 + 2 + 0.2 - 0.1 - 0.1 - 0.2 - 0.3
        assert!(approx_eq(fantasy_points(&bundle, &p, Role::Midfielder), 7.5, 1e-12));
    }

    #[test]
    fn goalkeeper_only_events_are_gated() {
        let bundle = StatBundle {
            avg_rating: 6.0,
            penalties_saved: 0.1,
            goals_conceded: 1.0,
            ..Default::default()
        };
        let p = profile(&[]);
        assert!(approx_eq(fantasy_points(&bundle, &p, Role::Goalkeeper), 5.3, 1e-12));
        assert!(approx_eq(fantasy_points(&bundle, &p, Role::Defender), 6.0, 1e-12));
    }

    #[test]
    fn clean_sheet_requires_rating_threshold() {
        let p = profile(&[("clean_sheet_goalkeeper", 1.0)]);
        assert!(approx_eq(clean_sheet_points(0.4, 6.0, 6.0, &p, Role::Goalkeeper), 0.4, 1e-12));
        assert_eq!(clean_sheet_points(0.4, 5.99, 6.0, &p, Role::Goalkeeper), 0.0);
    }

    #[test]
    fn clean_sheet_defaults_by_role() {
        let p = profile(&[]);
        assert!(approx_eq(clean_sheet_points(0.4, 6.5, 6.0, &p, Role::Defender), 0.2, 1e-12));
        assert_eq!(clean_sheet_points(0.4, 6.5, 6.0, &p, Role::Attacker), 0.0);
        let p = profile(&[("clean_sheet", 2.0)]);
        assert!(approx_eq(clean_sheet_points(0.5, 6.5, 6.0, &p, Role::Defender), 1.0, 1e-12));
    }
}
