// Projection orchestration.
//
// Pipeline with usable history:
//   aggregate -> age curve -> tier -> penalties -> clean sheet -> presences
//   -> scoring -> seasonal totals
// Without usable history (no seasons, or zero weighted appearances) the
// role default table replaces the first four stages.

use chrono::NaiveDate;
use pitchcast_core::config::EngineConfig;
use pitchcast_core::{HistoricalSeasonStat, Player, Role, ScoringProfile, StatBundle};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::age_curve::{age_modifier, apply_age, damped};
use crate::clean_sheet::clean_sheet_probability;
use crate::history::aggregate;
use crate::penalty::{resolve_penalties, PenaltyContext, PenaltyOutcome};
use crate::presence::estimate_presences;
use crate::scoring::{clean_sheet_points, fantasy_points};
use crate::tier::apply_tier;

/// Rating assumed when a role has no default bundle.
const FALLBACK_RATING: f64 = 6.0;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Which path produced the per-game bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionSource {
    History,
    DefaultTable,
}

/// Forward-looking projection for one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionResult {
    pub player_id: String,
    pub player_name: String,
    pub role: Role,
    pub source: ProjectionSource,
    pub age: Option<u32>,
    pub age_modifier: f64,
    pub tier: u8,
    pub penalty_taker: bool,
    /// Projected penalty conversion rate; set only for designated takers.
    pub penalty_conversion_rate: Option<f64>,
    pub rating_per_game: f64,
    pub fantasy_points_per_game: f64,
    pub clean_sheet_probability: f64,
    pub expected_presences: u32,
    pub total_fantasy_points: f64,
    /// Per-game stats times presences; `avg_rating` and
    /// `clean_sheet_probability` stay per-game.
    pub seasonal_totals: BTreeMap<String, f64>,
}

// ---------------------------------------------------------------------------
// Projector
// ---------------------------------------------------------------------------

/// Player-independent inputs resolved once per projection.
#[derive(Debug, Clone, Copy)]
struct PlayerContext {
    role: Role,
    tier: u8,
    age: Option<u32>,
    age_modifier: f64,
}

/// Pure projection engine over an immutable configuration.
///
/// `Projector` holds no mutable state, so one instance can be shared across
/// threads to project many players concurrently.
#[derive(Debug, Clone)]
pub struct Projector {
    config: EngineConfig,
    reference_date: NaiveDate,
}

impl Projector {
    /// `reference_date` is the date player ages are measured on.
    pub fn new(config: EngineConfig, reference_date: NaiveDate) -> Self {
        Self {
            config,
            reference_date,
        }
    }

    /// Project `player` from `history` (most recent season first).
    pub fn project(
        &self,
        player: &Player,
        history: &[HistoricalSeasonStat],
        profile: &ScoringProfile,
    ) -> ProjectionResult {
        let ctx = self.player_context(player);

        let weighted = (!history.is_empty()).then(|| aggregate(history, &self.config.history));
        let (bundle, appearances, penalties, source) = match weighted {
            Some(w) if w.appearances > 0.0 => {
                let outcome = self.adjust_history(w.bundle, history, ctx);
                (
                    outcome.bundle,
                    Some(w.appearances),
                    Some(outcome),
                    ProjectionSource::History,
                )
            }
            _ => {
                debug!("player {}: no usable history, using default table", player.id);
                (self.default_bundle(ctx), None, None, ProjectionSource::DefaultTable)
            }
        };

        let cs_probability = clean_sheet_probability(
            ctx.role,
            ctx.tier,
            ctx.age_modifier,
            self.config.age_curve.cs_age_effect_ratio,
            &self.config.clean_sheet,
        );
        let presences = estimate_presences(
            appearances,
            ctx.role,
            ctx.tier,
            ctx.age_modifier,
            &self.config.presence,
            &self.config.age_curve,
        );

        let threshold = profile
            .clean_sheet_rating_threshold
            .filter(|t| t.is_finite())
            .unwrap_or(self.config.clean_sheet.default_rating_threshold);
        let per_game = fantasy_points(&bundle, profile, ctx.role)
            + clean_sheet_points(cs_probability, bundle.avg_rating, threshold, profile, ctx.role);

        let total = if presences > 0 {
            per_game * f64::from(presences)
        } else {
            0.0
        };

        debug!(
            "player {}: {:?}, {:.2} pts/game x {} = {:.1}",
            player.id, source, per_game, presences, total
        );

        ProjectionResult {
            player_id: player.id.clone(),
            player_name: player.name.clone(),
            role: ctx.role,
            source,
            age: ctx.age,
            age_modifier: ctx.age_modifier,
            tier: ctx.tier,
            penalty_taker: penalties.is_some_and(|p| p.designated_taker),
            penalty_conversion_rate: penalties.and_then(|p| p.conversion_rate),
            rating_per_game: bundle.avg_rating,
            fantasy_points_per_game: per_game,
            clean_sheet_probability: cs_probability,
            expected_presences: presences,
            total_fantasy_points: total,
            seasonal_totals: seasonal_totals(&bundle, cs_probability, presences),
        }
    }

    fn player_context(&self, player: &Player) -> PlayerContext {
        let age = player.age_on(self.reference_date);
        if age.is_none() {
            warn!("player {}: no usable birth date, age curve neutral", player.id);
        }
        let curve = self.config.age_curve.roles.get(&player.role);
        if curve.is_none() {
            warn!("no age curve configured for role {}, age curve neutral", player.role);
        }
        PlayerContext {
            role: player.role,
            tier: self.config.tier.resolve(player.tier()),
            age,
            age_modifier: age_modifier(age, curve),
        }
    }

    /// Age, tier and penalty stages over an aggregated bundle.
    fn adjust_history(
        &self,
        bundle: StatBundle,
        history: &[HistoricalSeasonStat],
        ctx: PlayerContext,
    ) -> PenaltyOutcome {
        let bundle = apply_age(bundle, ctx.age_modifier, self.config.age_curve.mv_effect_ratio);
        let bundle = apply_tier(bundle, ctx.role, ctx.tier, &self.config.tier);
        resolve_penalties(
            bundle,
            history,
            PenaltyContext {
                offensive_multiplier: self.config.tier.offensive(ctx.tier),
                age_modifier: ctx.age_modifier,
                conversion_effect_ratio: self.config.age_curve.penalty_conversion_effect_ratio,
            },
            &self.config.penalties,
        )
    }

    /// Role default bundle, lightly modulated by age and tier.
    fn default_bundle(&self, ctx: PlayerContext) -> StatBundle {
        let base = self
            .config
            .no_history
            .bundles
            .get(&ctx.role)
            .copied()
            .unwrap_or(StatBundle {
                avg_rating: FALLBACK_RATING,
                ..Default::default()
            });

        let offensive = self.config.tier.offensive(ctx.tier);
        let output_age = damped(ctx.age_modifier, self.config.no_history.age_effect_ratio);
        let goals_conceded = if ctx.role == Role::Goalkeeper {
            base.goals_conceded * self.config.tier.defensive(ctx.tier)
        } else {
            base.goals_conceded
        };
        let taken = base.penalties_taken.max(0.0);
        let scored = base.penalties_scored.clamp(0.0, taken);

        StatBundle {
            avg_rating: base.avg_rating
                * damped(ctx.age_modifier, self.config.age_curve.mv_effect_ratio),
            goals_scored: base.goals_scored * output_age * offensive,
            assists: base.assists * output_age * offensive,
            penalties_taken: taken,
            penalties_scored: scored,
            penalties_missed: taken - scored,
            goals_conceded,
            ..base
        }
    }
}

/// Season totals: counting stats times presences, rate-like stats per game.
fn seasonal_totals(
    bundle: &StatBundle,
    cs_probability: f64,
    presences: u32,
) -> BTreeMap<String, f64> {
    let games = f64::from(presences);
    let mut totals: BTreeMap<String, f64> = bundle
        .entries()
        .into_iter()
        .map(|(name, value)| {
            let total = if name == "avg_rating" { value } else { value * games };
            (name.to_string(), total)
        })
        .collect();
    totals.insert("clean_sheet_probability".into(), cs_probability);
    totals
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
