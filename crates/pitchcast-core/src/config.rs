// Configuration loading and parsing (engine.toml, league.toml).
//
// Every engine table carries a documented default, so a partial or even empty
// engine.toml still produces a complete `EngineConfig`.

use crate::bundle::StatBundle;
use crate::model::{Role, ScoringProfile};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: ScoringProfile,
    pub engine: EngineConfig,
    pub data_paths: DataPaths,
    /// Date ages are measured on. `None` means "today" to the caller.
    pub reference_date: Option<NaiveDate>,
}

/// Number of team-strength tiers; every tier table has one entry per tier.
pub const TIER_COUNT: usize = 5;

/// Look up a 1-based tier in a per-tier table, falling back when the table is
/// too short.
pub fn tier_value(table: &[f64], tier: u8, fallback: f64) -> f64 {
    if tier == 0 {
        return fallback;
    }
    table.get(usize::from(tier) - 1).copied().unwrap_or(fallback)
}

// ---------------------------------------------------------------------------
// engine.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire engine.toml file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct EngineFile {
    /// Quoted `YYYY-MM-DD` string.
    reference_date: Option<NaiveDate>,
    data_paths: DataPaths,
    history: HistoryConfig,
    age_curve: AgeCurveConfig,
    tier: TierConfig,
    penalties: PenaltyConfig,
    clean_sheet: CleanSheetConfig,
    presence: PresenceConfig,
    no_history: NoHistoryConfig,
}

/// Immutable model parameters shared by every projection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub history: HistoryConfig,
    pub age_curve: AgeCurveConfig,
    pub tier: TierConfig,
    pub penalties: PenaltyConfig,
    pub clean_sheet: CleanSheetConfig,
    pub presence: PresenceConfig,
    pub no_history: NoHistoryConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    pub players: String,
    pub history: String,
    /// Results go to stdout when unset.
    pub output: Option<String>,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            players: "data/players.csv".into(),
            history: "data/history.csv".into(),
            output: None,
        }
    }
}

// ---- history ----

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub max_seasons_lookback: usize,
    /// In (0, 1): geometric decay. 1.0 or above: linear decay.
    pub season_decay_factor: f64,
    /// League name -> conversion factors. The `default` entry is the fallback.
    pub league_conversion: HashMap<String, LeagueConversion>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        let mut league_conversion = HashMap::new();
        league_conversion.insert("default".to_string(), LeagueConversion::default());
        Self {
            max_seasons_lookback: 3,
            season_decay_factor: 0.7,
            league_conversion,
        }
    }
}

impl HistoryConfig {
    /// Conversion factors for `league`, then the `default` entry, then 1.0.
    pub fn conversion_for(&self, league: &str) -> LeagueConversion {
        self.league_conversion
            .get(league)
            .or_else(|| self.league_conversion.get("default"))
            .copied()
            .unwrap_or_default()
    }
}

/// Cross-league difficulty factors applied to per-game rates.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LeagueConversion {
    pub goals_scored: f64,
    pub assists: f64,
    pub avg_rating: f64,
}

impl Default for LeagueConversion {
    fn default() -> Self {
        Self {
            goals_scored: 1.0,
            assists: 1.0,
            avg_rating: 1.0,
        }
    }
}

// ---- age curve ----

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AgeCurveConfig {
    /// Share of the age modifier applied to the rating.
    pub mv_effect_ratio: f64,
    pub penalty_conversion_effect_ratio: f64,
    pub cs_age_effect_ratio: f64,
    pub presence_growth_ratio: f64,
    pub presence_growth_cap: f64,
    pub presence_decline_ratio: f64,
    pub presence_decline_cap: f64,
    /// Keys set in engine.toml override the role's built-in curve.
    #[serde(deserialize_with = "merge_age_curves")]
    pub roles: BTreeMap<Role, AgeCurveParams>,
}

/// Per-role growth/decline curve around a peak-age window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeCurveParams {
    pub growth_factor: f64,
    pub decline_factor: f64,
    pub peak_start: u32,
    pub peak_end: u32,
    pub young_cap: f64,
    pub old_cap: f64,
}

impl AgeCurveParams {
    /// Built-in curve for `role`.
    pub fn default_for(role: Role) -> Self {
        let (growth_factor, decline_factor, peak_start, peak_end, young_cap, old_cap) = match role
        {
            Role::Goalkeeper => (0.01, 0.015, 27, 33, 1.10, 0.80),
            Role::Defender => (0.02, 0.03, 25, 30, 1.15, 0.75),
            Role::Midfielder => (0.025, 0.035, 24, 29, 1.20, 0.70),
            Role::Attacker => (0.03, 0.04, 24, 29, 1.20, 0.70),
        };
        Self {
            growth_factor,
            decline_factor,
            peak_start,
            peak_end,
            young_cap,
            old_cap,
        }
    }
}

/// One `[age_curve.roles.<role>]` table; absent keys keep the built-in value.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AgeCurveOverride {
    growth_factor: Option<f64>,
    decline_factor: Option<f64>,
    peak_start: Option<u32>,
    peak_end: Option<u32>,
    young_cap: Option<f64>,
    old_cap: Option<f64>,
}

impl AgeCurveOverride {
    fn apply_to(self, base: AgeCurveParams) -> AgeCurveParams {
        AgeCurveParams {
            growth_factor: self.growth_factor.unwrap_or(base.growth_factor),
            decline_factor: self.decline_factor.unwrap_or(base.decline_factor),
            peak_start: self.peak_start.unwrap_or(base.peak_start),
            peak_end: self.peak_end.unwrap_or(base.peak_end),
            young_cap: self.young_cap.unwrap_or(base.young_cap),
            old_cap: self.old_cap.unwrap_or(base.old_cap),
        }
    }
}

fn merge_age_curves<'de, D>(deserializer: D) -> Result<BTreeMap<Role, AgeCurveParams>, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = BTreeMap::<Role, AgeCurveOverride>::deserialize(deserializer)?;
    let mut roles = AgeCurveConfig::default().roles;
    for (role, partial) in overrides {
        let base = roles
            .get(&role)
            .copied()
            .unwrap_or_else(|| AgeCurveParams::default_for(role));
        roles.insert(role, partial.apply_to(base));
    }
    Ok(roles)
}

impl Default for AgeCurveConfig {
    fn default() -> Self {
        let roles = Role::ALL
            .into_iter()
            .map(|role| (role, AgeCurveParams::default_for(role)))
            .collect();
        Self {
            mv_effect_ratio: 0.5,
            penalty_conversion_effect_ratio: 0.2,
            cs_age_effect_ratio: 0.5,
            presence_growth_ratio: 0.5,
            presence_growth_cap: 1.1,
            presence_decline_ratio: 1.0,
            presence_decline_cap: 0.8,
            roles,
        }
    }
}

// ---- tier ----

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TierConfig {
    pub default_tier: u8,
    pub offensive_multipliers: Vec<f64>,
    pub defensive_multipliers: Vec<f64>,
    pub league_avg_goals_conceded_per_game: f64,
}

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            default_tier: 3,
            offensive_multipliers: vec![1.20, 1.10, 1.00, 0.90, 0.80],
            defensive_multipliers: vec![0.75, 0.90, 1.00, 1.10, 1.25],
            league_avg_goals_conceded_per_game: 1.35,
        }
    }
}

impl TierConfig {
    /// Clamp an optional team tier into 1..=5, using `default_tier` when the
    /// tier is absent or out of range.
    pub fn resolve(&self, tier: Option<u8>) -> u8 {
        match tier {
            Some(t) if (1..=TIER_COUNT as u8).contains(&t) => t,
            Some(t) => {
                warn!("tier {} out of range, using default tier {}", t, self.default_tier);
                self.default_tier
            }
            None => self.default_tier,
        }
    }

    pub fn offensive(&self, tier: u8) -> f64 {
        tier_value(&self.offensive_multipliers, tier, 1.0)
    }

    pub fn defensive(&self, tier: u8) -> f64 {
        tier_value(&self.defensive_multipliers, tier, 1.0)
    }
}

// ---- penalties ----

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PenaltyConfig {
    pub min_penalties_taken_threshold: u32,
    pub min_penalties_for_reliable_rate: u32,
    pub league_avg_penalties_awarded_per_team_game: f64,
    pub penalty_taker_share: f64,
    pub default_penalty_conversion_rate: f64,
    pub min_conversion_rate: f64,
    pub max_conversion_rate: f64,
    /// Seasons summed when classifying a taker. Unset means all supplied.
    pub lookback_seasons: Option<usize>,
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self {
            min_penalties_taken_threshold: 3,
            min_penalties_for_reliable_rate: 5,
            league_avg_penalties_awarded_per_team_game: 0.25,
            penalty_taker_share: 0.85,
            default_penalty_conversion_rate: 0.75,
            min_conversion_rate: 0.50,
            max_conversion_rate: 0.95,
            lookback_seasons: None,
        }
    }
}

// ---- clean sheet ----

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CleanSheetConfig {
    pub probability_by_tier: Vec<f64>,
    pub max_probability: f64,
    /// Used when the league profile does not set its own threshold.
    pub default_rating_threshold: f64,
}

impl Default for CleanSheetConfig {
    fn default() -> Self {
        Self {
            probability_by_tier: vec![0.40, 0.32, 0.25, 0.20, 0.15],
            max_probability: 0.8,
            default_rating_threshold: 6.0,
        }
    }
}

// ---- presence ----

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PresenceConfig {
    pub min_projected_presences: u32,
    pub max_projected_presences: u32,
    pub factor_by_tier: Vec<f64>,
    /// Role -> appearances per tier, used without usable history. Roles
    /// missing from engine.toml keep their built-in table.
    #[serde(deserialize_with = "merge_presence_tables")]
    pub default_by_role: BTreeMap<Role, Vec<f64>>,
}

fn merge_presence_tables<'de, D>(deserializer: D) -> Result<BTreeMap<Role, Vec<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = BTreeMap::<Role, Vec<f64>>::deserialize(deserializer)?;
    let mut tables = PresenceConfig::default().default_by_role;
    tables.extend(overrides);
    Ok(tables)
}

impl Default for PresenceConfig {
    fn default() -> Self {
        let mut default_by_role = BTreeMap::new();
        default_by_role.insert(Role::Goalkeeper, vec![32.0, 30.0, 28.0, 27.0, 26.0]);
        default_by_role.insert(Role::Defender, vec![26.0, 25.0, 24.0, 23.0, 22.0]);
        default_by_role.insert(Role::Midfielder, vec![26.0, 25.0, 24.0, 23.0, 22.0]);
        default_by_role.insert(Role::Attacker, vec![24.0, 23.0, 22.0, 21.0, 20.0]);
        Self {
            min_projected_presences: 5,
            max_projected_presences: 38,
            factor_by_tier: vec![1.05, 1.02, 1.00, 0.97, 0.95],
            default_by_role,
        }
    }
}

// ---- no-history defaults ----

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NoHistoryConfig {
    /// Share of the age modifier applied to default goals/assists.
    pub age_effect_ratio: f64,
    /// Stats set in engine.toml override the role's built-in bundle.
    #[serde(deserialize_with = "merge_default_bundles")]
    pub bundles: BTreeMap<Role, StatBundle>,
}

/// One `[no_history.bundles.<role>]` table; absent stats keep the built-in
/// value.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BundleOverride {
    avg_rating: Option<f64>,
    goals_scored: Option<f64>,
    assists: Option<f64>,
    yellow_cards: Option<f64>,
    red_cards: Option<f64>,
    own_goals: Option<f64>,
    penalties_taken: Option<f64>,
    penalties_scored: Option<f64>,
    penalties_missed: Option<f64>,
    penalties_saved: Option<f64>,
    goals_conceded: Option<f64>,
}

impl BundleOverride {
    fn apply_to(self, base: StatBundle) -> StatBundle {
        StatBundle {
            avg_rating: self.avg_rating.unwrap_or(base.avg_rating),
            goals_scored: self.goals_scored.unwrap_or(base.goals_scored),
            assists: self.assists.unwrap_or(base.assists),
            yellow_cards: self.yellow_cards.unwrap_or(base.yellow_cards),
            red_cards: self.red_cards.unwrap_or(base.red_cards),
            own_goals: self.own_goals.unwrap_or(base.own_goals),
            penalties_taken: self.penalties_taken.unwrap_or(base.penalties_taken),
            penalties_scored: self.penalties_scored.unwrap_or(base.penalties_scored),
            penalties_missed: self.penalties_missed.unwrap_or(base.penalties_missed),
            penalties_saved: self.penalties_saved.unwrap_or(base.penalties_saved),
            goals_conceded: self.goals_conceded.unwrap_or(base.goals_conceded),
        }
    }
}

fn merge_default_bundles<'de, D>(deserializer: D) -> Result<BTreeMap<Role, StatBundle>, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = BTreeMap::<Role, BundleOverride>::deserialize(deserializer)?;
    let mut bundles = NoHistoryConfig::default().bundles;
    for (role, partial) in overrides {
        let base = bundles.get(&role).copied().unwrap_or_default();
        bundles.insert(role, partial.apply_to(base));
    }
    Ok(bundles)
}

impl Default for NoHistoryConfig {
    fn default() -> Self {
        let mut bundles = BTreeMap::new();
        bundles.insert(
            Role::Goalkeeper,
            StatBundle {
                avg_rating: 6.0,
                yellow_cards: 0.03,
                penalties_saved: 0.02,
                goals_conceded: 1.3,
                ..Default::default()
            },
        );
        bundles.insert(
            Role::Defender,
            StatBundle {
                avg_rating: 5.9,
                goals_scored: 0.03,
                assists: 0.04,
                yellow_cards: 0.2,
                red_cards: 0.01,
                own_goals: 0.01,
                ..Default::default()
            },
        );
        bundles.insert(
            Role::Midfielder,
            StatBundle {
                avg_rating: 5.95,
                goals_scored: 0.07,
                assists: 0.08,
                yellow_cards: 0.2,
                red_cards: 0.01,
                ..Default::default()
            },
        );
        bundles.insert(
            Role::Attacker,
            StatBundle {
                avg_rating: 6.0,
                goals_scored: 0.25,
                assists: 0.08,
                yellow_cards: 0.12,
                red_cards: 0.005,
                ..Default::default()
            },
        );
        Self {
            age_effect_ratio: 0.5,
            bundles,
        }
    }
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Wrapper for the top-level `[league]` table in league.toml.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: ScoringProfile,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/engine.toml` and
/// `config/league.toml`, both relative to the given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization automatically.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- engine.toml (required, every key optional) ---
    let engine_path = config_dir.join("engine.toml");
    let engine_text = read_file(&engine_path)?;
    let engine_file: EngineFile =
        toml::from_str(&engine_text).map_err(|e| ConfigError::ParseError {
            path: engine_path.clone(),
            source: e,
        })?;

    // --- league.toml (required) ---
    let league_path = config_dir.join("league.toml");
    let league_text = read_file(&league_path)?;
    let league_file: LeagueFile =
        toml::from_str(&league_text).map_err(|e| ConfigError::ParseError {
            path: league_path.clone(),
            source: e,
        })?;

    let config = Config {
        league: league_file.league,
        engine: EngineConfig {
            history: engine_file.history,
            age_curve: engine_file.age_curve,
            tier: engine_file.tier,
            penalties: engine_file.penalties,
            clean_sheet: engine_file.clean_sheet,
            presence: engine_file.presence,
            no_history: engine_file.no_history,
        },
        data_paths: engine_file.data_paths,
        reference_date: engine_file.reference_date,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                // Never overwrite a user's edited config.
            }
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    copied.sort();
    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let engine = &config.engine;

    if engine.history.max_seasons_lookback == 0 {
        return Err(invalid("history.max_seasons_lookback", "must be greater than 0"));
    }
    let decay = engine.history.season_decay_factor;
    if !decay.is_finite() || decay <= 0.0 {
        return Err(invalid(
            "history.season_decay_factor",
            format!("must be > 0, got {decay}"),
        ));
    }

    // Tier tables: exactly one finite, non-negative entry per tier
    let tier_tables: &[(&str, &[f64])] = &[
        ("tier.offensive_multipliers", &engine.tier.offensive_multipliers),
        ("tier.defensive_multipliers", &engine.tier.defensive_multipliers),
        ("clean_sheet.probability_by_tier", &engine.clean_sheet.probability_by_tier),
        ("presence.factor_by_tier", &engine.presence.factor_by_tier),
    ];
    for (name, table) in tier_tables {
        if table.len() != TIER_COUNT {
            return Err(invalid(
                name,
                format!("must have {TIER_COUNT} entries, got {}", table.len()),
            ));
        }
        if let Some(bad) = table.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(invalid(name, format!("entries must be >= 0, got {bad}")));
        }
    }
    for (role, table) in &engine.presence.default_by_role {
        if table.len() != TIER_COUNT {
            return Err(invalid(
                &format!("presence.default_by_role.{role}"),
                format!("must have {TIER_COUNT} entries, got {}", table.len()),
            ));
        }
    }

    let default_tier = engine.tier.default_tier;
    if !(1..=TIER_COUNT as u8).contains(&default_tier) {
        return Err(invalid(
            "tier.default_tier",
            format!("must be between 1 and {TIER_COUNT}, got {default_tier}"),
        ));
    }

    // Penalties
    let pen = &engine.penalties;
    let rate_fields: &[(&str, f64)] = &[
        ("penalties.penalty_taker_share", pen.penalty_taker_share),
        ("penalties.default_penalty_conversion_rate", pen.default_penalty_conversion_rate),
        ("penalties.min_conversion_rate", pen.min_conversion_rate),
        ("penalties.max_conversion_rate", pen.max_conversion_rate),
    ];
    for (name, val) in rate_fields {
        if !(0.0..=1.0).contains(val) {
            return Err(invalid(
                name,
                format!("must be between 0.0 and 1.0 inclusive, got {val}"),
            ));
        }
    }
    if pen.min_conversion_rate > pen.max_conversion_rate {
        return Err(invalid(
            "penalties.min_conversion_rate",
            "must not exceed penalties.max_conversion_rate",
        ));
    }

    // Presence bounds
    let presence = &engine.presence;
    if presence.min_projected_presences == 0 {
        return Err(invalid("presence.min_projected_presences", "must be greater than 0"));
    }
    if presence.min_projected_presences > presence.max_projected_presences {
        return Err(invalid(
            "presence.min_projected_presences",
            format!(
                "must not exceed presence.max_projected_presences ({})",
                presence.max_projected_presences
            ),
        ));
    }

    if !(0.0..=1.0).contains(&engine.clean_sheet.max_probability) {
        return Err(invalid(
            "clean_sheet.max_probability",
            format!(
                "must be between 0.0 and 1.0 inclusive, got {}",
                engine.clean_sheet.max_probability
            ),
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
