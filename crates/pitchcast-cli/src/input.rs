// Player roster and season-history loading from CSV.
//
// Players CSV: id,name,role,birth_date,team,tier
// History CSV: player_id,season,team,league,games_played,avg_rating,
//              goals_scored,assists,yellow_cards,red_cards,own_goals,
//              penalties_taken,penalties_scored,penalties_saved,goals_conceded
//
// Malformed rows are skipped with a warning rather than failing the load.

use chrono::NaiveDate;
use pitchcast_core::config::DataPaths;
use pitchcast_core::{HistoricalSeasonStat, Player, Role, TeamRef};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::warn;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Season records grouped by player id, most recent season first.
pub type HistoryIndex = HashMap<String, Vec<HistoricalSeasonStat>>;

/// Everything the batch runner needs from disk.
#[derive(Debug, Clone)]
pub struct ProjectionInputs {
    pub players: Vec<Player>,
    pub history: HistoryIndex,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Raw CSV serde structs (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawPlayer {
    id: String,
    name: String,
    role: String,
    #[serde(default)]
    birth_date: Option<String>,
    #[serde(default)]
    team: Option<String>,
    #[serde(default)]
    tier: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct RawSeason {
    player_id: String,
    season: String,
    #[serde(default)]
    team: String,
    #[serde(default)]
    league: String,
    games_played: u32,
    #[serde(default)]
    avg_rating: f64,
    #[serde(default)]
    goals_scored: u32,
    #[serde(default)]
    assists: u32,
    #[serde(default)]
    yellow_cards: u32,
    #[serde(default)]
    red_cards: u32,
    #[serde(default)]
    own_goals: u32,
    #[serde(default)]
    penalties_taken: u32,
    #[serde(default)]
    penalties_scored: u32,
    #[serde(default)]
    penalties_saved: u32,
    #[serde(default)]
    goals_conceded: u32,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Trimmed value, or `None` when empty.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_birth_date(id: &str, raw: Option<String>) -> Option<NaiveDate> {
    let raw = non_empty(raw)?;
    match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            warn!("player '{}': unparseable birth date '{}': {}", id, raw, e);
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Reader-based loaders (private, enable testing without temp files)
// ---------------------------------------------------------------------------

fn load_players_from_reader<R: Read>(rdr: R) -> Result<Vec<Player>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    let mut players = Vec::new();
    for result in reader.deserialize::<RawPlayer>() {
        match result {
            Ok(raw) => {
                let id = raw.id.trim().to_string();
                let Some(role) = Role::from_code(&raw.role) else {
                    warn!("skipping player '{}': unknown role '{}'", id, raw.role);
                    continue;
                };
                let birth_date = parse_birth_date(&id, raw.birth_date);
                let team = non_empty(raw.team).map(|name| TeamRef {
                    name,
                    tier: raw.tier,
                });
                players.push(Player {
                    name: raw.name.trim().to_string(),
                    id,
                    role,
                    birth_date,
                    team,
                });
            }
            Err(e) => {
                warn!("skipping malformed player row: {}", e);
            }
        }
    }
    Ok(players)
}

fn load_history_from_reader<R: Read>(rdr: R) -> Result<HistoryIndex, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    let mut index: HistoryIndex = HashMap::new();
    for result in reader.deserialize::<RawSeason>() {
        match result {
            Ok(raw) => {
                if !raw.avg_rating.is_finite() || raw.avg_rating < 0.0 {
                    warn!(
                        "skipping season '{}' for '{}': invalid rating",
                        raw.season, raw.player_id
                    );
                    continue;
                }
                index
                    .entry(raw.player_id)
                    .or_default()
                    .push(HistoricalSeasonStat {
                        season: raw.season,
                        team: raw.team,
                        league: raw.league,
                        games_played: raw.games_played,
                        avg_rating: raw.avg_rating,
                        goals_scored: raw.goals_scored,
                        assists: raw.assists,
                        yellow_cards: raw.yellow_cards,
                        red_cards: raw.red_cards,
                        own_goals: raw.own_goals,
                        penalties_taken: raw.penalties_taken,
                        penalties_scored: raw.penalties_scored,
                        penalties_saved: raw.penalties_saved,
                        goals_conceded: raw.goals_conceded,
                    });
            }
            Err(e) => {
                warn!("skipping malformed history row: {}", e);
            }
        }
    }
    for seasons in index.values_mut() {
        // Season labels like "2023-24" sort chronologically; newest first.
        seasons.sort_by(|a, b| b.season.cmp(&a.season));
    }
    Ok(index)
}

// ---------------------------------------------------------------------------
// Public path-based loaders
// ---------------------------------------------------------------------------

pub fn load_players(path: &Path) -> Result<Vec<Player>, InputError> {
    let file = std::fs::File::open(path).map_err(|e| InputError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_players_from_reader(file).map_err(|e| InputError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

pub fn load_history(path: &Path) -> Result<HistoryIndex, InputError> {
    let file = std::fs::File::open(path).map_err(|e| InputError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_history_from_reader(file).map_err(|e| InputError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load the roster and history from the configured paths. A missing history
/// file is not an error: every player then takes the default-table path.
pub fn load_all_from_paths(paths: &DataPaths) -> Result<ProjectionInputs, InputError> {
    let players = load_players(Path::new(&paths.players))?;
    if players.is_empty() {
        return Err(InputError::Validation(
            "players CSV produced zero valid rows".into(),
        ));
    }

    let history_path = Path::new(&paths.history);
    let history = if history_path.exists() {
        load_history(history_path)?
    } else {
        warn!("history file {} not found, projecting without history", paths.history);
        HistoryIndex::new()
    };

    Ok(ProjectionInputs { players, history })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
