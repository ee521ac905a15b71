// Read-only domain records handed to the projection engine by its providers.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Playing role. Every role-specific table in the engine is keyed by this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Goalkeeper,
    Defender,
    Midfielder,
    Attacker,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Goalkeeper,
        Role::Defender,
        Role::Midfielder,
        Role::Attacker,
    ];

    /// Parse a role code into a Role.
    ///
    /// Accepts the single-letter fantasy codes (P/D/C/A), common English
    /// abbreviations (GK/DEF/MID/FW) and the full lowercase names.
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "P" | "POR" | "GK" | "GOALKEEPER" => Some(Role::Goalkeeper),
            "D" | "DIF" | "DEF" | "DEFENDER" => Some(Role::Defender),
            "C" | "CEN" | "MID" | "MIDFIELDER" => Some(Role::Midfielder),
            "A" | "ATT" | "FW" | "ATTACKER" => Some(Role::Attacker),
            _ => None,
        }
    }

    /// Lowercase name, as used in config tables and scoring keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Goalkeeper => "goalkeeper",
            Role::Defender => "defender",
            Role::Midfielder => "midfielder",
            Role::Attacker => "attacker",
        }
    }

    /// Roles whose team bonus depends on keeping a clean sheet.
    pub fn earns_clean_sheet(&self) -> bool {
        matches!(self, Role::Goalkeeper | Role::Defender)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Player / team
// ---------------------------------------------------------------------------

/// The player's current club. `tier` runs from 1 (strongest) to 5 (weakest).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRef {
    pub name: String,
    pub tier: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub birth_date: Option<NaiveDate>,
    pub team: Option<TeamRef>,
}

impl Player {
    /// Age in whole years on `reference`. `None` without a birth date or when
    /// the birth date lies after the reference date.
    pub fn age_on(&self, reference: NaiveDate) -> Option<u32> {
        let birth = self.birth_date?;
        if birth > reference {
            return None;
        }
        let mut age = reference.year() - birth.year();
        if (reference.month(), reference.day()) < (birth.month(), birth.day()) {
            age -= 1;
        }
        u32::try_from(age).ok()
    }

    pub fn tier(&self) -> Option<u8> {
        self.team.as_ref().and_then(|t| t.tier)
    }
}

// ---------------------------------------------------------------------------
// Historical record
// ---------------------------------------------------------------------------

/// One player, one season, one team/league. Counting stats are season totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSeasonStat {
    pub season: String,
    pub team: String,
    pub league: String,
    pub games_played: u32,
    pub avg_rating: f64,
    pub goals_scored: u32,
    pub assists: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
    pub own_goals: u32,
    pub penalties_taken: u32,
    pub penalties_scored: u32,
    pub penalties_saved: u32,
    pub goals_conceded: u32,
}

// ---------------------------------------------------------------------------
// Scoring profile
// ---------------------------------------------------------------------------

/// A league's fantasy scoring rubric: event key -> points per occurrence.
///
/// An empty profile is valid; every rule the scorer needs has a numeric
/// fallback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringProfile {
    pub name: String,
    #[serde(default)]
    pub clean_sheet_rating_threshold: Option<f64>,
    #[serde(default, rename = "scoring")]
    pub rules: HashMap<String, f64>,
}

impl ScoringProfile {
    /// Point value for `key`, ignoring entries that are not finite numbers.
    pub fn rule(&self, key: &str) -> Option<f64> {
        self.rules.get(key).copied().filter(|v| v.is_finite())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
