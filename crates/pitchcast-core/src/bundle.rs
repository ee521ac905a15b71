// Per-game stat bundle carried through the projection stages.

use serde::{Deserialize, Serialize};

/// Per-game rates for one player. Each projection stage takes a bundle by
/// value and returns a new one.
///
/// All fields are non-negative after every stage; `penalties_scored +
/// penalties_missed == penalties_taken` once penalty resolution has run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBundle {
    pub avg_rating: f64,
    pub goals_scored: f64,
    pub assists: f64,
    pub yellow_cards: f64,
    pub red_cards: f64,
    pub own_goals: f64,
    pub penalties_taken: f64,
    pub penalties_scored: f64,
    pub penalties_missed: f64,
    pub penalties_saved: f64,
    pub goals_conceded: f64,
}

impl StatBundle {
    /// `(stat_name, value)` pairs in a fixed order.
    pub fn entries(&self) -> [(&'static str, f64); 11] {
        [
            ("avg_rating", self.avg_rating),
            ("goals_scored", self.goals_scored),
            ("assists", self.assists),
            ("yellow_cards", self.yellow_cards),
            ("red_cards", self.red_cards),
            ("own_goals", self.own_goals),
            ("penalties_taken", self.penalties_taken),
            ("penalties_scored", self.penalties_scored),
            ("penalties_missed", self.penalties_missed),
            ("penalties_saved", self.penalties_saved),
            ("goals_conceded", self.goals_conceded),
        ]
    }
}
