// Shared domain types and configuration for the projection engine and its
// front ends.

pub mod bundle;
pub mod config;
pub mod model;

pub use bundle::StatBundle;
pub use config::{Config, ConfigError, EngineConfig};
pub use model::{HistoricalSeasonStat, Player, Role, ScoringProfile, TeamRef};
