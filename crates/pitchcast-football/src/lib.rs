// Projection engine: turns multi-season football history into per-game and
// per-season fantasy projections.

pub mod age_curve;
pub mod clean_sheet;
pub mod history;
pub mod penalty;
pub mod presence;
pub mod projector;
pub mod scoring;
pub mod tier;
pub mod weights;

pub use projector::{ProjectionResult, ProjectionSource, Projector};
