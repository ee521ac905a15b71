// Command-line front end: CSV inputs, concurrent batch projection, JSON output.

pub mod batch;
pub mod input;
pub mod output;

pub use pitchcast_core::config;
