// JSON report of projection results.

use pitchcast_football::ProjectionResult;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to serialize results: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level JSON document.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub league: &'a str,
    pub reference_date: chrono::NaiveDate,
    pub projections: &'a [ProjectionResult],
}

/// Pretty-print `report` to `path`, creating parent directories, or to
/// stdout when no path is configured.
pub fn write_report(report: &Report<'_>, path: Option<&Path>) -> Result<(), OutputError> {
    let json = serde_json::to_string_pretty(report)?;
    match path {
        Some(path) => {
            let io_err = |source| OutputError::Io {
                path: path.display().to_string(),
                source,
            };
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
            std::fs::write(path, json).map_err(io_err)
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").map_err(|source| OutputError::Io {
                path: "<stdout>".into(),
                source,
            })
        }
    }
}
