//! CLI failures and the exit code each one maps to.
//!
//! | code | failure |
//! |------|---------|
//! | 2    | argument parsing (reported by clap) |
//! | 10   | pipeline rejected (unknown module, bad wiring, bad canvas) |
//! | 11   | pipeline file unreadable or SVG not written |
//! | 12   | pipeline file is not a valid pipeline description |
//! | 13   | JSON report could not be produced |

use linework_core::LineworkError;
use std::fmt;
use std::path::PathBuf;

pub enum CliError {
    /// The pipeline parsed but could not be built.
    Pipeline(LineworkError),
    /// The pipeline file could not be read.
    Read { path: PathBuf, source: std::io::Error },
    /// The SVG snapshot could not be written.
    Write(String),
    /// The pipeline file is not a pipeline description.
    Parse { path: PathBuf, source: serde_json::Error },
    /// A `--json` report failed to serialize.
    Report(serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Pipeline(_) => 10,
            CliError::Read { .. } | CliError::Write(_) => 11,
            CliError::Parse { .. } => 12,
            CliError::Report(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Pipeline(e) => write!(f, "{e}"),
            CliError::Read { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            CliError::Write(msg) => write!(f, "cannot write snapshot: {msg}"),
            CliError::Parse { path, source } => {
                write!(f, "{} is not a valid pipeline: {source}", path.display())
            }
            CliError::Report(e) => write!(f, "cannot encode report: {e}"),
        }
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Pipeline(e) => Some(e),
            CliError::Read { source, .. } => Some(source),
            CliError::Parse { source, .. } => Some(source),
            CliError::Report(e) => Some(e),
            CliError::Write(_) => None,
        }
    }
}

impl From<LineworkError> for CliError {
    fn from(e: LineworkError) -> Self {
        match e {
            LineworkError::Io(msg) => CliError::Write(msg),
            other => CliError::Pipeline(other),
        }
    }
}

/// Only report encoding goes through `?`; file parsing builds `Parse` itself.
impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Report(e)
    }
}
