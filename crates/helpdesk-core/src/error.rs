//! Error types for loading user-supplied rule tables.
//!
//! Replying itself never fails. Only reading a rules file can.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuleFileError {
    #[error("failed to read rules file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("rules file {} contains no rules", .0.display())]
    Empty(PathBuf),

    #[error("rule #{index} has an empty {field}")]
    BlankField { index: usize, field: &'static str },
}
