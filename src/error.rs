//! Errors raised while turning user input into a mission.
//!
//! The simulation core itself never fails; everything here belongs to the
//! driver layer that reads arguments, prompts and mission files.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    /// A value that should have been an integer was not.
    #[error("invalid {field}: expected an integer, got {value:?}")]
    InvalidNumber {
        /// Which input was being read.
        field: &'static str,
        /// The offending text.
        value: String,
    },

    /// A coordinate pair did not look like `X,Y`.
    #[error("invalid coordinate {0:?}: expected X,Y")]
    InvalidPair(String),

    /// A grid size did not look like `WxH`.
    #[error("invalid grid size {0:?}: expected WIDTHxHEIGHT")]
    InvalidGridSize(String),

    /// Heading letter outside N/E/S/W.
    #[error("unknown direction {0:?}: expected one of N, E, S, W")]
    UnknownDirection(String),

    /// Grid dimensions must both be at least one.
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },

    /// More random obstacles were requested than there are cells to hold them.
    #[error("cannot place {requested} random obstacles: only {available} free cells")]
    TooManyObstacles {
        /// Obstacles asked for.
        requested: usize,
        /// Cells that could take one.
        available: i64,
    },

    /// The mission file could not be read.
    #[error("cannot read mission file {path}: {source}")]
    MissionFile {
        /// Path given on the command line.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The mission file was not valid mission JSON.
    #[error("malformed mission file: {0}")]
    MissionJson(#[from] serde_json::Error),

    /// Prompt or terminal I/O failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl DriverError {
    pub fn invalid_number(field: &'static str, value: &str) -> Self {
        DriverError::InvalidNumber {
            field,
            value: value.to_string(),
        }
    }
}
