// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for loading datasets and running lookups.
//!
//! Only failures live here. A query that matches nothing is a successful empty
//! result, and a subject+line query without a grade is reported through
//! [`SearchOutcome::MissingGrade`](crate::SearchOutcome), not as an error.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, LookupError>;

#[derive(Error, Debug)]
pub enum LookupError {
    /// Every candidate path for a grade failed to read or parse.
    #[error("grade {grade}: no readable data file (tried: {})", format_tried(.tried))]
    DataUnavailable { grade: String, tried: Vec<PathBuf> },

    /// No data file is configured for the requested grade.
    #[error("no data file configured for grade {0}")]
    UnknownGrade(String),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("configuration error: {0}")]
    Config(String),

    /// A query was issued before any dataset finished loading.
    #[error("no dataset loaded; select a grade first")]
    NotLoaded,
}

fn format_tried(tried: &[PathBuf]) -> String {
    tried
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl LookupError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
