// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the rollcall command-line interface.
//!
//! Four subcommands: `search` runs a lookup query, `student` shows one
//! learner's profile and subjects, `options` lists the dropdown values for a
//! grade, and `inspect` reports how a data file is laid out and what it
//! normalizes to.

pub mod display;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "rollcall",
    about = "Student and subject record lookup",
    version
)]
pub struct Cli {
    /// JSON manifest with base paths, grade files and cache size
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory searched for grade files before the configured base paths
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search records by admission number, class, name or subject
    Search {
        /// Query text, e.g. "1001", "class:10A", "maths 3"
        query: String,

        /// Field the query targets
        ///
        /// One of auto, identifier, class, name, subject, subject_line.
        /// Unrecognized values fall back to auto.
        #[arg(short, long, default_value = "auto")]
        field: String,

        /// Grade to load (every configured grade when omitted)
        #[arg(short, long)]
        grade: Option<String>,

        /// Only records with exactly this subject
        #[arg(long)]
        subject: Option<String>,

        /// Only records on this line
        #[arg(long)]
        line: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Write results to a file instead of stdout
        ///
        /// A directory gets a dated StudentSearch-YYYYMMDD.csv inside it.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show one student's profile and every subject they take
    Student {
        /// Admission / student number
        identifier: String,

        #[arg(short, long)]
        grade: Option<String>,
    },

    /// List subject and line dropdown options
    Options {
        #[arg(short, long)]
        grade: Option<String>,

        /// Restrict the line list to one subject
        #[arg(long)]
        subject: Option<String>,
    },

    /// Inspect a data file: layout, record counts, distinct keys
    Inspect {
        /// Path to a grade JSON file
        file: PathBuf,
    },
}
