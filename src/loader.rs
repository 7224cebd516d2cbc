// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Data loading and the reload lifecycle.
//!
//! Grade files live in different places depending on how the lookup pages
//! are deployed, so every file is tried under every base path, in order,
//! until one reads and parses. Only when all candidates fail is the grade
//! reported unavailable, with the full list of paths that were tried.
//!
//! [`LookupSession`] sequences reloads: selecting a grade loads, normalizes
//! and re-indexes before it returns, so a query can never observe a
//! half-built dataset.

use crate::config::LookupConfig;
use crate::engine::LookupEngine;
use crate::error::{LookupError, Result};
use crate::normalize::RecordNormalizer;
use crate::types::{CanonicalRecord, FieldHint, SearchFilters, SearchOutcome};
use serde_json::Value;
use std::path::PathBuf;
use tracing::{info, warn};

/// A parsed data file and where it came from.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub path: PathBuf,
    pub value: Value,
}

/// Multi-path file loader for configured grades.
#[derive(Debug, Clone)]
pub struct DataLoader {
    config: LookupConfig,
    normalizer: RecordNormalizer,
}

impl DataLoader {
    pub fn new(config: LookupConfig) -> Self {
        let normalizer = RecordNormalizer::new(config.normalize_options());
        Self { config, normalizer }
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    /// Every path tried for `grade`: each base path in turn, every file under it.
    pub fn candidates(&self, grade: &str) -> Result<Vec<PathBuf>> {
        let files = self.config.files_for(grade)?;
        Ok(self
            .config
            .base_paths
            .iter()
            .flat_map(|base| files.iter().map(move |file| base.join(file)))
            .collect())
    }

    /// First candidate for `grade` that reads and parses.
    pub fn read_grade(&self, grade: &str) -> Result<LoadedFile> {
        let candidates = self.candidates(grade)?;
        for path in &candidates {
            let text = match std::fs::read_to_string(path) {
                Ok(text) => text,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "candidate unreadable");
                    continue;
                }
            };
            match serde_json::from_str(&text) {
                Ok(value) => {
                    return Ok(LoadedFile {
                        path: path.clone(),
                        value,
                    })
                }
                Err(e) => warn!(path = %path.display(), error = %e, "candidate is not valid JSON"),
            }
        }
        Err(LookupError::DataUnavailable {
            grade: grade.to_string(),
            tried: candidates,
        })
    }

    /// Canonical records of one grade. Records without a grade are tagged with it.
    pub fn load_grade(&self, grade: &str) -> Result<Vec<CanonicalRecord>> {
        let file = self.read_grade(grade)?;
        let mut records = self.normalizer.normalize(&file.value);
        for record in records.iter_mut().filter(|r| r.grade.is_empty()) {
            record.grade = grade.to_string();
        }
        info!(grade, path = %file.path.display(), records = records.len(), "grade loaded");
        Ok(records)
    }

    /// Records for one grade, or for every configured grade when `None`.
    ///
    /// A selected grade must load. Loading every grade skips the ones that
    /// fail and only errors when none loaded.
    pub fn load(&self, grade: Option<&str>) -> Result<Vec<CanonicalRecord>> {
        if let Some(grade) = grade {
            return self.load_grade(grade);
        }

        let mut records = Vec::new();
        let mut loaded = 0usize;
        let mut tried = Vec::new();
        for grade in self.config.grade_names() {
            match self.load_grade(grade) {
                Ok(batch) => {
                    loaded += 1;
                    records.extend(batch);
                }
                Err(LookupError::DataUnavailable { tried: paths, .. }) => {
                    warn!(grade, "grade skipped: no readable data file");
                    tried.extend(paths);
                }
                Err(e) => return Err(e),
            }
        }

        if loaded == 0 {
            return Err(LookupError::DataUnavailable {
                grade: "all".to_string(),
                tried,
            });
        }
        Ok(records)
    }
}

/// One user's lookup state: the selected grade and the engine built for it.
#[derive(Debug)]
pub struct LookupSession {
    loader: DataLoader,
    grade: Option<String>,
    engine: Option<LookupEngine>,
}

impl LookupSession {
    pub fn new(config: LookupConfig) -> Self {
        Self {
            loader: DataLoader::new(config),
            grade: None,
            engine: None,
        }
    }

    /// Switch grade (`None` for every grade) and rebuild.
    ///
    /// On failure the previous dataset is discarded too, and queries report
    /// [`LookupError::NotLoaded`] until a later selection succeeds.
    pub fn select_grade(&mut self, grade: Option<&str>) -> Result<usize> {
        self.grade = grade.map(str::trim).filter(|g| !g.is_empty()).map(str::to_string);
        let records = match self.loader.load(self.grade.as_deref()) {
            Ok(records) => records,
            Err(e) => {
                self.engine = None;
                return Err(e);
            }
        };

        let count = records.len();
        match self.engine.as_mut() {
            Some(engine) => engine.reload(records),
            None => {
                let capacity = self.loader.config().cache_capacity;
                self.engine = Some(LookupEngine::with_capacity(records, capacity));
            }
        }
        Ok(count)
    }

    /// Clear the grade selection and reload everything.
    pub fn reset(&mut self) -> Result<usize> {
        self.select_grade(None)
    }

    pub fn grade(&self) -> Option<&str> {
        self.grade.as_deref()
    }

    pub fn engine(&self) -> Result<&LookupEngine> {
        self.engine.as_ref().ok_or(LookupError::NotLoaded)
    }

    /// Search the current dataset. The selected grade fills an unset grade filter.
    pub fn search(
        &self,
        raw_query: &str,
        hint: FieldHint,
        filters: &SearchFilters,
    ) -> Result<SearchOutcome<'_>> {
        let engine = self.engine()?;
        let mut filters = filters.clone();
        if filters.grade.is_none() {
            filters.grade = self.grade.clone();
        }
        Ok(engine.search(raw_query, hint, &filters))
    }

    pub fn lookup(&self, identifier: &str) -> Result<Option<&CanonicalRecord>> {
        Ok(self.engine()?.lookup(identifier))
    }
}
