// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Lookup configuration, read from a JSON manifest.
//!
//! ```json
//! {
//!   "basePaths": [".", "./data"],
//!   "grades": { "10": ["Subjects-Grade10.json"], "11": ["Subjects-Grade11.json"] },
//!   "photoDir": "../photos/",
//!   "photoExtension": "webp",
//!   "cacheCapacity": 50
//! }
//! ```
//!
//! Every key is optional; missing keys take the defaults below.

use crate::cache::DEFAULT_CAPACITY;
use crate::error::{LookupError, Result};
use crate::normalize::NormalizeOptions;
use crate::utils::natural_cmp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

fn default_base_paths() -> Vec<PathBuf> {
    [".", "..", "./data", "../data", ""]
        .iter()
        .map(PathBuf::from)
        .collect()
}

fn default_grades() -> BTreeMap<String, Vec<String>> {
    ["10", "11", "12"]
        .iter()
        .map(|g| (g.to_string(), vec![format!("Subjects-Grade{}.json", g)]))
        .collect()
}

fn default_photo_dir() -> String {
    NormalizeOptions::default().photo_dir
}

fn default_photo_extension() -> String {
    NormalizeOptions::default().photo_extension
}

fn default_cache_capacity() -> usize {
    DEFAULT_CAPACITY
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LookupConfig {
    /// Directories tried in order for every data file.
    #[serde(default = "default_base_paths")]
    pub base_paths: Vec<PathBuf>,
    /// Grade → candidate file names, tried in order.
    #[serde(default = "default_grades")]
    pub grades: BTreeMap<String, Vec<String>>,
    #[serde(default = "default_photo_dir")]
    pub photo_dir: String,
    #[serde(default = "default_photo_extension")]
    pub photo_extension: String,
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_paths: default_base_paths(),
            grades: default_grades(),
            photo_dir: default_photo_dir(),
            photo_extension: default_photo_extension(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl LookupConfig {
    /// Read and validate a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| LookupError::io(path, e))?;
        let config: LookupConfig =
            serde_json::from_str(&text).map_err(|e| LookupError::json(path, e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cache_capacity == 0 {
            return Err(LookupError::Config("cacheCapacity must be at least 1".into()));
        }
        if self.grades.is_empty() {
            return Err(LookupError::Config("at least one grade must be configured".into()));
        }
        if let Some((grade, _)) = self.grades.iter().find(|(_, files)| files.is_empty()) {
            return Err(LookupError::Config(format!("grade {} lists no data files", grade)));
        }
        Ok(())
    }

    /// Configured grades in numeric order ("9" before "10").
    pub fn grade_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.grades.keys().map(String::as_str).collect();
        names.sort_by(|a, b| natural_cmp(a, b));
        names
    }

    /// Candidate file names for one grade.
    pub fn files_for(&self, grade: &str) -> Result<&[String]> {
        self.grades
            .get(grade.trim())
            .map(Vec::as_slice)
            .ok_or_else(|| LookupError::UnknownGrade(grade.to_string()))
    }

    /// Try `dir` before every configured base path.
    pub fn prepend_base_path(&mut self, dir: impl Into<PathBuf>) {
        self.base_paths.insert(0, dir.into());
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            photo_dir: self.photo_dir.clone(),
            photo_extension: self.photo_extension.clone(),
        }
    }
}
