//! In-memory lookup of student and subject records.
//!
//! A grade file is loaded, normalized into one record shape and indexed
//! once. Free-text queries then resolve through a fixed tier order (exact
//! key, exact bucket, prefix, substring) inside a dropdown-filtered pool,
//! with a bounded LRU in front.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ normalize.rs │────▶│   index.rs   │────▶│  engine.rs   │
//! │ (RawDataset, │     │(build_indexes│     │ (search,     │
//! │  Normalizer) │     │  BucketMap)  │     │  reload)     │
//! └──────────────┘     └──────────────┘     └──────┬───────┘
//!                                                  │
//!        ┌──────────────┬──────────────┬───────────┘
//!        ▼              ▼              ▼
//! ┌──────────────┐ ┌──────────┐ ┌──────────────┐
//! │   query.rs   │ │ search/  │ │   cache.rs   │
//! │ (+synonyms)  │ │ tiered,  │ │ (LRU of ids) │
//! │              │ │ dedup    │ │              │
//! └──────────────┘ └──────────┘ └──────────────┘
//! ```
//!
//! `loader` and `config` sit in front of the engine and own file access;
//! `facets` and `export` consume results.
//!
//! # Usage
//!
//! ```ignore
//! use rollcall::{FieldHint, LookupEngine, RecordNormalizer, SearchFilters};
//!
//! let engine = LookupEngine::from_value(&json, &RecordNormalizer::default());
//! let outcome = engine.search("maths 3", FieldHint::SubjectLine, &SearchFilters::new().grade("10"));
//! for record in outcome.records() {
//!     println!("{} {}", record.identifier, record.name);
//! }
//! ```

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod facets;
pub mod index;
pub mod loader;
pub mod normalize;
pub mod query;
pub mod search;
pub mod synonyms;
mod types;
mod utils;

pub mod testing;

pub use cache::{ResultCache, DEFAULT_CAPACITY};
pub use config::LookupConfig;
pub use engine::{cache_key, LookupEngine};
pub use error::{LookupError, Result};
pub use export::{derive_columns, export_filename, record_rows, to_csv, write_csv, Row};
pub use facets::{line_options, retain_line, subject_options};
pub use index::{build_indexes, BucketMap, Indexes, RecordId};
pub use loader::{DataLoader, LoadedFile, LookupSession};
pub use normalize::{normalize_records, DatasetShape, NormalizeOptions, RawDataset, RecordNormalizer};
pub use query::{parse_query, parse_subject_line, StructuredQuery, SubjectLine};
pub use search::{MatchTier, Resolution, ResultMerger};
pub use synonyms::{resolve_subject, subject_key};
pub use types::{CanonicalRecord, FieldHint, SearchFilters, SearchOutcome};
pub use utils::{natural_cmp, normalize};
