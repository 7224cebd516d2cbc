// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query resolution: structured query in, ordered record ids out.
//!
//! Indexes are built, the query is parsed. Now the tiers run: exact key,
//! exact bucket, prefix, substring. The first tier that finds anything
//! inside the prefiltered pool decides the answer, and the merger makes sure
//! no student-subject pair shows up twice.

pub mod dedup;
pub mod tiered;

pub use dedup::{dedup_key, DedupKey, ResultMerger};
pub use tiered::{strategy, MatchTier, Resolution, TierResolver};
