//! Usage ranking module
//!
//! Optional enrichment: an analytics insight lists entity ids by usage, and
//! the catalog is stably reordered by that ranking before it is grouped.
//! Any failure yields an empty ranking, which leaves the order untouched.

mod usage;

pub use usage::{apply_ranking, parse_rank_map, RankMap, UsageRanker};
