//! Browse module: shaping the catalog for grids and detail views
//!
//! This module provides:
//! - Stable grouping by category for the grid
//! - Circular "related items" selection for detail pages
//! - Display helpers (title case, word truncation) and the detail view model

mod display;
mod grouping;
mod related;

pub use display::{title_case, truncate_words, DetailView, RelatedCard};
pub use grouping::{group_by_category, CategoryGroups, UNCATEGORIZED};
pub use related::{related, related_by_slug};
