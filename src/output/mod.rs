//! Output module for rendering catalog views
//!
//! This module handles:
//! - Plain-text grid, map, and detail listings for the terminal
//! - Markdown gallery export

mod markdown;
mod text;

pub use markdown::{format_markdown_gallery, generate_markdown_gallery};
pub use text::{format_detail, format_grid, format_maps, format_routes};
