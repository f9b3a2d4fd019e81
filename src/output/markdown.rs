//! Markdown gallery generation
//!
//! This module writes the grouped catalog as a markdown document: one section
//! per category, each a table of name, detail route and preview image.

use crate::browse::{title_case, CategoryGroups};
use crate::catalog::{Snapshot, PLACEHOLDER_IMAGE};
use crate::route::MODELS_PATH;
use crate::Result;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the markdown gallery to `output_path`
pub fn generate_markdown_gallery(
    groups: &CategoryGroups,
    snapshot: &Snapshot,
    output_path: &Path,
) -> Result<()> {
    let markdown = format_markdown_gallery(groups, snapshot);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats the grouped catalog as markdown
pub fn format_markdown_gallery(groups: &CategoryGroups, snapshot: &Snapshot) -> String {
    let mut md = String::new();

    md.push_str("# Models\n\n");
    md.push_str(&format!(
        "- **Entities**: {}\n- **Categories**: {}\n- **Fetched**: {}\n",
        groups.entity_count(),
        groups.len(),
        snapshot.fetched_at.to_rfc3339()
    ));
    if snapshot.possibly_incomplete {
        md.push_str("- **Warning**: the catalog may be incomplete\n");
    }
    md.push('\n');

    for (category, entities) in groups.iter() {
        md.push_str(&format!("## {}\n\n", title_case(category)));
        md.push_str("| Name | Route | Preview |\n");
        md.push_str("|------|-------|---------|\n");

        for entity in entities {
            let route = entity
                .route_id()
                .map(|r| format!("`{}/{}`", MODELS_PATH, r))
                .unwrap_or_default();
            let image = entity.preview_image();
            let preview = if image == PLACEHOLDER_IMAGE {
                String::new()
            } else {
                format!("![]({})", image)
            };
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                escape_cell(&title_case(entity.name_str())),
                route,
                preview
            ));
        }
        md.push('\n');
    }

    md
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
