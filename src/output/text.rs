//! Plain-text renderings for the command line

use crate::browse::{title_case, CategoryGroups, DetailView};
use crate::catalog::{Entity, Snapshot};

/// Formats the grouped grid, one section per category
///
/// `collapsed_limit` caps entities shown per category; `None` shows all.
pub fn format_grid(groups: &CategoryGroups, collapsed_limit: Option<usize>) -> String {
    let mut out = String::new();

    for (category, entities) in groups.iter() {
        out.push_str(&format!("{} ({})\n", title_case(category), entities.len()));

        let shown = collapsed_limit.unwrap_or(entities.len()).min(entities.len());
        for entity in &entities[..shown] {
            out.push_str(&format!(
                "  - {} [{}]\n",
                title_case(entity.name_str()),
                entity.route_id().unwrap_or_default()
            ));
        }
        if shown < entities.len() {
            out.push_str(&format!("  ... {} more\n", entities.len() - shown));
        }
        out.push('\n');
    }

    out
}

/// Formats the maps listing
pub fn format_maps(maps: &[Entity]) -> String {
    let mut out = String::new();
    for map in maps {
        let premium = if map.premium.unwrap_or(false) {
            " (premium)"
        } else {
            ""
        };
        out.push_str(&format!("  - {}{}\n", map.name_str(), premium));
        if let Some(url) = map.map_url.as_deref() {
            out.push_str(&format!("      {}\n", url));
        }
    }
    out
}

/// Formats a detail view with its related items
pub fn format_detail(view: &DetailView) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", view.title));
    out.push_str(&format!("Category: {}\n\n", view.category));
    out.push_str(&format!("{}\n", view.description));

    if !view.related.is_empty() {
        out.push_str("\nRelated Models:\n");
        for card in &view.related {
            match &card.href {
                Some(href) => out.push_str(&format!("  - {} ({})\n", card.title, href)),
                None => out.push_str(&format!("  - {}\n", card.title)),
            }
        }
    }

    out
}

/// Formats route ids one per line, with a completeness note
pub fn format_routes(routes: &[String], snapshot: &Snapshot) -> String {
    let mut out = routes.join("\n");
    if !routes.is_empty() {
        out.push('\n');
    }
    if snapshot.possibly_incomplete {
        out.push_str("# warning: catalog possibly incomplete\n");
    }
    out
}
