use crate::browse::related::related;
use crate::catalog::Entity;
use crate::route::model_detail_path;

const NO_DESCRIPTION: &str = "No description available for this model.";

/// Capitalizes each word and lower-cases the rest of it
///
/// A word starts at the first ASCII letter, digit or underscore after
/// whitespace and runs to the next whitespace. Characters before that start
/// are left as they are.
///
/// # Examples
///
/// ```
/// use gallery_catalog::browse::title_case;
///
/// assert_eq!(title_case("hOT air-BALLOON"), "Hot Air-balloon");
/// ```
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for c in text.chars() {
        if c.is_whitespace() {
            in_word = false;
            out.push(c);
        } else if in_word {
            out.extend(c.to_lowercase());
        } else if c.is_ascii_alphanumeric() || c == '_' {
            in_word = true;
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
    }

    out
}

/// Shortens text to at most `max_words` words, appending `...` when cut
///
/// Text that already fits is returned unchanged, including its original
/// spacing.
pub fn truncate_words(text: &str, max_words: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max_words {
        return text.to_string();
    }
    format!("{}...", words[..max_words].join(" "))
}

/// A related entity as shown on a detail page
#[derive(Debug, Clone, PartialEq)]
pub struct RelatedCard {
    pub title: String,
    pub image: String,
    /// Detail path, absent when the entity has no id
    pub href: Option<String>,
}

impl RelatedCard {
    fn from_entity(entity: &Entity) -> Self {
        Self {
            title: title_case(entity.name_str()),
            image: entity.preview_image().to_string(),
            href: entity
                .id
                .as_deref()
                .map(|id| model_detail_path(id, entity.name_str())),
        }
    }
}

/// Everything a detail page renders for one entity
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub title: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub related: Vec<RelatedCard>,
}

impl DetailView {
    /// Builds the view for `entity`, picking `related_count` neighbors from
    /// `all`
    pub fn build(
        entity: &Entity,
        all: &[Entity],
        related_count: usize,
        description_words: usize,
    ) -> Self {
        let description = match entity.description.as_deref() {
            Some(text) if !text.is_empty() => truncate_words(text, description_words),
            _ => NO_DESCRIPTION.to_string(),
        };

        Self {
            title: title_case(entity.name_str()),
            description,
            category: title_case(entity.category_or_default()),
            image: entity.preview_image().to_string(),
            related: related(entity, all, related_count)
                .into_iter()
                .map(RelatedCard::from_entity)
                .collect(),
        }
    }
}
