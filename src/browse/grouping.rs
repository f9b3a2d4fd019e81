use crate::catalog::Entity;
use std::collections::HashMap;

/// Category used for entities without one
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Entities partitioned by category
///
/// Categories keep first-seen order and entities keep their input order
/// within each category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryGroups {
    groups: Vec<(String, Vec<Entity>)>,
}

impl CategoryGroups {
    /// Category names in first-seen order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(name, _)| name.as_str())
    }

    /// Entities of one category
    pub fn get(&self, category: &str) -> Option<&[Entity]> {
        self.groups
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, entities)| entities.as_slice())
    }

    /// `(category, entities)` pairs in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Entity])> {
        self.groups
            .iter()
            .map(|(name, entities)| (name.as_str(), entities.as_slice()))
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of entities across all categories
    pub fn entity_count(&self) -> usize {
        self.groups.iter().map(|(_, entities)| entities.len()).sum()
    }
}

/// Partitions entities by category without reordering them
///
/// # Examples
///
/// ```
/// use gallery_catalog::browse::group_by_category;
/// use gallery_catalog::catalog::Entity;
///
/// let entities = vec![
///     Entity::new("1", "a").with_category("A"),
///     Entity::new("2", "b").with_category("B"),
///     Entity::new("3", "c").with_category("A"),
/// ];
/// let groups = group_by_category(&entities);
///
/// assert_eq!(groups.categories().collect::<Vec<_>>(), vec!["A", "B"]);
/// assert_eq!(groups.get("A").unwrap().len(), 2);
/// ```
pub fn group_by_category(entities: &[Entity]) -> CategoryGroups {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<Entity>)> = Vec::new();

    for entity in entities {
        let category = entity.category_or_default();
        let slot = *index.entry(category).or_insert_with(|| {
            groups.push((category.to_string(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(entity.clone());
    }

    CategoryGroups { groups }
}
