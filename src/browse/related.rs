use crate::catalog::Entity;
use crate::route::slugify;

/// Picks the `count` entities following `focal` in `all`, wrapping around
///
/// The focal entity is located by id. The window only walks forward; when
/// `count` reaches the list length the window wraps onto the focal entity
/// and repeats. The result holds `count` references, so callers bound it.
/// Returns an empty list when the focal entity has no id or is not in `all`.
///
/// # Examples
///
/// ```
/// use gallery_catalog::browse::related;
/// use gallery_catalog::catalog::Entity;
///
/// let all: Vec<Entity> = (0..5).map(|i| Entity::new(i.to_string(), "e")).collect();
/// let picked: Vec<&str> = related(&all[2], &all, 5).iter().map(|e| e.id_str()).collect();
///
/// assert_eq!(picked, vec!["3", "4", "0", "1", "2"]);
/// ```
pub fn related<'a>(focal: &Entity, all: &'a [Entity], count: usize) -> Vec<&'a Entity> {
    let Some(id) = focal.id.as_deref() else {
        return Vec::new();
    };

    match all.iter().position(|e| e.id.as_deref() == Some(id)) {
        Some(index) => window(all, index, count),
        None => Vec::new(),
    }
}

/// Same as [`related`], locating the focal entity by slug of its name
pub fn related_by_slug<'a>(slug: &str, all: &'a [Entity], count: usize) -> Vec<&'a Entity> {
    match all.iter().position(|e| slugify(e.name_str()) == slug) {
        Some(index) => window(all, index, count),
        None => Vec::new(),
    }
}

fn window(all: &[Entity], index: usize, count: usize) -> Vec<&Entity> {
    (1..=count).map(|k| &all[wrap_index(index, k, all.len())]).collect()
}

/// `(index + offset) % len` without overflowing; `index` must be below `len`
fn wrap_index(index: usize, offset: usize, len: usize) -> usize {
    let offset = offset % len;
    if offset >= len - index {
        offset - (len - index)
    } else {
        index + offset
    }
}
