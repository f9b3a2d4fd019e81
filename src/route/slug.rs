/// Converts a display name into a URL slug
///
/// # Slug Rules
///
/// 1. Lowercase and trim surrounding whitespace
/// 2. Whitespace and underscores become hyphens
/// 3. Anything outside `[a-z0-9-]` is dropped
/// 4. Runs of hyphens collapse into one
///
/// Leading or trailing hyphens produced by dropped characters are kept. The
/// output only contains `[a-z0-9-]` without repeated hyphens, so applying
/// `slugify` twice gives the same result as applying it once.
///
/// # Examples
///
/// ```
/// use gallery_catalog::route::slugify;
///
/// assert_eq!(slugify("  My Model_Name!! "), "my-model-name");
/// assert_eq!(slugify(""), "");
/// ```
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());

    for c in lowered.trim().chars() {
        if c.is_whitespace() || c == '_' || c == '-' {
            if !slug.ends_with('-') {
                slug.push('-');
            }
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
        }
    }

    slug
}
