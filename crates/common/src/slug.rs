//! Content node slugs.

/// Maximum slug length, in characters.
pub const MAX_SLUG_LENGTH: usize = 255;

/// Build a slug from a title.
///
/// Letters and digits (any script) are kept and lowercased; every other run
/// of characters becomes a single `-`. Leading and trailing dashes are dropped.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug.chars().take(MAX_SLUG_LENGTH).collect::<String>().trim_end_matches('-').to_string()
}

/// Whether a caller-supplied slug is acceptable for a content node.
#[must_use]
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.chars().count() <= MAX_SLUG_LENGTH
        && slug.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}
