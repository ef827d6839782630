//! Slug derivation and validation.
//!
//! Slugs are the URL-safe identifiers every content entity carries next to
//! its primary key. They must be lowercase alphanumeric with single dashes.

/// Derive a slug from a display name.
///
/// Lowercases, maps runs of non-alphanumeric characters to a single dash,
/// and trims leading/trailing dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true; // suppress a leading dash

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Whether a client-supplied slug is acceptable as-is.
pub fn is_valid(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Cloud Migration & DevOps"), "cloud-migration-devops");
        assert_eq!(slugify("  Edge AI (2024)  "), "edge-ai-2024");
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("a---b___c"), "a-b-c");
    }

    #[test]
    fn validation_rules() {
        assert!(is_valid("cloud-migration"));
        assert!(is_valid("a1-b2"));
        assert!(!is_valid(""));
        assert!(!is_valid("Upper-Case"));
        assert!(!is_valid("-leading"));
        assert!(!is_valid("trailing-"));
        assert!(!is_valid("double--dash"));
    }
}
