//! URL slug generation.

/// Derive a URL slug from a display name: lowercase ASCII alphanumerics,
/// runs of everything else collapsed to single hyphens.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }

            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Summer Linen Shirt"), "summer-linen-shirt");
    }

    #[test]
    fn collapses_punctuation_runs() {
        assert_eq!(slugify("Tee -- V2 (Blue)"), "tee-v2-blue");
    }

    #[test]
    fn trims_leading_and_trailing_separators() {
        assert_eq!(slugify("  Boots!  "), "boots");
    }

    #[test]
    fn separates_at_non_ascii() {
        assert_eq!(slugify("Café au lait"), "caf-au-lait");
    }
}
