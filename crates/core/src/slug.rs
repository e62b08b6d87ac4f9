//! URL slug generation for catalog entities.

/// Slug used when a title contains no ASCII alphanumerics at all.
pub const FALLBACK_SLUG: &str = "item";

/// Generate a URL-safe slug from a name or title.
///
/// Converts to lowercase, replaces spaces and special characters with hyphens,
/// collapses consecutive hyphens, and trims leading/trailing hyphens.
pub fn generate_slug(title: &str) -> String {
    let mut result = String::with_capacity(title.len());
    let mut prev_hyphen = false;
    for c in title.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen {
            result.push('-');
            prev_hyphen = true;
        }
    }

    let trimmed = result.trim_matches('-');
    if trimmed.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Pick the first free slug among `base`, `base-2`, `base-3`, ...
///
/// `taken` holds the slugs already in use that share the `base` prefix.
pub fn unique_slug(base: &str, taken: &[String]) -> String {
    if !taken.iter().any(|t| t == base) {
        return base.to_string();
    }
    let mut n: u32 = 2;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_basic_title() {
        assert_eq!(generate_slug("Marble Floor Tiles"), "marble-floor-tiles");
    }

    #[test]
    fn slug_special_characters_collapse() {
        assert_eq!(generate_slug("  Porcelain & Ceramic -- 60x60!! "), "porcelain-ceramic-60x60");
    }

    #[test]
    fn slug_of_symbols_falls_back() {
        assert_eq!(generate_slug("***"), FALLBACK_SLUG);
    }

    #[test]
    fn unique_slug_returns_base_when_free() {
        assert_eq!(unique_slug("mosaic", &[]), "mosaic");
        assert_eq!(unique_slug("mosaic", &["mosaic-2".into()]), "mosaic");
    }

    #[test]
    fn unique_slug_appends_first_free_suffix() {
        let taken = vec!["mosaic".to_string(), "mosaic-2".to_string(), "mosaic-4".to_string()];
        assert_eq!(unique_slug("mosaic", &taken), "mosaic-3");
    }
}
