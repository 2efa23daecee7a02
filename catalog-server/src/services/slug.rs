//! Slug Generator
//!
//! Derives the URL-safe identifier for a store from its display name.
//! Collision handling is count-based: with N slugs already in the
//! `base`/`base-<digits>` family, the next one is `base-(N+1)`. The unique
//! index on store.slug remains the authoritative arbiter; callers retry
//! generation when it fires.

/// Normalize a display name into a lowercase, hyphen-separated token.
/// Common accented latin characters are folded to ASCII; everything that is
/// not alphanumeric becomes a hyphen, runs collapse, edges are trimmed.
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut push = |c: char| {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    };
    for c in name.chars() {
        match fold_char(c) {
            Some(folded) => folded.chars().for_each(&mut push),
            None => push(c),
        }
    }
    out.trim_end_matches('-').to_string()
}

/// Pick the next slug in the family given the slugs visible at call time.
/// Zero matches: the base itself. N matches: `base-(N+1)`.
pub fn next_slug(base: &str, existing: &[String]) -> String {
    let matches = existing.iter().filter(|s| in_family(base, s)).count();
    if matches == 0 {
        base.to_string()
    } else {
        format!("{base}-{}", matches + 1)
    }
}

/// Case-insensitive match against `^base(-[0-9]*)?$`.
fn in_family(base: &str, slug: &str) -> bool {
    let base = base.to_ascii_lowercase();
    let slug = slug.to_ascii_lowercase();
    match slug.strip_prefix(&base) {
        Some("") => true,
        Some(rest) => rest
            .strip_prefix('-')
            .is_some_and(|digits| digits.chars().all(|c| c.is_ascii_digit())),
        None => false,
    }
}

/// ASCII folding for the latin-1 accents that show up in store names.
/// Anything else passes through unchanged (and non-alphanumerics end up
/// as hyphens in `slugify`).
fn fold_char(c: char) -> Option<&'static str> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => "a",
        'è' | 'é' | 'ê' | 'ë' | 'È' | 'É' | 'Ê' | 'Ë' => "e",
        'ì' | 'í' | 'î' | 'ï' | 'Ì' | 'Í' | 'Î' | 'Ï' => "i",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' => "o",
        'ù' | 'ú' | 'û' | 'ü' | 'Ù' | 'Ú' | 'Û' | 'Ü' => "u",
        'ý' | 'ÿ' | 'Ý' => "y",
        'ñ' | 'Ñ' => "n",
        'ç' | 'Ç' => "c",
        'ß' => "ss",
        'æ' | 'Æ' => "ae",
        'œ' | 'Œ' => "oe",
        'ø' | 'Ø' => "o",
        _ => return None,
    };
    Some(folded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Coffee & Toast"), "coffee-toast");
        assert_eq!(slugify("  The   Grind  "), "the-grind");
        assert_eq!(slugify("Bar 42"), "bar-42");
    }

    #[test]
    fn slugify_folds_accents() {
        assert_eq!(slugify("Café Crème"), "cafe-creme");
        assert_eq!(slugify("Señor Açaí"), "senor-acai");
        assert_eq!(slugify("Straße"), "strasse");
    }

    #[test]
    fn slugify_drops_leading_and_trailing_punctuation() {
        assert_eq!(slugify("!!Nacho's!!"), "nacho-s");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn next_slug_without_matches_is_base() {
        assert_eq!(next_slug("the-grind", &[]), "the-grind");
        assert_eq!(
            next_slug("the-grind", &strings(&["the-grinder"])),
            "the-grind"
        );
    }

    #[test]
    fn next_slug_counts_family_members() {
        assert_eq!(
            next_slug("the-grind", &strings(&["the-grind"])),
            "the-grind-2"
        );
        assert_eq!(
            next_slug("the-grind", &strings(&["the-grind", "the-grind-2"])),
            "the-grind-3"
        );
    }

    #[test]
    fn next_slug_ignores_lookalikes() {
        // suffix must be purely numeric; "the-grind-2x" is a different slug
        assert_eq!(
            next_slug("the-grind", &strings(&["the-grind", "the-grind-2x"])),
            "the-grind-2"
        );
    }

    #[test]
    fn next_slug_accepts_empty_numeric_suffix() {
        // a bare trailing hyphen still counts as a family member
        assert_eq!(
            next_slug("the-grind", &strings(&["the-grind", "the-grind-"])),
            "the-grind-3"
        );
    }

    #[test]
    fn family_matching_is_case_insensitive() {
        assert_eq!(
            next_slug("the-grind", &strings(&["The-Grind"])),
            "the-grind-2"
        );
    }
}
