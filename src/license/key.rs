use crate::models::LicenseKey;

/// Fold license text into a grouping key.
///
/// Lower-cases, keeps only word characters and drops the vowels plus `w` and
/// `y`, so blurbs that differ in line breaks, punctuation or small spelling
/// changes share a key. Very short strings can collide; that is accepted.
pub fn normalize_key(text: &str) -> LicenseKey {
    let folded = text
        .to_lowercase()
        .chars()
        .filter(|&c| is_word_char(c) && !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'w' | 'y'))
        .collect();
    LicenseKey::new(folded)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold() {
        assert_eq!(
            normalize_key("Copyright (C) 2019, Foo!"),
            LicenseKey::new("cprghtc2019f".to_string())
        );
        assert_eq!(normalize_key("MIT License"), LicenseKey::new("mtlcns".to_string()));
    }

    #[test]
    fn test_stable() {
        let text = "Licensed under the Apache License, Version 2.0";
        assert_eq!(normalize_key(text), normalize_key(text));
    }

    #[test]
    fn test_cosmetic_variants_share_a_key() {
        let a = normalize_key("Copyright 2019 Foo.\nAll rights reserved.");
        let b = normalize_key("COPYRIGHT 2019 FOO -- all   rights reserved");
        assert_eq!(a, b);
    }

    #[test]
    fn test_distinct_licenses_differ() {
        assert_ne!(normalize_key("MIT License"), normalize_key("Apache License 2.0"));
        assert_ne!(normalize_key("GPLv2"), normalize_key("GPLv3"));
    }

    #[test]
    fn test_delimiters_do_not_affect_key() {
        assert_eq!(
            normalize_key("/* Copyright 2019 Foo */"),
            normalize_key("<%-- Copyright 2019 Foo --%>")
        );
    }
}
