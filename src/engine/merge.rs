use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::license::key::normalize_key;
use crate::models::{LicenseFinding, LicenseGroup, LicenseKey};

/// License text grouped by [`LicenseKey`].
///
/// Used both for the result of a single file and for the running aggregate.
/// [`LicenseMap::merge`] is commutative and associative: file sets are unioned
/// and the canonical text of a key is always the lexicographically smallest
/// one seen, so the outcome does not depend on the order results arrive in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicenseMap {
    groups: BTreeMap<LicenseKey, LicenseGroup>,
}

impl LicenseMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn insert(&mut self, finding: LicenseFinding) {
        let key = normalize_key(&finding.text);
        self.insert_group(key, finding.into());
    }

    fn insert_group(&mut self, key: LicenseKey, group: LicenseGroup) {
        match self.groups.entry(key) {
            Entry::Occupied(mut existing) => existing.get_mut().absorb(group),
            Entry::Vacant(slot) => {
                slot.insert(group);
            }
        }
    }

    /// Key-wise union of `other` into `self`.
    pub fn merge(&mut self, other: LicenseMap) {
        for (key, group) in other.groups {
            self.insert_group(key, group);
        }
    }

    pub fn merged(mut self, other: LicenseMap) -> Self {
        self.merge(other);
        self
    }

    /// Groups in report order. See [`LicenseMap::into_groups`].
    pub fn groups(&self) -> Vec<LicenseGroup> {
        self.clone().into_groups()
    }

    /// Groups sorted by their license text with punctuation removed and case
    /// folded, ties broken by the full text.
    pub fn into_groups(self) -> Vec<LicenseGroup> {
        let mut groups: Vec<LicenseGroup> = self.groups.into_values().collect();
        groups.sort_by_cached_key(|g| (clean_text(&g.license), g.license.clone()));
        groups
    }
}

impl FromIterator<LicenseFinding> for LicenseMap {
    fn from_iter<I: IntoIterator<Item = LicenseFinding>>(iter: I) -> Self {
        let mut map = LicenseMap::new();
        for finding in iter {
            map.insert(finding);
        }
        map
    }
}

fn clean_text(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(text: &str, path: &str) -> LicenseFinding {
        LicenseFinding {
            text: text.to_string(),
            path: path.into(),
        }
    }

    fn map(findings: &[(&str, &str)]) -> LicenseMap {
        findings.iter().map(|(t, p)| finding(t, p)).collect()
    }

    #[test]
    fn test_disjoint_keys_copy_through() {
        let merged = map(&[("MIT License", "a.js")]).merged(map(&[("BSD License", "b.js")]));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_shared_key_unions_files() {
        let merged = map(&[("Copyright 2019 Foo", "a.js")])
            .merged(map(&[("COPYRIGHT 2019 FOO.", "b.js")]));
        assert_eq!(merged.len(), 1);
        let group = &merged.groups()[0];
        assert_eq!(group.license, "COPYRIGHT 2019 FOO.");
        assert_eq!(group.files.len(), 2);
    }

    #[test]
    fn test_merge_is_commutative() {
        let a = map(&[("Copyright 2019 Foo", "a.js"), ("MIT", "a.js")]);
        let b = map(&[("copyright 2019 foo", "b.js"), ("BSD", "b.js")]);
        assert_eq!(a.clone().merged(b.clone()), b.merged(a));
    }

    #[test]
    fn test_merge_is_associative() {
        let a = map(&[("Copyright 2019 Foo", "a.js")]);
        let b = map(&[("copyright 2019 foo!", "b.js"), ("ISC", "b.js")]);
        let c = map(&[("Copyright 2019, Foo", "c.js"), ("ISC License", "c.js")]);
        let left = a.clone().merged(b.clone()).merged(c.clone());
        let right = a.merged(b.merged(c));
        assert_eq!(left, right);
    }

    #[test]
    fn test_merge_with_empty_is_identity() {
        let a = map(&[("MIT", "a.js")]);
        assert_eq!(a.clone().merged(LicenseMap::new()), a);
        assert_eq!(LicenseMap::new().merged(a.clone()), a);
    }

    #[test]
    fn test_report_order_ignores_punctuation_and_case() {
        let m = map(&[("zlib", "z.c"), ("(C) Acme", "a.c"), ("BSD", "b.c")]);
        let order: Vec<String> = m.into_groups().into_iter().map(|g| g.license).collect();
        assert_eq!(order, vec!["BSD", "(C) Acme", "zlib"]);
    }
}
