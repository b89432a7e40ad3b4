// Attribute diff policy.
//
// Flat, attribute-level string comparison against the fetched object.
// The result is the minimal set actually transmitted: proposed attributes
// whose value differs from the existing object (a key the existing object
// lacks counts as differing). No object at all means the whole proposed
// set is the diff. Nested/children diffing is out of scope.

use apic_api::models::Attributes;

/// Compute the minimal attribute patch, or `None` when nothing differs.
pub fn diff_attributes(proposed: &Attributes, existing: Option<&Attributes>) -> Option<Attributes> {
    let Some(existing) = existing else {
        if proposed.is_empty() {
            return None;
        }
        return Some(proposed.clone());
    };

    let patch: Attributes = proposed
        .iter()
        .filter(|&(key, value)| existing.get(key) != Some(value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    if patch.is_empty() { None } else { Some(patch) }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn missing_object_yields_full_proposed() {
        let proposed = attrs(&[("name", "t1"), ("regex", ".*")]);
        assert_eq!(diff_attributes(&proposed, None).unwrap(), proposed);
    }

    #[test]
    fn identical_attributes_yield_no_diff() {
        let proposed = attrs(&[("name", "t1"), ("regex", ".*")]);
        let existing = attrs(&[("name", "t1"), ("regex", ".*"), ("dn", "uni/tn-p")]);
        assert!(diff_attributes(&proposed, Some(&existing)).is_none());
    }

    #[test]
    fn changed_value_produces_minimal_patch() {
        let proposed = attrs(&[("name", "t1"), ("regex", "^64512"), ("descr", "d")]);
        let existing = attrs(&[("name", "t1"), ("regex", ".*"), ("descr", "d")]);
        assert_eq!(
            diff_attributes(&proposed, Some(&existing)).unwrap(),
            attrs(&[("regex", "^64512")])
        );
    }

    #[test]
    fn key_absent_from_existing_counts_as_changed() {
        let proposed = attrs(&[("name", "t1"), ("nameAlias", "alias")]);
        let existing = attrs(&[("name", "t1")]);
        assert_eq!(
            diff_attributes(&proposed, Some(&existing)).unwrap(),
            attrs(&[("nameAlias", "alias")])
        );
    }

    #[test]
    fn empty_proposed_never_diffs() {
        let proposed = Attributes::new();
        assert!(diff_attributes(&proposed, None).is_none());
        let existing = attrs(&[("name", "t1")]);
        assert!(diff_attributes(&proposed, Some(&existing)).is_none());
    }
}
