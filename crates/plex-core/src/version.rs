use std::cmp::Ordering;

/// Compare two dotted version strings component by component.
///
/// Every component is read as an unsigned integer; anything that does not
/// parse counts as `0`. The shorter side is padded with zeros, so `"1.2"` and
/// `"1.2.0"` are equal. This is deliberately not semver: there are no
/// pre-release or build suffixes and no fixed arity.
#[must_use]
pub fn compare_versions(left: &str, right: &str) -> Ordering {
    let left = components(left);
    let right = components(right);
    let len = left.len().max(right.len());

    (0..len)
        .map(|i| {
            let l = left.get(i).copied().unwrap_or(0);
            let r = right.get(i).copied().unwrap_or(0);
            l.cmp(&r)
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// `true` when `remote` is strictly newer than `local`.
#[must_use]
pub fn is_remote_newer(remote: &str, local: &str) -> bool {
    compare_versions(remote, local) == Ordering::Greater
}

fn components(version: &str) -> Vec<u64> {
    version
        .split('.')
        .map(|part| part.parse::<u64>().unwrap_or(0))
        .collect()
}
