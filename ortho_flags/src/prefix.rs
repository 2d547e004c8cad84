//! Shortest unique prefixes over a set of flag names.

use std::collections::BTreeMap;

/// Maps every name to the shortest prefix that tells it apart from its
/// lexicographic neighbours.
///
/// Names that are themselves a prefix of a longer or repeated name map to
/// themselves. Repeats are expected, e.g. an integer flag `nozz` next to the
/// negated form of a boolean `zz`.
///
/// # Examples
///
/// ```
/// use ortho_flags::prefix::shortest_unique_prefixes;
///
/// let table = shortest_unique_prefixes(["a", "abc", "common", "commonly", "zz"]);
/// assert_eq!(table["a"], "a");
/// assert_eq!(table["abc"], "ab");
/// assert_eq!(table["common"], "common");
/// assert_eq!(table["commonly"], "commonl");
/// assert_eq!(table["zz"], "z");
/// ```
#[must_use]
pub fn shortest_unique_prefixes<I, S>(names: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut sorted: Vec<Vec<char>> = names
        .into_iter()
        .map(|name| name.as_ref().chars().collect())
        .collect();
    sorted.sort();

    let mut table = BTreeMap::new();
    // Divergence index carried over from the previous name.
    let mut carried = 0_usize;
    for (pos, current) in sorted.iter().enumerate() {
        let next = sorted.get(pos + 1);
        let divergence = current
            .iter()
            .enumerate()
            .find(|&(idx, ch)| next.and_then(|other| other.get(idx)) != Some(ch))
            .map(|(idx, _)| idx);
        let full: String = current.iter().collect();
        let prefix = match divergence {
            Some(idx) => {
                let keep = carried.max(idx) + 1;
                carried = idx;
                current.iter().take(keep).collect()
            }
            None => {
                carried = current.len();
                full.clone()
            }
        };
        table.insert(full, prefix);
    }
    table
}

/// Returns every name in `names` that starts with `prefix`, sorted and
/// deduplicated.
pub(crate) fn candidates<'a, I>(prefix: &str, names: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut found: Vec<&str> = names
        .into_iter()
        .filter(|name| name.starts_with(prefix))
        .collect();
    found.sort_unstable();
    found.dedup();
    found
}
