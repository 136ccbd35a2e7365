//! Entry combination - zip per-rule value lists into entries

use autoaumento_domain::Entry;

/// Zip labelled value lists into entries
///
/// The number of entries is the length of the shortest list; longer lists
/// lose their trailing values. No lists means no entries.
pub fn combine(columns: Vec<(String, Vec<String>)>) -> Vec<Entry> {
    let count = columns
        .iter()
        .map(|(_, values)| values.len())
        .min()
        .unwrap_or(0);

    let mut entries = vec![Entry::new(); count];
    for (label, values) in columns {
        for (entry, value) in entries.iter_mut().zip(values) {
            entry.insert(label.clone(), value);
        }
    }
    entries
}
