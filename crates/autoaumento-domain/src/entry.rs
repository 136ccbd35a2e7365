//! Entry - one structured field map produced by an extraction run

/// An insertion-ordered mapping from rule label to extracted value
///
/// Keys keep the order in which they were first inserted, which for
/// extraction output is the rule order of the configuration. That makes
/// "the first value of the entry" well defined.
///
/// # Examples
///
/// ```
/// use autoaumento_domain::Entry;
///
/// let entry: Entry = [("question", "Why?"), ("answer", "Because.")]
///     .into_iter()
///     .collect();
/// assert_eq!(entry.get("answer"), Some("Because."));
/// assert_eq!(entry.first_value(), Some("Why?"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Entry {
    fields: Vec<(String, String)>,
}

impl Entry {
    /// Create an empty entry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing it in place if the label already exists
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
        let label = label.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == label) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((label, value)),
        }
    }

    /// Value stored under `label`
    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == label)
            .map(|(_, v)| v.as_str())
    }

    /// Whether `label` is present
    pub fn contains_key(&self, label: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == label)
    }

    /// Value of the first inserted label
    pub fn first_value(&self) -> Option<&str> {
        self.fields.first().map(|(_, v)| v.as_str())
    }

    /// Iterate over `(label, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Labels in insertion order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the entry has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Entry
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut entry = Entry::new();
        for (k, v) in iter {
            entry.insert(k, v);
        }
        entry
    }
}

impl IntoIterator for Entry {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
