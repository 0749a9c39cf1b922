//! Insertion-ordered name/value maps.

use indexmap::IndexMap;
use indexmap::map::Iter;
use serde::Serialize;

/// A string map that remembers the order in which keys were first inserted.
///
/// Inserting an existing key replaces its value but keeps its position, which
/// is how the query, header, cookie and form maps of a normalized request
/// order their entries. Two maps are equal only if their entries match in
/// order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct PairMap {
    entries: IndexMap<String, String>,
}

impl PairMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `name`, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(name.into(), value.into())
    }

    /// Value for an exact key.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// First key matching `name` ignoring ASCII case.
    #[must_use]
    pub fn find_key_ignore_case(&self, name: &str) -> Option<&str> {
        self.entries
            .keys()
            .find(|key| key.eq_ignore_ascii_case(name))
            .map(String::as_str)
    }

    /// Returns `true` if the exact key is present.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.into_iter()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Overlay every entry of `other` onto this map.
    pub fn extend_from(&mut self, other: &Self) {
        self.entries
            .extend(other.entries.iter().map(|(name, value)| (name.clone(), value.clone())));
    }
}

impl PartialEq for PairMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries.iter().eq(other.entries.iter())
    }
}

impl Eq for PairMap {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PairMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

type StrPair<'a> = (&'a str, &'a str);
type AsStrPair<'a> = fn((&'a String, &'a String)) -> StrPair<'a>;

impl<'a> IntoIterator for &'a PairMap {
    type Item = StrPair<'a>;
    type IntoIter = std::iter::Map<Iter<'a, String, String>, AsStrPair<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().map(as_str_pair as AsStrPair<'a>)
    }
}

fn as_str_pair<'a>((name, value): (&'a String, &'a String)) -> StrPair<'a> {
    (name.as_str(), value.as_str())
}
