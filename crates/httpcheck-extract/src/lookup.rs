//! Case-insensitive field lookup.
//!
//! Raw request inputs (path parameters, query parameters, payload keys) are
//! stored in a [`FieldLookup`], a small ordered map whose keys are
//! lower-cased on insert and on lookup. Inserting an existing key replaces
//! its value in place.

use smallvec::SmallVec;

/// Number of entries stored inline before spilling to the heap.
const INLINE_FIELDS: usize = 8;

/// Case-insensitive, insertion-ordered mapping from field key to value.
///
/// # Example
///
/// ```rust
/// use httpcheck_extract::FieldLookup;
///
/// let mut lookup = FieldLookup::new();
/// lookup.insert("UserId", "42".to_string());
/// lookup.insert("userid", "43".to_string());
///
/// assert_eq!(lookup.len(), 1);
/// assert_eq!(lookup.get("USERID").map(String::as_str), Some("43"));
/// assert_eq!(lookup.get("unknown"), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldLookup<V> {
    /// Lower-cased key and value pairs
    inner: SmallVec<[(String, V); INLINE_FIELDS]>,
}

impl<V> Default for FieldLookup<V> {
    fn default() -> Self {
        Self {
            inner: SmallVec::new(),
        }
    }
}

impl<V> FieldLookup<V> {
    /// Creates an empty lookup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, replacing any value stored under the same key.
    pub fn insert(&mut self, key: impl AsRef<str>, value: V) {
        let key = key.as_ref().to_lowercase();
        match self.inner.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.inner.push((key, value)),
        }
    }

    /// Returns the value stored under `key`, ignoring case.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        let key = key.to_lowercase();
        self.inner.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Returns `true` if a value is stored under `key`, ignoring case.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns true if the lookup is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns an iterator over the (lower-cased key, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FieldLookup<String> {
    /// Returns the string stored under `key`, or `""` when absent.
    #[must_use]
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).map_or("", String::as_str)
    }
}

impl<K: AsRef<str>, V> FromIterator<(K, V)> for FieldLookup<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut lookup = Self::new();
        for (key, value) in iter {
            lookup.insert(key, value);
        }
        lookup
    }
}

impl<'a, V> IntoIterator for &'a FieldLookup<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (String, V)>,
        fn(&'a (String, V)) -> (&'a str, &'a V),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter().map(|(k, v)| (k.as_str(), v))
    }
}
