//! Insertion-ordered keyword → value map used for every keyword mapping the
//! analysis produces (matches, missed terms, weighted values, usage deficits).

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered mapping from keyword to a value. Re-inserting an existing keyword
/// updates its value in place and keeps its original position.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordMap<V> {
    entries: Vec<(String, V)>,
}

/// Keyword → float score.
pub type KeywordScores = KeywordMap<f64>;

impl<V> Default for KeywordMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> KeywordMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.position(keyword).is_some()
    }

    pub fn get(&self, keyword: &str) -> Option<&V> {
        self.position(keyword).map(|i| &self.entries[i].1)
    }

    pub fn insert(&mut self, keyword: impl Into<String>, value: V) {
        let keyword = keyword.into();
        match self.position(&keyword) {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((keyword, value)),
        }
    }

    /// Inserts only if the keyword is not present yet (first occurrence wins).
    pub fn insert_if_absent(&mut self, keyword: &str, value: V) {
        if !self.contains(keyword) {
            self.entries.push((keyword.to_string(), value));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.entries.iter_mut().map(|(_, v)| v)
    }

    pub fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    fn position(&self, keyword: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == keyword)
    }
}

impl<V: PartialOrd> KeywordMap<V> {
    /// Stable sort by value, highest first. Equal values keep insertion order.
    pub fn sort_by_value_desc(&mut self) {
        self.entries
            .sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    }
}

impl KeywordMap<f64> {
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v).sum()
    }

    pub fn add(&mut self, keyword: &str, delta: f64) {
        match self.position(keyword) {
            Some(i) => self.entries[i].1 += delta,
            None => self.entries.push((keyword.to_string(), delta)),
        }
    }
}

impl<V> FromIterator<(String, V)> for KeywordMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<V: Serialize> Serialize for KeywordMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reinsert_keeps_position() {
        let mut map = KeywordScores::new();
        map.insert("rust", 1.0);
        map.insert("kafka", 2.0);
        map.insert("rust", 3.0);
        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec!["rust", "kafka"]);
        assert_eq!(map.get("rust"), Some(&3.0));
    }

    #[test]
    fn test_insert_if_absent_keeps_first() {
        let mut map = KeywordScores::new();
        map.insert_if_absent("rust", 1.0);
        map.insert_if_absent("rust", 9.0);
        assert_eq!(map.get("rust"), Some(&1.0));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_sort_desc_is_stable_on_ties() {
        let mut map: KeywordMap<i64> = KeywordMap::new();
        map.insert("a", 1);
        map.insert("b", 3);
        map.insert("c", 1);
        map.insert("d", 3);
        map.sort_by_value_desc();
        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_serializes_as_ordered_object() {
        let mut map = KeywordScores::new();
        map.insert("zeta", 0.5);
        map.insert("alpha", 1.5);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"zeta":0.5,"alpha":1.5}"#);
    }

    #[test]
    fn test_total_and_add() {
        let mut map = KeywordScores::new();
        map.add("rust", 1.0);
        map.add("rust", 0.5);
        map.add("go", 2.0);
        assert!((map.total() - 3.5).abs() < 1e-9);
    }
}
