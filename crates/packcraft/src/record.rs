//! Insertion-ordered name to value mapping.
//!
//! Packet and bit-field schemas are order sensitive, so values supplied to
//! [crate::PacketComposer::pack] and [crate::BitPacker::pack_fields] are held
//! in a [Record] rather than a hash map. Two records are equal only when they
//! hold the same entries in the same order.

/// An ordered list of `(name, value)` entries with map-like accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<V> {
    entries: Vec<(String, V)>,
}

impl<V> Record<V> {
    pub fn new() -> Self {
        Record {
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Record {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Inserts `value` under `name`. An existing entry keeps its position and
    /// has its value replaced; a new entry is appended.
    pub fn insert(&mut self, name: impl Into<String>, value: V) -> Option<V> {
        let name = name.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Builder-style [Record::insert].
    pub fn with(mut self, name: impl Into<String>, value: V) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    pub fn remove(&mut self, name: &str) -> Option<V> {
        let index = self.entries.iter().position(|(k, _)| k == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns true if the names of this record are exactly `names`, in order.
    pub fn keys_match<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> bool {
        let mut names = names.into_iter();
        for key in self.keys() {
            if names.next() != Some(key) {
                return false;
            }
        }

        names.next().is_none()
    }
}

impl<V> Default for Record<V> {
    fn default() -> Self {
        Record::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for Record<V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

impl<K: Into<String>, V, const N: usize> From<[(K, V); N]> for Record<V> {
    fn from(value: [(K, V); N]) -> Self {
        value.into_iter().collect()
    }
}

impl<V> IntoIterator for Record<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(feature = "serde")]
impl<V: serde::Serialize> serde::Serialize for Record<V> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, V: serde::Deserialize<'de>> serde::Deserialize<'de> for Record<V> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor<V>(std::marker::PhantomData<V>);

        impl<'de, V: serde::Deserialize<'de>> serde::de::Visitor<'de> for RecordVisitor<V> {
            type Value = Record<V>;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of field names to values")
            }

            // Keeps document order; a repeated key is an error rather than a silent overwrite.
            fn visit_map<A: serde::de::MapAccess<'de>>(
                self,
                mut access: A,
            ) -> Result<Self::Value, A::Error> {
                let mut record = Record::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((k, v)) = access.next_entry::<String, V>()? {
                    if record.contains_key(&k) {
                        return Err(serde::de::Error::custom(format!("duplicate key `{k}`")));
                    }
                    record.entries.push((k, v));
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor(std::marker::PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order() {
        let record = Record::new().with("b", 1).with("a", 2).with("c", 3);
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_insert_existing_replaces_in_place() {
        let mut record = Record::from([("a", 1), ("b", 2)]);
        assert_eq!(record.insert("a", 10), Some(1));
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(record.get("a"), Some(&10));
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let ab = Record::from([("a", 1), ("b", 2)]);
        let ba = Record::from([("b", 2), ("a", 1)]);
        assert_ne!(ab, ba);
    }

    #[test]
    fn test_keys_match() {
        let record = Record::from([("a", 1), ("b", 2)]);
        assert!(record.keys_match(["a", "b"]));
        assert!(!record.keys_match(["b", "a"]));
        assert!(!record.keys_match(["a"]));
        assert!(!record.keys_match(["a", "b", "c"]));
    }

    #[test]
    fn test_remove() {
        let mut record = Record::from([("a", 1), ("b", 2), ("c", 3)]);
        assert_eq!(record.remove("b"), Some(2));
        assert_eq!(record.remove("b"), None);
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["a", "c"]);
    }
}
