//! Immutable keyed table of records.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::collections::hash_map;
use std::fmt;
use std::hash::Hash;

use tracing::warn;

/// Loaded rows of one table, keyed by the table's key column.
///
/// Built once by the binder; there is no mutation API. Iteration order is
/// unspecified.
#[derive(Debug, Clone)]
pub struct TableContainer<K, R> {
    table_name: String,
    key_column: String,
    rows: HashMap<K, R>,
}

impl<K, R> TableContainer<K, R>
where
    K: Eq + Hash,
{
    pub(crate) fn new(
        table_name: impl Into<String>,
        key_column: impl Into<String>,
        rows: HashMap<K, R>,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            key_column: key_column.into(),
            rows,
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn key_column(&self) -> &str {
        &self.key_column
    }

    /// Looks up a row by key.
    ///
    /// A miss is logged as a warning; callers decide how to handle `None`.
    pub fn get<Q>(&self, key: &Q) -> Option<&R>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Display + ?Sized,
    {
        let row = self.rows.get(key);
        if row.is_none() {
            warn!(
                target: "tables::container",
                table = %self.table_name,
                key = %key,
                "No row for key"
            );
        }
        row
    }

    /// Looks up a row without logging a miss.
    pub fn try_get<Q>(&self, key: &Q) -> Option<&R>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.rows.get(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.rows.contains_key(key)
    }

    pub fn keys(&self) -> hash_map::Keys<'_, K, R> {
        self.rows.keys()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, K, R> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a, K, R> IntoIterator for &'a TableContainer<K, R> {
    type Item = (&'a K, &'a R);
    type IntoIter = hash_map::Iter<'a, K, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container() -> TableContainer<String, u32> {
        let rows = HashMap::from([("intro".to_string(), 1), ("outro".to_string(), 2)]);
        TableContainer::new("Dialogue", "dialogue_id", rows)
    }

    #[test]
    fn lookup_by_borrowed_key() {
        let table = container();
        assert_eq!(table.get("intro"), Some(&1));
        assert_eq!(table.get("missing"), None);
        assert!(table.contains_key("outro"));
        assert_eq!(table.try_get("outro"), Some(&2));
    }

    #[test]
    fn exposes_identity_and_keys() {
        let table = container();
        assert_eq!(table.table_name(), "Dialogue");
        assert_eq!(table.key_column(), "dialogue_id");
        assert_eq!(table.len(), 2);

        let mut keys: Vec<_> = table.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["intro", "outro"]);
    }
}
