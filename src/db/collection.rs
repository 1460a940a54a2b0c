//! Generic in-memory collection
//!
//! An ordered list of records plus a monotonically increasing id counter.
//! Ids are never reused, even after the record holding one is removed.

use tokio::sync::RwLock;

/// A record stored in a [`MemoryCollection`]
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> i64;
}

struct Inner<T> {
    items: Vec<T>,
    next_id: i64,
}

/// Insertion-ordered, id-keyed collection held in process memory
pub struct MemoryCollection<T> {
    inner: RwLock<Inner<T>>,
}

impl<T: Record> MemoryCollection<T> {
    /// Create an empty collection whose first id is 1
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Create an empty collection whose first id is `next_id`
    pub fn starting_at(next_id: i64) -> Self {
        Self {
            inner: RwLock::new(Inner {
                items: Vec::new(),
                next_id,
            }),
        }
    }

    /// The id the next inserted record will receive
    pub async fn next_id(&self) -> i64 {
        self.inner.read().await.next_id
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.items.is_empty()
    }

    /// All records in insertion order
    pub async fn list(&self) -> Vec<T> {
        self.inner.read().await.items.clone()
    }

    pub async fn get(&self, id: i64) -> Option<T> {
        self.inner
            .read()
            .await
            .items
            .iter()
            .find(|item| item.id() == id)
            .cloned()
    }

    pub async fn find<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.inner
            .read()
            .await
            .items
            .iter()
            .find(|item| predicate(item))
            .cloned()
    }

    /// Build a record from the next id and append it
    pub async fn insert_with<F>(&self, build: F) -> T
    where
        F: FnOnce(i64) -> T,
    {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;
        let record = build(id);
        inner.items.push(record.clone());
        record
    }

    /// Replace the stored record with the same id, keeping its position.
    ///
    /// Returns `None` when no record has that id.
    pub async fn replace(&self, record: T) -> Option<T> {
        let mut inner = self.inner.write().await;
        let slot = inner.items.iter_mut().find(|item| item.id() == record.id())?;
        *slot = record.clone();
        Some(record)
    }

    /// Remove and return the record with `id`
    pub async fn remove(&self, id: i64) -> Option<T> {
        let mut inner = self.inner.write().await;
        let index = inner.items.iter().position(|item| item.id() == id)?;
        Some(inner.items.remove(index))
    }
}

impl<T: Record> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    struct Item(i64);

    impl Record for Item {
        fn id(&self) -> i64 {
            self.0
        }
    }

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(30))]

        #[test]
        fn creating_n_records_yields_sequential_ids(start in 1i64..10_000, n in 0usize..50) {
            let ids = runtime().block_on(async {
                let items = MemoryCollection::starting_at(start);
                let mut ids = Vec::new();
                for _ in 0..n {
                    ids.push(items.insert_with(Item).await.0);
                }
                ids
            });

            let expected: Vec<i64> = (start..start + n as i64).collect();
            prop_assert_eq!(ids, expected);
        }

        #[test]
        fn deleting_unknown_id_changes_nothing(n in 1usize..20, probe in 100i64..200) {
            let (len_before, len_after) = runtime().block_on(async {
                let items = MemoryCollection::new();
                for _ in 0..n {
                    items.insert_with(Item).await;
                }
                let before = items.len().await;
                let removed = items.remove(probe).await;
                assert!(removed.is_none());
                (before, items.len().await)
            });

            prop_assert_eq!(len_before, len_after);
        }
    }
}
