use crate::order::{compare, Comparator, OrderBy, OrderQuery, RecordShape};
use crate::Result;

/// A possibly deferred sequence of records that can be counted and sliced
/// without being fully materialized.
#[async_trait::async_trait]
pub trait RecordSource: Send + Sync {
    type Record: Send;

    async fn count(&self) -> Result<u64>;
    async fn slice(&self, offset: u64, limit: u64) -> Result<Vec<Self::Record>>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySource<T> {
    records: Vec<T>,
}

impl<T> MemorySource<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn into_inner(self) -> Vec<T> {
        self.records
    }

    pub(crate) fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.records.retain(f);
    }
}

impl<T> From<Vec<T>> for MemorySource<T> {
    fn from(records: Vec<T>) -> Self {
        Self::new(records)
    }
}

impl<T> FromIterator<T> for MemorySource<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn to_usize(n: u64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

#[async_trait::async_trait]
impl<T> RecordSource for MemorySource<T>
where
    T: Clone + Send + Sync,
{
    type Record = T;

    async fn count(&self) -> Result<u64> {
        Ok(self.records.len() as u64)
    }

    async fn slice(&self, offset: u64, limit: u64) -> Result<Vec<T>> {
        Ok(self
            .records
            .iter()
            .skip(to_usize(offset))
            .take(to_usize(limit))
            .cloned()
            .collect())
    }
}

impl<T> OrderBy for MemorySource<T>
where
    T: RecordShape<Key = Comparator<T>>,
{
    type Record = T;

    fn order_by(mut self, query: &OrderQuery<Comparator<T>>) -> Self {
        self.records.sort_by(|a, b| compare(query, a, b));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        id: i64,
        name: String,
        score: f64,
    }
    crate::impl_field_shape!(Person { Id => id, Name => name, Score => score });

    fn people() -> MemorySource<Person> {
        [(3, "c", 1.5), (1, "a", 2.5), (2, "b", 1.5)]
            .into_iter()
            .map(|(id, name, score)| Person {
                id,
                name: name.to_string(),
                score,
            })
            .collect()
    }

    fn ids(source: &MemorySource<Person>) -> Vec<i64> {
        source.records().iter().map(|p| p.id).collect()
    }

    #[tokio::test]
    async fn test_count_and_slice() {
        let source = people();
        assert_eq!(source.count().await.unwrap(), 3);
        assert_eq!(source.slice(1, 1).await.unwrap()[0].id, 1);
        assert_eq!(source.slice(2, 10).await.unwrap().len(), 1);
        assert!(source.slice(5, 10).await.unwrap().is_empty());
        assert!(source.slice(u64::MAX, u64::MAX).await.unwrap().is_empty());
    }

    #[test]
    fn test_sort_by_fields() {
        assert_eq!(ids(&people().sort(Some("name desc"))), vec![3, 2, 1]);
        assert_eq!(ids(&people().sort(Some("score desc, id"))), vec![1, 2, 3]);
        assert_eq!(ids(&people().sort(Some("score, id d"))), vec![3, 2, 1]);
    }

    #[test]
    fn test_sort_fallback_first_field() {
        assert_eq!(ids(&people().sort(None)), vec![1, 2, 3]);
        assert_eq!(ids(&people().sort(Some(""))), vec![1, 2, 3]);
        assert_eq!(ids(&people().sort(Some("height desc"))), vec![1, 2, 3]);
    }
}
