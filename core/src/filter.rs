use sea_orm::sea_query::IntoCondition;
use sea_orm::{EntityTrait, QueryFilter};

use crate::source::MemorySource;

pub trait WhereIf<P>: Sized {
    fn filter_by(self, predicate: P) -> Self;

    /// Filter by `predicate` only when `apply` returns true.
    fn where_if<A>(self, predicate: P, apply: A) -> Self
    where
        A: FnOnce() -> bool,
    {
        if apply() {
            self.filter_by(predicate)
        } else {
            self
        }
    }
}

impl<T, P> WhereIf<P> for MemorySource<T>
where
    P: FnMut(&T) -> bool,
{
    fn filter_by(mut self, predicate: P) -> Self {
        self.retain(predicate);
        self
    }
}

impl<T> MemorySource<T> {
    /// Like [`WhereIf::where_if`], with the record's position passed to
    /// `predicate`.
    pub fn where_if_indexed<P, A>(mut self, mut predicate: P, apply: A) -> Self
    where
        P: FnMut(usize, &T) -> bool,
        A: FnOnce() -> bool,
    {
        if apply() {
            let mut index = 0;
            self.retain(|item| {
                let keep = predicate(index, item);
                index += 1;
                keep
            });
        }
        self
    }
}

impl<E, C> WhereIf<C> for sea_orm::Select<E>
where
    E: EntityTrait,
    C: IntoCondition,
{
    fn filter_by(self, condition: C) -> Self {
        self.filter(condition)
    }
}

pub struct WhereIfIter<I, P> {
    iter: I,
    predicate: Option<P>,
}

impl<I, P> Iterator for WhereIfIter<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let Some(predicate) = self.predicate.as_mut() else {
            return self.iter.next();
        };
        self.iter.by_ref().find(|item| predicate(item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.iter.size_hint();
        match self.predicate {
            Some(_) => (0, upper),
            None => (lower, upper),
        }
    }
}

pub struct WhereIfIndexedIter<I, P> {
    iter: I,
    index: usize,
    predicate: Option<P>,
}

impl<I, P> Iterator for WhereIfIndexedIter<I, P>
where
    I: Iterator,
    P: FnMut(usize, &I::Item) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let Some(predicate) = self.predicate.as_mut() else {
            return self.iter.next();
        };
        for item in self.iter.by_ref() {
            let index = self.index;
            self.index += 1;
            if predicate(index, &item) {
                return Some(item);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.iter.size_hint();
        match self.predicate {
            Some(_) => (0, upper),
            None => (lower, upper),
        }
    }
}

pub trait IteratorWhereIf: Iterator + Sized {
    /// Lazily filter by `predicate` when `apply` returns true, otherwise
    /// yield every item. `apply` runs once, here.
    fn where_if<P, A>(self, predicate: P, apply: A) -> WhereIfIter<Self, P>
    where
        P: FnMut(&Self::Item) -> bool,
        A: FnOnce() -> bool,
    {
        WhereIfIter {
            iter: self,
            predicate: apply().then_some(predicate),
        }
    }

    /// Indexed form of [`IteratorWhereIf::where_if`]; the index counts every
    /// item of the underlying iterator, matched or not.
    fn where_if_indexed<P, A>(self, predicate: P, apply: A) -> WhereIfIndexedIter<Self, P>
    where
        P: FnMut(usize, &Self::Item) -> bool,
        A: FnOnce() -> bool,
    {
        WhereIfIndexedIter {
            iter: self,
            index: 0,
            predicate: apply().then_some(predicate),
        }
    }
}

impl<I: Iterator> IteratorWhereIf for I {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::RecordSource;

    fn ids(n: i64) -> MemorySource<i64> {
        (1..=n).collect()
    }

    #[tokio::test]
    async fn test_source_where_if() {
        let even = ids(30).where_if(|id: &i64| id % 2 == 0, || true);
        assert_eq!(even.count().await.unwrap(), 15);

        let all = ids(30).where_if(|id: &i64| id % 2 == 0, || false);
        assert_eq!(all.count().await.unwrap(), 30);
    }

    #[test]
    fn test_iter_where_if() {
        let even: Vec<_> = (1..=30).where_if(|id| id % 2 == 0, || true).collect();
        assert_eq!(even.len(), 15);
        assert!(even.iter().all(|id| id % 2 == 0));

        let all: Vec<_> = (1..=30).where_if(|id| id % 2 == 0, || false).collect();
        assert_eq!(all.len(), 30);
    }

    #[test]
    fn test_source_where_if_indexed() {
        let odd_positions = ids(30).where_if_indexed(|i, _| i % 2 == 1, || true);
        assert_eq!(odd_positions.records().len(), 15);
        assert_eq!(odd_positions.records()[..3], [2, 4, 6]);

        let all = ids(30).where_if_indexed(|i, _| i % 2 == 1, || false);
        assert_eq!(all.records().len(), 30);
    }

    #[test]
    fn test_iter_where_if_indexed() {
        let head: Vec<_> = (10..40).where_if_indexed(|i, _| i < 5, || true).collect();
        assert_eq!(head, vec![10, 11, 12, 13, 14]);

        let mixed: Vec<_> = (10..20)
            .where_if_indexed(|i, n| i % 2 == 0 && n % 3 == 0, || true)
            .collect();
        assert_eq!(mixed, vec![12, 18]);

        let all: Vec<_> = (10..40).where_if_indexed(|i, _| i < 5, || false).collect();
        assert_eq!(all.len(), 30);
    }

    #[test]
    fn test_iter_where_if_lazy() {
        let mut calls = 0;
        let mut iter = (1..=10).where_if(
            |_| {
                calls += 1;
                true
            },
            || true,
        );
        assert_eq!(iter.next(), Some(1));
        drop(iter);
        assert_eq!(calls, 1);
    }
}
