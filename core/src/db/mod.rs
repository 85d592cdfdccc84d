use sea_orm::sea_query::IntoCondition;
use sea_orm::{
    DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Select,
};

use crate::filter::WhereIf;
use crate::order::{OrderBy, OrderQuery, RecordShape};
use crate::source::RecordSource;
use crate::Result;

impl<E> OrderBy for Select<E>
where
    E: EntityTrait,
    E::Model: RecordShape<Key = E::Column>,
{
    type Record = E::Model;

    fn order_by(self, query: &OrderQuery<E::Column>) -> Self {
        query.clauses().iter().fold(self, |select, clause| {
            QueryOrder::order_by(select, clause.key(), clause.direction().into())
        })
    }
}

/// Record source backed by a sea-orm query; nothing is loaded until the
/// paginator counts or slices it.
#[derive(Debug, Clone)]
pub struct SelectSource<E: EntityTrait> {
    select: Select<E>,
    db: DatabaseConnection,
}

impl<E: EntityTrait> SelectSource<E> {
    pub fn new(select: Select<E>, db: DatabaseConnection) -> Self {
        Self { select, db }
    }

    pub fn all(db: DatabaseConnection) -> Self {
        Self::new(E::find(), db)
    }

    pub fn select(&self) -> &Select<E> {
        &self.select
    }

    pub fn into_select(self) -> Select<E> {
        self.select
    }
}

#[async_trait::async_trait]
impl<E> RecordSource for SelectSource<E>
where
    E: EntityTrait,
    E::Model: Sync,
{
    type Record = E::Model;

    async fn count(&self) -> Result<u64> {
        Ok(self.select.clone().count(&self.db).await?)
    }

    async fn slice(&self, offset: u64, limit: u64) -> Result<Vec<E::Model>> {
        // sql binds offset and limit as i64
        const MAX_BIND: u64 = i64::MAX as u64;
        if offset > MAX_BIND {
            return Ok(Vec::new());
        }
        Ok(self
            .select
            .clone()
            .offset(offset)
            .limit(limit.min(MAX_BIND))
            .all(&self.db)
            .await?)
    }
}

impl<E> OrderBy for SelectSource<E>
where
    E: EntityTrait,
    E::Model: RecordShape<Key = E::Column>,
{
    type Record = E::Model;

    fn order_by(mut self, query: &OrderQuery<E::Column>) -> Self {
        self.select = OrderBy::order_by(self.select, query);
        self
    }
}

impl<E, C> WhereIf<C> for SelectSource<E>
where
    E: EntityTrait,
    C: IntoCondition,
{
    fn filter_by(mut self, condition: C) -> Self {
        self.select = self.select.filter_by(condition);
        self
    }
}
