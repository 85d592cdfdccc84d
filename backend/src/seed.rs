use chrono::{NaiveDate, TimeDelta};
use sea_orm::{
    ActiveValue::Set, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, TransactionTrait,
};

use pagekit_core::model::person;

const COUNTRIES: [&str; 3] = ["Egypt", "Saudi", "UAE"];
const CHUNK: usize = 500;

/// Append `count` sample people, numbered after the ones already stored.
pub async fn people(db: &DatabaseConnection, count: u32) -> Result<u64, DbErr> {
    let existing = person::Entity::find().count(db).await?;
    let born = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap_or_default();

    let models: Vec<_> = (1..=u64::from(count))
        .map(|i| existing + i)
        .map(|n| person::ActiveModel {
            name: Set(format!("User_{}", n)),
            country: Set(COUNTRIES[(n % 3) as usize].to_string()),
            date_of_birth: Set(born + TimeDelta::days((n % 3650) as i64)),
            ..Default::default()
        })
        .collect();

    let txn = db.begin().await?;
    for chunk in models.chunks(CHUNK) {
        person::Entity::insert_many(chunk.iter().cloned())
            .exec(&txn)
            .await?;
    }
    txn.commit().await?;

    log::info!("seeded {} people ({} before)", count, existing);
    Ok(existing + u64::from(count))
}
