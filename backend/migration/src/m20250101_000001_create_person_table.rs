use pagekit_core::model::person;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(person::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(person::Column::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(person::Column::Name).string().not_null())
                    .col(ColumnDef::new(person::Column::Country).string().not_null())
                    .col(ColumnDef::new(person::Column::DateOfBirth).date().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_person_country")
                    .table(person::Entity)
                    .col(person::Column::Country)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        log::debug!("created table person");
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(person::Entity).to_owned())
            .await
    }
}
