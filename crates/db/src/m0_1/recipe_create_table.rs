use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::Recipe;

pub struct Operation;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Recipe::Table)
        .col(
            ColumnDef::new(Recipe::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Recipe::OwnerId)
                .string()
                .not_null()
                .string_len(64),
        )
        .col(ColumnDef::new(Recipe::Title).string().not_null())
        .col(ColumnDef::new(Recipe::Description).text().not_null())
        .col(ColumnDef::new(Recipe::Ingredients).json().not_null())
        .col(ColumnDef::new(Recipe::Instructions).json().not_null())
        .col(ColumnDef::new(Recipe::CookingTime).integer().not_null())
        .col(
            ColumnDef::new(Recipe::Difficulty)
                .string()
                .not_null()
                .string_len(15),
        )
        .col(
            ColumnDef::new(Recipe::Category)
                .string()
                .not_null()
                .string_len(15),
        )
        .col(ColumnDef::new(Recipe::CreatedAt).big_integer().not_null())
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Recipe::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for Operation {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
