use sea_query::{Index, IndexCreateStatement, IndexDropStatement};

use crate::table::MealPlan;

pub struct Operation;

// One plan per owner and week. get_or_create relies on this to detect races.
fn up_statement() -> IndexCreateStatement {
    Index::create()
        .name("idx_meal_plan_owner_week")
        .table(MealPlan::Table)
        .unique()
        .col(MealPlan::OwnerId)
        .col(MealPlan::WeekStart)
        .to_owned()
}

fn down_statement() -> IndexDropStatement {
    Index::drop()
        .name("idx_meal_plan_owner_week")
        .table(MealPlan::Table)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for Operation {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = up_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = down_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
