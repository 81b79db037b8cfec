use std::ops::Deref;

use mealgrid_db::table;
use mealgrid_shared::{
    Error, Resource,
    recipe::{Category, Difficulty, Ingredient},
};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use time::OffsetDateTime;
use ulid::Ulid;
use validator::Validate;

#[derive(Validate, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    #[validate(nested)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[validate(range(min = 1))]
    pub cooking_time: u16,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub category: Category,
}

#[derive(Clone)]
pub struct Command(pub mealgrid_shared::State);

impl Deref for Command {
    type Target = mealgrid_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Command {
    pub async fn create(
        &self,
        input: CreateInput,
        owner_id: impl Into<String>,
    ) -> mealgrid_shared::Result<String> {
        input.validate()?;

        let owner_id = owner_id.into();
        let id = Ulid::new().to_string();
        let ingredients = serde_json::to_string(&input.ingredients)?;
        let instructions = serde_json::to_string(&input.instructions)?;

        let statement = Query::insert()
            .into_table(table::Recipe::Table)
            .columns([
                table::Recipe::Id,
                table::Recipe::OwnerId,
                table::Recipe::Title,
                table::Recipe::Description,
                table::Recipe::Ingredients,
                table::Recipe::Instructions,
                table::Recipe::CookingTime,
                table::Recipe::Difficulty,
                table::Recipe::Category,
                table::Recipe::CreatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                owner_id.to_owned().into(),
                input.title.into(),
                input.description.into(),
                ingredients.into(),
                instructions.into(),
                input.cooking_time.into(),
                input.difficulty.to_string().into(),
                input.category.to_string().into(),
                OffsetDateTime::now_utc().unix_timestamp().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        tracing::info!(recipe_id = %id, owner_id = %owner_id, "recipe created");

        Ok(id)
    }

    /// Replaces every field of an existing recipe. `id` and `created_at` are kept.
    pub async fn update(
        &self,
        id: impl Into<String>,
        input: CreateInput,
        owner_id: impl Into<String>,
    ) -> mealgrid_shared::Result<()> {
        input.validate()?;

        let id = id.into();
        let owner_id = owner_id.into();
        let ingredients = serde_json::to_string(&input.ingredients)?;
        let instructions = serde_json::to_string(&input.instructions)?;

        let statement = Query::update()
            .table(table::Recipe::Table)
            .values([
                (table::Recipe::Title, input.title.into()),
                (table::Recipe::Description, input.description.into()),
                (table::Recipe::Ingredients, ingredients.into()),
                (table::Recipe::Instructions, instructions.into()),
                (table::Recipe::CookingTime, input.cooking_time.into()),
                (table::Recipe::Difficulty, input.difficulty.to_string().into()),
                (table::Recipe::Category, input.category.to_string().into()),
            ])
            .and_where(Expr::col(table::Recipe::Id).eq(id.as_str()))
            .and_where(Expr::col(table::Recipe::OwnerId).eq(owner_id.as_str()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(Resource::Recipe));
        }

        tracing::info!(recipe_id = %id, owner_id = %owner_id, "recipe updated");

        Ok(())
    }

    /// Removes a recipe. Meal plan slots still pointing at it read as empty.
    pub async fn delete(
        &self,
        id: impl Into<String>,
        owner_id: impl Into<String>,
    ) -> mealgrid_shared::Result<()> {
        let id = id.into();
        let owner_id = owner_id.into();

        let statement = Query::delete()
            .from_table(table::Recipe::Table)
            .and_where(Expr::col(table::Recipe::Id).eq(id.as_str()))
            .and_where(Expr::col(table::Recipe::OwnerId).eq(owner_id.as_str()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(Resource::Recipe));
        }

        tracing::info!(recipe_id = %id, owner_id = %owner_id, "recipe deleted");

        Ok(())
    }
}
