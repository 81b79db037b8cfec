use std::{collections::HashMap, ops::Deref};

use mealgrid_db::table;
use mealgrid_shared::{
    Resource,
    mealplan::{Day, Grid, MealType},
    recipe::RecipeSummary,
};
use sea_query::{Expr, ExprTrait, Query as SeaQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Serialize, Serializer};
use sqlx::{SqlitePool, prelude::FromRow};
use time::Date;

/// A stored plan with its slots holding recipe ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MealPlan {
    pub id: String,
    pub owner_id: String,
    pub week_start: Date,
    pub slots: Grid<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A plan with every assigned slot resolved to its recipe summary.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanView {
    pub id: String,
    pub owner_id: String,
    #[serde(serialize_with = "serialize_date")]
    pub week_start: Date,
    pub days: Grid<RecipeSummary>,
    pub created_at: i64,
    pub updated_at: i64,
}

fn serialize_date<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(date)
}

#[derive(FromRow)]
pub struct MealPlanRow {
    pub id: String,
    pub owner_id: String,
    pub week_start: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(FromRow)]
pub struct SlotRow {
    pub day: sqlx::types::Text<Day>,
    pub meal_type: sqlx::types::Text<MealType>,
    pub recipe_id: String,
}

#[derive(Clone)]
pub struct Query(pub mealgrid_shared::State);

impl Deref for Query {
    type Target = mealgrid_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Query {
    /// Fetches a plan by id. Another owner's plan is reported as not found.
    pub async fn find(
        &self,
        owner_id: impl AsRef<str>,
        plan_id: impl AsRef<str>,
    ) -> mealgrid_shared::Result<MealPlanView> {
        let Some(plan) = find_by_id(&self.read_db, owner_id.as_ref(), plan_id.as_ref()).await?
        else {
            return Err(mealgrid_shared::Error::NotFound(Resource::MealPlan));
        };

        self.resolve(plan).await
    }

    pub async fn find_by_week(
        &self,
        owner_id: impl AsRef<str>,
        week_start: Date,
    ) -> mealgrid_shared::Result<Option<MealPlan>> {
        find_by_week(&self.read_db, owner_id.as_ref(), week_start).await
    }

    /// Replaces slot recipe ids with summaries of the owner's recipes.
    ///
    /// A slot whose recipe no longer exists resolves to an empty slot.
    pub async fn resolve(&self, plan: MealPlan) -> mealgrid_shared::Result<MealPlanView> {
        let recipes = mealgrid_recipe::Query(self.0.clone())
            .find_many(&plan.owner_id, plan.slots.assigned().map(|(_, _, id)| id.as_str()))
            .await?;
        let recipes = recipes
            .iter()
            .map(|recipe| (recipe.id.as_str(), recipe))
            .collect::<HashMap<_, _>>();

        let days = plan.slots.map(|day, meal_type, recipe_id| {
            match recipes.get(recipe_id.as_str()) {
                Some(recipe) => Some(recipe.summary()),
                None => {
                    tracing::warn!(
                        plan_id = %plan.id,
                        %day,
                        %meal_type,
                        recipe_id = %recipe_id,
                        "slot references a missing recipe"
                    );
                    None
                }
            }
        });

        Ok(MealPlanView {
            id: plan.id,
            owner_id: plan.owner_id,
            week_start: plan.week_start,
            days,
            created_at: plan.created_at,
            updated_at: plan.updated_at,
        })
    }
}

pub(crate) async fn find_by_id(
    pool: &SqlitePool,
    owner_id: &str,
    plan_id: &str,
) -> mealgrid_shared::Result<Option<MealPlan>> {
    let statement = SeaQuery::select()
        .columns([
            table::MealPlan::Id,
            table::MealPlan::OwnerId,
            table::MealPlan::WeekStart,
            table::MealPlan::CreatedAt,
            table::MealPlan::UpdatedAt,
        ])
        .from(table::MealPlan::Table)
        .and_where(Expr::col(table::MealPlan::Id).eq(plan_id))
        .and_where(Expr::col(table::MealPlan::OwnerId).eq(owner_id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let row = sqlx::query_as_with::<_, MealPlanRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?;

    load(pool, row).await
}

pub(crate) async fn find_by_week(
    pool: &SqlitePool,
    owner_id: &str,
    week_start: Date,
) -> mealgrid_shared::Result<Option<MealPlan>> {
    let statement = SeaQuery::select()
        .columns([
            table::MealPlan::Id,
            table::MealPlan::OwnerId,
            table::MealPlan::WeekStart,
            table::MealPlan::CreatedAt,
            table::MealPlan::UpdatedAt,
        ])
        .from(table::MealPlan::Table)
        .and_where(Expr::col(table::MealPlan::OwnerId).eq(owner_id))
        .and_where(Expr::col(table::MealPlan::WeekStart).eq(crate::week::to_timestamp(week_start)))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let row = sqlx::query_as_with::<_, MealPlanRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?;

    load(pool, row).await
}

async fn load(
    pool: &SqlitePool,
    row: Option<MealPlanRow>,
) -> mealgrid_shared::Result<Option<MealPlan>> {
    let Some(row) = row else {
        return Ok(None);
    };

    let statement = SeaQuery::select()
        .columns([
            table::MealPlanSlot::Day,
            table::MealPlanSlot::MealType,
            table::MealPlanSlot::RecipeId,
        ])
        .from(table::MealPlanSlot::Table)
        .and_where(Expr::col(table::MealPlanSlot::PlanId).eq(row.id.as_str()))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let slot_rows = sqlx::query_as_with::<_, SlotRow, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    let mut slots = Grid::default();
    for slot in slot_rows {
        slots.set(slot.day.0, slot.meal_type.0, Some(slot.recipe_id));
    }

    Ok(Some(MealPlan {
        id: row.id,
        owner_id: row.owner_id,
        week_start: crate::week::from_timestamp(row.week_start)?,
        slots,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
