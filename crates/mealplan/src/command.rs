use std::ops::Deref;

use mealgrid_db::table;
use mealgrid_shared::{
    Error, Resource,
    mealplan::{Day, Grid, MealType},
};
use sea_query::{Expr, ExprTrait, OnConflict, Query as SeaQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::{Date, OffsetDateTime};
use ulid::Ulid;

use crate::{MealPlan, MealPlanView, Query, query};

/// One slot update as received from the caller.
///
/// `day` and `meal_type` stay raw so they are checked after the plan lookup.
/// A missing or blank `recipe_id` clears the slot.
#[derive(Clone, Debug)]
pub struct AssignSlotInput {
    pub plan_id: String,
    pub day: String,
    pub meal_type: String,
    pub recipe_id: Option<String>,
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
    fn query(&self) -> Query {
        Query(self.0.clone())
    }

    /// Returns the owner's plan for `week_start`, creating an empty one if needed.
    pub async fn get_or_create(
        &self,
        owner_id: impl Into<String>,
        week_start: Date,
    ) -> mealgrid_shared::Result<MealPlanView> {
        let owner_id = owner_id.into();

        let plan = match query::find_by_week(&self.write_db, &owner_id, week_start).await? {
            Some(plan) => plan,
            None => self.insert_or_load(owner_id, week_start).await?,
        };

        self.query().resolve(plan).await
    }

    /// Inserts an empty plan for `(owner_id, week_start)`.
    ///
    /// When a concurrent call inserted the same plan first, the unique index on
    /// `(owner_id, week_start)` rejects this insert and the stored plan is
    /// returned instead.
    async fn insert_or_load(
        &self,
        owner_id: String,
        week_start: Date,
    ) -> mealgrid_shared::Result<MealPlan> {
        let id = Ulid::new().to_string();
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let statement = SeaQuery::insert()
            .into_table(table::MealPlan::Table)
            .columns([
                table::MealPlan::Id,
                table::MealPlan::OwnerId,
                table::MealPlan::WeekStart,
                table::MealPlan::CreatedAt,
                table::MealPlan::UpdatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                owner_id.to_owned().into(),
                crate::week::to_timestamp(week_start).into(),
                now.into(),
                now.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        match sqlx::query_with(&sql, values).execute(&self.write_db).await {
            Ok(_) => {
                tracing::info!(plan_id = %id, owner_id = %owner_id, %week_start, "meal plan created");

                return Ok(MealPlan {
                    id,
                    owner_id,
                    week_start,
                    slots: Grid::default(),
                    created_at: now,
                    updated_at: now,
                });
            }
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                tracing::debug!(
                    owner_id = %owner_id,
                    %week_start,
                    "meal plan created concurrently, loading it"
                );
            }
            Err(err) => return Err(err.into()),
        }

        let Some(plan) = query::find_by_week(&self.write_db, &owner_id, week_start).await? else {
            mealgrid_shared::bail!("meal plan missing after create conflict");
        };

        Ok(plan)
    }

    /// Overwrites or clears exactly one slot.
    ///
    /// Checks run in order before any write: plan ownership, day and meal type,
    /// then recipe ownership.
    pub async fn assign(
        &self,
        owner_id: impl Into<String>,
        input: AssignSlotInput,
    ) -> mealgrid_shared::Result<MealPlanView> {
        let owner_id = owner_id.into();

        if query::find_by_id(&self.write_db, &owner_id, &input.plan_id)
            .await?
            .is_none()
        {
            return Err(Error::NotFound(Resource::MealPlan));
        }

        let Ok(day) = input.day.parse::<Day>() else {
            mealgrid_shared::invalid!("invalid day '{}'", input.day);
        };

        let Ok(meal_type) = input.meal_type.parse::<MealType>() else {
            mealgrid_shared::invalid!("invalid meal type '{}'", input.meal_type);
        };

        let recipe_id = input.recipe_id.filter(|id| !id.trim().is_empty());

        if let Some(recipe_id) = &recipe_id {
            let recipe = mealgrid_recipe::Query(self.0.clone())
                .find(&owner_id, recipe_id)
                .await?;

            if recipe.is_none() {
                return Err(Error::NotFound(Resource::Recipe));
            }
        }

        let mut tx = self.write_db.begin().await?;

        let statement = match &recipe_id {
            Some(recipe_id) => SeaQuery::insert()
                .into_table(table::MealPlanSlot::Table)
                .columns([
                    table::MealPlanSlot::PlanId,
                    table::MealPlanSlot::Day,
                    table::MealPlanSlot::MealType,
                    table::MealPlanSlot::RecipeId,
                ])
                .values_panic([
                    input.plan_id.to_owned().into(),
                    day.to_string().into(),
                    meal_type.to_string().into(),
                    recipe_id.to_owned().into(),
                ])
                .on_conflict(
                    OnConflict::columns([
                        table::MealPlanSlot::PlanId,
                        table::MealPlanSlot::Day,
                        table::MealPlanSlot::MealType,
                    ])
                    .update_column(table::MealPlanSlot::RecipeId)
                    .to_owned(),
                )
                .build_sqlx(SqliteQueryBuilder),
            None => SeaQuery::delete()
                .from_table(table::MealPlanSlot::Table)
                .and_where(Expr::col(table::MealPlanSlot::PlanId).eq(input.plan_id.as_str()))
                .and_where(Expr::col(table::MealPlanSlot::Day).eq(day.to_string()))
                .and_where(Expr::col(table::MealPlanSlot::MealType).eq(meal_type.to_string()))
                .build_sqlx(SqliteQueryBuilder),
        };

        let (sql, values) = statement;
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        let statement = SeaQuery::update()
            .table(table::MealPlan::Table)
            .values([(
                table::MealPlan::UpdatedAt,
                OffsetDateTime::now_utc().unix_timestamp().into(),
            )])
            .and_where(Expr::col(table::MealPlan::Id).eq(input.plan_id.as_str()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;

        tracing::info!(
            plan_id = %input.plan_id,
            owner_id = %owner_id,
            %day,
            %meal_type,
            recipe_id = recipe_id.as_deref().unwrap_or_default(),
            "meal plan slot updated"
        );

        let Some(plan) = query::find_by_id(&self.write_db, &owner_id, &input.plan_id).await? else {
            return Err(Error::NotFound(Resource::MealPlan));
        };

        self.query().resolve(plan).await
    }
}
