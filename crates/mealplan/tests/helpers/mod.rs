#![allow(dead_code)]

use mealgrid_mealplan::AssignSlotInput;
use mealgrid_recipe::{Category, CreateInput, Difficulty, Ingredient};
use mealgrid_shared::State;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use std::{path::PathBuf, str::FromStr};

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    mealgrid_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(State {
        read_db: pool.clone(),
        write_db: pool,
    })
}

pub async fn create_recipe(
    state: &State,
    owner_id: &str,
    title: &str,
    ingredients: &[(&str, &str)],
) -> anyhow::Result<String> {
    let input = CreateInput {
        title: title.to_owned(),
        description: format!("{title} description"),
        ingredients: ingredients
            .iter()
            .map(|(name, quantity)| Ingredient::new(*name, *quantity))
            .collect(),
        instructions: vec![],
        cooking_time: 30,
        difficulty: Difficulty::Medium,
        category: Category::Dinner,
    };

    Ok(mealgrid_recipe::Command(state.clone())
        .create(input, owner_id)
        .await?)
}

pub fn slot(plan_id: &str, day: &str, meal_type: &str, recipe_id: Option<&str>) -> AssignSlotInput {
    AssignSlotInput {
        plan_id: plan_id.to_owned(),
        day: day.to_owned(),
        meal_type: meal_type.to_owned(),
        recipe_id: recipe_id.map(ToOwned::to_owned),
    }
}

pub async fn count_plans(state: &State, owner_id: &str) -> anyhow::Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM meal_plan WHERE owner_id = ?")
        .bind(owner_id)
        .fetch_one(&state.read_db)
        .await?;

    Ok(count)
}
