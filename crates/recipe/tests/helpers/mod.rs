#![allow(dead_code)]

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

pub fn input(title: &str, ingredients: &[(&str, &str)]) -> CreateInput {
    CreateInput {
        title: title.to_owned(),
        description: format!("{title} description"),
        ingredients: ingredients
            .iter()
            .map(|(name, quantity)| Ingredient::new(*name, *quantity))
            .collect(),
        instructions: vec!["Cook it".to_owned()],
        cooking_time: 20,
        difficulty: Difficulty::Easy,
        category: Category::Lunch,
    }
}
