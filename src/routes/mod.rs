use axum::{Router, routing::get};
use sqlx::SqlitePool;

mod health;
mod index;
mod mealplan;
mod recipe;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mealplan_command: mealgrid_mealplan::Command,
    pub mealplan_query: mealgrid_mealplan::Query,
    pub recipe_command: mealgrid_recipe::Command,
    pub recipe_query: mealgrid_recipe::Query,
    pub week: mealgrid_mealplan::WeekResolver,
    pub pool: SqlitePool,
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/", get(index::page))
        .route("/api/recipes", get(recipe::list).post(recipe::create))
        .route("/api/recipes/search", get(recipe::search))
        .route("/api/recipes/stats/summary", get(recipe::stats))
        .route(
            "/api/recipes/{id}",
            get(recipe::show)
                .put(recipe::update)
                .delete(recipe::delete),
        )
        .route("/api/mealplans/current", get(mealplan::current))
        .route(
            "/api/mealplans/{id}",
            get(mealplan::show).put(mealplan::assign),
        )
        .route(
            "/api/mealplans/{id}/shopping-list",
            get(mealplan::shopping_list),
        )
        .with_state(app_state)
}
