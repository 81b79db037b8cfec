pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod observability;
pub mod routes;

pub use config::Config;
pub use db::{create_pool, create_read_pool, create_write_pool};
pub use routes::{AppState, router};

/// Builds the application state over a single pool.
///
/// The server splits reads and writes across two pools; CLI commands and
/// tests share one.
pub fn app_state(config: Config, pool: sqlx::SqlitePool) -> anyhow::Result<AppState> {
    let state = mealgrid_shared::State {
        read_db: pool.clone(),
        write_db: pool.clone(),
    };

    Ok(AppState {
        week: config.week_resolver()?,
        config,
        mealplan_command: mealgrid_mealplan::Command(state.clone()),
        mealplan_query: mealgrid_mealplan::Query(state.clone()),
        recipe_command: mealgrid_recipe::Command(state.clone()),
        recipe_query: mealgrid_recipe::Query(state),
        pool,
    })
}
