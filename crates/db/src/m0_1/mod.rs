mod mealplan_create_owner_week_idx;
mod mealplan_create_table;
mod mealplan_slot_create_table;
mod recipe_create_owner_idx;
mod recipe_create_table;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "mealgrid",
    "m0_1",
    vec_box![],
    vec_box![
        recipe_create_table::Operation,
        recipe_create_owner_idx::Operation,
        mealplan_create_table::Operation,
        mealplan_create_owner_week_idx::Operation,
        mealplan_slot_create_table::Operation
    ]
);
