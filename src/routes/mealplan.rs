use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use mealgrid_mealplan::{AssignSlotInput, MealPlanView, ShoppingListItem};
use serde::Deserialize;

use crate::{auth::AuthUser, error::ApiError, routes::AppState};

/// `PUT /api/mealplans/{id}` body. A null or absent `recipeId` clears the slot.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AssignBody {
    pub day: String,
    pub meal_type: String,
    #[serde(default)]
    pub recipe_id: Option<String>,
}

/// `GET /api/mealplans/current`: the caller's plan for the current week,
/// created empty on first access.
pub async fn current(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
) -> Result<Json<MealPlanView>, ApiError> {
    let week_start = state.week.current();
    let plan = state
        .mealplan_command
        .get_or_create(owner_id, week_start)
        .await?;

    Ok(Json(plan))
}

pub async fn show(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MealPlanView>, ApiError> {
    Ok(Json(state.mealplan_query.find(owner_id, id).await?))
}

pub async fn assign(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
    Path(id): Path<String>,
    body: Result<Json<AssignBody>, JsonRejection>,
) -> Result<Json<MealPlanView>, ApiError> {
    let Json(body) = body?;
    let plan = state
        .mealplan_command
        .assign(
            owner_id,
            AssignSlotInput {
                plan_id: id,
                day: body.day,
                meal_type: body.meal_type,
                recipe_id: body.recipe_id,
            },
        )
        .await?;

    Ok(Json(plan))
}

pub async fn shopping_list(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Vec<ShoppingListItem>>, ApiError> {
    Ok(Json(state.mealplan_query.shopping_list(owner_id, id).await?))
}
