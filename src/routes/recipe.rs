use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use mealgrid_recipe::{Category, CreateInput, Difficulty, Recipe, RecipeStats, SearchFilter};
use mealgrid_shared::{Error, Resource};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{auth::AuthUser, error::ApiError, routes::AppState};

/// `GET /api/recipes/search` parameters. `All` or an empty value disables a filter.
#[derive(Deserialize, Debug, Default)]
pub struct SearchParams {
    pub query: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
}

fn parse_filter<T: std::str::FromStr>(
    value: Option<String>,
    name: &str,
) -> Result<Option<T>, ApiError> {
    let Some(value) = value.filter(|value| !value.is_empty() && value != "All") else {
        return Ok(None);
    };

    match value.parse::<T>() {
        Ok(value) => Ok(Some(value)),
        Err(_) => Err(ApiError::BadRequest(format!("invalid {name} '{value}'"))),
    }
}

async fn load(state: &AppState, owner_id: &str, id: String) -> Result<Recipe, ApiError> {
    match state.recipe_query.find(owner_id, id).await? {
        Some(recipe) => Ok(recipe),
        None => Err(Error::NotFound(Resource::Recipe).into()),
    }
}

pub async fn list(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    Ok(Json(state.recipe_query.list(owner_id).await?))
}

pub async fn search(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let filter = SearchFilter {
        text: params.query,
        category: parse_filter::<Category>(params.category, "category")?,
        difficulty: parse_filter::<Difficulty>(params.difficulty, "difficulty")?,
    };

    Ok(Json(state.recipe_query.search(owner_id, filter).await?))
}

pub async fn stats(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
) -> Result<Json<RecipeStats>, ApiError> {
    Ok(Json(state.recipe_query.stats(owner_id).await?))
}

pub async fn show(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Recipe>, ApiError> {
    Ok(Json(load(&state, &owner_id, id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
    body: Result<Json<CreateInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Recipe>), ApiError> {
    let Json(input) = body?;
    let id = state.recipe_command.create(input, &owner_id).await?;

    Ok((StatusCode::CREATED, Json(load(&state, &owner_id, id).await?)))
}

pub async fn update(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
    Path(id): Path<String>,
    body: Result<Json<CreateInput>, JsonRejection>,
) -> Result<Json<Recipe>, ApiError> {
    let Json(input) = body?;
    state.recipe_command.update(&id, input, &owner_id).await?;

    Ok(Json(load(&state, &owner_id, id).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.recipe_command.delete(id, owner_id).await?;

    Ok(Json(json!({ "message": "Recipe deleted successfully" })))
}
