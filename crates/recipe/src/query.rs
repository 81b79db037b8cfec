use std::{collections::BTreeSet, ops::Deref};

use mealgrid_db::table;
use mealgrid_shared::recipe::{Category, Difficulty, Ingredient, RecipeSummary};
use sea_query::{
    Expr, ExprTrait, Func, LikeExpr, Order, Query as SeaQuery, SelectStatement, SqliteQueryBuilder,
};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::prelude::FromRow;

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub cooking_time: u16,
    pub difficulty: Difficulty,
    pub category: Category,
    pub created_at: i64,
}

impl Recipe {
    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id.to_owned(),
            title: self.title.to_owned(),
            cooking_time: self.cooking_time,
            difficulty: self.difficulty,
            category: self.category,
        }
    }
}

#[derive(FromRow)]
pub struct RecipeRow {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub description: String,
    pub ingredients: sqlx::types::Json<Vec<Ingredient>>,
    pub instructions: sqlx::types::Json<Vec<String>>,
    pub cooking_time: u16,
    pub difficulty: sqlx::types::Text<Difficulty>,
    pub category: sqlx::types::Text<Category>,
    pub created_at: i64,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            title: row.title,
            description: row.description,
            ingredients: row.ingredients.0,
            instructions: row.instructions.0,
            cooking_time: row.cooking_time,
            difficulty: row.difficulty.0,
            category: row.category.0,
            created_at: row.created_at,
        }
    }
}

/// Filters of [`Query::search`]. `None` matches everything.
#[derive(Default, Clone, Debug)]
pub struct SearchFilter {
    /// Case-insensitive substring of the title.
    pub text: Option<String>,
    pub category: Option<Category>,
    pub difficulty: Option<Difficulty>,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct GroupCount<T> {
    #[serde(rename = "_id")]
    pub id: T,
    pub count: i64,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStats {
    pub total_recipes: i64,
    pub category_stats: Vec<GroupCount<Category>>,
    pub difficulty_stats: Vec<GroupCount<Difficulty>>,
}

fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Read side of the recipe store. Every lookup is scoped to an owner.
#[derive(Clone)]
pub struct Query(pub mealgrid_shared::State);

impl Deref for Query {
    type Target = mealgrid_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn select_recipes(owner_id: &str) -> SelectStatement {
    SeaQuery::select()
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
        .from(table::Recipe::Table)
        .and_where(Expr::col(table::Recipe::OwnerId).eq(owner_id))
        .to_owned()
}

impl Query {
    /// Returns `None` for unknown ids and for recipes of another owner alike.
    pub async fn find(
        &self,
        owner_id: impl AsRef<str>,
        id: impl Into<String>,
    ) -> mealgrid_shared::Result<Option<Recipe>> {
        let statement = select_recipes(owner_id.as_ref())
            .and_where(Expr::col(table::Recipe::Id).eq(id.into()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?;

        Ok(row.map(Recipe::from))
    }

    /// Loads the owner's recipes among `ids`. Unknown or foreign ids are skipped.
    pub async fn find_many<I, S>(
        &self,
        owner_id: impl AsRef<str>,
        ids: I,
    ) -> mealgrid_shared::Result<Vec<Recipe>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids = ids.into_iter().map(Into::into).collect::<BTreeSet<String>>();
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let statement = select_recipes(owner_id.as_ref())
            .and_where(Expr::col(table::Recipe::Id).is_in(ids))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    /// Newest first.
    pub async fn list(&self, owner_id: impl AsRef<str>) -> mealgrid_shared::Result<Vec<Recipe>> {
        let statement = select_recipes(owner_id.as_ref())
            .order_by(table::Recipe::CreatedAt, Order::Desc)
            .order_by_expr(Expr::cust("rowid"), Order::Desc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    /// Newest first, like [`Query::list`].
    pub async fn search(
        &self,
        owner_id: impl AsRef<str>,
        filter: SearchFilter,
    ) -> mealgrid_shared::Result<Vec<Recipe>> {
        let mut statement = select_recipes(owner_id.as_ref());

        if let Some(text) = filter.text.filter(|text| !text.trim().is_empty()) {
            statement.and_where(
                Expr::col(table::Recipe::Title)
                    .like(LikeExpr::new(format!("%{}%", escape_like(text.trim()))).escape('\\')),
            );
        }
        if let Some(category) = filter.category {
            statement.and_where(Expr::col(table::Recipe::Category).eq(category.to_string()));
        }
        if let Some(difficulty) = filter.difficulty {
            statement.and_where(Expr::col(table::Recipe::Difficulty).eq(difficulty.to_string()));
        }

        let statement = statement
            .order_by(table::Recipe::CreatedAt, Order::Desc)
            .order_by_expr(Expr::cust("rowid"), Order::Desc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    /// Recipe counts of one owner, in total and per category and difficulty.
    pub async fn stats(&self, owner_id: impl AsRef<str>) -> mealgrid_shared::Result<RecipeStats> {
        let owner_id = owner_id.as_ref();

        let category_stats = self
            .count_by::<Category>(owner_id, table::Recipe::Category)
            .await?;
        let difficulty_stats = self
            .count_by::<Difficulty>(owner_id, table::Recipe::Difficulty)
            .await?;

        Ok(RecipeStats {
            total_recipes: category_stats.iter().map(|group| group.count).sum(),
            category_stats,
            difficulty_stats,
        })
    }

    async fn count_by<T>(
        &self,
        owner_id: &str,
        column: table::Recipe,
    ) -> mealgrid_shared::Result<Vec<GroupCount<T>>>
    where
        T: std::str::FromStr,
    {
        let statement = SeaQuery::select()
            .column(column.clone())
            .expr(Func::count(Expr::col(table::Recipe::Id)))
            .from(table::Recipe::Table)
            .and_where(Expr::col(table::Recipe::OwnerId).eq(owner_id))
            .group_by_col(column.clone())
            .order_by(column, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, (String, i64), _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        rows.into_iter()
            .map(|(value, count)| match value.parse::<T>() {
                Ok(id) => Ok(GroupCount { id, count }),
                Err(_) => Err(mealgrid_shared::Error::Server(format!(
                    "unknown recipe group value '{value}'"
                ))),
            })
            .collect()
    }
}
