mod command;
mod query;

pub use command::*;
pub use mealgrid_shared::recipe::{Category, Difficulty, Ingredient, RecipeSummary};
pub use query::*;
