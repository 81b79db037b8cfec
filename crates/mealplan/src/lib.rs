mod command;
mod query;
mod shopping_list;
pub mod week;

pub use command::*;
pub use mealgrid_shared::mealplan::{Day, FillState, Grid, MealType, ShoppingListItem};
pub use query::*;
pub use shopping_list::{DEFAULT_CATEGORY, QUANTITY_SEPARATOR, aggregate};
pub use week::WeekResolver;
