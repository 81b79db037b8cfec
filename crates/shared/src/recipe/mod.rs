use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use validator::Validate;

#[derive(Validate, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Ingredient {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Free-form text such as `"2 cups"`, never parsed.
    #[validate(length(min = 1, max = 100))]
    pub quantity: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
        }
    }
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Serialize,
    Deserialize,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Serialize,
    Deserialize,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
)]
pub enum Category {
    Breakfast,
    Lunch,
    #[default]
    Dinner,
    Dessert,
    Snack,
    Vegetarian,
    Vegan,
}

/// What a meal plan slot shows about the recipe assigned to it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub id: String,
    pub title: String,
    pub cooking_time: u16,
    pub difficulty: Difficulty,
    pub category: Category,
}
