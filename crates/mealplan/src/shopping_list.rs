use std::collections::HashMap;

use mealgrid_shared::{mealplan::ShoppingListItem, recipe::Ingredient};

use crate::Query;

/// Placeholder until ingredients carry a category of their own.
pub const DEFAULT_CATEGORY: &str = "Other";

pub const QUANTITY_SEPARATOR: &str = " + ";

fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Merges ingredient lists given in traversal order.
///
/// Names are matched case-insensitively, ignoring surrounding whitespace. The
/// first occurrence keeps its display name and later quantities are appended
/// as text. Items come out in first-occurrence order.
pub fn aggregate<'a>(lists: impl IntoIterator<Item = &'a [Ingredient]>) -> Vec<ShoppingListItem> {
    let mut items: Vec<ShoppingListItem> = vec![];
    let mut positions: HashMap<String, usize> = HashMap::new();

    for ingredient in lists.into_iter().flatten() {
        let key = normalize_key(&ingredient.name);

        match positions.get(&key) {
            Some(position) => {
                let item = &mut items[*position];
                item.quantity.push_str(QUANTITY_SEPARATOR);
                item.quantity.push_str(&ingredient.quantity);
            }
            None => {
                positions.insert(key, items.len());
                items.push(ShoppingListItem {
                    name: ingredient.name.to_owned(),
                    quantity: ingredient.quantity.to_owned(),
                    category: DEFAULT_CATEGORY.to_owned(),
                });
            }
        }
    }

    items
}

impl Query {
    /// Builds the shopping list of one plan from its current slots.
    ///
    /// A recipe used by several slots contributes once per slot. Slots whose
    /// recipe is gone are skipped.
    pub async fn shopping_list(
        &self,
        owner_id: impl AsRef<str>,
        plan_id: impl AsRef<str>,
    ) -> mealgrid_shared::Result<Vec<ShoppingListItem>> {
        let owner_id = owner_id.as_ref();
        let Some(plan) = crate::query::find_by_id(&self.read_db, owner_id, plan_id.as_ref()).await?
        else {
            return Err(mealgrid_shared::Error::NotFound(
                mealgrid_shared::Resource::MealPlan,
            ));
        };

        let recipes = mealgrid_recipe::Query(self.0.clone())
            .find_many(owner_id, plan.slots.assigned().map(|(_, _, id)| id.as_str()))
            .await?;
        let recipes = recipes
            .iter()
            .map(|recipe| (recipe.id.as_str(), recipe))
            .collect::<HashMap<_, _>>();

        let items = aggregate(
            plan.slots
                .assigned()
                .filter_map(|(_, _, id)| recipes.get(id.as_str()))
                .map(|recipe| recipe.ingredients.as_slice()),
        );

        tracing::info!(
            plan_id = %plan.id,
            owner_id = %owner_id,
            slots = plan.slots.filled(),
            items = items.len(),
            "shopping list generated"
        );

        Ok(items)
    }
}
