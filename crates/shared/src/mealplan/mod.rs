use serde::{
    Deserialize, Serialize, Serializer,
    ser::{SerializeMap, SerializeStruct},
};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use time::Weekday;

#[derive(
    EnumString,
    Display,
    AsRefStr,
    VariantArray,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn weekday(self) -> Weekday {
        match self {
            Day::Monday => Weekday::Monday,
            Day::Tuesday => Weekday::Tuesday,
            Day::Wednesday => Weekday::Wednesday,
            Day::Thursday => Weekday::Thursday,
            Day::Friday => Weekday::Friday,
            Day::Saturday => Weekday::Saturday,
            Day::Sunday => Weekday::Sunday,
        }
    }
}

#[derive(
    EnumString,
    Display,
    AsRefStr,
    VariantArray,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub fn index(self) -> usize {
        self as usize
    }
}

pub const SLOT_COUNT: usize = 7 * 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillState {
    Empty,
    PartiallyFilled,
    Full,
}

/// The 7 days by 3 meals of a weekly plan.
///
/// Iteration always goes Monday to Sunday, and breakfast to dinner within a day.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T>([[Option<T>; 3]; 7]);

impl<T> Default for Grid<T> {
    fn default() -> Self {
        Self(std::array::from_fn(|_| std::array::from_fn(|_| None)))
    }
}

impl<T> Grid<T> {
    pub fn get(&self, day: Day, meal_type: MealType) -> Option<&T> {
        self.0[day.index()][meal_type.index()].as_ref()
    }

    /// Overwrites one slot and returns its previous value.
    pub fn set(&mut self, day: Day, meal_type: MealType, value: Option<T>) -> Option<T> {
        std::mem::replace(&mut self.0[day.index()][meal_type.index()], value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Day, MealType, Option<&T>)> {
        Day::VARIANTS.iter().flat_map(move |day| {
            MealType::VARIANTS
                .iter()
                .map(move |meal_type| (*day, *meal_type, self.get(*day, *meal_type)))
        })
    }

    pub fn assigned(&self) -> impl Iterator<Item = (Day, MealType, &T)> {
        self.iter()
            .filter_map(|(day, meal_type, value)| value.map(|v| (day, meal_type, v)))
    }

    pub fn filled(&self) -> usize {
        self.assigned().count()
    }

    pub fn fill_state(&self) -> FillState {
        match self.filled() {
            0 => FillState::Empty,
            SLOT_COUNT => FillState::Full,
            _ => FillState::PartiallyFilled,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(Day, MealType, &T) -> Option<U>) -> Grid<U> {
        let mut grid = Grid::default();
        for (day, meal_type, value) in self.assigned() {
            grid.set(day, meal_type, f(day, meal_type, value));
        }
        grid
    }
}

struct DayRow<'a, T>(&'a [Option<T>; 3]);

impl<T: Serialize> Serialize for DayRow<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut row = serializer.serialize_struct("DayRow", 3)?;
        row.serialize_field("breakfast", &self.0[MealType::Breakfast.index()])?;
        row.serialize_field("lunch", &self.0[MealType::Lunch.index()])?;
        row.serialize_field("dinner", &self.0[MealType::Dinner.index()])?;
        row.end()
    }
}

/// Serialized as `{"monday": {"breakfast": .., "lunch": .., "dinner": ..}, ..}`.
impl<T: Serialize> Serialize for Grid<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Day::VARIANTS.len()))?;
        for day in Day::VARIANTS {
            map.serialize_entry(day.as_ref(), &DayRow(&self.0[day.index()]))?;
        }
        map.end()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ShoppingListItem {
    pub name: String,
    pub quantity: String,
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_and_meal_type_parse_lowercase_names() {
        assert_eq!("monday".parse::<Day>().unwrap(), Day::Monday);
        assert_eq!("Sunday".parse::<Day>().unwrap(), Day::Sunday);
        assert_eq!("dinner".parse::<MealType>().unwrap(), MealType::Dinner);
        assert!("funday".parse::<Day>().is_err());
        assert!("brunch".parse::<MealType>().is_err());
    }

    #[test]
    fn iteration_order_is_days_then_meals() {
        let order = Grid::<u8>::default()
            .iter()
            .map(|(day, meal_type, _)| (day, meal_type))
            .collect::<Vec<_>>();

        assert_eq!(order.len(), SLOT_COUNT);
        assert_eq!(order[0], (Day::Monday, MealType::Breakfast));
        assert_eq!(order[1], (Day::Monday, MealType::Lunch));
        assert_eq!(order[3], (Day::Tuesday, MealType::Breakfast));
        assert_eq!(order[20], (Day::Sunday, MealType::Dinner));
    }

    #[test]
    fn set_touches_a_single_slot() {
        let mut grid = Grid::default();
        grid.set(Day::Wednesday, MealType::Lunch, Some("r1"));

        assert_eq!(grid.get(Day::Wednesday, MealType::Lunch), Some(&"r1"));
        assert_eq!(grid.filled(), 1);

        let previous = grid.set(Day::Wednesday, MealType::Lunch, None);
        assert_eq!(previous, Some("r1"));
        assert_eq!(grid, Grid::default());
    }

    #[test]
    fn fill_state_follows_assigned_count() {
        let mut grid = Grid::default();
        assert_eq!(grid.fill_state(), FillState::Empty);

        grid.set(Day::Friday, MealType::Dinner, Some(1));
        assert_eq!(grid.fill_state(), FillState::PartiallyFilled);

        for day in Day::VARIANTS {
            for meal_type in MealType::VARIANTS {
                grid.set(*day, *meal_type, Some(1));
            }
        }
        assert_eq!(grid.fill_state(), FillState::Full);
    }

    #[test]
    fn grid_serializes_as_nested_days() {
        let mut grid = Grid::default();
        grid.set(Day::Monday, MealType::Breakfast, Some("pancakes"));

        let value = serde_json::to_value(&grid).unwrap();
        assert_eq!(value["monday"]["breakfast"], "pancakes");
        assert!(value["monday"]["lunch"].is_null());
        assert!(value["sunday"]["dinner"].is_null());
        assert_eq!(value.as_object().unwrap().len(), 7);
    }
}
