use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Recipe {
    Table,
    Id,
    OwnerId,
    Title,
    Description,
    Ingredients,
    Instructions,
    CookingTime,
    Difficulty,
    Category,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum MealPlan {
    Table,
    Id,
    OwnerId,
    WeekStart,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone)]
pub enum MealPlanSlot {
    Table,
    PlanId,
    Day,
    MealType,
    RecipeId,
}
