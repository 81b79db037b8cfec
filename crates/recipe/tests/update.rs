use mealgrid_recipe::{Category, Difficulty, Ingredient};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_update() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = mealgrid_recipe::Command(state.clone());
    let query = mealgrid_recipe::Query(state);

    let id = command
        .create(helpers::input("Pasta", &[("Tomato", "2 cups")]), "john")
        .await?;
    let created = query.find("john", &id).await?.expect("recipe exists");

    let mut input = helpers::input("Pasta al forno", &[("Tomato", "3 cups"), ("Cheese", "100 g")]);
    input.cooking_time = 45;
    input.difficulty = Difficulty::Hard;
    input.category = Category::Dinner;
    command.update(&id, input, "john").await?;

    let recipe = query.find("john", &id).await?.expect("recipe exists");
    assert_eq!(recipe.title, "Pasta al forno");
    assert_eq!(recipe.cooking_time, 45);
    assert_eq!(recipe.difficulty, Difficulty::Hard);
    assert_eq!(recipe.category, Category::Dinner);
    assert_eq!(
        recipe.ingredients,
        vec![
            Ingredient::new("Tomato", "3 cups"),
            Ingredient::new("Cheese", "100 g")
        ]
    );
    assert_eq!(recipe.created_at, created.created_at);

    Ok(())
}

#[tokio::test]
async fn test_update_foreign_or_unknown_recipe() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = mealgrid_recipe::Command(state.clone());
    let query = mealgrid_recipe::Query(state);

    let id = command
        .create(helpers::input("Pasta", &[("Tomato", "2 cups")]), "john")
        .await?;

    let err = command
        .update(&id, helpers::input("Stolen", &[]), "albert")
        .await
        .unwrap_err();
    assert!(err.is_not_found(mealgrid_shared::Resource::Recipe));
    assert_eq!(err.to_string(), "Recipe not found");

    let err = command
        .update("01JUNKNOWNRECIPE", helpers::input("Ghost", &[]), "john")
        .await
        .unwrap_err();
    assert!(err.is_not_found(mealgrid_shared::Resource::Recipe));

    assert_eq!(query.find("john", &id).await?.expect("recipe exists").title, "Pasta");

    Ok(())
}

#[tokio::test]
async fn test_update_with_invalid_input() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = mealgrid_recipe::Command(state.clone());
    let query = mealgrid_recipe::Query(state);

    let id = command
        .create(helpers::input("Pasta", &[("Tomato", "2 cups")]), "john")
        .await?;

    let err = command
        .update(&id, helpers::input("", &[]), "john")
        .await
        .unwrap_err();
    assert!(err.is_invalid_argument());

    assert_eq!(query.find("john", &id).await?.expect("recipe exists").title, "Pasta");

    Ok(())
}
