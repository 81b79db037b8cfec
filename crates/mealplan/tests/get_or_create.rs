use mealgrid_mealplan::{Command, FillState, Query};
use temp_dir::TempDir;
use time::macros::date;

mod helpers;

#[tokio::test]
async fn test_get_or_create_returns_an_empty_plan() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = Command(state.clone());

    let plan = command.get_or_create("john", date!(2025 - 01 - 20)).await?;

    assert_eq!(plan.owner_id, "john");
    assert_eq!(plan.week_start, date!(2025 - 01 - 20));
    assert_eq!(plan.days.fill_state(), FillState::Empty);
    assert_eq!(helpers::count_plans(&state, "john").await?, 1);

    Ok(())
}

#[tokio::test]
async fn test_get_or_create_is_idempotent() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = Command(state.clone());

    let first = command.get_or_create("john", date!(2025 - 01 - 20)).await?;
    let second = command.get_or_create("john", date!(2025 - 01 - 20)).await?;

    assert_eq!(first.id, second.id);
    assert_eq!(helpers::count_plans(&state, "john").await?, 1);

    Ok(())
}

#[tokio::test]
async fn test_plans_are_keyed_by_owner_and_week() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = Command(state.clone());

    let john = command.get_or_create("john", date!(2025 - 01 - 20)).await?;
    let albert = command.get_or_create("albert", date!(2025 - 01 - 20)).await?;
    let next_week = command.get_or_create("john", date!(2025 - 01 - 27)).await?;

    assert_ne!(john.id, albert.id);
    assert_ne!(john.id, next_week.id);
    assert_eq!(helpers::count_plans(&state, "john").await?, 2);
    assert_eq!(helpers::count_plans(&state, "albert").await?, 1);

    Ok(())
}

#[tokio::test]
async fn test_concurrent_first_calls_create_a_single_plan() -> anyhow::Result<()> {
    // Whether any call reaches the unique-violation path depends on scheduling.
    // The conflict path itself is covered by the command unit tests.
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;

    let calls = (0..8).map(|_| {
        let command = Command(state.clone());
        async move { command.get_or_create("john", date!(2025 - 01 - 20)).await }
    });

    let plans = futures::future::join_all(calls)
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    assert_eq!(plans.len(), 8);
    assert!(plans.iter().all(|plan| plan.id == plans[0].id));
    assert_eq!(helpers::count_plans(&state, "john").await?, 1);

    Ok(())
}

#[tokio::test]
async fn test_find_is_scoped_to_owner() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = Command(state.clone());
    let query = Query(state);

    let plan = command.get_or_create("john", date!(2025 - 01 - 20)).await?;

    assert_eq!(query.find("john", &plan.id).await?.id, plan.id);

    let err = query.find("albert", &plan.id).await.unwrap_err();
    assert!(err.is_not_found(mealgrid_shared::Resource::MealPlan));

    let err = query.find("john", "unknown").await.unwrap_err();
    assert!(err.is_not_found(mealgrid_shared::Resource::MealPlan));

    assert!(
        query
            .find_by_week("john", date!(2025 - 01 - 20))
            .await?
            .is_some()
    );
    assert!(
        query
            .find_by_week("albert", date!(2025 - 01 - 20))
            .await?
            .is_none()
    );

    Ok(())
}

#[tokio::test]
async fn test_plan_serializes_with_camel_case_and_nested_days() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = Command(state);

    let plan = command.get_or_create("john", date!(2025 - 01 - 20)).await?;
    let value = serde_json::to_value(&plan)?;

    assert_eq!(value["ownerId"], "john");
    assert_eq!(value["weekStart"], "2025-01-20");
    assert!(value["days"]["monday"]["breakfast"].is_null());
    assert!(value["days"]["sunday"]["dinner"].is_null());

    Ok(())
}
