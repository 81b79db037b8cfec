use std::path::PathBuf;

use mealgrid_recipe::CreateInput;

/// Loads a JSON array of recipes into `user`'s collection.
///
/// Every entry is validated before the first insert, so a bad file adds nothing.
pub async fn import(config: mealgrid::Config, user: String, file: PathBuf) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&file)?;
    let inputs: Vec<CreateInput> = serde_json::from_str(&content)?;

    for (index, input) in inputs.iter().enumerate() {
        if let Err(e) = validator::Validate::validate(input) {
            anyhow::bail!("recipe #{} ({}) is invalid: {e}", index + 1, input.title);
        }
    }

    let pool = mealgrid::create_pool(&config.database.url, 1).await?;
    let command = mealgrid_recipe::Command(mealgrid_shared::State {
        read_db: pool.clone(),
        write_db: pool.clone(),
    });

    let total = inputs.len();
    for input in inputs {
        let title = input.title.to_owned();
        let id = command.create(input, &user).await?;
        println!("{id}\t{title}");
    }

    tracing::info!(user = %user, total, file = %file.display(), "recipes imported");
    pool.close().await;

    Ok(())
}

/// Prints `user`'s recipes, newest first.
pub async fn list(config: mealgrid::Config, user: String) -> anyhow::Result<()> {
    let pool = mealgrid::create_pool(&config.database.url, 1).await?;
    let query = mealgrid_recipe::Query(mealgrid_shared::State {
        read_db: pool.clone(),
        write_db: pool.clone(),
    });

    for recipe in query.list(&user).await? {
        println!(
            "{}\t{}\t{} min\t{}\t{}",
            recipe.id, recipe.title, recipe.cooking_time, recipe.difficulty, recipe.category
        );
    }

    pool.close().await;

    Ok(())
}
