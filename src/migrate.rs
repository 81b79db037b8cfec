use mealgrid::Config;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx_migrator::{Migrate, Plan};
use std::str::FromStr;

pub async fn migrate(config: &Config) -> anyhow::Result<()> {
    tracing::info!(url = %config.database.url, "migrating database");

    let pool = mealgrid::create_pool(&config.database.url, 1).await?;
    let mut conn = pool.acquire().await?;
    mealgrid_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;
    drop(conn);
    pool.close().await;

    tracing::info!("database migrated");

    Ok(())
}

/// Drops the database file, then migrates a fresh one.
pub async fn reset(config: &Config) -> anyhow::Result<()> {
    let options = SqliteConnectOptions::from_str(&config.database.url)?;
    let path = options.get_filename();

    if path.exists() {
        std::fs::remove_file(path)?;
        for suffix in ["-wal", "-shm"] {
            let mut sidecar = path.as_os_str().to_owned();
            sidecar.push(suffix);
            let sidecar = std::path::PathBuf::from(sidecar);
            if sidecar.exists() {
                std::fs::remove_file(sidecar)?;
            }
        }
        tracing::info!(path = %path.display(), "dropped database");
    }

    migrate(config).await
}
