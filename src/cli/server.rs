use anyhow::Result;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use mealgrid::AppState;

pub async fn serve(
    config: mealgrid::Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting mealgrid server...");

    let host = host_override.unwrap_or(config.server.host.to_owned());
    let port = port_override.unwrap_or(config.server.port);

    // Write pool first: it creates the database file the read pool opens.
    let write_pool = mealgrid::create_write_pool(&config.database.url).await?;
    let read_pool =
        mealgrid::create_read_pool(&config.database.url, config.database.max_connections).await?;

    let shared = mealgrid_shared::State {
        read_db: read_pool.clone(),
        write_db: write_pool.clone(),
    };

    let state = AppState {
        week: config.week_resolver()?,
        config,
        mealplan_command: mealgrid_mealplan::Command(shared.clone()),
        mealplan_query: mealgrid_mealplan::Query(shared.clone()),
        recipe_command: mealgrid_recipe::Command(shared.clone()),
        recipe_query: mealgrid_recipe::Query(shared),
        pool: read_pool.clone(),
    };

    let app = mealgrid::router(state)
        .layer(CompressionLayer::new().br(true).gzip(true))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Closing database pools...");
    read_pool.close().await;
    write_pool.close().await;

    tracing::info!("Graceful shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Starting graceful shutdown...");
}
