#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use mealgrid::config::{
    Config, DatabaseConfig, JwtConfig, MealPlanConfig, ObservabilityConfig, ServerConfig,
};
use mealgrid_recipe::{Category, CreateInput, Difficulty, Ingredient};
use sqlx::SqlitePool;
use sqlx_migrator::{Migrate, Plan};
use std::path::Path;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub config: Config,
}

pub fn test_config(path: &Path) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        database: DatabaseConfig {
            url: format!("sqlite:{}", path.display()),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: "test_secret_key_minimum_32_characters_long".to_string(),
            expiration_days: 7,
        },
        observability: ObservabilityConfig::default(),
        mealplan: MealPlanConfig::default(),
    }
}

pub async fn setup_test_app(path: &Path) -> anyhow::Result<TestApp> {
    let config = test_config(path);
    let pool = mealgrid::create_pool(&config.database.url, 1).await?;
    let mut conn = pool.acquire().await?;
    mealgrid_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;
    drop(conn);

    let state = mealgrid::app_state(config.clone(), pool.clone())?;

    Ok(TestApp {
        router: mealgrid::router(state),
        pool,
        config,
    })
}

impl TestApp {
    pub fn token(&self, user: &str) -> String {
        mealgrid::auth::generate_token(&self.config.jwt, user, None).expect("token")
    }

    pub async fn create_recipe(
        &self,
        user: &str,
        title: &str,
        ingredients: &[(&str, &str)],
    ) -> anyhow::Result<String> {
        let input = CreateInput {
            title: title.to_owned(),
            description: format!("{title} description"),
            ingredients: ingredients
                .iter()
                .map(|(name, quantity)| Ingredient::new(*name, *quantity))
                .collect(),
            instructions: vec![],
            cooking_time: 15,
            difficulty: Difficulty::Easy,
            category: Category::Breakfast,
        };

        Ok(mealgrid_recipe::Command(mealgrid_shared::State {
            read_db: self.pool.clone(),
            write_db: self.pool.clone(),
        })
        .create(input, user)
        .await?)
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        user: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> anyhow::Result<(StatusCode, serde_json::Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", self.token(user)));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = response.into_body().collect().await?.to_bytes();
        let value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        Ok((status, value))
    }
}
