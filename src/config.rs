use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use mealgrid_mealplan::Day;
use serde::{Deserialize, Deserializer};
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub mealplan: MealPlanConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Forces JSON logs. `ENVIRONMENT=production` turns them on as well.
    #[serde(default)]
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_days: i64,
}

/// Where the planning week begins.
///
/// `timezone` is an IANA name such as `Europe/Paris`. Weeks are computed in
/// UTC when it is unset.
#[derive(Debug, Deserialize, Clone)]
pub struct MealPlanConfig {
    #[serde(default = "default_first_day", deserialize_with = "deserialize_day")]
    pub first_day: Day,
    #[serde(default)]
    pub timezone: Option<String>,
}

impl Default for MealPlanConfig {
    fn default() -> Self {
        Self {
            first_day: default_first_day(),
            timezone: None,
        }
    }
}

fn default_first_day() -> Day {
    Day::Monday
}

/// Accepts day names in any case, as the API does.
fn deserialize_day<'de, D>(deserializer: D) -> Result<Day, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    value
        .parse::<Day>()
        .map_err(|_| serde::de::Error::custom(format!("unknown day `{value}`")))
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (MEALGRID__DATABASE__URL, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("database.url", "sqlite:mealgrid.db")?
            .set_default("database.max_connections", 5)?
            .set_default("jwt.expiration_days", 7)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MEALGRID")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(database_url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", database_url)?;
        }
        if let Ok(jwt_secret) = env::var("JWT_SECRET") {
            builder = builder.set_override("jwt.secret", jwt_secret)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.jwt.secret.len() < 32 {
            return Err("JWT secret must be at least 32 characters long".to_string());
        }
        if self.database.max_connections < 1 {
            return Err("Database max_connections must be at least 1".to_string());
        }
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        self.week_resolver().map_err(|e| e.to_string())?;
        Ok(())
    }

    pub fn week_resolver(&self) -> mealgrid_shared::Result<mealgrid_mealplan::WeekResolver> {
        mealgrid_mealplan::WeekResolver::new(
            self.mealplan.first_day,
            self.mealplan.timezone.as_deref(),
        )
    }
}
