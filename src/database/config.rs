use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    /// Echo every SQL statement through sqlx's logger
    #[serde(default)]
    pub sqlx_logging: bool,
}

fn default_database_url() -> String {
    "sqlite://./well_data.db?mode=rwc".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            sqlx_logging: false,
        }
    }
}
