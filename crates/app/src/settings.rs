//! Handles settings for the application. Configuration is read from
//! `settings.toml` (or the file named by `POCKETBOOK_CONFIG`) and from
//! `POCKETBOOK__*` environment variables, e.g. `POCKETBOOK__SERVER__PORT=8080`.
//!
//! ```toml
//! [app]
//! level = "debug"
//!
//! [server]
//! port = 5000
//! user_id = "U1"
//! database = { sqlite = "db.sqlite" }
//! cors_origins = ["http://localhost:5000"]
//! ```
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "settings";

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

impl Default for Database {
    fn default() -> Self {
        Self::Sqlite("db.sqlite".to_string())
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    pub database: Database,
    pub user_id: String,
    pub cors_origins: Vec<String>,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 5000,
            database: Database::default(),
            user_id: engine::DEFAULT_USER_ID.to_string(),
            cors_origins: vec![
                "http://localhost:5000".to_string(),
                "http://127.0.0.1:5000".to_string(),
            ],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let path = std::env::var("POCKETBOOK_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::from_sources(&path)
    }

    fn from_sources(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("POCKETBOOK")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_uses_defaults() {
        let settings = Settings::from_sources("does/not/exist").unwrap();
        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.server.user_id, "U1");
        assert_eq!(
            settings.server.database,
            Database::Sqlite("db.sqlite".to_string())
        );
        assert_eq!(settings.server.cors_origins.len(), 2);
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let dir = std::env::temp_dir().join(format!("pocketbook-settings-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.toml");
        std::fs::write(
            &path,
            "[server]\nport = 8080\nuser_id = \"me\"\ndatabase = \"memory\"\n",
        )
        .unwrap();

        let settings = Settings::from_sources(path.to_str().unwrap()).unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.user_id, "me");
        assert_eq!(settings.server.database, Database::Memory);
        assert_eq!(settings.server.bind, "127.0.0.1");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
