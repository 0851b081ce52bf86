//! Handles settings for the application.
//!
//! Values come from an optional `settings.toml` (or the file passed with
//! `--config`), overridden by `DIVVY__`-prefixed environment variables, e.g.
//! `DIVVY__SERVER__PORT=8080`.
use config::{Config, ConfigError, Environment, File};
use engine::DuplicatePolicy;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct Splits {
    pub duplicate_participants: DuplicatePolicy,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub splits: Splits,
}

impl Settings {
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.bind", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("splits.duplicate_participants", "reject")?
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("DIVVY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
