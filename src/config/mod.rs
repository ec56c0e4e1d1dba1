use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Listen address settings.
///
/// Sources, later ones winning: built-in defaults, an optional
/// `config/default` file, then the `HOST` and `PORT` environment
/// variables (also picked up from a `.env` file by `main`).
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 5174)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(Environment::default().try_parsing(true))
            .build()?
            .try_deserialize()
    }
}
