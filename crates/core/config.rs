use std::{env, path::Path};

use bookroot::{GoogleBooks, API_KEY_VAR};
use eyre::{eyre, Context, Result};
use log::trace;

/// Settings read from the environment, with a `.env` file in the working directory as a
/// fallback for anything the process environment does not set.
#[derive(Debug, Default)]
pub struct Config {
    google_api_key: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::from_env_file(Path::new(".env"))?;

        if let Ok(key) = env::var(API_KEY_VAR) {
            trace!("{API_KEY_VAR} found in the process environment");
            config.google_api_key = Some(key);
        }

        Ok(config)
    }

    fn from_env_file(path: &Path) -> Result<Self> {
        let mut config = Self::default();

        if !path.is_file() {
            trace!("No {} file found - skipping", path.display());
            return Ok(config);
        }

        let iter = dotenvy::from_path_iter(path)
            .wrap_err_with(|| format!("Cannot read the '{}' file", path.display()))?;

        for item in iter {
            let (key, value) =
                item.wrap_err_with(|| format!("Invalid line in the '{}' file", path.display()))?;
            if key == API_KEY_VAR {
                trace!("{API_KEY_VAR} found in {}", path.display());
                config.google_api_key = Some(value);
            }
        }

        Ok(config)
    }

    pub fn google_books(&self) -> Result<GoogleBooks> {
        let key = self.google_api_key.as_deref().ok_or_else(|| {
            eyre!("API key not found! Make sure {API_KEY_VAR} is set or is in your .env file")
        })?;

        GoogleBooks::new(key).wrap_err("Cannot create the Google Books client")
    }
}
