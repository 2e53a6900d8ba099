use crate::{error::Error, utils::any::Any};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub api_url: String,
}

impl Config {
    pub const DEFAULT_API_URL: &'static str = "http://localhost:8000";
    const DEFAULT_FILEPATH: &'static str = "config.json";

    // NOTE: the configuration resource is optional; read it at most once and fall back to the default address on any
    // failure (missing file, unreadable file, malformed document)
    pub async fn load(filepath: Option<&Path>) -> Self {
        let filepath = filepath.unwrap_or_else(|| Path::new(Self::DEFAULT_FILEPATH));

        Self::read(filepath).await.warn().unwrap_or_default()
    }

    async fn read(filepath: &Path) -> Result<Self, Error> {
        tokio::fs::read_to_string(filepath)
            .await?
            .deserialize_from_json::<Self>()?
            .ok()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.into(),
        }
    }
}
