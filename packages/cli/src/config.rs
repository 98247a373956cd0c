use lander_assets::IngestOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "lander.config.json";

/// Lander configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Page file used when a command is not given one
    #[serde(default = "default_page")]
    pub page: String,

    /// Where exports are written
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    #[serde(default)]
    pub server: ServerConfig,

    /// Upload limits and image processing
    #[serde(default)]
    pub assets: IngestOptions,

    #[serde(default)]
    pub render: RenderConfig,
}

fn default_page() -> String {
    "page.json".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderConfig {
    /// Indent generated HTML
    pub pretty: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Page file to use, preferring an explicit argument
    pub fn page_path(&self, cwd: &str, explicit: Option<&str>) -> PathBuf {
        PathBuf::from(cwd).join(explicit.unwrap_or(&self.page))
    }

    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page: default_page(),
            out_dir: default_out_dir(),
            server: ServerConfig::default(),
            assets: IngestOptions::default(),
            render: RenderConfig::default(),
        }
    }
}
