//! Cross-platform config location and the config file itself.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ordmaze::render::RenderStyle;
use ordmaze_games::snake::{DEFAULT_GRID_SIZE, DEFAULT_TICK_MS};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CliError;

pub const DEFAULT_API_BASE_URL: &str = "https://tx.ordstuff.info";

#[derive(Debug, Clone)]
pub struct AppPaths {
    config_dir: PathBuf,
}

impl AppPaths {
    pub fn new() -> Result<Self, CliError> {
        let base = dirs::config_dir().ok_or(CliError::NoConfigDir)?;
        Ok(Self {
            config_dir: base.join("ordmaze"),
        })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_size: usize,
    pub render_style: RenderStyle,
    pub snake_grid: u32,
    pub snake_tick_ms: u64,
    /// Indexer the identifiers usually come from; only used to print URLs.
    pub api_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_size: 10,
            render_style: RenderStyle::Classic,
            snake_grid: DEFAULT_GRID_SIZE,
            snake_tick_ms: DEFAULT_TICK_MS,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// A missing file yields the defaults; an unreadable or malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(CliError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let cfg = serde_json::from_str(&text).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    }

    pub fn address_url(&self, address: &str) -> String {
        format!("{}/address/{}", self.api_base_url.trim_end_matches('/'), address)
    }

    pub fn inscription_url(&self, inscription_id: &str) -> String {
        format!(
            "{}/inscription/{}",
            self.api_base_url.trim_end_matches('/'),
            inscription_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ordmaze-cli-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("ordmaze-definitely-missing/config.json");
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let path = temp_file(
            "partial.json",
            r#"{"default_size": 24, "render_style": "boxed"}"#,
        );
        let cfg = Config::load(&path).unwrap();
        assert_eq!(cfg.default_size, 24);
        assert_eq!(cfg.render_style, RenderStyle::Boxed);
        assert_eq!(cfg.snake_grid, DEFAULT_GRID_SIZE);
        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = temp_file("bad.json", "{ default_size: ");
        assert!(matches!(
            Config::load(&path),
            Err(CliError::Config { .. })
        ));
    }

    #[test]
    fn urls_join_cleanly() {
        let cfg = Config {
            api_base_url: "https://example.org/".to_string(),
            ..Config::default()
        };
        assert_eq!(cfg.address_url("bc1p"), "https://example.org/address/bc1p");
        assert_eq!(
            cfg.inscription_url("abci0"),
            "https://example.org/inscription/abci0"
        );
    }
}
