use crate::catalog::pagination::DEFAULT_PAGE_SIZE;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://code-box-server.onrender.com";

const BASE_URL_ENV: &str = "CODEBOX_BASE_URL";
const PAGE_SIZE_ENV: &str = "CODEBOX_PAGE_SIZE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub page_size: usize,
    /// Off unless set; a hung request then stalls only its own operation
    pub request_timeout_secs: Option<u64>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: None,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// `<config_dir>/codebox/config.toml`, then environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match config_file_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(
            std::env::var(BASE_URL_ENV).ok(),
            std::env::var(PAGE_SIZE_ENV).ok(),
        )?;
        config.validate()?;
        Ok(config)
    }

    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(
        &mut self,
        base_url: Option<String>,
        page_size: Option<String>,
    ) -> Result<()> {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(size) = page_size {
            self.page_size = size
                .trim()
                .parse()
                .with_context(|| format!("{} must be a positive integer", PAGE_SIZE_ENV))?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            bail!("page_size must be a positive integer");
        }
        if self.base_url.trim().is_empty() {
            bail!("base_url cannot be empty");
        }
        Ok(())
    }
}

pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("codebox").join("config.toml"))
}
