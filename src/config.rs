use crate::stories::Credentials;
use anyhow::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf, time::Duration};

pub const DEFAULT_BASE_URL: &str = "https://hack-or-snooze-v3.herokuapp.com";
const TOKEN_ENV: &str = "STORY_CLI_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub token: Option<String>,
    pub page_limit: Option<usize>,
    pub open_command: Option<String>,
    pub header: Option<String>,
    pub log_level: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub base_url: String,
    pub credentials: Option<Credentials>,
    pub page_limit: usize,
    pub open_command: Option<String>,
    pub header: Option<String>,
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl RuntimeConfig {
    /// Merge a parsed file with overrides. Credentials need both parts.
    pub fn resolve(parsed: AppConfig, token_override: Option<String>) -> Result<Self> {
        let log_level = match parsed.log_level.as_deref() {
            Some(s) => s
                .parse::<LevelFilter>()
                .with_context(|| format!("invalid log_level: {}", s))?,
            None => LevelFilter::Info,
        };
        let token = token_override.or(parsed.token).filter(|t| !t.is_empty());
        let credentials = match (parsed.username, token) {
            (Some(username), Some(token)) if !username.is_empty() => {
                Some(Credentials { username, token })
            }
            _ => None,
        };
        Ok(RuntimeConfig {
            base_url: parsed.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            credentials,
            page_limit: parsed.page_limit.unwrap_or(25).max(1),
            open_command: parsed.open_command,
            header: parsed.header,
            log_level,
            log_file: config_dir().map(|d| d.join("story-cli.log")),
            connect_timeout: Duration::from_secs(parsed.connect_timeout_secs.unwrap_or(5)),
            request_timeout: Duration::from_secs(parsed.request_timeout_secs.unwrap_or(20)),
        })
    }
}

pub fn load(config_override: Option<String>, base_url_override: Option<String>) -> Result<RuntimeConfig> {
    let path = match config_override {
        Some(p) => {
            let p = PathBuf::from(p);
            if !p.is_file() {
                anyhow::bail!("config file not found: {}", p.display());
            }
            Some(p)
        }
        None => config_dir().map(|d| d.join("config.toml")).filter(|p| p.is_file()),
    };

    let parsed = match path {
        Some(p) => {
            let txt = fs::read_to_string(&p)
                .with_context(|| format!("failed to read config: {}", p.display()))?;
            toml::from_str::<AppConfig>(&txt)
                .with_context(|| format!("failed to parse toml: {}", p.display()))?
        }
        None => AppConfig::default(),
    };

    let mut cfg = RuntimeConfig::resolve(parsed, env::var(TOKEN_ENV).ok())?;
    if let Some(url) = base_url_override {
        cfg.base_url = url;
    }
    Ok(cfg)
}

fn config_dir() -> Option<PathBuf> {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg).join("story-cli"));
    }
    if let Ok(home) = env::var("HOME") {
        return Some(PathBuf::from(home).join(".config").join("story-cli"));
    }
    None
}
