use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    pub bind: Option<String>,
    pub api_tokens: Option<Vec<String>>,
    pub log_config: Option<PathBuf>,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        self.bind.clone().unwrap_or_else(|| DEFAULT_BIND.to_string())
    }

    pub fn tokens(&self) -> Vec<String> {
        self.api_tokens.clone().unwrap_or_default()
    }
}

/// Load configuration with precedence: CLI > env > config files > defaults.
/// File candidates, in order: the explicit path, `$ROLLBOOK_CONFIG`, and
/// `./rollbook.toml`. Earlier sources win field by field.
pub fn load_config(cli_cfg: Option<PathBuf>) -> ServerConfig {
    let mut cfg = ServerConfig::default();

    let mut paths: Vec<PathBuf> = vec![];
    if let Some(p) = &cli_cfg {
        paths.push(p.clone());
    }
    if let Ok(p) = std::env::var("ROLLBOOK_CONFIG") {
        paths.push(PathBuf::from(p));
    }
    if let Ok(cur) = std::env::current_dir() {
        paths.push(cur.join("rollbook.toml"));
    }
    for p in paths {
        if p.exists() {
            if let Ok(s) = std::fs::read_to_string(&p) {
                if let Ok(file_cfg) = toml::from_str::<ServerConfig>(&s) {
                    if cfg.bind.is_none() {
                        cfg.bind = file_cfg.bind;
                    }
                    if cfg.api_tokens.is_none() {
                        cfg.api_tokens = file_cfg.api_tokens;
                    }
                    if cfg.log_config.is_none() {
                        cfg.log_config = file_cfg.log_config;
                    }
                }
            }
        }
    }

    if cfg.bind.is_none() {
        if let Ok(s) = std::env::var("ROLLBOOK_BIND") {
            cfg.bind = Some(s);
        }
    }
    if cfg.api_tokens.is_none() {
        if let Ok(s) = std::env::var("ROLLBOOK_API_TOKEN") {
            cfg.api_tokens = Some(vec![s]);
        }
    }
    if cfg.log_config.is_none() {
        if let Ok(s) = std::env::var("ROLLBOOK_LOG_CONFIG") {
            cfg.log_config = Some(PathBuf::from(s));
        }
    }
    cfg
}
