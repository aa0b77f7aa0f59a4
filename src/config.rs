use std::path::Path;

use log::{info, warn};

use serde::{Deserialize, Serialize};

pub const DEFAULT_PREDEFINED_INDEXES: [i64; 4] = [6331, 6036, 6534, 6167];

pub const ENV_SCHEME: &str = "CLIP_ARENA_SCHEME";
pub const ENV_HOST: &str = "CLIP_ARENA_HOST";
pub const ENV_API_KEY: &str = "CLIP_ARENA_API_KEY";
pub const ENV_COLLECTION: &str = "CLIP_ARENA_COLLECTION";
pub const ENV_PREDEFINED_INDEXES: &str = "CLIP_ARENA_PREDEFINED_INDEXES";
pub const ENV_LOCALE: &str = "CLIP_ARENA_LOCALE";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default = "default_scheme")]
    pub scheme: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_collection")]
    pub collection: String,
    #[serde(default = "default_predefined_indexes")]
    pub predefined_indexes: Vec<i64>,
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_scheme() -> String {
    "http".to_string()
}

fn default_host() -> String {
    "localhost:8080".to_string()
}

fn default_collection() -> String {
    "ClipArena".to_string()
}

fn default_predefined_indexes() -> Vec<i64> {
    DEFAULT_PREDEFINED_INDEXES.to_vec()
}

fn default_locale() -> String {
    "auto".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            host: default_host(),
            api_key: None,
            collection: default_collection(),
            predefined_indexes: default_predefined_indexes(),
            locale: default_locale(),
        }
    }
}

impl Config {
    /// The key the predefined image list is cached under. Changing the index
    /// list changes the key, which is the only way a cached list goes stale.
    pub fn predefined_cache_key(&self) -> String {
        predefined_cache_key(&self.predefined_indexes)
    }

    pub fn graphql_url(&self) -> String {
        format!("{}://{}/v1/graphql", self.scheme, self.host)
    }
}

pub fn predefined_cache_key(indexes: &[i64]) -> String {
    let joined: Vec<String> = indexes.iter().map(|i| i.to_string()).collect();
    format!("predefinedImages:{}", joined.join(","))
}

/// Parses a comma-separated index list. Bad entries are skipped; an empty
/// result falls back to the default sample set.
pub fn parse_index_list(s: &str) -> Vec<i64> {
    let parsed: Vec<i64> = s
        .split(',')
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .filter_map(|p| match p.parse::<i64>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("Ignoring unparsable predefined index: '{}'", p);
                None
            }
        })
        .collect();
    if parsed.is_empty() {
        default_predefined_indexes()
    } else {
        parsed
    }
}

/// Applies environment overrides on top of the file config. `lookup` is
/// `std::env::var` in production.
pub fn apply_env_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(scheme) = non_empty(ENV_SCHEME) {
        config.scheme = scheme.trim().to_string();
    }
    if let Some(host) = non_empty(ENV_HOST) {
        config.host = host.trim().to_string();
    }
    if let Some(key) = non_empty(ENV_API_KEY) {
        config.api_key = Some(key);
    }
    if let Some(collection) = non_empty(ENV_COLLECTION) {
        config.collection = collection.trim().to_string();
    }
    if let Some(list) = non_empty(ENV_PREDEFINED_INDEXES) {
        config.predefined_indexes = parse_index_list(&list);
    }
    if let Some(locale) = non_empty(ENV_LOCALE) {
        config.locale = locale.trim().to_string();
    }
    if config.predefined_indexes.is_empty() {
        config.predefined_indexes = default_predefined_indexes();
    }
    config
}

pub fn load_config(config_path: &Path) -> Config {
    if !config_path.exists() {
        info!("No config found, creating default config");
        let default = Config::default();
        if let Ok(json) = serde_json::to_string_pretty(&default) {
            let _ = std::fs::write(config_path, json);
        }
        return default;
    }
    let content = std::fs::read_to_string(config_path).unwrap_or_default();
    match serde_json::from_str::<Config>(&content) {
        Ok(c) => {
            info!("Config loaded from {:?}", config_path);
            c
        }
        Err(e) => {
            warn!("Config parse failed ({}), using defaults", e);
            Config::default()
        }
    }
}

/// File config plus environment, read once at startup.
pub fn load_effective_config(config_path: &Path) -> Config {
    apply_env_overrides(load_config(config_path), |key| std::env::var(key).ok())
}
