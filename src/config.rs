//! Application configuration, loaded once at startup from a YAML file.

use std::collections::HashMap;
use std::path::Path;

use rand::Rng;
use serde::Deserialize;

/// Menu, batching, network, and logging configuration for a running
/// instance of the queue service.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Every milk option a drink can specify, excluding the distinguished
    /// [`crate::domain::NO_MILK`] sentinel.
    pub milks: Vec<String>,
    /// Every milk texture option (e.g. "Dry", "Wet").
    pub textures: Vec<String>,
    /// How far back in the live queue a merge scans for a mergeable
    /// sibling, for orders with more than one drink.
    #[serde(default = "default_search_depth")]
    pub search_depth: usize,
    /// Maximum combined milk volume a single batch may hold.
    #[serde(default = "default_max_batch_volume")]
    pub max_batch_volume: f64,
    pub port: u16,
    /// Path segment appended to the ingest routes. Generated at load time
    /// if absent, so the ingest URL isn't guessable by default.
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub milk_colors: HashMap<String, String>,
    pub database_url: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_log_file")]
    pub log_file: String,
    #[serde(default = "default_rotation")]
    pub rotation: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub use_json: bool,
    #[serde(default = "default_true")]
    pub enable_tracing: bool,
}

fn default_search_depth() -> usize {
    5
}

fn default_max_batch_volume() -> f64 {
    5.0
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_log_file() -> String {
    "brewqueue.log".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: AppConfig = serde_yaml::from_str(&contents)?;
        if config.endpoint.is_none() {
            config.endpoint = Some(random_endpoint());
        }
        Ok(config)
    }

    /// The `/receive` and `/complete` routes are mounted under this path
    /// segment, e.g. `/a1b2c3d4/receive`.
    pub fn ingest_prefix(&self) -> String {
        format!("/{}", self.endpoint.as_deref().unwrap_or("receive"))
    }
}

fn random_endpoint() -> String {
    let mut rng = rand::thread_rng();
    (0..16)
        .map(|_| {
            let n: u8 = rng.gen_range(0..16);
            std::char::from_digit(n as u32, 16).unwrap()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_endpoint_is_sixteen_hex_chars() {
        let endpoint = random_endpoint();
        assert_eq!(endpoint.len(), 16);
        assert!(endpoint.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
