use crate::error::{AppError, Result};
use crate::models::SurfSpot;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub source: SourceConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
    pub spots: Vec<SurfSpot>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    pub api_url: String,
    pub api_key: String,
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
}

fn default_request_delay_ms() -> u64 {
    500 // politeness delay between spots
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: u64,
}

fn default_ttl_minutes() -> u64 {
    30
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_ttl_minutes(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RankingConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_top_n() -> usize {
    3
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| AppError::Config(format!("Failed to read config file: {}", e)))?;

        // Substitute environment variables
        let expanded = expand_env_vars(&content)?;

        let config: Config = serde_yaml::from_str(&expanded)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Spot lookup by id. An unknown id fails only the request that named it.
    pub fn spot(&self, id: u32) -> Result<&SurfSpot> {
        self.spots
            .iter()
            .find(|spot| spot.id == id)
            .ok_or_else(|| AppError::Config(format!("Unknown spot id: {}", id)))
    }

    /// Validate configuration values
    ///
    /// Checks for:
    /// - Unexpanded environment variables
    /// - Valid API URL (HTTPS)
    /// - Non-empty, well-formed spot list
    /// - Positive cache TTL and ranking size
    fn validate(&self) -> Result<()> {
        if self.source.api_key.is_empty() {
            return Err(AppError::Config(
                "API key cannot be empty. Set WINDY_API_KEY or put the key in the config."
                    .to_string(),
            ));
        }

        if self.source.api_key.contains("${") {
            return Err(AppError::Config(
                "WINDY_API_KEY environment variable is not set. \
                 Please set it or create a .env file. \
                 See .env.example for required variables."
                    .to_string(),
            ));
        }

        let parsed = url::Url::parse(&self.source.api_url).map_err(|e| {
            AppError::Config(format!(
                "Invalid source api_url '{}': {}",
                self.source.api_url, e
            ))
        })?;

        if parsed.scheme() != "https" {
            return Err(AppError::Config(format!(
                "Source api_url must use HTTPS, got: {}",
                parsed.scheme()
            )));
        }

        if self.spots.is_empty() {
            return Err(AppError::Config(
                "At least one surf spot must be configured".to_string(),
            ));
        }

        let mut seen_ids = HashSet::new();
        for spot in &self.spots {
            if !seen_ids.insert(spot.id) {
                return Err(AppError::Config(format!(
                    "Duplicate spot id {} ({})",
                    spot.id, spot.name
                )));
            }

            if spot.name.is_empty() {
                return Err(AppError::Config(format!(
                    "Spot {} has an empty name",
                    spot.id
                )));
            }

            if spot.calibration <= 0.0 || spot.calibration > 1.0 {
                return Err(AppError::Config(format!(
                    "Spot {} ({}) calibration {} must be in (0, 1]",
                    spot.id, spot.name, spot.calibration
                )));
            }

            if !(-90.0..=90.0).contains(&spot.lat) {
                return Err(AppError::Config(format!(
                    "Spot {} ({}) latitude {} out of range",
                    spot.id, spot.name, spot.lat
                )));
            }

            if !(-180.0..=180.0).contains(&spot.lng) {
                return Err(AppError::Config(format!(
                    "Spot {} ({}) longitude {} out of range",
                    spot.id, spot.name, spot.lng
                )));
            }
        }

        if self.cache.ttl_minutes == 0 {
            return Err(AppError::Config(
                "cache ttl_minutes must be greater than 0".to_string(),
            ));
        }

        if self.ranking.top_n == 0 {
            return Err(AppError::Config(
                "ranking top_n must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

fn expand_env_vars(content: &str) -> Result<String> {
    let mut result = content.to_string();
    let re = regex_lite::Regex::new(r"\$\{([^}]+)\}").unwrap();

    let mut missing_vars = Vec::new();

    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        match std::env::var(var_name) {
            Ok(value) => {
                result = result.replace(&cap[0], &value);
            }
            Err(_) => {
                missing_vars.push(var_name.to_string());
            }
        }
    }

    if !missing_vars.is_empty() {
        return Err(AppError::Config(format!(
            "Missing required environment variable{}: {}\n\n\
             To fix this:\n\
             1. Create a .env file in the project root (copy .env.example)\n\
             2. Set the missing variable{}: export {}=<value>\n\
             3. Or set {} in your environment before running",
            if missing_vars.len() > 1 { "s" } else { "" },
            missing_vars.join(", "),
            if missing_vars.len() > 1 { "s" } else { "" },
            missing_vars[0],
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}
