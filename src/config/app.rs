//! Main application configuration
//!
//! This module defines the primary configuration structures for the rating
//! engine, including environment variable loading, TOML files and validation.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use crate::config::rating::RatingConfig;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub paths: PathSettings,
    pub rating: RatingConfig,
    /// Scraped display name -> name used in the team identity table
    pub aliases: BTreeMap<String, String>,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Name used in log output
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Abort a run when any item fails instead of reporting it
    pub strict: bool,
}

/// Location of every table the engine reads or writes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    pub data_dir: PathBuf,
    pub teams_file: String,
    pub rankings_file: String,
    pub fixtures_file: String,
    pub team_elos_file: String,
    pub elo_changes_file: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "xg-ratings".to_string(),
            log_level: "info".to_string(),
            strict: false,
        }
    }
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            teams_file: "teams.csv".to_string(),
            rankings_file: "rankings.csv".to_string(),
            fixtures_file: "fixtures.csv".to_string(),
            team_elos_file: "team_elos.csv".to_string(),
            elo_changes_file: "elo_changes.csv".to_string(),
        }
    }
}

impl PathSettings {
    pub fn teams_path(&self) -> PathBuf {
        self.data_dir.join(&self.teams_file)
    }

    pub fn rankings_path(&self) -> PathBuf {
        self.data_dir.join(&self.rankings_file)
    }

    pub fn fixtures_path(&self) -> PathBuf {
        self.data_dir.join(&self.fixtures_file)
    }

    pub fn team_elos_path(&self) -> PathBuf {
        self.data_dir.join(&self.team_elos_file)
    }

    pub fn elo_changes_path(&self) -> PathBuf {
        self.data_dir.join(&self.elo_changes_file)
    }
}

/// Display names used by the ranking site that differ from the identity table
pub fn default_aliases() -> BTreeMap<String, String> {
    [
        ("Brighton and Hove", "Brighton"),
        ("Tottenham Hotspur", "Spurs"),
        ("Nottingham Forest", "Nott'm Forest"),
        ("West Ham United", "West Ham"),
        ("Manchester United", "Man Utd"),
        ("Manchester City", "Man City"),
        ("Leeds United", "Leeds"),
        ("Newcastle United", "Newcastle"),
        ("Wolverhampton Wanderers", "Wolves"),
    ]
    .into_iter()
    .map(|(scraped, canonical)| (scraped.to_string(), canonical.to_string()))
    .collect()
}

impl AppConfig {
    /// Defaults plus the built-in alias table
    pub fn with_default_aliases() -> Self {
        Self {
            aliases: default_aliases(),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::with_default_aliases();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config = Self::from_toml_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Parse a TOML document; aliases it lists extend the built-in table
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let mut config: AppConfig = toml::from_str(raw)?;
        let mut aliases = default_aliases();
        aliases.append(&mut config.aliases);
        config.aliases = aliases;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }
        if let Ok(strict) = env::var("STRICT") {
            self.service.strict = strict
                .parse()
                .map_err(|_| anyhow!("Invalid STRICT value: {}", strict))?;
        }

        // Paths
        if let Ok(dir) = env::var("DATA_DIR") {
            self.paths.data_dir = PathBuf::from(dir);
        }

        // Rating settings
        if let Ok(k) = env::var("K_FACTOR") {
            self.rating.k_factor = k
                .parse()
                .map_err(|_| anyhow!("Invalid K_FACTOR value: {}", k))?;
        }
        if let Ok(policy) = env::var("GAMEWEEK_POLICY") {
            self.rating.gameweek_policy = policy.parse()?;
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    // Validate file names
    let paths = &config.paths;
    for (label, name) in [
        ("teams", &paths.teams_file),
        ("rankings", &paths.rankings_file),
        ("fixtures", &paths.fixtures_file),
        ("team ratings", &paths.team_elos_file),
        ("rating changes", &paths.elo_changes_file),
    ] {
        if name.trim().is_empty() {
            return Err(anyhow!("File name for {} cannot be empty", label));
        }
    }

    config.rating.validate()?;

    Ok(())
}
