// Configuration loading and parsing (config/league.toml).

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::roster::balance::LeftoverPolicy;

/// Width used for wrapping when none is configured and the terminal
/// cannot report its size.
pub const DEFAULT_FALLBACK_WIDTH: usize = 100;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub roster: RosterConfig,
    pub display: DisplayConfig,
    /// Directory the roster path is resolved against (`<base>/config`).
    pub config_dir: PathBuf,
}

impl Config {
    /// Absolute (or base-relative) path of the roster file.
    pub fn roster_path(&self) -> PathBuf {
        self.config_dir.join(&self.roster.path)
    }
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire league.toml file.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueConfig,
    roster: RosterConfig,
    #[serde(default)]
    display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    /// Shown as the welcome banner.
    pub name: String,
    /// Team names in menu order.
    pub teams: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    /// Roster file, relative to the config directory. `.csv` or `.toml`.
    pub path: String,
    #[serde(default)]
    pub leftover_policy: LeftoverPolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_fallback_width")]
    pub fallback_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            fallback_width: DEFAULT_FALLBACK_WIDTH,
        }
    }
}

fn default_fallback_width() -> usize {
    DEFAULT_FALLBACK_WIDTH
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/league.toml` relative to
/// the given `base_dir`.
///
/// This does not copy defaults; `load_config()` handles that.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    let league_path = config_dir.join("league.toml");
    let league_text = read_file(&league_path)?;
    let league_file: LeagueFile =
        toml::from_str(&league_text).map_err(|e| ConfigError::ParseError {
            path: league_path.clone(),
            source: e,
        })?;

    let config = Config {
        league: league_file.league,
        roster: league_file.roster,
        display: league_file.display,
        config_dir,
    };

    validate(&config)?;

    Ok(config)
}

/// Seed `config/` with every shipped file from `defaults/` that it lacks.
///
/// This covers the league file and the roster. `*.example` files are
/// reference samples and stay in `defaults/`. A file already present in
/// `config/` is never replaced, so an edited roster survives upgrades.
/// Returns the seeded paths in name order.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    match (defaults_dir.is_dir(), config_dir.is_dir()) {
        (true, _) => {}
        (false, true) => return Ok(Vec::new()),
        (false, false) => {
            return Err(seed_error(format!(
                "{} has no defaults/ or config/ directory; start hoopstats from the league directory",
                base_dir.display()
            )));
        }
    }

    std::fs::create_dir_all(&config_dir)
        .map_err(|e| seed_error(format!("cannot create {}: {e}", config_dir.display())))?;

    let listing = std::fs::read_dir(&defaults_dir)
        .map_err(|e| seed_error(format!("cannot list {}: {e}", defaults_dir.display())))?;
    let mut shipped = Vec::new();
    for entry in listing {
        let path = entry
            .map_err(|e| seed_error(format!("cannot list {}: {e}", defaults_dir.display())))?
            .path();
        if path.is_file() && !is_sample(&path) {
            shipped.push(path);
        }
    }
    shipped.sort();

    let mut seeded = Vec::new();
    for source in shipped {
        let Some(name) = source.file_name() else {
            continue;
        };
        let target = config_dir.join(name);
        if seed_file(&source, &target)? {
            seeded.push(target);
        }
    }
    Ok(seeded)
}

fn is_sample(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "example")
}

/// Copy `source` to `target` unless `target` exists. Returns whether a copy was made.
fn seed_file(source: &Path, target: &Path) -> Result<bool, ConfigError> {
    let mut dest = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(seed_error(format!("cannot create {}: {e}", target.display()))),
    };
    let mut src = std::fs::File::open(source)
        .map_err(|e| seed_error(format!("cannot open {}: {e}", source.display())))?;
    std::io::copy(&mut src, &mut dest)
        .map_err(|e| seed_error(format!("cannot fill {}: {e}", target.display())))?;
    Ok(true)
}

fn seed_error(message: String) -> ConfigError {
    ConfigError::DefaultsCopyError { message }
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    let copied = ensure_config_files(&cwd)?;
    for path in &copied {
        tracing::info!("copied default config to {}", path.display());
    }
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    let teams = &config.league.teams;
    if teams.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "league.teams".into(),
            message: "must name at least one team".into(),
        });
    }

    let mut seen = HashSet::new();
    for name in teams {
        if name.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "league.teams".into(),
                message: "team names must not be blank".into(),
            });
        }
        if !seen.insert(name.as_str()) {
            return Err(ConfigError::ValidationError {
                field: "league.teams".into(),
                message: format!("duplicate team name `{name}`"),
            });
        }
    }

    if config.roster.path.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "roster.path".into(),
            message: "must not be empty".into(),
        });
    }

    if config.display.fallback_width == 0 {
        return Err(ConfigError::ValidationError {
            field: "display.fallback_width".into(),
            message: "must be greater than 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
