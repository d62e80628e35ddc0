// Roster file loading.
//
// Two formats are accepted: a CSV file with the text columns
// `name,guardians,experience,height`, and a TOML file with `[[player]]`
// tables whose `guardians` may be either joined text or a list.

use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::info;

use super::player::{GuardianField, RawPlayer};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum RosterSourceError {
    #[error("failed to read roster file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("TOML error in {path}: {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },

    #[error("unsupported roster format for {path}; expected a .csv or .toml file")]
    UnsupportedFormat { path: String },

    #[error("roster file {path} contains no players")]
    Empty { path: String },
}

// ---------------------------------------------------------------------------
// Raw serde structs (private)
// ---------------------------------------------------------------------------

/// CSV row. Guardians are always the joined text form here. Only the name
/// is trimmed; experience and height reach the normalizer as written.
#[derive(Debug, Deserialize)]
struct CsvPlayerRow {
    name: String,
    guardians: String,
    experience: String,
    height: String,
}

impl From<CsvPlayerRow> for RawPlayer {
    fn from(row: CsvPlayerRow) -> Self {
        RawPlayer {
            name: row.name.trim().to_string(),
            guardians: GuardianField::Joined(row.guardians),
            experience: row.experience,
            height: row.height,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TomlRoster {
    #[serde(default)]
    player: Vec<RawPlayer>,
}

// ---------------------------------------------------------------------------
// Reader-based loaders (private, enable testing without temp files)
// ---------------------------------------------------------------------------

fn load_csv_from_reader<R: Read>(rdr: R) -> Result<Vec<RawPlayer>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(rdr);
    reader
        .deserialize::<CsvPlayerRow>()
        .map(|row| row.map(RawPlayer::from))
        .collect()
}

fn load_toml_from_str(text: &str) -> Result<Vec<RawPlayer>, toml::de::Error> {
    let roster: TomlRoster = toml::from_str(text)?;
    Ok(roster.player)
}

// ---------------------------------------------------------------------------
// Public path-based loader
// ---------------------------------------------------------------------------

/// Load raw roster rows from a `.csv` or `.toml` file.
pub fn load_raw_players(path: &Path) -> Result<Vec<RawPlayer>, RosterSourceError> {
    let shown = path.display().to_string();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let players = match extension.as_deref() {
        Some("csv") => {
            let file = std::fs::File::open(path).map_err(|e| RosterSourceError::Io {
                path: shown.clone(),
                source: e,
            })?;
            load_csv_from_reader(file).map_err(|e| RosterSourceError::Csv {
                path: shown.clone(),
                source: e,
            })?
        }
        Some("toml") => {
            let text = std::fs::read_to_string(path).map_err(|e| RosterSourceError::Io {
                path: shown.clone(),
                source: e,
            })?;
            load_toml_from_str(&text).map_err(|e| RosterSourceError::Toml {
                path: shown.clone(),
                source: e,
            })?
        }
        _ => return Err(RosterSourceError::UnsupportedFormat { path: shown }),
    };

    if players.is_empty() {
        return Err(RosterSourceError::Empty { path: shown });
    }

    info!("loaded {} players from {}", players.len(), shown);
    Ok(players)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
