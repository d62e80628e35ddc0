// Player records: the raw roster rows and their normalized form.

use serde::Deserialize;
use thiserror::Error;

/// Separator between guardian names in the free-text roster format.
pub const GUARDIAN_SEPARATOR: &str = " and ";

/// The only experience value that counts as experienced.
pub const EXPERIENCED_LABEL: &str = "YES";
pub const INEXPERIENCED_LABEL: &str = "NO";

/// Guardian field as it appears in a roster file.
///
/// CSV rosters only carry the joined text form. TOML rosters may also give
/// an explicit list, which is taken verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum GuardianField {
    List(Vec<String>),
    Joined(String),
}

impl GuardianField {
    /// Split into individual guardian names, preserving order.
    pub fn names(&self) -> Vec<String> {
        match self {
            GuardianField::List(names) => names.iter().map(|n| n.trim().to_string()).collect(),
            GuardianField::Joined(text) => text
                .split(GUARDIAN_SEPARATOR)
                .map(|n| n.trim().to_string())
                .collect(),
        }
    }
}

impl From<&str> for GuardianField {
    fn from(text: &str) -> Self {
        GuardianField::Joined(text.to_string())
    }
}

/// A roster row exactly as supplied: every field is text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawPlayer {
    pub name: String,
    pub guardians: GuardianField,
    /// "YES" or "NO".
    pub experience: String,
    /// e.g. "42 inches".
    pub height: String,
}

/// A normalized player. Built once from a [`RawPlayer`] and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub guardians: Vec<String>,
    pub experience: bool,
    /// Height in inches.
    pub height: u32,
}

impl Player {
    /// The roster text this player's experience flag came from.
    pub fn experience_label(&self) -> &'static str {
        if self.experience {
            EXPERIENCED_LABEL
        } else {
            INEXPERIENCED_LABEL
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("player `{player}` has an unreadable height `{value}`; expected \"<inches> inches\"")]
    InvalidHeight { player: String, value: String },
}

impl TryFrom<&RawPlayer> for Player {
    type Error = NormalizeError;

    fn try_from(raw: &RawPlayer) -> Result<Self, Self::Error> {
        Ok(Player {
            name: raw.name.clone(),
            guardians: raw.guardians.names(),
            experience: raw.experience == EXPERIENCED_LABEL,
            height: parse_height(&raw.name, &raw.height)?,
        })
    }
}

/// Leading whitespace-delimited token of the height text, as whole inches.
fn parse_height(player: &str, text: &str) -> Result<u32, NormalizeError> {
    text.split_whitespace()
        .next()
        .and_then(|token| token.parse().ok())
        .ok_or_else(|| NormalizeError::InvalidHeight {
            player: player.to_string(),
            value: text.to_string(),
        })
}

/// Normalize a roster, preserving length and order.
pub fn normalize_players(raw: &[RawPlayer]) -> Result<Vec<Player>, NormalizeError> {
    raw.iter().map(Player::try_from).collect()
}
