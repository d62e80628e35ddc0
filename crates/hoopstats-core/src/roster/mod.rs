// Roster pipeline: raw rows -> normalized players -> balanced teams.

pub mod balance;
pub mod player;
pub mod source;
pub mod team;

use thiserror::Error;

use balance::{Assignment, BalanceError, LeftoverPolicy};
use player::{NormalizeError, RawPlayer};

#[derive(Debug, Error)]
pub enum RosterError {
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error(transparent)]
    Balance(#[from] BalanceError),
}

/// Normalize `raw`, build one team per name and balance the players across them.
pub fn assign_roster<S: AsRef<str>>(
    raw: &[RawPlayer],
    team_names: &[S],
    policy: LeftoverPolicy,
) -> Result<Assignment, RosterError> {
    let players = player::normalize_players(raw)?;
    let teams = team::build_teams(team_names);
    Ok(balance::populate_teams(players, teams, policy)?)
}
