// Team balancing: spreads experienced and inexperienced players across teams.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use super::player::Player;
use super::team::Team;

/// How players that cannot be split evenly across teams are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeftoverPolicy {
    /// Refuse to balance unless both experience groups divide evenly.
    #[default]
    Reject,
    /// Fill each team in experienced/inexperienced pairs up to the quota
    /// and leave whatever remains unassigned.
    Drop,
    /// Give every team its even share, then deal the remainder one player
    /// per team so sizes differ by at most one.
    RoundRobin,
}

/// Which experience group a player was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Experienced,
    Inexperienced,
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Experienced => write!(f, "experienced"),
            PlayerKind::Inexperienced => write!(f, "inexperienced"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BalanceError {
    #[error("cannot balance a roster across zero teams")]
    NoTeams,

    #[error("ran out of {kind} players while filling team `{team}`")]
    PartitionExhausted { team: String, kind: PlayerKind },

    #[error(
        "{experienced} experienced and {inexperienced} inexperienced players \
         cannot be split evenly across {teams} teams"
    )]
    UnevenRoster {
        experienced: usize,
        inexperienced: usize,
        teams: usize,
    },
}

/// Result of balancing a roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub teams: Vec<Team>,
    /// Players no team received. Only ever non-empty under [`LeftoverPolicy::Drop`].
    pub unassigned: Vec<Player>,
}

/// Distribute `players` over `teams`.
///
/// Players are split into experienced and inexperienced groups, each in
/// roster order, and are always drawn from the back of their group. A team
/// receives an experienced player followed by an inexperienced one for as
/// long as both are owed to it.
pub fn populate_teams(
    players: Vec<Player>,
    mut teams: Vec<Team>,
    policy: LeftoverPolicy,
) -> Result<Assignment, BalanceError> {
    if teams.is_empty() {
        return Err(BalanceError::NoTeams);
    }

    let total = players.len();
    let (mut experienced, mut inexperienced): (Vec<Player>, Vec<Player>) =
        players.into_iter().partition(|p| p.experience);
    let team_count = teams.len();

    match policy {
        LeftoverPolicy::Reject => {
            if experienced.len() % team_count != 0 || inexperienced.len() % team_count != 0 {
                return Err(BalanceError::UnevenRoster {
                    experienced: experienced.len(),
                    inexperienced: inexperienced.len(),
                    teams: team_count,
                });
            }
            deal_even_shares(&mut teams, &mut experienced, &mut inexperienced);
        }
        LeftoverPolicy::Drop => {
            fill_pairs_to_quota(&mut teams, &mut experienced, &mut inexperienced, total)?;
        }
        LeftoverPolicy::RoundRobin => {
            deal_even_shares(&mut teams, &mut experienced, &mut inexperienced);
            let mut cursor = 0;
            for pool in [&mut experienced, &mut inexperienced] {
                while let Some(player) = pool.pop() {
                    teams[cursor % team_count].players.push(player);
                    cursor += 1;
                }
            }
        }
    }

    let mut unassigned = experienced;
    unassigned.append(&mut inexperienced);
    if !unassigned.is_empty() {
        let names: Vec<&str> = unassigned.iter().map(|p| p.name.as_str()).collect();
        warn!(
            "{} of {} players were not assigned to any team: {}",
            unassigned.len(),
            total,
            names.join(", ")
        );
    }
    info!(
        "assigned {} players across {} teams ({:?} leftover policy)",
        total - unassigned.len(),
        team_count,
        policy
    );

    Ok(Assignment { teams, unassigned })
}

/// Pair-wise fill up to `floor(total / teams)` per team.
///
/// Each step adds two players, so a team with an odd quota ends one over it.
fn fill_pairs_to_quota(
    teams: &mut [Team],
    experienced: &mut Vec<Player>,
    inexperienced: &mut Vec<Player>,
    total: usize,
) -> Result<(), BalanceError> {
    let quota = total / teams.len();
    for team in teams.iter_mut() {
        while team.players.len() < quota {
            let e = pop_for(experienced, team, PlayerKind::Experienced)?;
            team.players.push(e);
            let i = pop_for(inexperienced, team, PlayerKind::Inexperienced)?;
            team.players.push(i);
        }
    }
    Ok(())
}

fn pop_for(pool: &mut Vec<Player>, team: &Team, kind: PlayerKind) -> Result<Player, BalanceError> {
    pool.pop().ok_or_else(|| BalanceError::PartitionExhausted {
        team: team.name.clone(),
        kind,
    })
}

/// Give each team `floor(len / teams)` players from each group, alternating
/// experienced and inexperienced while both are still owed.
fn deal_even_shares(
    teams: &mut [Team],
    experienced: &mut Vec<Player>,
    inexperienced: &mut Vec<Player>,
) {
    let experienced_share = experienced.len() / teams.len();
    let inexperienced_share = inexperienced.len() / teams.len();

    for team in teams.iter_mut() {
        let mut e = take_from_tail(experienced, experienced_share);
        let mut i = take_from_tail(inexperienced, inexperienced_share);
        loop {
            let (next_e, next_i) = (e.next(), i.next());
            if next_e.is_none() && next_i.is_none() {
                break;
            }
            team.players.extend(next_e);
            team.players.extend(next_i);
        }
    }
}

/// Remove the last `count` players, yielded in pop order.
fn take_from_tail(pool: &mut Vec<Player>, count: usize) -> impl Iterator<Item = Player> {
    let start = pool.len().saturating_sub(count);
    pool.split_off(start).into_iter().rev()
}
