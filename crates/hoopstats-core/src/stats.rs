// Per-team statistics and their text report.

use std::fmt::Write as _;

use thiserror::Error;

use crate::roster::team::Team;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    #[error("team `{team}` has no players; average height is undefined")]
    EmptyTeam { team: String },
}

/// Aggregates for one team, in report order.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamStats {
    pub team_name: String,
    pub total_players: usize,
    pub player_names: Vec<String>,
    /// Every guardian of every player, in player order. Duplicates are kept.
    pub guardian_names: Vec<String>,
    pub experienced: usize,
    pub inexperienced: usize,
    /// Mean height in inches.
    pub average_height: f64,
}

impl TeamStats {
    pub fn from_team(team: &Team) -> Result<Self, StatsError> {
        let players = &team.players;
        if players.is_empty() {
            return Err(StatsError::EmptyTeam {
                team: team.name.clone(),
            });
        }

        let total_height: u64 = players.iter().map(|p| u64::from(p.height)).sum();

        Ok(TeamStats {
            team_name: team.name.clone(),
            total_players: players.len(),
            player_names: players.iter().map(|p| p.name.clone()).collect(),
            guardian_names: players
                .iter()
                .flat_map(|p| p.guardians.iter().cloned())
                .collect(),
            experienced: team.experienced_count(),
            inexperienced: team.inexperienced_count(),
            average_height: total_height as f64 / players.len() as f64,
        })
    }

    /// Format the report, wrapping the name lists to `width` columns.
    pub fn render(&self, width: usize) -> String {
        let header = format!("Team Statistics for {}:", self.team_name);
        let mut out = String::new();

        // Writing to a String cannot fail.
        let _ = writeln!(out, "\n{header}");
        let _ = writeln!(out, "{}", "-".repeat(header.chars().count()));
        let _ = writeln!(out, "\nTotal Players: {}", self.total_players);
        let _ = writeln!(out, "\nPlayer Names:\n");
        let _ = writeln!(out, "{}", wrap_list(&self.player_names, width));
        let _ = writeln!(out, "\nGuardian Names:\n");
        let _ = writeln!(out, "{}", wrap_list(&self.guardian_names, width));
        let _ = writeln!(
            out,
            "\nNumber of experienced players on team: {}",
            self.experienced
        );
        let _ = writeln!(
            out,
            "Number of inexperienced players on team: {}",
            self.inexperienced
        );
        let _ = writeln!(
            out,
            "Average height of player on team: {:.1} inches",
            self.average_height
        );
        out
    }
}

/// Join with ", " and wrap at word boundaries.
fn wrap_list(items: &[String], width: usize) -> String {
    let joined = items.join(", ");
    let options =
        textwrap::Options::new(width.max(1)).wrap_algorithm(textwrap::WrapAlgorithm::FirstFit);
    textwrap::wrap(&joined, options).join("\n")
}
