// Team containers.

use super::player::Player;

/// A named team and the players assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub name: String,
    pub players: Vec<Player>,
}

impl Team {
    /// An empty team ready to receive players.
    pub fn new(name: impl Into<String>) -> Self {
        Team {
            name: name.into(),
            players: Vec::new(),
        }
    }

    pub fn experienced_count(&self) -> usize {
        self.players.iter().filter(|p| p.experience).count()
    }

    pub fn inexperienced_count(&self) -> usize {
        self.players.len() - self.experienced_count()
    }
}

/// One empty team per name, in the given order.
pub fn build_teams<S: AsRef<str>>(names: &[S]) -> Vec<Team> {
    names.iter().map(|n| Team::new(n.as_ref())).collect()
}
