// Library root for the team roster and statistics engine.

pub mod config;
pub mod roster;
pub mod stats;
