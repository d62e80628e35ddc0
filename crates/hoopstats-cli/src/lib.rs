// Console front end: menu state machine and terminal helpers.

pub mod menu;
pub mod terminal;
