// Interactive team menu.
//
// `MenuState::on_input` is the whole transition table; `Menu::run` only
// prints prompts, feeds lines in and carries out the returned action, so the
// state machine can be tested without a console.

use std::io::{self, BufRead, Write};

use hoopstats_core::roster::team::Team;
use hoopstats_core::stats::TeamStats;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::terminal;

/// Why a menu entry was not accepted. The messages are shown verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Choice must be a number between 1 and {max}.")]
    NotANumber { max: usize },

    #[error("{choice} is an invalid choice. Choice must between 1 and {max}.")]
    /// `choice` is the trimmed entry, so integers of any size are echoed back as typed.
    OutOfRange { choice: String, max: usize },
}

/// A valid menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Quit,
    /// Zero-based team index.
    Team(usize),
}

/// Interpret one line typed at the menu prompt.
///
/// `q` (any case) quits; otherwise the line must be a 1-based team number.
pub fn parse_selection(line: &str, team_count: usize) -> Result<Selection, SelectionError> {
    let entry = line.trim();
    if entry.eq_ignore_ascii_case("q") {
        return Ok(Selection::Quit);
    }

    if !is_integer(entry) {
        return Err(SelectionError::NotANumber { max: team_count });
    }

    match entry.parse::<usize>() {
        Ok(n) if (1..=team_count).contains(&n) => Ok(Selection::Team(n - 1)),
        _ => Err(SelectionError::OutOfRange {
            choice: entry.to_string(),
            max: team_count,
        }),
    }
}

/// An optional sign followed by at least one ASCII digit.
fn is_integer(entry: &str) -> bool {
    let digits = entry.strip_prefix(['+', '-']).unwrap_or(entry);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    AwaitingSelection,
    ShowingStats { team: usize },
    Terminated,
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    ShowStats(usize),
    Reject(SelectionError),
    /// The user acknowledged a report; redisplay the menu.
    Resume,
    Quit,
    None,
}

impl MenuState {
    pub fn on_input(self, line: &str, team_count: usize) -> (MenuState, MenuAction) {
        match self {
            MenuState::AwaitingSelection => match parse_selection(line, team_count) {
                Ok(Selection::Quit) => (MenuState::Terminated, MenuAction::Quit),
                Ok(Selection::Team(team)) => {
                    (MenuState::ShowingStats { team }, MenuAction::ShowStats(team))
                }
                Err(e) => (MenuState::AwaitingSelection, MenuAction::Reject(e)),
            },
            MenuState::ShowingStats { .. } => (MenuState::AwaitingSelection, MenuAction::Resume),
            MenuState::Terminated => (MenuState::Terminated, MenuAction::None),
        }
    }
}

/// Where the report wrap width comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthSource {
    /// Ask the terminal each time a report is shown.
    Terminal { fallback: usize },
    Fixed(usize),
}

impl WidthSource {
    fn resolve(self) -> usize {
        match self {
            WidthSource::Terminal { fallback } => terminal::display_width(fallback),
            WidthSource::Fixed(width) => width,
        }
    }
}

pub struct Menu<'a> {
    /// Welcome banner.
    pub title: &'a str,
    pub teams: &'a [Team],
    pub width: WidthSource,
}

impl Menu<'_> {
    /// Drive the menu until the user quits or input ends.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> io::Result<()> {
        writeln!(output, "{}", self.title)?;
        writeln!(output, "{}", "-".repeat(self.title.chars().count()))?;

        let mut state = MenuState::AwaitingSelection;
        loop {
            match state {
                MenuState::AwaitingSelection => {
                    self.write_menu(&mut output)?;
                    write!(output, "\nEnter an option: ")?;
                }
                MenuState::ShowingStats { .. } => write!(output, "\nPress ENTER to continue...")?,
                MenuState::Terminated => break,
            }
            output.flush()?;

            let Some(line) = read_line(&mut input)? else {
                info!("input closed; leaving menu");
                writeln!(output)?;
                break;
            };

            let (next, action) = state.on_input(&line, self.teams.len());
            debug!("menu {:?} -> {:?} ({:?})", state, next, action);
            match action {
                MenuAction::ShowStats(index) => self.show_stats(index, &mut output)?,
                MenuAction::Reject(e) => writeln!(output, "{e}")?,
                MenuAction::Resume => writeln!(output, "\n")?,
                MenuAction::Quit => writeln!(output, "Goodbye!")?,
                MenuAction::None => {}
            }
            state = next;
        }

        output.flush()
    }

    fn write_menu<W: Write>(&self, output: &mut W) -> io::Result<()> {
        writeln!(
            output,
            "\nChoose a team to display statistics. Enter 'q' at any time to quit.\n"
        )?;
        writeln!(output, "Teams:")?;
        for (i, team) in self.teams.iter().enumerate() {
            writeln!(output, "  {}) {}", i + 1, team.name)?;
        }
        Ok(())
    }

    fn show_stats<W: Write>(&self, index: usize, output: &mut W) -> io::Result<()> {
        let team = &self.teams[index];
        match TeamStats::from_team(team) {
            Ok(stats) => {
                info!("showing stats for {}", team.name);
                write!(output, "{}", stats.render(self.width.resolve()))
            }
            Err(e) => {
                warn!("{e}");
                writeln!(output, "\n{e}")
            }
        }
    }
}

/// Next line without its terminator; `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
}
