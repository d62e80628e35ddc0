// Team stats tool entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config, copying defaults on first run
// 3. Load the roster file and balance it across the configured teams
// 4. Run the team menu on stdin/stdout until the user quits

use hoopstats_cli::menu::{Menu, WidthSource};
use hoopstats_core::config;
use hoopstats_core::roster::{self, source};

use anyhow::Context;
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("hoopstats starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: {} teams, roster at {}, {:?} leftover policy",
        config.league.teams.len(),
        config.roster_path().display(),
        config.roster.leftover_policy
    );

    // 3. Load and balance the roster
    let roster_path = config.roster_path();
    let raw_players = source::load_raw_players(&roster_path)
        .with_context(|| format!("failed to load roster from {}", roster_path.display()))?;
    let assignment = roster::assign_roster(
        &raw_players,
        &config.league.teams,
        config.roster.leftover_policy,
    )
    .context("failed to assign players to teams")?;
    if !assignment.unassigned.is_empty() {
        warn!(
            "{} players left without a team",
            assignment.unassigned.len()
        );
    }

    // 4. Run the menu (blocking until the user quits)
    let menu = Menu {
        title: &config.league.name,
        teams: &assignment.teams,
        width: WidthSource::Terminal {
            fallback: config.display.fallback_width,
        },
    };
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    menu.run(stdin.lock(), stdout.lock())
        .context("console I/O failed")?;

    info!("hoopstats shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (the terminal belongs to the menu).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("hoopstats.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hoopstats=info,hoopstats_core=info,hoopstats_cli=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
