// Terminal width detection for wrapping reports.

use tracing::debug;

/// Columns available for output.
///
/// A positive `COLUMNS` environment variable wins, then the size reported by
/// the terminal. Anything else falls back to `fallback`.
pub fn display_width(fallback: usize) -> usize {
    if let Some(cols) = columns_from_env(std::env::var("COLUMNS").ok().as_deref()) {
        return cols;
    }
    match crossterm::terminal::size() {
        Ok((cols, _)) if cols > 0 => usize::from(cols),
        Ok(_) => {
            debug!("terminal reported zero columns; using {fallback}");
            fallback
        }
        Err(e) => {
            debug!("terminal size unavailable ({e}); using {fallback}");
            fallback
        }
    }
}

fn columns_from_env(value: Option<&str>) -> Option<usize> {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&cols| cols > 0)
}
