//! Terminal lifecycle management.
//!
//! Raw mode and the alternate screen are restored on normal exit and on
//! panic.

use std::io::{self, Stdout};
use std::panic;

use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::error::{AppError, Result};

/// Terminal type used by the demo.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Enable raw mode, enter the alternate screen and create the terminal.
///
/// Call [`install_panic_hook`] first so a panic still restores the terminal.
/// On failure the terminal is left as it was found.
pub fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()
        .map_err(|e| AppError::terminal(format!("failed to enable raw mode: {e}")))?;
    let terminal = execute!(io::stdout(), EnterAlternateScreen)
        .map_err(|e| AppError::terminal(format!("failed to enter alternate screen: {e}")))
        .and_then(|()| {
            Terminal::new(CrosstermBackend::new(io::stdout()))
                .map_err(|e| AppError::terminal(format!("failed to create terminal: {e}")))
        });
    if terminal.is_err() {
        // Undo whatever part of the setup succeeded.
        let _ = restore_terminal();
    }
    terminal
}

/// Leave the alternate screen and disable raw mode.
///
/// Safe to call more than once.
pub fn restore_terminal() -> Result<()> {
    execute!(io::stdout(), LeaveAlternateScreen)
        .map_err(|e| AppError::terminal(format!("failed to leave alternate screen: {e}")))?;
    disable_raw_mode()
        .map_err(|e| AppError::terminal(format!("failed to disable raw mode: {e}")))?;
    Ok(())
}

/// Restore the terminal before the default panic output is printed.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}
