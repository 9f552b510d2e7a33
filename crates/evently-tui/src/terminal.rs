//! Terminal lifecycle management.
//!
//! The terminal is restored on normal exit (guard drop), on error returns
//! and on panic.

use std::io::{self, Stdout};
use std::panic;

use anyhow::{Context, Result};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Owns the terminal while the TUI runs. Dropping it restores the terminal.
pub struct TerminalSession {
    pub terminal: Tui,
}

impl TerminalSession {
    /// Enters raw mode and the alternate screen, and enables mouse capture
    /// (the composer's outside-click dismissal needs pointer-down events).
    ///
    /// Call `install_panic_hook()` first.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be switched.
    pub fn start() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
            let _ = restore_terminal();
            return Err(e).context("Failed to enter alternate screen");
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout))
            .context("Failed to create terminal")?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = restore_terminal() {
            tracing::warn!(error = %e, "failed to restore terminal");
        }
        let _ = self.terminal.show_cursor();
    }
}

/// Restores terminal state. Safe to call more than once.
///
/// # Errors
/// Returns an error if the terminal cannot be switched back.
pub fn restore_terminal() -> Result<()> {
    // Mouse capture must go before raw mode.
    let _ = execute!(io::stdout(), DisableMouseCapture);
    execute!(io::stdout(), LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}
