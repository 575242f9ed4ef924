//! Terminal setup and restoration utilities

use std::io::{self, stdout, Stdout};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

/// Terminal type used while the chart is on screen
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Alternate-screen session; the terminal is restored when it is dropped
pub struct TerminalSession {
    terminal: Tui,
}

impl TerminalSession {
    /// Enter the alternate screen in raw mode
    pub fn start() -> io::Result<Self> {
        install_panic_hook();
        execute!(stdout(), EnterAlternateScreen)?;
        if let Err(e) = enable_raw_mode() {
            let _ = execute!(stdout(), LeaveAlternateScreen);
            return Err(e);
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        Ok(Self { terminal })
    }

    pub fn terminal(&mut self) -> &mut Tui {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = restore() {
            tracing::warn!(error = %e, "Failed to restore terminal");
        }
    }
}

/// Restore the terminal to its original state
fn restore() -> io::Result<()> {
    execute!(stdout(), LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

/// Restore the terminal before the default panic output is printed
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = restore();
        original_hook(panic);
    }));
}
