//! Main UI input handler.

use anyhow::Result;
use crossterm::event;

use crate::shortcuts::contexts;
use crate::tui::AppState;

/// Handle input while browsing the about and catalog sections
pub fn handle_main_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    if let Some(action) = state.shortcuts.lookup(contexts::MAIN, key) {
        super::dispatch_action(state, action)
    } else {
        // No action mapped - ignore key
        Ok(false)
    }
}
