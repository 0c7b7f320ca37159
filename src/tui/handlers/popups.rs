//! Popup input handlers.

use anyhow::Result;
use crossterm::event::{self, KeyCode};

use crate::tui::{AppState, PopupType};

/// Approximate visible height of the help overlay
const HELP_PAGE: usize = 10;

/// Handle input for the active popup
pub fn handle_popup_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    match state.active_popup {
        Some(PopupType::HelpOverlay) => handle_help_overlay_input(state, key),
        None => Ok(false),
    }
}

fn handle_help_overlay_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    let help = &mut state.help_overlay;
    match key.code {
        KeyCode::Esc | KeyCode::Char('?' | 'q') | KeyCode::F(1) => {
            state.active_popup = None;
        }
        KeyCode::Up | KeyCode::Char('k') => help.scroll_up(),
        KeyCode::Down | KeyCode::Char('j') => help.scroll_down(),
        KeyCode::PageUp => help.page_up(HELP_PAGE),
        KeyCode::PageDown => help.page_down(HELP_PAGE),
        KeyCode::Home => help.scroll_to_top(),
        KeyCode::End => help.scroll_to_bottom(),
        _ => {}
    }
    Ok(false)
}
