//! Contact form input handler.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::shortcuts::contexts;
use crate::tui::AppState;

/// Handle input while the contact form has focus.
///
/// Shortcuts are resolved first; anything else edits the active field.
pub fn handle_contact_input(state: &mut AppState, key: KeyEvent) -> Result<bool> {
    if let Some(action) = state.shortcuts.lookup(contexts::CONTACT, key) {
        return super::dispatch_action(state, action);
    }

    let form = &mut state.contact_form;
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            form.insert_char(c);
        }
        KeyCode::Enter => {
            if form.active_field.is_multiline() {
                form.insert_newline();
            } else {
                form.next_field();
            }
        }
        KeyCode::Backspace => form.backspace(),
        _ => {}
    }

    Ok(false)
}
