//! Action dispatch shared by the main and contact contexts.

use anyhow::Result;

use crate::models::CatalogTab;
use crate::shortcuts::Action;
use crate::tui::{AppState, PopupType, Section};

/// Dispatch action to appropriate handler
pub fn dispatch_action(state: &mut AppState, action: Action) -> Result<bool> {
    match action {
        // Sections
        Action::FocusAbout => state.focus(Section::About),
        Action::FocusProjects => state.focus_catalog(CatalogTab::Projects),
        Action::FocusBlog => state.focus_catalog(CatalogTab::Posts),
        Action::FocusContact => {
            state.focus(Section::Contact);
            state.set_status("Writing a message - Ctrl+S to send, Esc to leave the form");
        }

        // Catalog
        Action::SwitchTab => {
            state.catalog.switch_tab();
            state.focus(Section::Catalog);
        }
        Action::SelectPrevious => {
            state.catalog.select_previous();
            state.focus(Section::Catalog);
        }
        Action::SelectNext => {
            state.catalog.select_next();
            state.focus(Section::Catalog);
        }
        Action::CopyLink => {
            if state.section == Section::Catalog {
                state.copy_selected_link();
            }
        }

        // Contact form
        Action::NextField => state.contact_form.next_field(),
        Action::PreviousField => state.contact_form.previous_field(),
        Action::SubmitMessage => state.submit_contact(),
        Action::LeaveForm => {
            state.focus(Section::About);
            state.set_status("Left the contact form");
        }

        // Global
        Action::DownloadResume => state.start_download(),
        Action::ToggleTheme => state.toggle_theme(),
        Action::ToggleHelp => {
            state.help_overlay.scroll_to_top();
            state.active_popup = Some(PopupType::HelpOverlay);
        }
        Action::Cancel => state.set_status(""),
        Action::Quit => {
            state.should_quit = true;
            return Ok(true);
        }
    }

    Ok(false)
}
