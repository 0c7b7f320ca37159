//! Input handler modules for different TUI contexts.

pub mod actions;
pub mod contact;
pub mod main;
pub mod popups;

// Re-export handler functions
pub use actions::dispatch_action;
pub use contact::handle_contact_input;
pub use main::handle_main_input;
pub use popups::handle_popup_input;
