//! Centralized shortcut and action system.
//!
//! Key events are resolved to [`Action`]s per context. The same table feeds
//! the status bar hints and the help overlay, so what is documented is what
//! is handled.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Context names used for lookups.
pub mod contexts {
    /// Browsing: about, catalog and hero
    pub const MAIN: &str = "main";
    /// Typing into the contact form
    pub const CONTACT: &str = "contact";
}

/// Every action a user can trigger from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // === SECTIONS ===
    /// Jump to the about section
    FocusAbout,
    /// Jump to the catalog on the Projects tab
    FocusProjects,
    /// Jump to the catalog on the Blog Posts tab
    FocusBlog,
    /// Jump to the contact form
    FocusContact,

    // === CATALOG ===
    /// Flip between Projects and Blog Posts
    SwitchTab,
    /// Highlight the previous item
    SelectPrevious,
    /// Highlight the next item
    SelectNext,
    /// Copy the highlighted item's link
    CopyLink,

    // === CONTACT FORM ===
    /// Move to the next form field
    NextField,
    /// Move to the previous form field
    PreviousField,
    /// Send the message
    SubmitMessage,
    /// Stop typing and return to browsing
    LeaveForm,

    // === GLOBAL ===
    /// Start the resume download
    DownloadResume,
    /// Flip dark/light mode
    ToggleTheme,
    /// Show or hide the help overlay
    ToggleHelp,
    /// Dismiss the current message
    Cancel,
    /// Exit the application
    Quit,
}

impl Action {
    /// All actions in help order.
    pub const ALL: [Self; 17] = [
        Self::FocusAbout,
        Self::FocusProjects,
        Self::FocusBlog,
        Self::FocusContact,
        Self::SwitchTab,
        Self::SelectPrevious,
        Self::SelectNext,
        Self::CopyLink,
        Self::NextField,
        Self::PreviousField,
        Self::SubmitMessage,
        Self::LeaveForm,
        Self::DownloadResume,
        Self::ToggleTheme,
        Self::ToggleHelp,
        Self::Cancel,
        Self::Quit,
    ];

    /// Short label for the status bar.
    #[must_use]
    pub const fn hint(self) -> &'static str {
        match self {
            Self::FocusAbout => "About",
            Self::FocusProjects => "Projects",
            Self::FocusBlog => "Blog",
            Self::FocusContact => "Contact",
            Self::SwitchTab => "Tab",
            Self::SelectPrevious | Self::SelectNext => "Select",
            Self::CopyLink => "Copy link",
            Self::NextField => "Next field",
            Self::PreviousField => "Prev field",
            Self::SubmitMessage => "Send",
            Self::LeaveForm => "Leave form",
            Self::DownloadResume => "Resume",
            Self::ToggleTheme => "Theme",
            Self::ToggleHelp => "Help",
            Self::Cancel => "Dismiss",
            Self::Quit => "Quit",
        }
    }

    /// Full description for the help overlay.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::FocusAbout => "Show the about section",
            Self::FocusProjects => "Show the projects list",
            Self::FocusBlog => "Show the blog posts list",
            Self::FocusContact => "Start writing a message",
            Self::SwitchTab => "Switch between Projects and Blog Posts",
            Self::SelectPrevious => "Highlight the previous item",
            Self::SelectNext => "Highlight the next item",
            Self::CopyLink => "Copy the highlighted link to the clipboard",
            Self::NextField => "Move to the next field",
            Self::PreviousField => "Move to the previous field",
            Self::SubmitMessage => "Send the message",
            Self::LeaveForm => "Leave the form (typed text is kept)",
            Self::DownloadResume => "Download the resume",
            Self::ToggleTheme => "Toggle dark/light mode",
            Self::ToggleHelp => "Show or hide this help",
            Self::Cancel => "Dismiss the current message",
            Self::Quit => "Quit",
        }
    }
}

/// A key binding (key + modifiers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    /// Key code
    pub code: KeyCode,
    /// Modifiers held with the key
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Create a new key binding.
    ///
    /// Shift is dropped for character keys and BackTab; it is already part of
    /// the key and terminals disagree on whether to report it.
    #[must_use]
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        let modifiers = if matches!(code, KeyCode::Char(_) | KeyCode::BackTab) {
            modifiers.difference(KeyModifiers::SHIFT)
        } else {
            modifiers
        };
        Self { code, modifiers }
    }

    /// Create a key binding from a KeyEvent.
    #[must_use]
    pub fn from_event(event: KeyEvent) -> Self {
        Self::new(event.code, event.modifiers)
    }

    /// Human-readable label, e.g. `Ctrl+S`.
    #[must_use]
    pub fn label(&self) -> String {
        let key = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "Shift+Tab".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        };

        let mut label = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            label.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            label.push_str("Alt+");
        }
        label.push_str(&key);
        label
    }
}

/// Shortcut registry that maps key events to actions for a given context.
pub struct ShortcutRegistry {
    /// Maps (context, key_binding) to Action
    bindings: HashMap<(String, KeyBinding), Action>,
}

impl ShortcutRegistry {
    /// Create a new shortcut registry with default bindings.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            bindings: HashMap::new(),
        };

        registry.register_main_shortcuts();
        registry.register_contact_shortcuts();
        registry
    }

    fn register_main_shortcuts(&mut self) {
        use KeyCode as K;
        use KeyModifiers as M;

        let ctx = contexts::MAIN;

        // === SECTIONS ===
        self.register(ctx, K::Char('1'), M::NONE, Action::FocusAbout);
        self.register(ctx, K::Char('2'), M::NONE, Action::FocusProjects);
        self.register(ctx, K::Char('3'), M::NONE, Action::FocusBlog);
        self.register(ctx, K::Char('4'), M::NONE, Action::FocusContact);

        // === CATALOG ===
        self.register(ctx, K::Tab, M::NONE, Action::SwitchTab);
        self.register(ctx, K::BackTab, M::NONE, Action::SwitchTab);
        self.register(ctx, K::Left, M::NONE, Action::SwitchTab);
        self.register(ctx, K::Right, M::NONE, Action::SwitchTab);
        self.register(ctx, K::Up, M::NONE, Action::SelectPrevious);
        self.register(ctx, K::Char('k'), M::NONE, Action::SelectPrevious);
        self.register(ctx, K::Down, M::NONE, Action::SelectNext);
        self.register(ctx, K::Char('j'), M::NONE, Action::SelectNext);
        self.register(ctx, K::Char('y'), M::NONE, Action::CopyLink);
        self.register(ctx, K::Enter, M::NONE, Action::CopyLink);

        // === GLOBAL ===
        self.register(ctx, K::Char('d'), M::NONE, Action::DownloadResume);
        self.register(ctx, K::Char('t'), M::NONE, Action::ToggleTheme);
        self.register(ctx, K::Char('?'), M::NONE, Action::ToggleHelp);
        self.register(ctx, K::F(1), M::NONE, Action::ToggleHelp);
        self.register(ctx, K::Esc, M::NONE, Action::Cancel);
        self.register(ctx, K::Char('q'), M::NONE, Action::Quit);
        self.register(ctx, K::Char('q'), M::CONTROL, Action::Quit);
        self.register(ctx, K::Char('c'), M::CONTROL, Action::Quit);
    }

    fn register_contact_shortcuts(&mut self) {
        use KeyCode as K;
        use KeyModifiers as M;

        let ctx = contexts::CONTACT;

        // Plain characters are typed into the form, so everything here is
        // a navigation key or carries a modifier.
        self.register(ctx, K::Tab, M::NONE, Action::NextField);
        self.register(ctx, K::Down, M::NONE, Action::NextField);
        self.register(ctx, K::BackTab, M::NONE, Action::PreviousField);
        self.register(ctx, K::Up, M::NONE, Action::PreviousField);
        self.register(ctx, K::Char('s'), M::CONTROL, Action::SubmitMessage);
        self.register(ctx, K::Esc, M::NONE, Action::LeaveForm);

        self.register(ctx, K::Char('d'), M::CONTROL, Action::DownloadResume);
        self.register(ctx, K::Char('t'), M::CONTROL, Action::ToggleTheme);
        self.register(ctx, K::F(1), M::NONE, Action::ToggleHelp);
        self.register(ctx, K::Char('q'), M::CONTROL, Action::Quit);
        self.register(ctx, K::Char('c'), M::CONTROL, Action::Quit);
    }

    /// Register a shortcut binding.
    fn register(&mut self, context: &str, code: KeyCode, modifiers: KeyModifiers, action: Action) {
        let binding = KeyBinding::new(code, modifiers);
        self.bindings.insert((context.to_string(), binding), action);
    }

    /// Look up an action for a given context and key event.
    #[must_use]
    pub fn lookup(&self, context: &str, event: KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(event);
        self.bindings.get(&(context.to_string(), binding)).copied()
    }

    /// Check if a key event matches a specific action in the given context.
    #[must_use]
    pub fn matches(&self, context: &str, event: KeyEvent, action: Action) -> bool {
        self.lookup(context, event) == Some(action)
    }

    /// Key labels bound to `action` in `context`, sorted for stable display.
    #[must_use]
    pub fn keys_for(&self, context: &str, action: Action) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|((ctx, _), bound)| ctx == context && **bound == action)
            .map(|((_, binding), _)| binding.label())
            .collect();
        keys.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        keys
    }

    /// Every bound action of a context with its joined key labels, in help order.
    #[must_use]
    pub fn entries(&self, context: &str) -> Vec<(String, Action)> {
        Action::ALL
            .into_iter()
            .filter_map(|action| {
                let keys = self.keys_for(context, action);
                (!keys.is_empty()).then(|| (keys.join("/"), action))
            })
            .collect()
    }
}

impl Default for ShortcutRegistry {
    fn default() -> Self {
        Self::new()
    }
}
