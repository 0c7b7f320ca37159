//! Terminal user interface components and state management.
//!
//! This module contains the main TUI loop, `AppState`, event handling,
//! and the portfolio widgets using Ratatui.

// Input handlers use Result<bool> for consistency even when they never fail
#![allow(clippy::unnecessary_wraps)]
// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]

pub mod handlers;
pub mod help_overlay;
pub mod sections;
pub mod splash;
pub mod status_bar;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::config::Config;
use crate::contact::{
    ContactError, ContactForm, ContactRelay, MessageRelay, FAILURE_MESSAGE, SUCCESS_MESSAGE,
};
use crate::download::{
    DownloadCounter, DownloadEvent, DownloadManager, ResourceFetcher, SaveAction,
};
use crate::models::{Catalog, CatalogTab};
use crate::services::KeyValueStore;
use crate::shortcuts::{contexts, ShortcutRegistry};

// Re-export TUI components
pub use help_overlay::HelpOverlay;
pub use splash::SplashGate;
pub use status_bar::StatusBar;
pub use theme::{ColorSchemeSource, FixedColorScheme, OsColorScheme, Theme, ThemeController};

/// Page section that currently has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    /// Profile text and social links
    #[default]
    About,
    /// Projects / Blog Posts tabs
    Catalog,
    /// Contact form (keys are typed into the form)
    Contact,
}

/// Popup types that can be displayed over the main UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupType {
    /// Keyboard shortcut reference
    HelpOverlay,
}

/// Platform capabilities the application state is built from.
pub struct AppServices {
    /// Fetches the resume bytes
    pub fetcher: Arc<dyn ResourceFetcher>,
    /// Saves the resume to disk
    pub saver: Box<dyn SaveAction>,
    /// Persists the download counter
    pub store: Box<dyn KeyValueStore>,
    /// Delivers contact messages
    pub relay: Arc<dyn MessageRelay>,
    /// Reports the OS color scheme
    pub color_scheme: Box<dyn ColorSchemeSource>,
}

/// Application state - single source of truth
///
/// All UI components read from this state. Updates happen through
/// key handlers and the per-tick [`AppState::tick`].
pub struct AppState {
    // Core data
    /// Application configuration
    pub config: Config,
    /// Projects / posts catalog with cursor
    pub catalog: Catalog,
    /// Resume download manager and counter
    pub download: DownloadManager,
    /// Contact form being edited
    pub contact_form: ContactForm,
    /// Background delivery of contact messages
    pub contact: ContactRelay,

    // UI state
    /// Dark/light flag and derived theme
    pub theme_controller: ThemeController,
    /// Loading screen gate
    pub splash: SplashGate,
    /// Focused section
    pub section: Section,
    /// Currently active popup (if any)
    pub active_popup: Option<PopupType>,
    /// Help overlay scroll state
    pub help_overlay: HelpOverlay,
    /// Keyboard shortcuts
    pub shortcuts: ShortcutRegistry,
    /// Status bar message
    pub status_message: String,
    /// Optional color override for status message
    pub status_color_override: Option<Color>,
    /// Current error message (if any)
    pub error_message: Option<String>,

    // Control flags
    /// Whether application should exit
    pub should_quit: bool,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: Config, services: AppServices) -> Self {
        let AppServices {
            fetcher,
            saver,
            store,
            relay,
            color_scheme,
        } = services;

        let counter = DownloadCounter::load(store);
        let download = DownloadManager::new(
            config.resume.url.clone(),
            config.resume.file_name.clone(),
            fetcher,
            saver,
            counter,
        );
        let theme_controller = ThemeController::new(color_scheme.as_ref(), config.ui.theme_mode);
        let splash = SplashGate::new(config.ui.splash_duration());
        let shortcuts = ShortcutRegistry::new();
        let help_overlay = HelpOverlay::new(&shortcuts);

        Self {
            config,
            catalog: Catalog::new(),
            download,
            contact_form: ContactForm::new(),
            contact: ContactRelay::new(relay),
            theme_controller,
            splash,
            section: Section::default(),
            active_popup: None,
            help_overlay,
            shortcuts,
            status_message: "Welcome! Press ? for help".to_string(),
            status_color_override: None,
            error_message: None,
            should_quit: false,
        }
    }

    /// Current theme.
    #[must_use]
    pub const fn theme(&self) -> &Theme {
        self.theme_controller.theme()
    }

    /// Shortcut context for the focused section.
    #[must_use]
    pub const fn shortcut_context(&self) -> &'static str {
        match self.section {
            Section::Contact => contexts::CONTACT,
            Section::About | Section::Catalog => contexts::MAIN,
        }
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.error_message = None;
        self.status_color_override = None;
    }

    /// Set the status line from background work.
    ///
    /// Leaves an active error in place until the user dismisses it.
    pub fn notify_status_with_style(&mut self, message: impl Into<String>, color: Color) {
        self.status_message = message.into();
        self.status_color_override = Some(color);
    }

    /// Report a background failure without replacing an undismissed one.
    pub fn notify_error(&mut self, error: impl Into<String>) {
        let error = error.into();
        self.error_message = Some(match self.error_message.take() {
            Some(previous) => format!("{previous}\n\n{error}"),
            None => error,
        });
    }

    /// Set error message
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error_message = Some(error.into());
    }

    /// Clear error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Focus a section.
    pub fn focus(&mut self, section: Section) {
        self.section = section;
    }

    /// Focus the catalog on a specific tab.
    pub fn focus_catalog(&mut self, tab: CatalogTab) {
        self.catalog.select_tab(tab);
        self.section = Section::Catalog;
    }

    /// Flip dark/light mode.
    pub fn toggle_theme(&mut self) {
        self.theme_controller.toggle();
        debug!(dark = self.theme_controller.is_dark(), "Theme toggled");
    }

    /// Start the resume download unless one is already running.
    pub fn start_download(&mut self) {
        if self.download.start_download() {
            self.set_status("Downloading resume...");
        } else {
            self.set_status("Download already in progress");
        }
    }

    /// Submit the contact form.
    pub fn submit_contact(&mut self) {
        match self.contact.submit(&self.contact_form) {
            Ok(()) => self.set_status("Sending message..."),
            Err(ContactError::Invalid(reason)) => self.set_error(reason),
            Err(e @ ContactError::Pending) => self.set_status(e.to_string()),
        }
    }

    /// Copy the highlighted catalog link to the clipboard.
    pub fn copy_selected_link(&mut self) {
        let Some(item) = self.catalog.selected_item() else {
            return;
        };

        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(item.url)) {
            Ok(()) => self.set_status(format!("Copied link: {}", item.url)),
            Err(e) => self.set_error(format!("Failed to copy to clipboard: {e}")),
        }
    }

    /// Advance timers and drain background work.
    pub fn tick(&mut self, now: Instant) {
        if self.splash.poll(now) {
            info!("Splash finished, showing main view");
        }

        for event in self.download.poll() {
            self.apply_download_event(event);
        }

        if let Some(outcome) = self.contact.poll(&mut self.contact_form) {
            match outcome {
                Ok(()) => {
                    let color = self.theme().success;
                    self.notify_status_with_style(SUCCESS_MESSAGE, color);
                }
                Err(e) => self.notify_error(format!("{FAILURE_MESSAGE}\n\n{e}")),
            }
        }
    }

    fn apply_download_event(&mut self, event: DownloadEvent) {
        match event {
            DownloadEvent::Progress(_) => {}
            DownloadEvent::Completed {
                saved_to,
                total_downloads,
                counter_error: None,
            } => {
                let color = self.theme().success;
                self.notify_status_with_style(
                    format!(
                        "Resume saved to {} ({total_downloads} downloads)",
                        saved_to.display()
                    ),
                    color,
                );
            }
            DownloadEvent::Completed {
                saved_to,
                counter_error: Some(reason),
                ..
            } => {
                let color = self.theme().warning;
                self.notify_status_with_style(
                    format!(
                        "Resume saved to {}, but the download count was not updated: {reason}",
                        saved_to.display()
                    ),
                    color,
                );
            }
            DownloadEvent::Failed(reason) => {
                self.notify_error(format!("Resume download failed: {reason}"));
            }
        }
    }
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    state.splash.mount(Instant::now());

    let result = event_loop(state, terminal);

    // Drop any pending reveal so nothing fires after teardown
    state.splash.unmount();
    result
}

fn event_loop(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        state.tick(Instant::now());

        // Render current state
        terminal.draw(|f| render(f, state))?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Press && handle_key_event(state, key)? {
                    break; // User quit
                }
            }
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Render the UI from current state
pub fn render(f: &mut Frame, state: &AppState) {
    let theme = state.theme();

    // Fill entire screen with theme background color first
    let full_bg = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(full_bg, f.area());

    if state.splash.is_showing() {
        splash::render_splash(f, &state.splash, theme);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(7), // Hero
            Constraint::Min(8),    // Section content
            Constraint::Length(1), // Footer
            Constraint::Length(6), // Status bar
        ])
        .split(f.area());

    sections::render_title_bar(f, chunks[0], state);
    sections::render_hero(f, chunks[1], state);
    sections::render_section(f, chunks[2], state);
    sections::render_footer(f, chunks[3], theme);
    StatusBar::render(f, chunks[4], state, theme);

    if let Some(PopupType::HelpOverlay) = state.active_popup {
        state
            .help_overlay
            .render(f, f.area(), theme, &state.shortcuts);
    }

    // Render error overlay on top of everything if error is present
    if let Some(ref error) = state.error_message {
        render_error_overlay(f, error, theme);
    }
}

/// Render error overlay on top of all other UI elements
fn render_error_overlay(f: &mut Frame, error: &str, theme: &Theme) {
    let area = centered_rect(70, 40, f.area());

    f.render_widget(Clear, area);
    let background = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(background, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(3),    // Error message
            Constraint::Length(3), // Help text
        ])
        .split(area);

    let title = Paragraph::new("ERROR")
        .style(
            Style::default()
                .fg(theme.error)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().fg(theme.error).bg(theme.background)),
        );
    f.render_widget(title, chunks[0]);

    let error_text = Paragraph::new(error)
        .style(Style::default().fg(theme.text))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Details ")
                .style(Style::default().bg(theme.background)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(error_text, chunks[1]);

    let help = Paragraph::new(Line::from(vec![
        Span::styled(
            "Enter/Esc",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Dismiss"),
    ]))
    .style(Style::default().fg(theme.text).bg(theme.background))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(theme.background)),
    );
    f.render_widget(help, chunks[2]);
}

/// Helper to create a centered rectangle
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Handle keyboard input events.
///
/// Returns `true` when the application should exit.
pub fn handle_key_event(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    use crossterm::event::{KeyCode, KeyModifiers};

    // The loading screen cannot be skipped, only abandoned
    if state.splash.is_showing() {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            state.should_quit = true;
            return Ok(true);
        }
        return Ok(false);
    }

    // If error overlay is shown, allow dismissing with Enter or Esc
    if state.error_message.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            state.clear_error();
        }
        // Block all other input while error is shown
        return Ok(false);
    }

    if state.active_popup.is_some() {
        return handlers::handle_popup_input(state, key);
    }

    match state.section {
        Section::Contact => handlers::handle_contact_input(state, key),
        Section::About | Section::Catalog => handlers::handle_main_input(state, key),
    }
}
