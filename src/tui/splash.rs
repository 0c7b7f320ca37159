//! Loading screen shown for a fixed delay before the main view.

use std::time::{Duration, Instant};

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use uuid::Uuid;

use super::Theme;
use crate::models::PROFILE;

/// Messages shown under the loading spinner; one is picked per mount.
pub const LOADING_MESSAGES: &[&str] = &[
    "Brewing some backend magic...",
    "Warming up the JVM...",
    "Spinning up microservices...",
    "Compiling thoughts into code...",
    "Tuning the thread pools...",
];

/// One-shot reveal gate.
///
/// [`SplashGate::poll`] reports `true` exactly once per mount, on the first
/// call at or after the deadline. Unmounting drops the deadline.
#[derive(Debug, Clone)]
pub struct SplashGate {
    delay: Duration,
    deadline: Option<Instant>,
    message: &'static str,
}

impl SplashGate {
    /// Creates an unmounted gate with the given delay.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            message: LOADING_MESSAGES[0],
        }
    }

    /// Arms the deadline relative to `now` and picks a loading message.
    pub fn mount(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
        self.message = random_message();
    }

    /// Cancels a pending deadline.
    pub fn unmount(&mut self) {
        self.deadline = None;
    }

    /// Whether the splash is still covering the main view.
    #[must_use]
    pub const fn is_showing(&self) -> bool {
        self.deadline.is_some()
    }

    /// Loading message picked at mount time.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.message
    }

    /// Fires once when the deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

fn random_message() -> &'static str {
    let len = LOADING_MESSAGES.len() as u128;
    let index = usize::try_from(Uuid::new_v4().as_u128() % len).unwrap_or(0);
    LOADING_MESSAGES[index]
}

/// Render the loading screen.
pub fn render_splash(f: &mut Frame, gate: &SplashGate, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(5),
            Constraint::Min(0),
        ])
        .split(f.area());

    let lines = vec![
        Line::from(Span::styled(
            PROFILE.greeting,
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("⏳", Style::default().fg(theme.accent))),
        Line::from(""),
        Line::from(Span::styled(
            gate.message(),
            Style::default().fg(theme.text_secondary),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(theme.background));
    f.render_widget(paragraph, chunks[1]);
}
