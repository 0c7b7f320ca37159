//! Status bar widget for displaying status messages and help

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{AppState, Theme};
use crate::shortcuts::{contexts, Action};

/// Content lines above the help line (6 height - 2 borders - 1 help)
const MAX_CONTENT_LINES: usize = 3;

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar with contextual help
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let mut content_lines: Vec<Line> = Vec::new();

        // First line: error, status message, or hints
        if let Some(error) = &state.error_message {
            content_lines.push(Line::from(vec![
                Span::styled("ERROR: ", Style::default().fg(theme.error)),
                Span::raw(error.lines().next().unwrap_or_default().to_string()),
            ]));
        } else if !state.status_message.is_empty() {
            let style = state
                .status_color_override
                .map_or_else(Style::default, |color| Style::default().fg(color));
            content_lines.push(Line::from(Span::styled(
                state.status_message.clone(),
                style,
            )));
        } else {
            content_lines.push(Self::get_hints_line(state, theme));
        }

        if state.download.is_transferring() {
            let progress = state.download.progress();
            let detail = match progress.percent {
                Some(percent) => format!("{percent}%"),
                None => format!("{} bytes", progress.bytes_loaded),
            };
            content_lines.push(Line::from(vec![
                Span::styled("Download: ", Style::default().fg(theme.primary)),
                Span::styled(detail, Style::default().fg(theme.warning)),
            ]));
        }

        if state.contact.is_pending() {
            content_lines.push(Line::from(vec![
                Span::styled("Message: ", Style::default().fg(theme.primary)),
                Span::styled("sending...", Style::default().fg(theme.warning)),
            ]));
        }

        let padding_needed = MAX_CONTENT_LINES.saturating_sub(content_lines.len());
        let mut status_text: Vec<Line> = content_lines
            .into_iter()
            .take(MAX_CONTENT_LINES)
            .collect();
        status_text.extend((0..padding_needed).map(|_| Line::from("")));
        status_text.push(Self::get_contextual_help_line(state, theme));

        let status = Paragraph::new(status_text)
            .style(Style::default().fg(theme.text).bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Status ")
                    .style(Style::default().bg(theme.background)),
            );

        f.render_widget(status, area);
    }

    /// Section shortcuts shown when there is nothing else to say
    fn get_hints_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let context = state.shortcut_context();
        let mut spans: Vec<Span<'static>> = Vec::new();

        for action in [
            Action::FocusAbout,
            Action::FocusProjects,
            Action::FocusBlog,
            Action::FocusContact,
        ] {
            let keys = state.shortcuts.keys_for(context, action);
            let Some(key) = keys.first() else {
                continue;
            };
            if !spans.is_empty() {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(
                key.clone(),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                action.hint(),
                Style::default().fg(theme.text_muted),
            ));
        }

        Line::from(spans)
    }

    /// Bottom help line for the current context
    fn get_contextual_help_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let context = state.shortcut_context();
        let actions: &[Action] = if context == contexts::CONTACT {
            &[
                Action::NextField,
                Action::SubmitMessage,
                Action::LeaveForm,
                Action::DownloadResume,
                Action::ToggleHelp,
            ]
        } else {
            &[
                Action::SwitchTab,
                Action::CopyLink,
                Action::DownloadResume,
                Action::ToggleTheme,
                Action::ToggleHelp,
                Action::Quit,
            ]
        };

        let mut spans: Vec<Span<'static>> = vec![Span::styled(
            "Help: ",
            Style::default().fg(theme.primary),
        )];

        for (i, action) in actions.iter().enumerate() {
            let keys = state.shortcuts.keys_for(context, *action);
            let Some(key) = keys.first() else {
                continue;
            };
            if i > 0 {
                spans.push(Span::raw(" | "));
            }
            spans.push(Span::styled(key.clone(), Style::default().fg(theme.accent)));
            spans.push(Span::raw(": "));
            spans.push(Span::raw(action.hint()));
        }

        Line::from(spans)
    }
}
