//! Page sections: title bar, hero, about, catalog, contact form and footer.

use chrono::Datelike;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

use super::{AppState, Section, Theme};
use crate::contact::{ContactField, ContactForm};
use crate::models::{CatalogTab, PROFILE};

/// Navigation labels in title bar order.
const NAV_ITEMS: [(&str, &str); 4] = [
    ("1", "About"),
    ("2", "Projects"),
    ("3", "Blog"),
    ("4", "Contact"),
];

/// Index of the highlighted navigation label.
fn active_nav(state: &AppState) -> usize {
    match (state.section, state.catalog.tab()) {
        (Section::About, _) => 0,
        (Section::Catalog, CatalogTab::Projects) => 1,
        (Section::Catalog, CatalogTab::Posts) => 2,
        (Section::Contact, _) => 3,
    }
}

/// Render the app bar with owner name, navigation and theme indicator
pub fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = state.theme();
    let active = active_nav(state);

    let mut spans = vec![
        Span::styled(
            format!(" {} ", PROFILE.short_name),
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("│", Style::default().fg(theme.text_muted)),
    ];

    for (i, (key, label)) in NAV_ITEMS.iter().enumerate() {
        let style = if i == active {
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme.text_secondary)
        };
        spans.push(Span::styled(format!(" [{key}] "), Style::default().fg(theme.text_muted)));
        spans.push(Span::styled(*label, style));
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(12)])
        .split(area);

    let nav = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP | Borders::BOTTOM | Borders::LEFT)
            .style(Style::default().bg(theme.background)),
    );
    f.render_widget(nav, chunks[0]);

    let indicator = Paragraph::new(state.theme_controller.indicator())
        .alignment(Alignment::Right)
        .style(Style::default().fg(theme.accent))
        .block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM | Borders::RIGHT)
                .style(Style::default().bg(theme.background)),
        );
    f.render_widget(indicator, chunks[1]);
}

/// Render the hero banner with the resume download control
pub fn render_hero(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = state.theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.primary))
        .style(Style::default().bg(theme.surface));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Greeting
            Constraint::Length(1), // Tagline
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Download button or gauge
            Constraint::Length(1), // Counter
        ])
        .split(inner);

    let greeting = Paragraph::new(PROFILE.greeting)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(greeting, chunks[0]);

    let tagline = Paragraph::new(PROFILE.tagline)
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.text_secondary));
    f.render_widget(tagline, chunks[1]);

    let progress = state.download.progress();
    if progress.transferring {
        let gauge = match progress.percent {
            Some(percent) => Gauge::default()
                .percent(u16::from(percent))
                .label(format!("Downloading... {percent}%")),
            // Size unknown, no percentage to show
            None => Gauge::default()
                .percent(0)
                .label(format!("Downloading... {} bytes", progress.bytes_loaded)),
        };
        f.render_widget(
            gauge.gauge_style(Style::default().fg(theme.success).bg(theme.highlight_bg)),
            centered_band(chunks[3], 50),
        );
    } else {
        let button = Paragraph::new(Line::from(vec![
            Span::styled(
                " [d] ",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "Download Resume ",
                Style::default()
                    .fg(theme.text)
                    .add_modifier(Modifier::BOLD),
            ),
        ]))
        .alignment(Alignment::Center);
        f.render_widget(button, chunks[3]);
    }

    let counter = Paragraph::new(format!(
        "Downloaded {} times",
        state.download.total_downloads()
    ))
    .alignment(Alignment::Center)
    .style(Style::default().fg(theme.text_muted));
    f.render_widget(counter, chunks[4]);
}

/// Render the focused section
pub fn render_section(f: &mut Frame, area: Rect, state: &AppState) {
    match state.section {
        Section::About => render_about(f, area, state.theme()),
        Section::Catalog => render_catalog(f, area, state),
        Section::Contact => render_contact(f, area, state),
    }
}

fn render_about(f: &mut Frame, area: Rect, theme: &Theme) {
    let mut lines = vec![
        Line::from(Span::styled(PROFILE.about, Style::default().fg(theme.text))),
        Line::from(""),
    ];
    lines.extend(PROFILE.links.iter().map(|link| {
        Line::from(vec![
            Span::styled(
                format!("{:<10}", link.label),
                Style::default().fg(theme.accent),
            ),
            Span::styled(link.url, Style::default().fg(theme.text_secondary)),
        ])
    }));

    let about = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" About Me ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.primary))
                .style(Style::default().bg(theme.background)),
        );
    f.render_widget(about, area);
}

fn render_catalog(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = state.theme();
    let tab = state.catalog.tab();

    let block = Block::default()
        .title(" Projects & Blog ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.primary))
        .style(Style::default().bg(theme.background));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let tabs = Tabs::new(CatalogTab::ALL.iter().map(|t| t.label()))
        .select(tab.index())
        .style(Style::default().fg(theme.text_secondary))
        .highlight_style(
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider("│");
    f.render_widget(tabs, chunks[0]);

    let items: Vec<ListItem> = state
        .catalog
        .items()
        .iter()
        .map(|item| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    item.title,
                    Style::default()
                        .fg(theme.text)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    tab.blurb(),
                    Style::default().fg(theme.text_secondary),
                )),
                Line::from(vec![
                    Span::styled(tab.link_label(), Style::default().fg(theme.accent)),
                    Span::raw(" "),
                    Span::styled(item.url, Style::default().fg(theme.text_muted)),
                ]),
                Line::from(""),
            ])
        })
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().bg(theme.highlight_bg))
        .highlight_symbol("▶ ");
    let mut list_state = ListState::default().with_selected(Some(state.catalog.selected()));
    f.render_stateful_widget(list, chunks[1], &mut list_state);
}

fn render_contact(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = state.theme();
    let form = &state.contact_form;

    let block = Block::default()
        .title(" Contact Me ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.primary))
        .style(Style::default().bg(theme.background));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name
            Constraint::Length(3), // Email
            Constraint::Length(3), // Subject
            Constraint::Min(3),    // Message
        ])
        .split(inner);

    for (field, area) in ContactField::ALL.into_iter().zip(chunks.iter()) {
        render_field(f, *area, form, field, theme);
    }

    // Place the terminal cursor at the end of the active field
    let index = ContactField::ALL
        .iter()
        .position(|field| *field == form.active_field)
        .unwrap_or(0);
    let field_area = chunks[index];
    let value = form.value(form.active_field);
    let last_line = value.rsplit('\n').next().unwrap_or_default();
    let line_count = value.split('\n').count() as u16;
    let x = field_area.x + 1 + last_line.chars().count() as u16;
    let y = field_area.y + line_count.min(field_area.height.saturating_sub(2)).max(1);
    if x < field_area.right().saturating_sub(1) {
        f.set_cursor_position(Position { x, y });
    }
}

/// Render a single field.
fn render_field(f: &mut Frame, area: Rect, form: &ContactForm, field: ContactField, theme: &Theme) {
    let is_active = form.active_field == field;
    let border_style = if is_active {
        Style::default().fg(theme.active)
    } else {
        Style::default().fg(theme.inactive)
    };

    let paragraph = Paragraph::new(form.value(field).to_string())
        .style(Style::default().fg(theme.text))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(field.label())
                .borders(Borders::ALL)
                .border_style(border_style),
        );
    f.render_widget(paragraph, area);
}

/// Render the copyright footer
pub fn render_footer(f: &mut Frame, area: Rect, theme: &Theme) {
    let year = chrono::Local::now().year();
    let footer = Paragraph::new(PROFILE.footer_line(year))
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.text_muted).bg(theme.background));
    f.render_widget(footer, area);
}

/// Horizontally centered slice of `area`, `percent` wide.
fn centered_band(area: Rect, percent: u16) -> Rect {
    let width = area.width * percent / 100;
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}
