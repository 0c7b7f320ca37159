//! Theme system for consistent UI colors across dark and light modes.
//!
//! The initial mode comes from the OS color scheme (or a config override) and
//! is flipped at runtime by the theme toggle. The choice is not persisted.

use ratatui::style::Color;

use crate::config::ThemeMode;

/// Semantic color theme for the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // Primary UI colors
    /// Primary color for borders, titles, and emphasis
    pub primary: Color,
    /// Accent color for highlights, selections, and focus states
    pub accent: Color,
    /// Success state color for confirmations and the download gauge
    pub success: Color,
    /// Error state color for errors
    pub error: Color,
    /// Warning state color
    pub warning: Color,

    // Text hierarchy
    /// Primary text content color
    pub text: Color,
    /// Secondary text color for labels
    pub text_secondary: Color,
    /// Muted text color for help text and dim content
    pub text_muted: Color,

    // Backgrounds
    /// Main background color
    pub background: Color,
    /// Highlight/selection background color
    pub highlight_bg: Color,
    /// Surface color for panels and cards
    pub surface: Color,

    // State indicators
    /// Active/focused element color
    pub active: Color,
    /// Inactive element color
    pub inactive: Color,
}

impl Theme {
    /// Dark theme for dark terminal backgrounds.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Yellow,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,

            text: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::DarkGray,

            background: Color::Black,
            highlight_bg: Color::DarkGray,
            surface: Color::Rgb(30, 30, 30),

            active: Color::Yellow,
            inactive: Color::Gray,
        }
    }

    /// Light theme for light terminal backgrounds.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::Blue,
            accent: Color::Rgb(180, 100, 0),
            success: Color::Rgb(0, 128, 0),
            error: Color::Red,
            warning: Color::Rgb(200, 100, 0),

            text: Color::Black,
            text_secondary: Color::Rgb(60, 60, 60),
            text_muted: Color::Gray,

            background: Color::White,
            highlight_bg: Color::Rgb(230, 230, 230),
            surface: Color::Rgb(245, 245, 245),

            active: Color::Rgb(180, 100, 0),
            inactive: Color::Rgb(180, 180, 180),
        }
    }

    /// Theme for a dark/light flag.
    #[must_use]
    pub const fn for_dark_mode(dark: bool) -> Self {
        if dark {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

/// Source of the OS color-scheme preference.
pub trait ColorSchemeSource {
    /// Whether the OS prefers a dark color scheme.
    fn prefers_dark(&self) -> bool;
}

/// Reads the preference with the `dark-light` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsColorScheme;

impl ColorSchemeSource for OsColorScheme {
    fn prefers_dark(&self) -> bool {
        // Dark, unspecified and detection errors all fall back to dark
        !matches!(dark_light::detect(), Ok(dark_light::Mode::Light))
    }
}

/// A fixed preference, for tests and headless use.
#[derive(Debug, Clone, Copy)]
pub struct FixedColorScheme(pub bool);

impl ColorSchemeSource for FixedColorScheme {
    fn prefers_dark(&self) -> bool {
        self.0
    }
}

/// Holds the dark/light flag and the theme derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeController {
    dark: bool,
    theme: Theme,
}

impl ThemeController {
    /// Seeds the flag from the config mode, consulting `source` only in auto mode.
    #[must_use]
    pub fn new(source: &dyn ColorSchemeSource, mode: ThemeMode) -> Self {
        let dark = match mode {
            ThemeMode::Auto => source.prefers_dark(),
            ThemeMode::Dark => true,
            ThemeMode::Light => false,
        };

        Self {
            dark,
            theme: Theme::for_dark_mode(dark),
        }
    }

    /// Flips between dark and light.
    pub fn toggle(&mut self) {
        self.dark = !self.dark;
        self.theme = Theme::for_dark_mode(self.dark);
    }

    /// Current flag.
    #[must_use]
    pub const fn is_dark(&self) -> bool {
        self.dark
    }

    /// Current theme.
    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Title bar indicator for the current mode.
    #[must_use]
    pub const fn indicator(&self) -> &'static str {
        if self.dark {
            "☾ Dark"
        } else {
            "☀ Light"
        }
    }
}
