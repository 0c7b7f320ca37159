//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::branding::{APP_DATA_DIR, CONFIG_FILE_NAME};

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    /// Follow the OS color scheme at startup
    #[default]
    Auto,
    /// Always start in dark mode
    Dark,
    /// Always start in light mode
    Light,
}

/// Resume download settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeConfig {
    /// Location of the hosted resume file
    pub url: String,
    /// File name the downloaded bytes are saved under
    pub file_name: String,
    /// Directory to save into (defaults to the user's download directory)
    #[serde(default)]
    pub save_dir: Option<PathBuf>,
    /// Transfer timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ResumeConfig {
    fn default() -> Self {
        Self {
            url: "https://adashexplorer.github.io/branding/assets/Abinash_Dash_Resume.pdf"
                .to_string(),
            file_name: "Resume.pdf".to_string(),
            save_dir: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ResumeConfig {
    /// Directory the resume is saved into.
    ///
    /// Falls back to the platform download directory, then the working directory.
    #[must_use]
    pub fn resolved_save_dir(&self) -> PathBuf {
        self.save_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Transfer timeout as a duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Contact relay (EmailJS) settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactConfig {
    /// REST endpoint that accepts the message
    pub endpoint: String,
    /// EmailJS service identifier
    pub service_id: String,
    /// EmailJS template identifier
    pub template_id: String,
    /// EmailJS public key (client credential)
    pub public_key: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.emailjs.com/api/v1.0/email/send".to_string(),
            service_id: "service_73dljle".to_string(),
            template_id: "template_ohx24dh".to_string(),
            public_key: "iuOw_bKmUTX4yraql".to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ContactConfig {
    /// Request timeout as a duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// UI preferences configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme mode preference (Auto, Dark, Light)
    #[serde(default)]
    pub theme_mode: ThemeMode,
    /// How long the splash screen stays up, in milliseconds
    #[serde(default = "default_splash_ms")]
    pub splash_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme_mode: ThemeMode::default(),
            splash_ms: default_splash_ms(),
        }
    }
}

impl UiConfig {
    /// Splash duration.
    #[must_use]
    pub const fn splash_duration(&self) -> Duration {
        Duration::from_millis(self.splash_ms)
    }
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_splash_ms() -> u64 {
    1500
}

/// Upper bound for the splash delay.
const MAX_SPLASH_MS: u64 = 10_000;

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/Folio/config.toml`
/// - macOS: `~/Library/Application Support/Folio/config.toml`
/// - Windows: `%APPDATA%\Folio\config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Resume download settings
    #[serde(default)]
    pub resume: ResumeConfig,
    /// Contact relay settings
    #[serde(default)]
    pub contact: ContactConfig,
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_DATA_DIR);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Loads configuration from a path.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to an explicit path using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - resume and contact URLs use http(s)
    /// - the resume file name is a bare file name
    /// - timeouts are non-zero
    /// - the splash delay stays under ten seconds
    pub fn validate(&self) -> Result<()> {
        validate_url("resume.url", &self.resume.url)?;
        validate_url("contact.endpoint", &self.contact.endpoint)?;

        let file_name = self.resume.file_name.as_str();
        if file_name.trim().is_empty() {
            anyhow::bail!("resume.file_name cannot be empty");
        }
        if file_name.trim() != file_name {
            anyhow::bail!(
                "resume.file_name must not start or end with whitespace, got: {file_name:?}"
            );
        }
        if file_name.contains('/')
            || file_name.contains('\\')
            || matches!(file_name, "." | "..")
        {
            anyhow::bail!(
                "resume.file_name must be a plain file name, got: {}",
                self.resume.file_name
            );
        }

        if self.resume.timeout_secs == 0 {
            anyhow::bail!("resume.timeout_secs must be greater than zero");
        }
        if self.contact.timeout_secs == 0 {
            anyhow::bail!("contact.timeout_secs must be greater than zero");
        }

        for (key, value) in [
            ("contact.service_id", &self.contact.service_id),
            ("contact.template_id", &self.contact.template_id),
            ("contact.public_key", &self.contact.public_key),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("{key} cannot be empty");
            }
        }

        if self.ui.splash_ms > MAX_SPLASH_MS {
            anyhow::bail!(
                "ui.splash_ms must be at most {MAX_SPLASH_MS}, got {}",
                self.ui.splash_ms
            );
        }

        Ok(())
    }
}

fn validate_url(key: &str, url: &str) -> Result<()> {
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(())
    } else {
        anyhow::bail!("{key} must be an http(s) URL, got: {url}")
    }
}
