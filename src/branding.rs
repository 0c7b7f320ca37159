//! Branding and application identity configuration.
//!
//! This module centralizes the application's names and the file names it
//! keeps under the platform config directory.

/// The human-readable display name of the application.
pub const APP_DISPLAY_NAME: &str = "Folio";

/// The binary/executable name (lowercase, no spaces).
pub const APP_BINARY_NAME: &str = "folio";

/// The directory name for application data (config, storage, logs).
///
/// Used in platform-specific paths:
/// - Linux: `~/.config/{APP_DATA_DIR}/`
/// - macOS: `~/Library/Application Support/{APP_DATA_DIR}/`
/// - Windows: `%APPDATA%\{APP_DATA_DIR}\`
pub const APP_DATA_DIR: &str = "Folio";

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Local key-value storage file name inside the data directory.
pub const STORAGE_FILE_NAME: &str = "storage.json";

/// Diagnostic log file name inside the data directory.
pub const LOG_FILE_NAME: &str = "folio.log";

/// Short description for help text.
pub const APP_DESCRIPTION: &str = "Terminal portfolio with resume download and contact relay";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branding_consistency() {
        assert_eq!(APP_BINARY_NAME, APP_BINARY_NAME.to_lowercase());
        assert!(!APP_BINARY_NAME.contains(' '));
        assert!(!APP_DATA_DIR.contains(' '));
    }

    #[test]
    fn test_data_file_names_are_distinct() {
        assert_ne!(CONFIG_FILE_NAME, STORAGE_FILE_NAME);
        assert_ne!(STORAGE_FILE_NAME, LOG_FILE_NAME);
        assert!(CONFIG_FILE_NAME.ends_with(".toml"));
        assert!(STORAGE_FILE_NAME.ends_with(".json"));
    }
}
