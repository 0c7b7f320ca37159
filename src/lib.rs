//! Folio library
//!
//! A terminal portfolio: profile, projects and blog catalog, a resume
//! download with progress and a persisted counter, and a contact form
//! relayed through a hosted email service.

// Module declarations
pub mod branding;
pub mod config;
pub mod contact;
pub mod download;
pub mod models;
pub mod services;
pub mod shortcuts;
pub mod tui;

#[cfg(test)]
mod test_http;
