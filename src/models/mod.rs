//! Data models for the portfolio content.
//!
//! This module contains the static content shown on screen: the owner's
//! profile and the projects/blog catalog. Models are independent of UI code.

pub mod catalog;
pub mod profile;

// Re-export all model types
pub use catalog::{Catalog, CatalogTab, ContentItem, BLOG_POSTS, PROJECTS};
pub use profile::{Profile, SocialLink, PROFILE};
