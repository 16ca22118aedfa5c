//! CMS access layer: REST client, connection settings, and fallback-aware release queries.

pub mod client;
pub mod config;
pub mod facade;

pub use client::{CmsError, ContentClient, Query};
pub use config::{CmsConfig, CmsMode};
pub use facade::{ReleaseNotes, ReleasePage, with_fallback};
