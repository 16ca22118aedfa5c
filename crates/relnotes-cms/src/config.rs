//! CMS connection settings.

use std::time::Duration;

/// Environment variable holding the CMS base URL.
pub const CMS_URL_ENV: &str = "DIRECTUS_URL";
/// Environment variable holding the CMS access token.
pub const CMS_TOKEN_ENV: &str = "DIRECTUS_TOKEN";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Where release content comes from, decided once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CmsMode {
    Live { base_url: String, token: String },
    /// No CMS configured: every query answers from the built-in sample content.
    #[default]
    Mock,
}

impl CmsMode {
    /// Live mode only when both the URL and token are present and non-blank.
    pub fn from_parts(base_url: Option<String>, token: Option<String>) -> Self {
        let base_url = base_url.filter(|v| !v.trim().is_empty());
        let token = token.filter(|v| !v.trim().is_empty());
        match (base_url, token) {
            (Some(base_url), Some(token)) => CmsMode::Live {
                base_url: base_url.trim().trim_end_matches('/').to_string(),
                token: token.trim().to_string(),
            },
            _ => CmsMode::Mock,
        }
    }

    /// Read [`CMS_URL_ENV`] and [`CMS_TOKEN_ENV`].
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the mode from any variable source keyed like the environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self::from_parts(lookup(CMS_URL_ENV), lookup(CMS_TOKEN_ENV))
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, CmsMode::Mock)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmsConfig {
    pub mode: CmsMode,
    pub timeout: Duration,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            mode: CmsMode::Mock,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl CmsConfig {
    pub fn new(mode: CmsMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        Self::new(CmsMode::from_env())
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
