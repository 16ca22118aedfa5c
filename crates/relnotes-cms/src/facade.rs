//! Release-note queries with a single, uniform fallback policy.
//!
//! Each read exists twice:
//!
//! - `try_*` returns `Ok(Some(_))` for a hit, `Ok(None)` for a legitimate
//!   absence, and `Err(_)` for an infrastructure failure.
//! - the plain variant runs `try_*` through [`with_fallback`], which turns
//!   any `Err` into the mock answer. Absence is passed through untouched so
//!   callers can render a not-found state.

use std::future::Future;

use relnotes_core::view::archive_excluding;
use relnotes_core::{
    ArchiveItem, Release, Settings, filter_by_scope, mock_archive, mock_release,
    parse_release_value,
};
use tracing::{error, info, warn};

use crate::client::{CmsError, ContentClient, Query};
use crate::config::{CmsConfig, CmsMode};

const RELEASES_ENDPOINT: &str = "/items/release_notes";
const SETTINGS_ENDPOINT: &str = "/items/release_notes_settings";

/// Releases visible on the site.
const VISIBLE_STATUSES: &[&str] = &["published", "archived"];

const RELEASE_FIELDS: &[&str] = &[
    "id",
    "scope",
    "period_type",
    "period_key",
    "title",
    "summary",
    "status",
    "date_created",
    "sections.id",
    "sections.title",
    "sections.description",
    "sections.sort",
    "sections.status",
    "sections.scopes",
    "sections.media_type",
    "sections.media_file",
    "sections.media_url",
    "sections.cta_link",
    "sections.contributors.directus_users_id.first_name",
    "sections.contributors.directus_users_id.last_name",
    "sections.contributors.directus_users_id.email",
];

const ARCHIVE_FIELDS: &[&str] = &["period_key", "title", "date_created", "status"];

/// Run `attempt`; on failure log it and answer with `fallback` instead.
pub async fn with_fallback<T, F, M>(operation: &'static str, attempt: F, fallback: M) -> T
where
    F: Future<Output = Result<T, CmsError>>,
    M: FnOnce() -> T,
{
    match attempt.await {
        Ok(value) => value,
        Err(err) => {
            error!(operation, error = %err, "CMS request failed, serving mock data");
            fallback()
        }
    }
}

/// A release together with the archive shown beneath it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleasePage {
    pub release: Release,
    /// Every other visible release, newest first.
    pub archive: Vec<ArchiveItem>,
}

#[derive(Debug, Clone)]
enum Backend {
    Live(ContentClient),
    Mock,
}

/// Read-only access to release notes.
#[derive(Debug, Clone)]
pub struct ReleaseNotes {
    backend: Backend,
}

impl ReleaseNotes {
    pub fn new(config: CmsConfig) -> Result<Self, CmsError> {
        let backend = match config.mode {
            CmsMode::Live { base_url, token } => {
                info!(base_url = %base_url, timeout = ?config.timeout, "using CMS backend");
                Backend::Live(ContentClient::new(&base_url, &token, config.timeout)?)
            }
            CmsMode::Mock => {
                warn!("CMS not configured, serving mock release notes");
                Backend::Mock
            }
        };
        Ok(Self { backend })
    }

    /// Notes backed only by the built-in sample content.
    pub fn mock() -> Self {
        Self {
            backend: Backend::Mock,
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self.backend, Backend::Mock)
    }

    // ── Raw reads ──

    /// Period key of the current release, from the settings singleton.
    pub async fn try_current_release_key(&self) -> Result<Option<String>, CmsError> {
        let client = match &self.backend {
            Backend::Live(client) => client,
            Backend::Mock => return Ok(Some(mock_release().period_key.clone())),
        };

        let settings: Option<Settings> = client.fetch(SETTINGS_ENDPOINT, &Query::new()).await?;
        Ok(settings
            .map(|s| s.current_period_key)
            .filter(|key| !key.is_empty()))
    }

    /// Fetch a visible release by period key, optionally narrowed to one scope.
    pub async fn try_release(
        &self,
        period_key: &str,
        scope: Option<&str>,
    ) -> Result<Option<Release>, CmsError> {
        let client = match &self.backend {
            Backend::Live(client) => client,
            Backend::Mock => return Ok(Some(filter_by_scope(mock_release().clone(), scope))),
        };

        let query = Query::new()
            .filter_eq("period_key", period_key)
            .filter_in("status", VISIBLE_STATUSES)
            .fields(RELEASE_FIELDS)
            .sort("sections.sort");
        let records: Vec<serde_json::Value> = client
            .fetch(RELEASES_ENDPOINT, &query)
            .await?
            .ok_or_else(|| CmsError::MissingData {
                endpoint: RELEASES_ENDPOINT.to_string(),
            })?;

        let Some(record) = records.into_iter().next() else {
            info!(period_key, "release not found");
            return Ok(None);
        };
        let release = parse_release_value(record, client.base_url())?;
        Ok(Some(filter_by_scope(release, scope)))
    }

    /// Every visible release, newest first.
    pub async fn try_archive(&self) -> Result<Vec<ArchiveItem>, CmsError> {
        let client = match &self.backend {
            Backend::Live(client) => client,
            Backend::Mock => return Ok(mock_archive().to_vec()),
        };

        let query = Query::new()
            .filter_in("status", VISIBLE_STATUSES)
            .fields(ARCHIVE_FIELDS)
            .sort("-date_created");
        let mut items: Vec<ArchiveItem> = client
            .fetch(RELEASES_ENDPOINT, &query)
            .await?
            .ok_or_else(|| CmsError::MissingData {
                endpoint: RELEASES_ENDPOINT.to_string(),
            })?;
        // Undated items sink to the end.
        items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(items)
    }

    // ── Fallback-protected reads ──

    pub async fn current_release_key(&self) -> Option<String> {
        with_fallback("current_release_key", self.try_current_release_key(), || {
            Some(mock_release().period_key.clone())
        })
        .await
    }

    /// `None` only when the CMS has no such release; failures serve the mock release.
    pub async fn release(&self, period_key: &str, scope: Option<&str>) -> Option<Release> {
        with_fallback("release", self.try_release(period_key, scope), || {
            Some(filter_by_scope(mock_release().clone(), scope))
        })
        .await
    }

    pub async fn archive(&self) -> Vec<ArchiveItem> {
        with_fallback("archive", self.try_archive(), || mock_archive().to_vec()).await
    }

    // ── Page composition ──

    /// A release plus the archive of every other release, fetched concurrently.
    pub async fn release_page(
        &self,
        period_key: &str,
        scope: Option<&str>,
    ) -> Option<ReleasePage> {
        let (release, archive) = tokio::join!(self.release(period_key, scope), self.archive());
        let release = release?;
        let archive = archive_excluding(&archive, &release.period_key)
            .into_iter()
            .cloned()
            .collect();
        Some(ReleasePage { release, archive })
    }

    /// The page for the current release; `None` when no current release is set.
    pub async fn latest_page(&self, scope: Option<&str>) -> Option<ReleasePage> {
        let key = self.current_release_key().await?;
        self.release_page(&key, scope).await
    }
}
