//! Static sample content served when the CMS is unconfigured or unreachable.
//!
//! Built once and shared read-only for the life of the process.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};

use crate::release::{
    ArchiveItem, Contributor, MediaKind, PeriodType, Release, ReleaseStatus, Section,
    SectionStatus,
};

/// Title of the sample release.
pub const MOCK_TITLE: &str = "Ambak Weekly";

/// Period key of the sample release.
pub const MOCK_PERIOD_KEY: &str = "2025-W52";

static MOCK_RELEASE: LazyLock<Release> = LazyLock::new(build_release);
static MOCK_ARCHIVE: LazyLock<Vec<ArchiveItem>> = LazyLock::new(build_archive);

pub fn mock_release() -> &'static Release {
    &MOCK_RELEASE
}

pub fn mock_archive() -> &'static [ArchiveItem] {
    &MOCK_ARCHIVE
}

fn timestamp(rfc3339: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(rfc3339)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn section(
    sort: i64,
    title: &str,
    description: &str,
    scopes: &[&str],
    makers: &[(&str, &str)],
    image: &str,
) -> Section {
    Section {
        id: format!("section-{sort}"),
        title: title.to_string(),
        description: description.to_string(),
        sort,
        status: SectionStatus::Published,
        scopes: scopes.iter().map(|s| s.to_string()).collect(),
        contributors: makers
            .iter()
            .map(|(name, email)| Contributor::new(name, "", email))
            .collect(),
        media_kind: MediaKind::Image,
        media_url: Some(format!("https://placehold.co/600x400/{image}")),
        cta_link: None,
    }
}

fn build_release() -> Release {
    Release {
        id: "mock-001".to_string(),
        scope: "finance".to_string(),
        period_type: PeriodType::Week,
        period_key: MOCK_PERIOD_KEY.to_string(),
        title: MOCK_TITLE.to_string(),
        summary: "At Ambak, we ship because you ask for it. But sometimes the team spots an \
                  opportunity for a small fix that unlocks big improvements in your workflow. \
                  Here's what we built this week."
            .to_string(),
        status: ReleaseStatus::Published,
        date_created: timestamp("2025-12-27T10:30:00Z"),
        sections: vec![
            section(
                1,
                "Raycast-Style Quick Actions",
                "You can now use command-bar style navigation throughout Finance and Yoddha. \
                 The first thing it unlocked is instant tab switching: open any screen from \
                 anywhere with just a few keystrokes.",
                &["finance", "yoddha"],
                &[("Aniket", "aniket@ambak.com"), ("Priya", "priya@ambak.com")],
                "667eea/ffffff?text=Quick+Actions",
            ),
            section(
                2,
                "Search and Remember",
                "Now you can search your workspace memory directly from the Tab Overflow menu. \
                 Click the dropdown in the top right to search open or recently closed tabs, \
                 or let the system find it in memory for you.",
                &["finance"],
                &[("Rahul", "rahul@ambak.com")],
                "764ba2/ffffff?text=Search+Memory",
            ),
            section(
                3,
                "Bookmarks Meet Search",
                "We've added bookmarks to Command Bar search results and ranked them just like \
                 your browsing history. Your most important resources are now always within \
                 reach.",
                &["yoddha", "sangam"],
                &[("Sanjay", "sanjay@ambak.com"), ("Meera", "meera@ambak.com")],
                "f093fb/ffffff?text=Bookmarks",
            ),
            section(
                4,
                "New Payout Reconciliation View",
                "The payout dashboard now groups transactions by status and highlights \
                 discrepancies automatically. Finance teams can reconcile weekly payouts in \
                 minutes instead of hours.",
                &["finance"],
                &[("Deepak", "deepak@ambak.com")],
                "4facfe/ffffff?text=Payout+Reconciliation",
            ),
            section(
                5,
                "MIS Screen Performance Boost",
                "The MIS dashboard now loads 3x faster with large datasets. Reports that used \
                 to take 20 seconds now appear in under 7.",
                &["yoddha"],
                &[("Arjun", "arjun@ambak.com"), ("Neha", "neha@ambak.com")],
                "00f2fe/ffffff?text=MIS+Performance",
            ),
        ],
    }
}

fn build_archive() -> Vec<ArchiveItem> {
    [
        ("2025-W52", "Issue 003", "2025-12-27T10:30:00Z", ReleaseStatus::Published),
        ("2025-W51", "Issue 002", "2025-12-20T10:30:00Z", ReleaseStatus::Archived),
        ("2025-W50", "Issue 001", "2025-12-13T10:30:00Z", ReleaseStatus::Archived),
        ("2025-nov", "November 2025", "2025-11-30T10:30:00Z", ReleaseStatus::Archived),
        ("2025-oct", "October 2025", "2025-10-31T10:30:00Z", ReleaseStatus::Archived),
        ("2025-sep", "September 2025", "2025-09-30T10:30:00Z", ReleaseStatus::Archived),
        ("2025-aug", "August 2025", "2025-08-31T10:30:00Z", ReleaseStatus::Archived),
    ]
    .into_iter()
    .map(|(key, title, published, status)| ArchiveItem {
        period_key: key.to_string(),
        title: title.to_string(),
        published_at: timestamp(published),
        status,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_release_is_displayable() {
        let release = mock_release();
        assert_eq!(release.title, MOCK_TITLE);
        assert_eq!(release.period_key, MOCK_PERIOD_KEY);
        assert_eq!(release.sections.len(), 5);
        assert!(release.date_created.is_some());
        for pair in release.sections.windows(2) {
            assert!(pair[0].sort <= pair[1].sort);
        }
    }

    #[test]
    fn mock_archive_newest_first() {
        let archive = mock_archive();
        assert_eq!(archive.len(), 7);
        assert_eq!(archive[0].period_key, MOCK_PERIOD_KEY);
        assert!(archive.iter().all(|item| item.published_at.is_some()));
        for pair in archive.windows(2) {
            assert!(pair[0].published_at > pair[1].published_at);
        }
    }
}
