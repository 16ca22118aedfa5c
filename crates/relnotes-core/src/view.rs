//! Presentation helpers derived from parsed releases.

use std::collections::HashSet;

use crate::mock::MOCK_TITLE;
use crate::release::{ArchiveItem, Contributor, Release, Section};

/// Issue number shown in the header: the last three digits of the period key.
///
/// "2025-W52" → "552"; a key without digits reads as "001".
pub fn issue_number(period_key: &str) -> String {
    let digits: Vec<char> = period_key.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return "001".to_string();
    }
    digits[digits.len().saturating_sub(3)..].iter().collect()
}

/// Release title, falling back to the publication name when blank.
pub fn display_title(release: &Release) -> &str {
    let title = release.title.trim();
    if title.is_empty() { MOCK_TITLE } else { title }
}

/// Everyone credited across `sections`, de-duplicated by email.
///
/// First occurrence wins; contributors without an email are skipped.
pub fn unique_contributors(sections: &[Section]) -> Vec<&Contributor> {
    let mut seen = HashSet::new();
    sections
        .iter()
        .flat_map(|section| &section.contributors)
        .filter(|c| !c.email.is_empty() && seen.insert(c.email.as_str()))
        .collect()
}

/// Archive entries bucketed by "Month Year", in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveGroup<'a> {
    pub label: String,
    pub items: Vec<&'a ArchiveItem>,
}

pub fn group_archive_by_month(items: &[ArchiveItem]) -> Vec<ArchiveGroup<'_>> {
    let mut groups: Vec<ArchiveGroup<'_>> = Vec::new();
    for item in items {
        let label = item
            .published_at
            .map(|ts| ts.format("%B %Y").to_string())
            .unwrap_or_else(|| "Undated".to_string());
        match groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.items.push(item),
            None => groups.push(ArchiveGroup {
                label,
                items: vec![item],
            }),
        }
    }
    groups
}

/// Archive entries other than the release currently on screen.
pub fn archive_excluding<'a>(
    archive: &'a [ArchiveItem],
    period_key: &str,
) -> Vec<&'a ArchiveItem> {
    archive
        .iter()
        .filter(|item| item.period_key != period_key)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{mock_archive, mock_release};

    #[test]
    fn issue_number_from_key() {
        assert_eq!(issue_number("2025-W52"), "552");
        assert_eq!(issue_number("W7"), "7");
        assert_eq!(issue_number("2025-nov"), "025");
        assert_eq!(issue_number("latest"), "001");
        assert_eq!(issue_number(""), "001");
    }

    #[test]
    fn blank_title_falls_back() {
        let mut release = mock_release().clone();
        assert_eq!(display_title(&release), "Ambak Weekly");
        release.title = "Year in Review".into();
        assert_eq!(display_title(&release), "Year in Review");
        release.title = "  ".into();
        assert_eq!(display_title(&release), "Ambak Weekly");
    }

    #[test]
    fn contributors_deduplicated_by_email() {
        let mut sections = mock_release().sections.clone();
        sections[1].contributors.push(Contributor::new("Aniket", "R", "aniket@ambak.com"));
        sections[1].contributors.push(Contributor::new("Ghost", "", ""));
        let makers = unique_contributors(&sections);
        let emails: Vec<&str> = makers.iter().map(|c| c.email.as_str()).collect();
        assert_eq!(
            emails,
            vec![
                "aniket@ambak.com",
                "priya@ambak.com",
                "rahul@ambak.com",
                "sanjay@ambak.com",
                "meera@ambak.com",
                "deepak@ambak.com",
                "arjun@ambak.com",
                "neha@ambak.com",
            ]
        );
        // First occurrence is kept.
        assert_eq!(makers[0].last_name, "");
    }

    #[test]
    fn archive_grouped_by_month() {
        let groups = group_archive_by_month(mock_archive());
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "December 2025",
                "November 2025",
                "October 2025",
                "September 2025",
                "August 2025"
            ]
        );
        assert_eq!(groups[0].items.len(), 3);
    }

    #[test]
    fn archive_excludes_current() {
        let rest = archive_excluding(mock_archive(), "2025-W52");
        assert_eq!(rest.len(), mock_archive().len() - 1);
        assert!(rest.iter().all(|item| item.period_key != "2025-W52"));
    }
}
