//! Release-note types shared between the CMS layer and the renderers.
//!
//! `Raw*` types mirror the records the CMS returns and are deserialized
//! leniently: missing or `null` scalars become their default. The parsed
//! types are display-ready view models produced by [`crate::parse`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit JSON `null` the same as a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept an expanded user object; anything else (a bare id from an
/// unexpanded relation, a number, a malformed object) reads as no user.
fn lenient_user<'de, D>(deserializer: D) -> Result<Option<RawUser>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

/// Junction rows that are not objects still count as an (anonymous) contributor.
fn lenient_junctions<'de, D>(
    deserializer: D,
) -> Result<Vec<RawContributorJunction>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?;
    let rows = rows.unwrap_or_default();
    Ok(rows
        .into_iter()
        .map(|row| serde_json::from_value(row).unwrap_or_default())
        .collect())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    #[default]
    Week,
    Month,
    Year,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseStatus {
    #[default]
    Draft,
    Published,
    Archived,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionStatus {
    #[default]
    Draft,
    Approved,
    Published,
    #[serde(other)]
    Unknown,
}

/// How a section's media is presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    #[default]
    #[serde(other)]
    None,
}

// ── Raw CMS records ──

/// A `directus_users` record nested inside a contributor junction.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawUser {
    #[serde(deserialize_with = "nullable")]
    pub first_name: String,
    #[serde(deserialize_with = "nullable")]
    pub last_name: String,
    #[serde(deserialize_with = "nullable")]
    pub email: String,
}

/// Section ↔ user junction row.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawContributorJunction {
    #[serde(deserialize_with = "lenient_user")]
    pub directus_users_id: Option<RawUser>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSection {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub sort: i64,
    #[serde(deserialize_with = "nullable")]
    pub status: SectionStatus,
    #[serde(deserialize_with = "nullable")]
    pub scopes: Vec<String>,
    #[serde(deserialize_with = "lenient_junctions")]
    pub contributors: Vec<RawContributorJunction>,
    #[serde(deserialize_with = "nullable")]
    pub media_type: MediaKind,
    /// CMS file id of an internally hosted asset.
    #[serde(deserialize_with = "nullable")]
    pub media_file: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub media_url: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub cta_link: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRelease {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub scope: String,
    #[serde(deserialize_with = "nullable")]
    pub period_type: PeriodType,
    #[serde(deserialize_with = "nullable")]
    pub period_key: String,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    /// HTML fragment.
    #[serde(deserialize_with = "nullable")]
    pub summary: String,
    #[serde(deserialize_with = "nullable")]
    pub status: ReleaseStatus,
    #[serde(deserialize_with = "nullable")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "nullable")]
    pub sections: Vec<RawSection>,
}

/// The `release_notes_settings` singleton: points at the current release.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(deserialize_with = "nullable")]
    pub current_period_type: PeriodType,
    #[serde(deserialize_with = "nullable")]
    pub current_period_key: String,
}

// ── View models ──

/// A person credited on a section. Identity is the email address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Contributor {
    pub fn new(first_name: &str, last_name: &str, email: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
        }
    }

    /// Upper-cased initials, or `"?"` when both names are empty.
    pub fn initials(&self) -> String {
        let initials: String = [&self.first_name, &self.last_name]
            .iter()
            .filter_map(|name| name.chars().next())
            .flat_map(char::to_uppercase)
            .collect();
        if initials.is_empty() {
            "?".to_string()
        } else {
            initials
        }
    }

    /// Non-empty name parts joined by a space, or `"Unknown"`.
    pub fn full_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_str(), self.last_name.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect();
        if parts.is_empty() {
            "Unknown".to_string()
        } else {
            parts.join(" ")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    /// HTML fragment.
    pub description: String,
    pub sort: i64,
    pub status: SectionStatus,
    pub scopes: Vec<String>,
    pub contributors: Vec<Contributor>,
    pub media_kind: MediaKind,
    /// Resolved display URL; `None` renders the no-media layout.
    pub media_url: Option<String>,
    pub cta_link: Option<String>,
}

impl Section {
    pub fn has_media(&self) -> bool {
        self.media_url.is_some()
    }

    /// Case-insensitive membership test against the section's scope tags.
    pub fn in_scope(&self, scope: &str) -> bool {
        let scope = scope.to_lowercase();
        self.scopes.iter().any(|tag| tag.to_lowercase() == scope)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub id: String,
    pub scope: String,
    pub period_type: PeriodType,
    pub period_key: String,
    pub title: String,
    /// HTML fragment.
    pub summary: String,
    pub status: ReleaseStatus,
    pub date_created: Option<DateTime<Utc>>,
    /// Published sections only, ascending by `sort`.
    pub sections: Vec<Section>,
}

/// Lightweight release projection for archive listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveItem {
    #[serde(default, deserialize_with = "nullable")]
    pub period_key: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    /// The CMS only tracks creation time, which stands in as the published time.
    #[serde(default, alias = "date_created", deserialize_with = "nullable")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "nullable")]
    pub status: ReleaseStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_section_null_fields_default() {
        let raw: RawSection = serde_json::from_value(json!({
            "id": "s1",
            "title": null,
            "sort": null,
            "scopes": null,
            "contributors": [{ "directus_users_id": null }],
            "media_type": null
        }))
        .unwrap();
        assert_eq!(raw.title, "");
        assert_eq!(raw.sort, 0);
        assert!(raw.scopes.is_empty());
        assert_eq!(raw.status, SectionStatus::Draft);
        assert_eq!(raw.media_type, MediaKind::None);
        assert!(raw.contributors[0].directus_users_id.is_none());
    }

    #[test]
    fn unknown_status_is_not_published() {
        let raw: RawSection = serde_json::from_value(json!({ "status": "in_review" })).unwrap();
        assert_eq!(raw.status, SectionStatus::Unknown);
    }

    #[test]
    fn archive_item_reads_date_created() {
        let item: ArchiveItem = serde_json::from_value(json!({
            "period_key": "2025-W52",
            "title": "Issue 003",
            "date_created": "2025-12-27T10:30:00.000Z",
            "status": "published"
        }))
        .unwrap();
        assert_eq!(
            item.published_at.unwrap().to_rfc3339(),
            "2025-12-27T10:30:00+00:00"
        );
        assert_eq!(item.status, ReleaseStatus::Published);
    }

    #[test]
    fn contributor_initials() {
        assert_eq!(Contributor::new("aniket", "rao", "").initials(), "AR");
        assert_eq!(Contributor::new("Priya", "", "").initials(), "P");
        assert_eq!(Contributor::default().initials(), "?");
    }

    #[test]
    fn contributor_full_name() {
        assert_eq!(Contributor::new("Aniket", "Rao", "").full_name(), "Aniket Rao");
        assert_eq!(Contributor::new("", "Rao", "").full_name(), "Rao");
        assert_eq!(Contributor::default().full_name(), "Unknown");
    }

    #[test]
    fn section_scope_match_ignores_case() {
        let section = Section {
            id: "s1".into(),
            title: String::new(),
            description: String::new(),
            sort: 1,
            status: SectionStatus::Published,
            scopes: vec!["Finance".into()],
            contributors: vec![],
            media_kind: MediaKind::None,
            media_url: None,
            cta_link: None,
        };
        assert!(section.in_scope("finance"));
        assert!(section.in_scope("FINANCE"));
        assert!(!section.in_scope("sangam"));
    }

    #[test]
    fn scope_match_folds_non_ascii_case() {
        let section = Section {
            id: "s1".into(),
            title: String::new(),
            description: String::new(),
            sort: 1,
            status: SectionStatus::Published,
            scopes: vec!["ÉQUIPE".into()],
            contributors: vec![],
            media_kind: MediaKind::None,
            media_url: None,
            cta_link: None,
        };
        assert!(section.in_scope("équipe"));
        assert!(section.in_scope("Équipe"));
    }

    #[test]
    fn unexpanded_user_reads_as_none() {
        let junction: RawContributorJunction =
            serde_json::from_value(json!({ "directus_users_id": "9b1e-uuid" })).unwrap();
        assert!(junction.directus_users_id.is_none());
        let junction: RawContributorJunction =
            serde_json::from_value(json!({ "directus_users_id": { "first_name": 7 } })).unwrap();
        assert!(junction.directus_users_id.is_none());
    }
}
