//! Turn raw CMS records into display-ready view models.
//!
//! Everything here is pure: the same raw record always yields the same
//! [`Release`], and no I/O happens. The CMS base address is passed in only
//! to resolve internally hosted media into absolute asset URLs.

use tracing::debug;

use crate::ParseError;
use crate::release::{
    Contributor, RawContributorJunction, RawRelease, RawSection, Release, Section, SectionStatus,
};
use crate::scope::is_all_scopes;

/// Absolute URL of an internally hosted asset: `<base>/assets/<file_id>`.
pub fn asset_url(asset_base: &str, file_id: &str) -> String {
    format!("{}/assets/{}", asset_base.trim_end_matches('/'), file_id)
}

/// Resolve a section's display URL.
///
/// A file reference wins over an external URL; with neither (or only empty
/// strings) the section has no media.
pub fn resolve_media_url(raw: &RawSection, asset_base: &str) -> Option<String> {
    let file = raw.media_file.as_deref().filter(|id| !id.is_empty());
    let external = raw.media_url.as_deref().filter(|url| !url.is_empty());
    match (file, external) {
        (Some(id), _) => Some(asset_url(asset_base, id)),
        (None, Some(url)) => Some(url.to_string()),
        (None, None) => None,
    }
}

/// Flatten a junction row into a contributor. A missing user yields empty fields.
pub fn parse_contributor(junction: RawContributorJunction) -> Contributor {
    let user = junction.directus_users_id.unwrap_or_default();
    Contributor {
        first_name: user.first_name,
        last_name: user.last_name,
        email: user.email,
    }
}

pub fn parse_section(raw: RawSection, asset_base: &str) -> Section {
    let media_url = resolve_media_url(&raw, asset_base);
    Section {
        id: raw.id,
        title: raw.title,
        description: raw.description,
        sort: raw.sort,
        status: raw.status,
        scopes: raw.scopes,
        contributors: raw.contributors.into_iter().map(parse_contributor).collect(),
        media_kind: raw.media_type,
        media_url,
        cta_link: raw.cta_link.filter(|link| !link.is_empty()),
    }
}

/// Parse a release, keeping only published sections in ascending `sort` order.
///
/// Sections with equal `sort` keep their source order.
pub fn parse_release(raw: RawRelease, asset_base: &str) -> Release {
    let total = raw.sections.len();
    let mut sections: Vec<Section> = raw
        .sections
        .into_iter()
        .filter(|s| s.status == SectionStatus::Published)
        .map(|s| parse_section(s, asset_base))
        .collect();
    // `sort_by_key` is stable.
    sections.sort_by_key(|s| s.sort);

    debug!(
        period_key = %raw.period_key,
        total,
        published = sections.len(),
        "parsed release"
    );

    Release {
        id: raw.id,
        scope: raw.scope,
        period_type: raw.period_type,
        period_key: raw.period_key,
        title: raw.title,
        summary: raw.summary,
        status: raw.status,
        date_created: raw.date_created,
        sections,
    }
}

/// Decode an untyped CMS record and parse it.
pub fn parse_release_value(
    value: serde_json::Value,
    asset_base: &str,
) -> Result<Release, ParseError> {
    let raw: RawRelease = serde_json::from_value(value)?;
    Ok(parse_release(raw, asset_base))
}

/// Keep only the sections tagged with `scope`, preserving order.
///
/// `None`, an empty scope and the "all" sentinel leave the release untouched.
/// Unknown scopes simply match nothing.
pub fn filter_by_scope(mut release: Release, scope: Option<&str>) -> Release {
    let Some(scope) = scope.map(str::trim).filter(|s| !s.is_empty()) else {
        return release;
    };
    if is_all_scopes(scope) {
        return release;
    }
    release.sections.retain(|section| section.in_scope(scope));
    release
}
