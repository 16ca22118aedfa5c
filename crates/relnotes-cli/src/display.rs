//! Plain-text rendering of release pages for the terminal.

use std::fmt::{self, Write};

use chrono::{DateTime, Utc};
use relnotes_cms::ReleasePage;
use relnotes_core::view::{
    display_title, group_archive_by_month, issue_number, unique_contributors,
};
use relnotes_core::{ArchiveItem, Section, list_scopes, scope_label};

const RULE: &str = "────────────────────────────────────────";

// ── Public API ──

/// Render a release with its sections, makers, and the rest of the archive.
pub fn render_release_page(
    out: &mut impl Write,
    page: &ReleasePage,
    scope: &str,
) -> fmt::Result {
    let release = &page.release;

    writeln!(out, "=== {} ===", display_title(release))?;
    writeln!(
        out,
        "Issue {} · {} · {}",
        issue_number(&release.period_key),
        release.period_key,
        format_date(release.date_created)
    )?;
    writeln!(out, "Showing: {}", scope_label(scope))?;
    let summary = strip_html(&release.summary);
    if !summary.is_empty() {
        writeln!(out, "\n{summary}")?;
    }

    if release.sections.is_empty() {
        writeln!(out, "\nNo updates for this project in this release.")?;
    }
    for (i, section) in release.sections.iter().enumerate() {
        writeln!(out, "\n{RULE}")?;
        render_section(out, i + 1, section)?;
    }

    let makers = unique_contributors(&release.sections);
    if !makers.is_empty() {
        writeln!(out, "\n{RULE}\nMeet the Makers")?;
        for maker in &makers {
            writeln!(out, "  [{}] {}", maker.initials(), maker.full_name())?;
        }
        writeln!(
            out,
            "  {} features shipped by {} team members",
            release.sections.len(),
            makers.len()
        )?;
    }

    if !page.archive.is_empty() {
        writeln!(out, "\n{RULE}\nArchive")?;
        for item in &page.archive {
            render_archive_item(out, item)?;
        }
    }
    Ok(())
}

/// Render the full archive grouped by month.
pub fn render_archive(out: &mut impl Write, items: &[ArchiveItem]) -> fmt::Result {
    writeln!(out, "=== Archive ===")?;
    writeln!(out, "Past releases and product updates")?;
    if items.is_empty() {
        return writeln!(out, "\nNo releases yet.");
    }
    for group in group_archive_by_month(items) {
        writeln!(out, "\n{}", group.label)?;
        for item in group.items {
            render_archive_item(out, item)?;
        }
    }
    Ok(())
}

pub fn render_scopes(out: &mut impl Write) -> fmt::Result {
    for scope in list_scopes() {
        writeln!(out, "{:<10} {}", scope.value, scope.label)?;
    }
    Ok(())
}

pub fn render_not_found(out: &mut impl Write, period_key: Option<&str>) -> fmt::Result {
    match period_key {
        Some(key) => writeln!(out, "Release \"{key}\" not found.")?,
        None => writeln!(out, "No current release is set.")?,
    }
    writeln!(out, "Try `relnotes latest` or browse `relnotes archive`.")
}

// ── Pieces ──

fn render_section(out: &mut impl Write, index: usize, section: &Section) -> fmt::Result {
    writeln!(out, "{index}. {}", section.title)?;
    if !section.scopes.is_empty() {
        writeln!(out, "   [{}]", section.scopes.join(", "))?;
    }
    let description = strip_html(&section.description);
    if !description.is_empty() {
        writeln!(out, "   {description}")?;
    }
    if let Some(url) = &section.media_url {
        writeln!(out, "   media: {url}")?;
    }
    if let Some(link) = &section.cta_link {
        writeln!(out, "   more: {link}")?;
    }
    if !section.contributors.is_empty() {
        let names: Vec<&str> = section
            .contributors
            .iter()
            .map(|c| c.first_name.as_str())
            .filter(|name| !name.is_empty())
            .collect();
        if !names.is_empty() {
            writeln!(out, "   by {}", names.join(", "))?;
        }
    }
    Ok(())
}

fn render_archive_item(out: &mut impl Write, item: &ArchiveItem) -> fmt::Result {
    writeln!(
        out,
        "  {:<12} {:<20} {}",
        item.period_key,
        item.title,
        format_date(item.published_at)
    )
}

fn format_date(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|ts| ts.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| "undated".to_string())
}

/// Drop HTML tags, decode the common entities, and collapse whitespace.
pub fn strip_html(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => {
                in_tag = true;
                text.push(' ');
            }
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
