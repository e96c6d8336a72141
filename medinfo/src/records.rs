//! Presentation helpers for medicine records: dashboard stats, QR download
//! names, dates.

#[cfg(test)]
#[path = "records_test.rs"]
mod records_test;

use crate::types::{InfoRecord, RecordPage};

/// Records per dashboard page.
pub const PAGE_LIMIT: u32 = 10;

pub const DELETE_CONFIRM_MESSAGE: &str = "Are you sure you want to delete this record? This action cannot be undone.";

/// Summary cards shown above the record list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DashboardStats {
    /// All records the admin owns, from the pagination metadata.
    pub total: i64,
    /// Active records on the current page only.
    pub active_on_page: usize,
    /// Views summed over the current page only.
    pub views_on_page: i64,
}

impl DashboardStats {
    #[must_use]
    pub fn from_page(page: &RecordPage) -> Self {
        Self {
            total: page.pagination.total,
            active_on_page: page.info_records.iter().filter(|r| r.is_active).count(),
            views_on_page: page.info_records.iter().map(|r| r.view_count).sum(),
        }
    }
}

/// Download name for a record's QR image:
/// `qr-code-<name with whitespace runs as dashes, lowercased>.png`.
#[must_use]
pub fn qr_filename(medicine_name: &str) -> String {
    let mut slug = String::with_capacity(medicine_name.len());
    let mut in_space = false;
    for c in medicine_name.chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
        } else {
            slug.extend(c.to_lowercase());
            in_space = false;
        }
    }
    format!("qr-code-{slug}.png")
}

/// Calendar date part of a service timestamp (`2025-03-01T10:00:00Z` ->
/// `2025-03-01`). Anything unrecognised is shown as-is.
#[must_use]
pub fn display_date(timestamp: &str) -> &str {
    let trimmed = timestamp.trim();
    match trimmed.split_once('T') {
        Some((date, _)) if looks_like_date(date) => date,
        _ => trimmed,
    }
}

fn looks_like_date(s: &str) -> bool {
    let parts: Vec<&str> = s.split('-').collect();
    parts.len() == 3
        && parts
            .iter()
            .zip([4, 2, 2])
            .all(|(p, len)| p.len() == len && p.bytes().all(|b| b.is_ascii_digit()))
}

#[must_use]
pub fn status_label(record: &InfoRecord) -> &'static str {
    if record.is_active { "Active" } else { "Inactive" }
}

/// Label of the button that flips [`InfoRecord::is_active`].
#[must_use]
pub fn toggle_label(record: &InfoRecord) -> &'static str {
    if record.is_active { "Disable" } else { "Enable" }
}

/// Page buttons to offer: every page number, or none for a single page.
#[must_use]
pub fn page_numbers(page: &RecordPage) -> Vec<u32> {
    let pages = u32::try_from(page.pagination.pages).unwrap_or(0);
    if pages > 1 { (1..=pages).collect() } else { Vec::new() }
}
