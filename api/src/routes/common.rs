//! Shared helpers for list endpoints: pagination defaults and filter
//! normalization.

pub const DEFAULT_PER_PAGE: u64 = 20;
pub const MAX_PER_PAGE: u64 = 100;

/// Clamps pagination query values to `(page >= 1, 1 <= per_page <= 100)`.
pub fn normalize_pagination(page: Option<u64>, per_page: Option<u64>) -> (u64, u64) {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);
    (page, per_page)
}

/// The SPA sends empty strings for untouched filter inputs; treat those as
/// absent.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim().to_owned();
        if trimmed.is_empty() { None } else { Some(trimmed) }
    })
}

/// Splits a `sort` parameter (`"title,-created_at"`) into `(field, desc)`
/// pairs, skipping empty segments.
pub fn parse_sort(sort: Option<&str>) -> Vec<(String, bool)> {
    sort.unwrap_or("")
        .split(',')
        .filter_map(|part| {
            let part = part.trim();
            if part.is_empty() {
                return None;
            }
            match part.strip_prefix('-') {
                Some(field) => Some((field.to_owned(), true)),
                None => Some((part.to_owned(), false)),
            }
        })
        .collect()
}
