//! Filtering and pagination over scanned records.
//!
//! Every list endpoint follows the same pipeline: scan the whole table, keep
//! the records matching all supplied filters, count them, then cut one page.
//! Order is whatever the scan produced.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::fields::{number_field, playlist, song, str_field, user, Document};

/// Page selection. Absent (or zero) values fall back to page 1 and a page
/// size equal to the whole filtered set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number.
    pub page: Option<usize>,
    /// Page size.
    pub limit: Option<usize>,
}

/// One page of results plus the size of the filtered set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Number of records that passed the filters, before slicing.
    pub total: usize,
    /// The records of the requested page.
    pub items: Vec<T>,
}

impl Pagination {
    /// Slice `[(page - 1) * limit, (page - 1) * limit + limit)` out of `items`.
    #[must_use]
    pub fn apply<T>(&self, items: Vec<T>) -> Page<T> {
        let total = items.len();
        let page = self.page.filter(|p| *p > 0).unwrap_or(1);
        let limit = self.limit.filter(|l| *l > 0).unwrap_or(total);
        let start = (page - 1).saturating_mul(limit);

        Page {
            total,
            items: items.into_iter().skip(start).take(limit).collect(),
        }
    }
}

/// A record predicate built from query parameters.
pub trait RecordFilter {
    /// Whether the record passes every supplied criterion.
    fn matches(&self, record: &Document) -> bool;
}

/// Run the filter-then-paginate pipeline.
#[must_use]
pub fn filter_and_paginate<F: RecordFilter>(
    records: Vec<Document>,
    filter: &F,
    pagination: Pagination,
) -> Page<Document> {
    let filtered: Vec<_> = records.into_iter().filter(|r| filter.matches(r)).collect();
    pagination.apply(filtered)
}

/// Case-insensitive substring match on a string attribute. Missing or
/// non-string attributes never match.
#[must_use]
pub fn contains_ignore_case(record: &Document, field: &str, needle: &str) -> bool {
    str_field(record, field).is_some_and(|v| v.to_lowercase().contains(&needle.to_lowercase()))
}

/// User list criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Exact subscription tier.
    pub subscription: Option<String>,
    /// Admin flag.
    pub is_admin: Option<bool>,
}

impl RecordFilter for UserFilter {
    fn matches(&self, record: &Document) -> bool {
        if let Some(tier) = &self.subscription {
            if str_field(record, user::SUBSCRIPTION) != Some(tier.as_str()) {
                return false;
            }
        }
        if let Some(admin) = self.is_admin {
            if record.get(user::IS_ADMIN).and_then(Value::as_bool) != Some(admin) {
                return false;
            }
        }
        true
    }
}

/// Playlist list criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistFilter {
    /// Substring of the name.
    pub name: Option<String>,
    /// Year of `fecha_creacion`.
    pub year: Option<i32>,
}

impl RecordFilter for PlaylistFilter {
    fn matches(&self, record: &Document) -> bool {
        if let Some(name) = &self.name {
            if !contains_ignore_case(record, playlist::NAME, name) {
                return false;
            }
        }
        if let Some(year) = self.year {
            let created = str_field(record, playlist::CREATED_AT).and_then(timestamp_year);
            if created != Some(year) {
                return false;
            }
        }
        true
    }
}

/// Song list criteria.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SongFilter {
    /// Substring of the title.
    pub title: Option<String>,
    /// Substring of the artist.
    pub artist: Option<String>,
    /// Substring of the album.
    pub album: Option<String>,
    /// Substring of the genre.
    pub genre: Option<String>,
    /// Inclusive lower bound on the duration.
    pub duration_min: Option<f64>,
    /// Inclusive upper bound on the duration.
    pub duration_max: Option<f64>,
}

impl RecordFilter for SongFilter {
    fn matches(&self, record: &Document) -> bool {
        let text_criteria = [
            (song::TITLE, &self.title),
            (song::ARTIST, &self.artist),
            (song::ALBUM, &self.album),
            (song::GENRE, &self.genre),
        ];
        for (field, needle) in text_criteria {
            if let Some(needle) = needle {
                if !contains_ignore_case(record, field, needle) {
                    return false;
                }
            }
        }

        if self.duration_min.is_some() || self.duration_max.is_some() {
            let Some(duration) = number_field(record, song::DURATION) else {
                return false;
            };
            if self.duration_min.is_some_and(|min| duration < min)
                || self.duration_max.is_some_and(|max| duration > max)
            {
                return false;
            }
        }
        true
    }
}

/// Extract the calendar year of a stored timestamp.
///
/// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.f]` and plain `YYYY-MM-DD`.
#[must_use]
pub fn timestamp_year(raw: &str) -> Option<i32> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.year());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ts.year());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}
