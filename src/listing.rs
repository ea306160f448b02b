//! Client-side list controller: sort state, projection and header labels.
//!
//! One controller owns the sort state of one table. The record list itself
//! stays with the page; [`ListController::project`] derives the displayed
//! order on every render without touching the source order (which mirrors
//! the server response, most recent first).
//!
//! Ties: projection uses a stable sort in both directions, so records with
//! equal keys always keep their source order.

use std::cmp::Ordering;
use std::fmt;

use crate::export::{ExportSpec, FileSaver, CSV_MIME};
use crate::format::timestamp_millis;
use crate::types::{FileRecord, UserRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// Comparable primitive produced by an extractor.
///
/// A key always produces the same variant, so the cross-variant order is
/// irrelevant in practice.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Number(i64),
    Text(String),
}

impl SortValue {
    fn text(s: &str) -> Self {
        SortValue::Text(s.to_lowercase())
    }
}

/// A sortable column. The extractor must never fail: absent fields map to
/// `0` or `""`.
pub trait SortKey: Copy + Eq + fmt::Debug + 'static {
    type Record;

    fn extract(&self, record: &Self::Record) -> SortValue;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<K> {
    pub key: K,
    pub direction: SortDirection,
}

/// Label for a clickable column header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell<K> {
    pub key: K,
    pub label: String,
    pub active: bool,
    pub indicator: &'static str,
}

impl<K> HeaderCell<K> {
    /// `"Size ↓"` on the active column, the bare label elsewhere.
    pub fn text(&self) -> String {
        if self.active {
            format!("{} {}", self.label, self.indicator)
        } else {
            self.label.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListController<K: SortKey> {
    state: SortState<K>,
}

impl<K: SortKey> ListController<K> {
    pub fn new(key: K, direction: SortDirection) -> Self {
        Self { state: SortState { key, direction } }
    }

    pub fn sort_state(&self) -> SortState<K> {
        self.state
    }

    /// Same key toggles the direction; a new key starts ascending.
    pub fn set_sort_key(&mut self, key: K) {
        if key == self.state.key {
            self.state.direction = self.state.direction.toggled();
        } else {
            self.state = SortState { key, direction: SortDirection::Ascending };
        }
        tracing::debug!(key = ?self.state.key, direction = self.state.direction.as_str(), "sort changed");
    }

    pub fn header(&self, key: K, label: &str) -> HeaderCell<K> {
        let active = key == self.state.key;
        HeaderCell {
            key,
            label: label.to_string(),
            active,
            indicator: if active { self.state.direction.indicator() } else { "" },
        }
    }

    /// Sorted view of `records` as references; `records` is not modified.
    pub fn project_refs<'a>(&self, records: &'a [K::Record]) -> Vec<&'a K::Record> {
        let key = self.state.key;
        let mut keyed: Vec<(SortValue, &K::Record)> =
            records.iter().map(|r| (key.extract(r), r)).collect();
        let direction = self.state.direction;
        keyed.sort_by(|a, b| compare(&a.0, &b.0, direction));
        keyed.into_iter().map(|(_, r)| r).collect()
    }

    /// Sorted copy of `records`.
    pub fn project(&self, records: &[K::Record]) -> Vec<K::Record>
    where
        K::Record: Clone,
    {
        self.project_refs(records).into_iter().cloned().collect()
    }

    /// Serialize already-projected `records` and hand the CSV to `saver`.
    /// Fire-and-forget: a saver that cannot save logs and returns.
    pub fn export<S: FileSaver + ?Sized>(
        &self,
        filename: &str,
        spec: &ExportSpec<K::Record>,
        records: &[K::Record],
        saver: &S,
    ) {
        let csv = spec.render(records);
        tracing::debug!(filename, rows = records.len(), "exporting csv");
        saver.save(filename, CSV_MIME, csv.as_bytes());
    }
}

fn compare(a: &SortValue, b: &SortValue, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => a.cmp(b),
        // b.cmp(a) (not reverse()) keeps the sort stable for equal keys
        SortDirection::Descending => b.cmp(a),
    }
}

/// Columns of the file tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSortKey {
    Id,
    Name,
    Size,
    UploadedAt,
    Owner,
    Description,
}

impl SortKey for FileSortKey {
    type Record = FileRecord;

    fn extract(&self, f: &FileRecord) -> SortValue {
        match self {
            FileSortKey::Id => SortValue::Number(f.id),
            FileSortKey::Name => SortValue::text(f.name()),
            FileSortKey::Size => SortValue::Number(f.size_bytes()),
            FileSortKey::UploadedAt => SortValue::Number(timestamp_millis(f.timestamp())),
            FileSortKey::Owner => SortValue::text(f.owner_username()),
            FileSortKey::Description => SortValue::text(f.description_text()),
        }
    }
}

/// Columns of the admin users table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSortKey {
    Id,
    Username,
    Email,
    Role,
    Active,
    FilesCount,
    TotalSize,
    DateJoined,
}

impl SortKey for UserSortKey {
    type Record = UserRecord;

    fn extract(&self, u: &UserRecord) -> SortValue {
        match self {
            UserSortKey::Id => SortValue::Number(u.id),
            UserSortKey::Username => SortValue::text(u.name()),
            UserSortKey::Email => SortValue::text(u.email_text()),
            UserSortKey::Role => SortValue::Number(u.is_staff as i64),
            UserSortKey::Active => SortValue::Number(u.is_active as i64),
            UserSortKey::FilesCount => SortValue::Number(u.file_count()),
            UserSortKey::TotalSize => SortValue::Number(u.total_size()),
            UserSortKey::DateJoined => SortValue::Number(timestamp_millis(u.date_joined.as_deref())),
        }
    }
}
