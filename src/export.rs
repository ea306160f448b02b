//! Delimited-text (CSV) export of record lists.

use std::borrow::Cow;

use crate::types::{FileRecord, UserRecord};

pub const CSV_MIME: &str = "text/csv;charset=utf-8";

/// Sink for client-side generated files (a blob download in the browser).
///
/// Saving is fire-and-forget: implementations log failures and return.
pub trait FileSaver {
    fn save(&self, filename: &str, mime: &str, bytes: &[u8]);
}

type ValueOf<R> = Box<dyn Fn(&R) -> Option<String>>;

pub struct ExportColumn<R> {
    label: String,
    value_of: ValueOf<R>,
}

/// Ordered `label` / `value_of` pairs defining the exported columns.
pub struct ExportSpec<R> {
    columns: Vec<ExportColumn<R>>,
}

impl<R> Default for ExportSpec<R> {
    fn default() -> Self {
        Self { columns: Vec::new() }
    }
}

impl<R> ExportSpec<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column; `None` from `value_of` serializes as an empty field.
    pub fn column<F>(mut self, label: &str, value_of: F) -> Self
    where
        F: Fn(&R) -> Option<String> + 'static,
    {
        self.columns.push(ExportColumn { label: label.to_string(), value_of: Box::new(value_of) });
        self
    }

    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    /// Header row, then one row per record, joined by `\n` with no trailing
    /// newline.
    pub fn render(&self, records: &[R]) -> String {
        let header = self
            .columns
            .iter()
            .map(|c| escape_field(&c.label))
            .collect::<Vec<_>>()
            .join(",");
        let body = records
            .iter()
            .map(|r| {
                self.columns
                    .iter()
                    .map(|c| match (c.value_of)(r) {
                        Some(v) => escape_field(&v).into_owned(),
                        None => String::new(),
                    })
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("{}\n{}", header, body)
    }
}

/// Quote a field containing a delimiter, quote, semicolon, tab or line break;
/// inner quotes are doubled.
pub fn escape_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', ';', '\t', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

fn text(s: Option<&str>) -> Option<String> {
    Some(s.unwrap_or("").to_string())
}

/// Own-files export (dashboard, per-user admin view).
pub fn file_export_spec() -> ExportSpec<FileRecord> {
    ExportSpec::new()
        .column("id", |f: &FileRecord| Some(f.id.to_string()))
        .column("original_name", |f: &FileRecord| text(f.original_name.as_deref()))
        .column("size", |f: &FileRecord| Some(f.size_bytes().to_string()))
        .column("uploaded_at", |f: &FileRecord| text(f.timestamp()))
        .column("description", |f: &FileRecord| text(f.description.as_deref()))
}

/// All-files admin export, including the owner columns.
pub fn admin_file_export_spec() -> ExportSpec<FileRecord> {
    ExportSpec::new()
        .column("id", |f: &FileRecord| Some(f.id.to_string()))
        .column("original_name", |f: &FileRecord| text(f.original_name.as_deref()))
        .column("size", |f: &FileRecord| Some(f.size_bytes().to_string()))
        .column("uploaded_at", |f: &FileRecord| text(f.timestamp()))
        .column("user_id", |f: &FileRecord| f.owner_id().map(|id| id.to_string()))
        .column("username", |f: &FileRecord| Some(f.owner_username().to_string()))
        .column("description", |f: &FileRecord| text(f.description.as_deref()))
}

pub fn user_export_spec() -> ExportSpec<UserRecord> {
    let flag = |b: bool| Some(if b { "1" } else { "0" }.to_string());
    ExportSpec::new()
        .column("id", |u: &UserRecord| Some(u.id.to_string()))
        .column("username", |u: &UserRecord| text(u.username.as_deref()))
        .column("email", |u: &UserRecord| text(u.email.as_deref()))
        .column("is_staff", move |u: &UserRecord| flag(u.is_staff))
        .column("is_active", move |u: &UserRecord| flag(u.is_active))
        .column("files_count", |u: &UserRecord| Some(u.file_count().to_string()))
        .column("files_total_size", |u: &UserRecord| Some(u.total_size().to_string()))
        .column("date_joined", |u: &UserRecord| text(u.date_joined.as_deref()))
}
