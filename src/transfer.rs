//! Authenticated binary downloads saved under a server-suggested name.

use async_trait::async_trait;

use crate::error::ClientError;
use crate::export::FileSaver;

/// Name used when neither the server nor the caller suggests one.
pub const FALLBACK_FILENAME: &str = "file";

const OCTET_STREAM: &str = "application/octet-stream";

/// Bytes of a fetched resource plus the headers relevant for saving it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BinaryPayload {
    pub bytes: Vec<u8>,
    pub content_disposition: Option<String>,
    pub content_type: Option<String>,
}

#[async_trait(?Send)]
pub trait BinarySource {
    /// Authenticated GET of `location`, expecting a binary body.
    async fn fetch_binary(&self, location: &str) -> Result<BinaryPayload, ClientError>;
}

/// Filename from a `content-disposition` value of the form
/// `...filename="<name>"...`. An empty quoted name counts as absent.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    const MARKER: &str = "filename=\"";
    let start = header.find(MARKER)? + MARKER.len();
    let rest = &header[start..];
    let end = rest.find('"')?;
    let name = &rest[..end];
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Server-suggested name, then the caller's suggestion, then `"file"`.
pub fn resolve_filename(disposition: Option<&str>, suggested: Option<&str>) -> String {
    disposition
        .and_then(filename_from_disposition)
        .or_else(|| suggested.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string))
        .unwrap_or_else(|| FALLBACK_FILENAME.to_string())
}

pub struct TransferHelper<'a, B: ?Sized, S: ?Sized> {
    source: &'a B,
    saver: &'a S,
}

impl<'a, B, S> TransferHelper<'a, B, S>
where
    B: BinarySource + ?Sized,
    S: FileSaver + ?Sized,
{
    pub fn new(source: &'a B, saver: &'a S) -> Self {
        Self { source, saver }
    }

    /// Fetch `location` and save it; returns the name it was saved under.
    ///
    /// Network and authorization failures are returned for the caller to
    /// show as a notice. Nothing is retried.
    pub async fn download(&self, location: &str, suggested: Option<&str>) -> Result<String, ClientError> {
        let payload = self.source.fetch_binary(location).await?;
        let filename = resolve_filename(payload.content_disposition.as_deref(), suggested);
        let mime = payload.content_type.as_deref().unwrap_or(OCTET_STREAM);
        tracing::debug!(location, %filename, bytes = payload.bytes.len(), "saving download");
        self.saver.save(&filename, mime, &payload.bytes);
        Ok(filename)
    }
}
