//! Best-effort copy to the system clipboard.
//!
//! The modern asynchronous API is only tried in a secure context. Any
//! failure falls through to the legacy synchronous copy command. The result
//! is a plain `bool`: `false` means the caller should show the text for
//! manual copying, never that something went wrong.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard is not available in this context")]
    Unavailable,
    #[error("clipboard write rejected: {0}")]
    Rejected(String),
}

/// Platform clipboard primitives.
#[async_trait(?Send)]
pub trait ClipboardBackend {
    fn is_secure_context(&self) -> bool;

    /// Modern clipboard write.
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;

    /// Legacy copy command; `Ok(false)` when the command reports failure.
    ///
    /// Implementations must leave the document and the user's selection as
    /// they found them.
    fn legacy_copy(&self, text: &str) -> Result<bool, ClipboardError>;
}

#[async_trait(?Send)]
impl<B: ClipboardBackend + ?Sized> ClipboardBackend for &B {
    fn is_secure_context(&self) -> bool {
        (**self).is_secure_context()
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        (**self).write_text(text).await
    }

    fn legacy_copy(&self, text: &str) -> Result<bool, ClipboardError> {
        (**self).legacy_copy(text)
    }
}

pub struct ClipboardWriter<B> {
    backend: B,
}

impl<B: ClipboardBackend> ClipboardWriter<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub async fn copy(&self, text: &str) -> bool {
        if self.backend.is_secure_context() {
            match self.backend.write_text(text).await {
                Ok(()) => return true,
                Err(e) => tracing::debug!("clipboard write failed, trying legacy copy: {}", e),
            }
        }
        match self.backend.legacy_copy(text) {
            Ok(copied) => copied,
            Err(e) => {
                tracing::debug!("legacy copy failed: {}", e);
                false
            }
        }
    }
}
