#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use async_trait::async_trait;
    use futures::executor::block_on;

    use crate::clipboard::{ClipboardBackend, ClipboardError, ClipboardWriter};

    struct FakeClipboard {
        secure: bool,
        modern: Result<(), ClipboardError>,
        legacy: Result<bool, ClipboardError>,
        calls: RefCell<Vec<&'static str>>,
    }

    impl FakeClipboard {
        fn new(secure: bool, modern: Result<(), ClipboardError>, legacy: Result<bool, ClipboardError>) -> Self {
            Self { secure, modern, legacy, calls: RefCell::new(Vec::new()) }
        }
    }

    #[async_trait(?Send)]
    impl ClipboardBackend for FakeClipboard {
        fn is_secure_context(&self) -> bool {
            self.secure
        }

        async fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
            self.calls.borrow_mut().push("modern");
            self.modern.clone()
        }

        fn legacy_copy(&self, _text: &str) -> Result<bool, ClipboardError> {
            self.calls.borrow_mut().push("legacy");
            self.legacy.clone()
        }
    }

    #[test]
    fn test_modern_write_in_secure_context() {
        let writer = ClipboardWriter::new(FakeClipboard::new(true, Ok(()), Ok(true)));
        assert!(block_on(writer.copy("https://cloud.example/s/abc")));
    }

    #[test]
    fn test_insecure_context_skips_modern_api() {
        let backend = FakeClipboard::new(false, Ok(()), Ok(true));
        let writer = ClipboardWriter::new(backend);
        assert!(block_on(writer.copy("x")));
    }

    #[test]
    fn test_modern_failure_falls_back_to_legacy() {
        let writer = ClipboardWriter::new(FakeClipboard::new(
            true,
            Err(ClipboardError::Rejected("NotAllowedError".into())),
            Ok(true),
        ));
        assert!(block_on(writer.copy("x")));
    }

    #[test]
    fn test_both_primitives_failing_returns_false() {
        let writer = ClipboardWriter::new(FakeClipboard::new(
            true,
            Err(ClipboardError::Rejected("denied".into())),
            Err(ClipboardError::Unavailable),
        ));
        assert!(!block_on(writer.copy("x")));
    }

    #[test]
    fn test_legacy_command_reporting_failure_returns_false() {
        let writer = ClipboardWriter::new(FakeClipboard::new(false, Err(ClipboardError::Unavailable), Ok(false)));
        assert!(!block_on(writer.copy("x")));
    }

    #[test]
    fn test_call_order() {
        let backend = FakeClipboard::new(true, Err(ClipboardError::Unavailable), Ok(true));
        block_on(ClipboardWriter::new(&backend).copy("x"));
        assert_eq!(*backend.calls.borrow(), vec!["modern", "legacy"]);

        let backend = FakeClipboard::new(true, Ok(()), Ok(true));
        block_on(ClipboardWriter::new(&backend).copy("x"));
        assert_eq!(*backend.calls.borrow(), vec!["modern"]);

        let backend = FakeClipboard::new(false, Ok(()), Ok(true));
        block_on(ClipboardWriter::new(&backend).copy("x"));
        assert_eq!(*backend.calls.borrow(), vec!["legacy"]);
    }
}
