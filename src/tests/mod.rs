//! Unit tests for the MyCloud web core and its UI host.
//!
//! - **fakes**: in-memory transport, saver and confirmer shared by the tests
//! - **listing_tests**: sort state, projection and header labels
//! - **export_tests**: CSV rendering and escaping
//! - **transfer_tests**: download naming and saving
//! - **clipboard_tests**: modern/legacy copy fallback
//! - **session_tests**: token/profile lifecycle
//! - **api_tests**: request building and response interpretation
//! - **types_tests**: lenient record decoding and field fallbacks
//! - **error_tests**: error mapping and user notices
//! - **config_tests**, **routes_tests**: the UI host (`server` feature)
//!
//! ```bash
//! cargo test
//! cargo test listing_tests
//! ```

pub mod fakes;

pub mod api_tests;
pub mod clipboard_tests;
pub mod listing_tests;

#[cfg(feature = "server")]
pub mod config_tests;
