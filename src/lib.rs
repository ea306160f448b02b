//! # MyCloud Web Library
//!
//! Browser-independent core of the MyCloud web front-end. Everything here
//! compiles for the host and for `wasm32-unknown-unknown`; the Dioxus UI in
//! `webui/` supplies the browser side of each seam.
//!
//! ## Core Components
//!
//! - [`types`]: Backend records with documented field fallbacks
//! - [`format`]: Byte sizes, timestamps and export file names
//! - [`listing`]: Sortable projection of record lists (ListController)
//! - [`export`]: CSV rendering and the file saver seam
//! - [`transfer`]: Authenticated downloads (TransferHelper)
//! - [`clipboard`]: Best-effort clipboard writes (ClipboardWriter)
//! - [`session`]: Explicit token/profile context
//! - [`confirm`]: Confirmation gate for destructive actions
//! - [`api`]: Typed REST client over a pluggable transport
//! - [`error`]: Client error taxonomy and user notices
//!
//! With the `server` feature the crate also carries the small axum host
//! that serves the compiled UI ([`config`], [`middleware`], [`routes`],
//! [`state`]).

pub mod api;
pub mod clipboard;
pub mod confirm;
pub mod error;
pub mod export;
pub mod format;
pub mod listing;
pub mod session;
pub mod transfer;
pub mod types;

#[cfg(feature = "server")]
pub mod config;
#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod state;

#[cfg(test)]
mod tests;
