//! Response middleware for the UI host.

pub mod security_headers;
