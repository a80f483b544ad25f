//! Utility modules.

/// Arrival date parsing for tracking results.
pub mod datetime;

/// Log sanitization utilities to keep passwords and large bodies out of logs.
pub mod log_sanitizer;
