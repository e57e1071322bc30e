pub mod content;
pub mod data;
pub mod helpers;
pub mod notify;
pub mod payloads;
pub mod session;
pub mod validation;
pub mod widget;

pub use helpers::{expiry_date, expiry_label, format_file_size};

/// Largest file the widget accepts, in bytes (2 GiB).
pub const MAX_FILE_SIZE: u64 = 2 * 1024 * 1024 * 1024;

/// Days the share link is advertised as available after a successful upload.
pub const STORAGE_DAYS: u64 = 14;

/// Number of leading bytes read to check that a candidate is accessible.
pub const PROBE_LEN: usize = 1024;

/// Multipart field the file is sent under.
pub const UPLOAD_FIELD: &str = "file";

pub const DEFAULT_ENDPOINT: &str = "https://file.io";
