use serde::{Deserialize, Serialize};

use crate::{format_file_size, MAX_FILE_SIZE, STORAGE_DAYS};

// Upload endpoint

/// Body returned by the upload endpoint on success. Only the link matters;
/// anything else the service sends along is ignored.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct UploadResponse {
    pub link: String,
}

// Site API

/// Envelope for every `/api` answer. The content is fixed at build time, so
/// the only way to miss is asking for something that isn't there.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "status", content = "payload")]
#[serde(rename_all = "snake_case")]
pub enum ApiPayload<T> {
    Ok(T),
    NotFound,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Limits {
    pub max_file_size: u64,
    pub max_file_size_label: String,
    pub storage_days: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
            max_file_size_label: format_file_size(MAX_FILE_SIZE),
            storage_days: STORAGE_DAYS,
        }
    }
}
