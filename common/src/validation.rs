use std::{error::Error, fmt};

use crate::{data::Candidate, format_file_size, MAX_FILE_SIZE, PROBE_LEN};

/// Why a candidate was turned away before upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Zero bytes and no media type: what a dropped folder looks like.
    Folder,
    TooLarge { size: u64, limit: u64 },
    /// The first bytes could not be read back.
    Unreadable(String),
    /// The reported size moved past the limit while the contents were probed.
    SizeChanged { size: u64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Folder => write!(f, "Folders cannot be uploaded."),
            Self::TooLarge { size, limit } => write!(
                f,
                "File size ({}) exceeds the {} limit",
                format_file_size(*size),
                format_file_size(*limit)
            ),
            Self::Unreadable(_) => write!(
                f,
                "Unable to read file. The file might be too large or corrupted."
            ),
            Self::SizeChanged { .. } => write!(f, "Invalid file size or file is corrupted"),
        }
    }
}

impl Error for ValidationError {}

/// Runs the pre-upload checks in order, stopping at the first failure.
///
/// The folder check is a heuristic: a genuinely empty file with no known
/// media type is indistinguishable from a folder and is rejected as one.
pub async fn validate<C: Candidate>(candidate: &C) -> Result<(), ValidationError> {
    if candidate.size() == 0 && candidate.media_type().is_empty() {
        return Err(ValidationError::Folder);
    }

    if candidate.size() > MAX_FILE_SIZE {
        return Err(ValidationError::TooLarge {
            size: candidate.size(),
            limit: MAX_FILE_SIZE,
        });
    }

    if let Err(e) = candidate.read_prefix(PROBE_LEN).await {
        return Err(ValidationError::Unreadable(e.to_string()));
    }

    // metadata may have moved while we were reading
    let size = candidate.size();
    if size > MAX_FILE_SIZE {
        return Err(ValidationError::SizeChanged { size });
    }

    Ok(())
}
