use std::{
    io,
    path::{Path, PathBuf},
};

use bytes::Bytes;
use tokio::{
    fs::{metadata, File},
    io::AsyncReadExt,
};

/// A file being considered for upload, before it is accepted into the widget.
///
/// This mirrors what a browser file handle exposes: a name, a declared size and
/// media type, and the ability to read (part of) its contents.
#[allow(async_fn_in_trait)]
pub trait Candidate {
    fn name(&self) -> &str;
    fn size(&self) -> u64;
    /// Declared media type. Empty when unknown.
    fn media_type(&self) -> &str;
    /// Reads up to `len` bytes from the start of the contents.
    async fn read_prefix(&self, len: usize) -> io::Result<Bytes>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalFile {
    pub path: PathBuf,
    name: String,
    size: u64,
    media_type: String,
}

impl LocalFile {
    /// Stats `path` and builds a candidate from it.
    /// Directories come back with size 0 and no media type, the same way a
    /// browser hands them over on drop.
    pub async fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let meta = metadata(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let (size, media_type) = if meta.is_dir() {
            (0, String::new())
        } else {
            (meta.len(), guess_media_type(path).to_string())
        };
        Ok(Self {
            path: path.to_path_buf(),
            name,
            size,
            media_type,
        })
    }
}

impl Candidate for LocalFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn media_type(&self) -> &str {
        &self.media_type
    }

    async fn read_prefix(&self, len: usize) -> io::Result<Bytes> {
        let file = File::open(&self.path).await?;
        let mut buf = Vec::with_capacity(len);
        file.take(len as u64).read_to_end(&mut buf).await?;
        Ok(buf.into())
    }
}

const MEDIA_TYPES: &[(&str, &str)] = &[
    ("7z", "application/x-7z-compressed"),
    ("avi", "video/x-msvideo"),
    ("csv", "text/csv"),
    ("doc", "application/msword"),
    ("docx", "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
    ("gif", "image/gif"),
    ("gz", "application/gzip"),
    ("htm", "text/html"),
    ("html", "text/html"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("json", "application/json"),
    ("md", "text/markdown"),
    ("mkv", "video/x-matroska"),
    ("mov", "video/quicktime"),
    ("mp3", "audio/mpeg"),
    ("mp4", "video/mp4"),
    ("pdf", "application/pdf"),
    ("png", "image/png"),
    ("pptx", "application/vnd.openxmlformats-officedocument.presentationml.presentation"),
    ("svg", "image/svg+xml"),
    ("tar", "application/x-tar"),
    ("txt", "text/plain"),
    ("wav", "audio/wav"),
    ("webm", "video/webm"),
    ("webp", "image/webp"),
    ("xlsx", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
    ("xml", "application/xml"),
    ("zip", "application/zip"),
];

/// Guesses a media type from the extension. Unknown extensions give "".
pub fn guess_media_type(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return "";
    };
    let ext = ext.to_ascii_lowercase();
    MEDIA_TYPES
        .binary_search_by(|(known, _)| known.cmp(&ext.as_str()))
        .map(|i| MEDIA_TYPES[i].1)
        .unwrap_or("")
}
