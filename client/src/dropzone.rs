//! Terminals paste the path of a file dragged onto them. This turns such a
//! paste back into a path.

use std::path::PathBuf;

use common::{
    data::LocalFile,
    widget::{DragEvent, Widget},
};
use url::Url;

/// Parses one pasted line. Handles `file://` URLs, quoted paths and
/// backslash-escaped spaces. Returns `None` for blank input.
pub fn parse_dropped_path(line: &str) -> Option<PathBuf> {
    let s = line.trim();
    if s.is_empty() {
        return None;
    }
    if s.starts_with("file://") {
        return Url::parse(s).ok()?.to_file_path().ok();
    }
    if let Some(inner) = strip_quotes(s) {
        return Some(PathBuf::from(inner));
    }
    if cfg!(windows) {
        Some(PathBuf::from(s))
    } else {
        Some(PathBuf::from(unescape(s)))
    }
}

/// Treats a pasted line as a file released over the drop target.
/// Returns false if the line was blank and nothing was dropped.
pub async fn handle_drop(widget: &mut Widget<LocalFile>, line: &str) -> bool {
    let Some(path) = parse_dropped_path(line) else {
        return false;
    };
    widget.drag(DragEvent::Enter);
    match LocalFile::from_path(&path).await {
        Ok(candidate) => {
            widget.drop_file(candidate).await;
        }
        Err(e) => widget.reject_drop(format!("Cannot open {}: {e}", path.display())),
    }
    true
}

fn strip_quotes(s: &str) -> Option<&str> {
    let first = s.chars().next()?;
    if s.len() >= 2 && (first == '\'' || first == '"') && s.ends_with(first) {
        Some(&s[1..s.len() - 1])
    } else {
        None
    }
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
                continue;
            }
        }
        out.push(c);
    }
    out
}
