use std::{error::Error, fmt};

use tokio::sync::mpsc;

/// One transport progress report: bytes handed over so far, and the total if
/// the transport knows it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub sent: u64,
    pub total: Option<u64>,
}

/// Sending half of an upload's progress channel, handed to the transport.
#[derive(Clone, Debug)]
pub struct ProgressSender(mpsc::UnboundedSender<Progress>);

impl ProgressSender {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Progress>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self(tx), rx)
    }

    /// Reports progress. Reports made after the upload has resolved are dropped.
    pub fn report(&self, sent: u64, total: Option<u64>) {
        let _ = self.0.send(Progress { sent, total });
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadError {
    /// The request never completed.
    Network(String),
    /// The endpoint answered with a non-2xx status.
    BadStatus(u16),
    /// A 2xx answer whose body did not carry a usable link.
    BadResponse(String),
    /// The request could not be built from the selected file, e.g. it was
    /// deleted after selection.
    Local(String),
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(_) => write!(f, "Network error"),
            Self::BadStatus(_) => write!(f, "Upload failed"),
            Self::BadResponse(s) | Self::Local(s) => write!(f, "{s}"),
        }
    }
}

impl Error for UploadError {}

impl From<serde_json::Error> for UploadError {
    fn from(value: serde_json::Error) -> Self {
        Self::BadResponse(value.to_string())
    }
}

/// State of the current (or last) upload attempt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadSession {
    pub in_progress: bool,
    /// 0 to 100.
    pub percent: u8,
    pub link: Option<String>,
    pub error: Option<String>,
}

impl UploadSession {
    /// Starts a fresh attempt, dropping whatever the last one left behind.
    pub fn begin(&mut self) {
        *self = Self {
            in_progress: true,
            ..Self::default()
        };
    }

    /// Applies a progress report. Returns true if `percent` changed.
    ///
    /// Reports without a known total leave the percentage where it was, and
    /// the percentage never moves backwards within one attempt.
    pub fn apply(&mut self, progress: Progress) -> bool {
        if !self.in_progress {
            return false;
        }
        let Some(total) = progress.total.filter(|t| *t > 0) else {
            return false;
        };
        let percent = (progress.sent as f64 / total as f64 * 100.0)
            .round()
            .clamp(0.0, 100.0) as u8;
        if percent <= self.percent {
            return false;
        }
        self.percent = percent;
        true
    }

    pub fn succeed(&mut self, link: String) {
        self.in_progress = false;
        self.link = Some(link);
        self.error = None;
    }

    pub fn fail(&mut self, error: &UploadError) {
        self.in_progress = false;
        self.link = None;
        self.error = Some(error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(sent: u64, total: Option<u64>) -> Progress {
        Progress { sent, total }
    }

    #[test]
    fn begin_resets_everything() {
        let mut session = UploadSession {
            in_progress: false,
            percent: 80,
            link: None,
            error: Some("Network error".to_string()),
        };
        session.begin();
        assert_eq!(
            session,
            UploadSession {
                in_progress: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn percentages_round() {
        let mut session = UploadSession::default();
        session.begin();
        assert!(session.apply(progress(37, Some(100))));
        assert_eq!(session.percent, 37);
        assert!(session.apply(progress(2, Some(3))));
        assert_eq!(session.percent, 67);
        assert!(session.apply(progress(1000, Some(1000))));
        assert_eq!(session.percent, 100);
    }

    #[test]
    fn unknown_total_keeps_last_value() {
        let mut session = UploadSession::default();
        session.begin();
        session.apply(progress(50, Some(100)));
        assert!(!session.apply(progress(90, None)));
        assert!(!session.apply(progress(90, Some(0))));
        assert_eq!(session.percent, 50);
    }

    #[test]
    fn never_goes_backwards() {
        let mut session = UploadSession::default();
        session.begin();
        session.apply(progress(60, Some(100)));
        assert!(!session.apply(progress(10, Some(100))));
        assert_eq!(session.percent, 60);
    }

    #[test]
    fn ignores_progress_when_idle() {
        let mut session = UploadSession::default();
        assert!(!session.apply(progress(10, Some(100))));
        assert_eq!(session.percent, 0);
    }

    #[test]
    fn error_messages() {
        let tests = [
            (UploadError::Network("connection refused".to_string()), "Network error"),
            (UploadError::BadStatus(500), "Upload failed"),
            (
                UploadError::BadResponse("missing field `link`".to_string()),
                "missing field `link`",
            ),
            (
                UploadError::Local("No such file or directory (os error 2)".to_string()),
                "No such file or directory (os error 2)",
            ),
        ];
        for (err, expected) in tests {
            assert_eq!(err.to_string(), expected);
        }
    }

    #[test]
    fn failure_clears_link() {
        let mut session = UploadSession::default();
        session.begin();
        session.fail(&UploadError::BadStatus(500));
        assert!(!session.in_progress);
        assert_eq!(session.link, None);
        assert_eq!(session.error.as_deref(), Some("Upload failed"));
    }
}
