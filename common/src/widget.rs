//! The upload widget: one selected file, one upload attempt at a time.

use chrono::{Local, NaiveDate};
use log::debug;
use tokio::select;

use crate::{
    data::Candidate,
    expiry_label,
    notify::Notification,
    payloads::UploadResponse,
    session::{ProgressSender, UploadError, UploadSession},
    validation::validate,
};

/// Sends a file to the upload endpoint in a single request.
///
/// Implementations report progress through `progress` while the request is in
/// flight and resolve exactly once. No retries.
#[allow(async_fn_in_trait)]
pub trait Transport<C: Candidate> {
    async fn send(&self, file: &C, progress: ProgressSender) -> Result<UploadResponse, UploadError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragEvent {
    Enter,
    Over,
    Leave,
}

pub struct Widget<C> {
    selected: Option<C>,
    /// What the file picker currently shows.
    picker: Option<String>,
    session: UploadSession,
    expiry: Option<String>,
    drop_active: bool,
    notifications: Vec<Notification>,
    today: fn() -> NaiveDate,
}

impl<C> Default for Widget<C> {
    fn default() -> Self {
        Self::with_clock(|| Local::now().date_naive())
    }
}

impl<C> Widget<C> {
    pub fn with_clock(today: fn() -> NaiveDate) -> Self {
        Self {
            selected: None,
            picker: None,
            session: UploadSession::default(),
            expiry: None,
            drop_active: false,
            notifications: Vec::new(),
            today,
        }
    }

    pub fn selected(&self) -> Option<&C> {
        self.selected.as_ref()
    }

    pub fn picker(&self) -> Option<&str> {
        self.picker.as_deref()
    }

    pub fn session(&self) -> &UploadSession {
        &self.session
    }

    pub fn link(&self) -> Option<&str> {
        self.session.link.as_deref()
    }

    pub fn expiry(&self) -> Option<&str> {
        self.expiry.as_deref()
    }

    /// Whether the drop target should be highlighted.
    pub fn drop_active(&self) -> bool {
        self.drop_active
    }

    /// Whether the upload control should be offered: a file is selected, no
    /// error is pending and nothing is in flight.
    pub fn upload_offered(&self) -> bool {
        self.selected.is_some() && self.session.error.is_none() && !self.session.in_progress
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Drops the selection, upload state and expiry. Idempotent.
    pub fn clear_file(&mut self) {
        self.selected = None;
        self.picker = None;
        self.session = UploadSession::default();
        self.expiry = None;
    }

    pub fn drag(&mut self, event: DragEvent) {
        self.drop_active = matches!(event, DragEvent::Enter | DragEvent::Over);
    }

    /// Something was dropped that never became a candidate (e.g. the pasted
    /// path does not exist). Resets like any other drop, then reports `reason`.
    pub fn reject_drop(&mut self, reason: impl Into<String>) {
        self.drop_active = false;
        self.clear_file();
        self.notifications.push(Notification::error(reason));
    }
}

impl<C: Candidate> Widget<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `candidate` and, if it passes, makes it the selection.
    ///
    /// The previous selection and upload state are dropped first, whether or
    /// not the new candidate is accepted. Returns whether it was accepted.
    pub async fn select_file(&mut self, candidate: C) -> bool {
        self.clear_file();
        match validate(&candidate).await {
            Ok(()) => {
                debug!(
                    "selected {} ({} bytes, {:?})",
                    candidate.name(),
                    candidate.size(),
                    candidate.media_type()
                );
                self.picker = Some(candidate.name().to_string());
                self.selected = Some(candidate);
                true
            }
            Err(e) => {
                debug!("rejected {}: {e:?}", candidate.name());
                self.notifications.push(Notification::error(e.to_string()));
                false
            }
        }
    }

    /// A file released over the drop target. Same as picking it.
    pub async fn drop_file(&mut self, candidate: C) -> bool {
        self.drop_active = false;
        self.select_file(candidate).await
    }

    /// Uploads the selected file, calling `observe` whenever the session changes.
    ///
    /// Returns `None` without doing anything when there is no selection or an
    /// upload is already running. Otherwise returns the link or the error.
    pub async fn start_upload<T, F>(
        &mut self,
        transport: &T,
        mut observe: F,
    ) -> Option<Result<String, UploadError>>
    where
        T: Transport<C>,
        F: FnMut(&UploadSession),
    {
        if self.session.in_progress {
            return None;
        }
        let file = self.selected.as_ref()?;
        self.session.begin();
        observe(&self.session);

        let (sender, mut progress) = ProgressSender::channel();
        let outcome = {
            let request = transport.send(file, sender);
            tokio::pin!(request);
            let outcome = loop {
                select! {
                    biased;
                    Some(p) = progress.recv() => {
                        if self.session.apply(p) {
                            observe(&self.session);
                        }
                    }
                    outcome = &mut request => break outcome,
                }
            };
            while let Ok(p) = progress.try_recv() {
                if self.session.apply(p) {
                    observe(&self.session);
                }
            }
            outcome
        };

        let result = match outcome {
            Ok(UploadResponse { link }) => {
                self.session.succeed(link.clone());
                self.expiry = Some(expiry_label((self.today)()));
                self.notifications
                    .push(Notification::success("File uploaded successfully!"));
                Ok(link)
            }
            Err(e) => {
                debug!("upload failed: {e:?}");
                self.session.fail(&e);
                self.notifications.push(Notification::error(e.to_string()));
                Err(e)
            }
        };
        observe(&self.session);
        Some(result)
    }
}
