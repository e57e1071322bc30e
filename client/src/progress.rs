use common::session::UploadSession;
use kdam::{tqdm, BarExt, Column, RichProgress, Spinner};

/// Draws upload progress: a rich bar on a terminal, plain lines otherwise.
pub enum ProgressView {
    Bar(RichProgress),
    Lines { last: Option<u8> },
}

impl ProgressView {
    pub fn new(tty: bool, name: &str) -> Self {
        if !tty {
            eprintln!("Uploading {name}...");
            return Self::Lines { last: None };
        }
        Self::Bar(RichProgress::new(
            tqdm!(total = 100, unit = "%"),
            vec![
                Column::Spinner(Spinner::new(
                    &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
                    80.0,
                    1.0,
                )),
                Column::Text(format!("[bold blue]{name}")),
                Column::Animation,
                Column::Percentage(0),
                Column::Text("•".to_owned()),
                Column::ElapsedTime,
                Column::Text("•".to_owned()),
                Column::RemainingTime,
            ],
        ))
    }

    pub fn update(&mut self, session: &UploadSession) {
        match self {
            Self::Bar(bar) => {
                let _ = bar.update_to(usize::from(session.percent));
            }
            Self::Lines { last } => {
                if session.in_progress && *last != Some(session.percent) {
                    eprintln!("Uploading... {}%", session.percent);
                    *last = Some(session.percent);
                }
            }
        }
    }

    pub fn finish(self) {
        if let Self::Bar(mut bar) = self {
            let _ = bar.clear();
        }
    }
}
