use common::notify::{Kind, Notification};
use kdam::term::Colorizer;

pub fn show(notification: &Notification) {
    let line = match notification.kind {
        Kind::Success => format!("✔ {}", notification.message).colorize("bold green"),
        Kind::Error => format!("✖ {}", notification.message).colorize("bold red"),
    };
    eprintln!("{line}");
}

pub fn show_all(notifications: Vec<Notification>) {
    notifications.iter().for_each(show);
}
