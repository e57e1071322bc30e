use std::{
    io::{stderr, IsTerminal},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use common::{
    content::{FEATURES, HERO_TAGLINE, HERO_TITLE, INFO_TAGLINE, REVIEWS, REVIEWS_TITLE},
    data::{Candidate, LocalFile},
    format_file_size,
    widget::Widget,
    DEFAULT_ENDPOINT, MAX_FILE_SIZE,
};
use env_logger::Env;
use kdam::term;
use log::debug;
use reqwest::Client;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};

mod dropzone;
mod progress;
mod toast;
mod transport;

use progress::ProgressView;
use transport::HttpTransport;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Share a file and get a link back", long_about = None)]
struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Where files are posted.
    #[arg(short, long, env = "FILESHARE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    #[arg(long, default_value = concat!("fileshare/", env!("CARGO_PKG_VERSION")))]
    pub user_agent: String,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Upload one file and print its share link.
    Send { file: PathBuf },
    /// Drag files onto the terminal to upload them one after another.
    Drop,
    /// What the service offers and what people say about it.
    About,
}

fn show_result(widget: &Widget<LocalFile>) {
    if let (Some(link), Some(expiry)) = (widget.link(), widget.expiry()) {
        println!("{link}");
        eprintln!("Available until {expiry}");
    }
}

/// Runs one upload of the current selection and prints the outcome.
async fn upload(widget: &mut Widget<LocalFile>, transport: &HttpTransport, tty: bool) -> Result<()> {
    let name = match widget.selected() {
        Some(file) => file.name().to_string(),
        None => bail!("no file selected"),
    };
    let mut view = ProgressView::new(tty, &name);
    let result = widget.start_upload(transport, |s| view.update(s)).await;
    view.finish();
    toast::show_all(widget.take_notifications());
    match result {
        Some(Ok(_)) => {
            show_result(widget);
            Ok(())
        }
        Some(Err(e)) => Err(e).with_context(|| format!("uploading {name} to {}", transport.endpoint())),
        None => bail!("an upload is already running"),
    }
}

async fn send(transport: &HttpTransport, path: &Path, tty: bool) -> Result<()> {
    let candidate = LocalFile::from_path(path)
        .await
        .with_context(|| format!("cannot open {}", path.display()))?;
    let mut widget = Widget::new();
    let accepted = widget.select_file(candidate).await;
    toast::show_all(widget.take_notifications());
    if !accepted {
        bail!("{} was not accepted", path.display());
    }
    upload(&mut widget, transport, tty).await
}

fn prompt(widget: &Widget<LocalFile>) {
    match widget.selected() {
        None => eprintln!(
            "Drag & drop your file here (max {}), or type its path. Empty line quits.",
            format_file_size(MAX_FILE_SIZE)
        ),
        Some(file) if widget.upload_offered() => eprintln!(
            "{} ({}) is ready. u: upload, c: clear, or drop another file.",
            file.name(),
            format_file_size(file.size())
        ),
        Some(file) => eprintln!(
            "{} ({}). u: try again, c: clear, or drop another file.",
            file.name(),
            format_file_size(file.size())
        ),
    }
}

async fn drop_zone(transport: &HttpTransport, tty: bool) -> Result<()> {
    let mut widget = Widget::new();
    let mut lines = BufReader::new(stdin()).lines();
    loop {
        prompt(&widget);
        let Some(line) = lines.next_line().await? else {
            break;
        };
        match line.trim() {
            "" => break,
            "c" => {
                widget.clear_file();
                continue;
            }
            "u" if widget.selected().is_some() => {
                if let Err(e) = upload(&mut widget, transport, tty).await {
                    debug!("{e:?}");
                }
                continue;
            }
            _ => {}
        }
        dropzone::handle_drop(&mut widget, &line).await;
        toast::show_all(widget.take_notifications());
    }
    Ok(())
}

fn about() {
    println!("{HERO_TITLE}\n{HERO_TAGLINE}\n");
    println!("{INFO_TAGLINE}");
    for feature in FEATURES {
        println!("  * {}: {}", feature.title, feature.description);
    }
    println!("\n{REVIEWS_TITLE}");
    for review in REVIEWS {
        println!(
            "  {} {}, {}\n    \"{}\"",
            review.star_row(),
            review.name,
            review.role,
            review.review
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let is_tty = stderr().is_terminal();
    term::init(is_tty);
    let args = Args::parse();

    let client = Client::builder()
        .user_agent(args.user_agent)
        .tcp_keepalive(Some(Duration::from_secs(30)))
        .build()
        .context("building HTTP client")?;
    let transport = HttpTransport::new(client, args.endpoint);

    match args.command {
        Command::Send { file } => send(&transport, &file, is_tty).await,
        Command::Drop => drop_zone(&transport, is_tty).await,
        Command::About => {
            about();
            Ok(())
        }
    }
}
