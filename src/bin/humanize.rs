//! Terminal front-end for the rewrite proxy
//!
//! Reads a draft from a file, stdin or the clipboard, applies the same quota
//! gate as the web editor and prints the rewrite.

use anyhow::{Context, Result};
use clap::Parser;
use humanizer::client::{
    Clipboard, HttpRewriteApi, IdentityEvent, IdentityHub, Notice, NoticeLevel, RewriteResult, Session,
    SubmissionController, SystemClipboard, ThemeStore,
};
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "humanize", version, about = "Rewrite text through a humanizer proxy")]
struct Cli {
    /// Rewrite endpoint URL
    #[arg(long, env = "HUMANIZER_ENDPOINT", default_value = "http://127.0.0.1:8082/api/rewrite")]
    endpoint: String,

    /// Read the draft from this file instead of stdin
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Read the draft from the system clipboard
    #[arg(long, conflicts_with = "file")]
    paste: bool,

    /// Signed-in user id, unlocks the authenticated word limit
    #[arg(long, env = "HUMANIZER_USER")]
    user: Option<String>,

    /// Role tag of the signed-in user, repeatable (`premium` unlocks the premium limit)
    #[arg(long = "role", requires = "user")]
    roles: Vec<String>,

    /// Copy the rewrite to the system clipboard
    #[arg(long)]
    copy: bool,

    /// Print the counters and exit without submitting
    #[arg(long)]
    check: bool,

    /// Flip the stored light/dark preference and exit
    #[arg(long)]
    toggle_theme: bool,

    /// Client timeout in seconds
    #[arg(long, default_value_t = humanizer::client::api::DEFAULT_TIMEOUT_SECS)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    humanizer::init_logging(&log_level, "text")?;

    if cli.toggle_theme {
        let store = ThemeStore::default_location().context("No config directory available for the theme")?;
        let theme = store.toggle()?;
        println!("{}", theme);
        return Ok(());
    }

    let mut controller = SubmissionController::new();

    let hub = IdentityHub::new();
    let mut events = hub.subscribe();
    let session = cli.user.as_ref().map(|user| {
        cli.roles
            .iter()
            .fold(Session::new(user.as_str()), |session, role| session.with_role(role.as_str()))
    });
    hub.publish(IdentityEvent::Init(session));
    hub.ready().await;
    while let Some(event) = events.try_next() {
        if let Some(notice) = controller.apply_identity_event(event) {
            report(&notice);
        }
    }

    if cli.paste {
        let mut clipboard = SystemClipboard::new()?;
        match controller.paste_from(&mut clipboard) {
            Ok(notice) => report(&notice),
            Err(e) => anyhow::bail!("{}. Pipe the text on stdin instead", e),
        }
    } else {
        let text = match &cli.file {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            None => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("Failed to read stdin")?;
                buf
            }
        };
        controller.input(text);
    }

    let view = controller.view();
    eprintln!("{} | {}", view.word_label, view.char_label);

    if !view.submit_enabled {
        anyhow::bail!("{}", view.submit_title);
    }
    if cli.check {
        return Ok(());
    }

    let api = HttpRewriteApi::with_timeout(cli.endpoint.as_str(), Duration::from_secs(cli.timeout))?;
    let notice = controller.submit(&api).await?;

    match controller.result() {
        Some(RewriteResult::Output(_)) => {
            println!("{}", controller.output());
            eprintln!("{}", controller.view().output_word_label);
            report(&notice);
        }
        _ => anyhow::bail!("{}", controller.output()),
    }

    if cli.copy {
        let mut clipboard = SystemClipboard::new()?;
        report(&controller.copy_to(&mut clipboard as &mut dyn Clipboard)?);
    }

    Ok(())
}

fn report(notice: &Notice) {
    let marker = match notice.level {
        NoticeLevel::Info => "ℹ",
        NoticeLevel::Success => "✅",
        NoticeLevel::Warning => "⚠",
        NoticeLevel::Error => "❌",
    };
    eprintln!("{} {}", marker, notice.message);
}
