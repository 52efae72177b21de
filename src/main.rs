//! Terminal duel runner (default binary).
//!
//! Human on the left, agent on the right. Input is read on a dedicated thread
//! and forwarded to a single-threaded tokio loop that owns the match.
//!
//! Logging goes to stderr and is off by default; run with e.g.
//! `RUST_LOG=tetris_duel_engine=debug tetris-duel 2>duel.log`.

use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::terminal;
use tokio::sync::mpsc;

use tetris_duel::engine::{Match, MatchConfig};
use tetris_duel::input::{handle_key_event, should_quit};
use tetris_duel::runtime::{run_match, Control, SnapshotLog};
use tetris_duel::term::{DuelView, FrameBuffer, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let config = MatchConfig::from_env();
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = rt.block_on(run(&mut term, &config));

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

async fn run(term: &mut TerminalRenderer, config: &MatchConfig) -> Result<()> {
    let mut duel = Match::new(config);
    let log = match &config.snapshot_log_path {
        Some(path) => Some(SnapshotLog::open(path).await?),
        None => None,
    };

    let (tx, rx) = mpsc::channel(64);
    std::thread::spawn(move || forward_input(tx));

    let view = DuelView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let result = run_match(&mut duel, rx, log.as_ref(), |snap| {
        let (w, h) = terminal::size().unwrap_or((80, 24));
        view.render_into(snap, Viewport::new(w, h), &mut fb);
        term.present(&mut fb)
    })
    .await;

    if let Some(log) = log {
        log.close().await?;
    }
    result
}

/// Blocking input reader: terminal events in, controls out.
fn forward_input(tx: mpsc::Sender<Control>) {
    loop {
        let control = match event::read() {
            Ok(Event::Key(key)) if should_quit(key) => Control::Quit,
            Ok(Event::Key(key)) => match handle_key_event(key) {
                Some(command) => Control::Command(command),
                None => continue,
            },
            Ok(Event::Resize(..)) => Control::Redraw,
            Ok(_) => continue,
            Err(_) => Control::Quit,
        };
        if tx.blocking_send(control).is_err() || control == Control::Quit {
            break;
        }
    }
}
