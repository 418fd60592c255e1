mod app;
mod event;
mod ui;

use std::io::stdout;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Error, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::api;
use crate::config::Config;
use crate::data::ModelRecord;
use crate::enrichments::Enrichments;
use app::{App, Message};

struct FetchDone {
    generation: u64,
    result: Result<Vec<ModelRecord>, Error>,
}

pub fn run(config: &Config) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(Enrichments::builtin());
    let result = run_app(&mut terminal, &mut app, config);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn spawn_fetch(app: &mut App, config: &Config, tx: &mpsc::Sender<FetchDone>) {
    let generation = app.begin_fetch();
    let url = config.api.url.clone();
    let timeout = Duration::from_secs(config.api.timeout_seconds);
    let tx = tx.clone();

    thread::spawn(move || {
        let result = api::fetch_models(&url, timeout);
        // Receiver gone means the UI already exited.
        let _ = tx.send(FetchDone { generation, result });
    });
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, config: &Config) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let (tx, rx) = mpsc::channel();
    spawn_fetch(app, config, &tx);

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        while let Ok(done) = rx.try_recv() {
            app.finish_fetch(done.generation, done.result);
        }

        if let Some(msg) = event::handle_events(app)? {
            match msg {
                Message::Refresh => spawn_fetch(app, config, &tx),
                Message::OpenLink => {
                    if let Some(card) = app.current_card() {
                        let _ = open::that(&card.link);
                    }
                }
                Message::CopyModelId => {
                    if let Some(card) = app.current_card() {
                        copy_to_clipboard(app, card.id_line.clone());
                    }
                }
                msg => {
                    if !app.update(msg) {
                        return Ok(());
                    }
                }
            }
        }

        app.tick(Instant::now());
    }
}

fn copy_to_clipboard(app: &mut App, text: String) {
    match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.clone())) {
        Ok(()) => app.status = format!("Copied: {}", text),
        Err(err) => app.status = format!("Copy failed: {}", err),
    }
}
