use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use super::app::{App, Focus, Message};

/// Poll interval doubles as the animation tick.
pub const TICK: Duration = Duration::from_millis(50);

pub fn handle_events(app: &App) -> Result<Option<Message>> {
    if event::poll(TICK)? {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                return Ok(None);
            }
            return Ok(handle_key(app, key.code, key.modifiers));
        }
    }

    Ok(None)
}

fn handle_key(app: &App, code: KeyCode, modifiers: KeyModifiers) -> Option<Message> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Message::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Message::Quit),

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => match app.focus {
            Focus::Filters => Some(Message::NextFilter),
            Focus::Cards => Some(Message::NextCard),
        },
        KeyCode::Char('k') | KeyCode::Up => match app.focus {
            Focus::Filters => Some(Message::PrevFilter),
            Focus::Cards => Some(Message::PrevCard),
        },
        KeyCode::Char('h') | KeyCode::Left => Some(Message::SwitchFocus),
        KeyCode::Char('l') | KeyCode::Right => Some(Message::SwitchFocus),
        KeyCode::Tab | KeyCode::BackTab => Some(Message::SwitchFocus),

        // Actions
        KeyCode::Char('r') => Some(Message::Refresh),
        KeyCode::Char('o') | KeyCode::Enter => Some(Message::OpenLink),
        KeyCode::Char('c') => Some(Message::CopyModelId),

        _ => None,
    }
}
