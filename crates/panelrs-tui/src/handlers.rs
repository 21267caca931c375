//! Keyboard event handling.

use crate::app::{App, InputMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use panelrs_core::{DetailState, ModalKind};

/// Handle a key event. Returns true if the app should quit.
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    // Ctrl+C always quits.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return true;
    }

    if app.modal.is_some() {
        handle_modal_key(app, key);
        return false;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Search => handle_search_key(app, key),
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) -> bool {
    // List controls are disabled while a fetch is outstanding.
    if app.pane().list.is_busy() {
        return false;
    }

    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            true
        }
        KeyCode::Tab => {
            app.switch_screen();
            false
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_down();
            false
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_up();
            false
        }
        KeyCode::Char('h') | KeyCode::Left => {
            app.prev_page();
            false
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.next_page();
            false
        }
        KeyCode::Char('s') => {
            app.cycle_page_size();
            false
        }
        KeyCode::Char('/') => {
            app.start_search();
            false
        }
        KeyCode::Char('r') => {
            app.refresh();
            false
        }
        KeyCode::Char('n') => {
            app.open_modal(ModalKind::Add);
            false
        }
        KeyCode::Char('e') => {
            app.open_modal(ModalKind::Edit);
            false
        }
        KeyCode::Char('v') | KeyCode::Enter => {
            app.open_modal(ModalKind::View);
            false
        }
        KeyCode::Char('d') => {
            app.open_modal(ModalKind::Delete);
            false
        }
        _ => false,
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.exit_search();
            false
        }
        KeyCode::Enter => {
            app.submit_search();
            false
        }
        KeyCode::Char(c) => {
            app.search_push(c);
            false
        }
        KeyCode::Backspace => {
            app.search_pop();
            false
        }
        _ => false,
    }
}

fn handle_modal_key(app: &mut App, key: KeyEvent) {
    let Some(modal) = app.modal.as_ref() else {
        return;
    };
    let kind = modal.kind();
    let load_failed = matches!(modal.detail(), DetailState::Failed(_));

    // Escape asks the state machine to close; it is dropped while a
    // request is in flight.
    if key.code == KeyCode::Esc {
        app.close_modal();
        return;
    }

    match kind {
        ModalKind::Add | ModalKind::Edit => {
            // An edit whose detail fetch failed only offers closing.
            if load_failed {
                if key.code == KeyCode::Enter {
                    app.close_modal();
                }
                return;
            }
            match key.code {
                KeyCode::Enter => app.submit_modal(),
                KeyCode::Tab => app.next_modal_field(),
                KeyCode::Backspace => app.modal_backspace(),
                KeyCode::Char(c) => app.modal_type(c),
                _ => {}
            }
        }
        ModalKind::View => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char('q')) {
                app.close_modal();
            }
        }
        ModalKind::Delete => match key.code {
            KeyCode::Char('y') | KeyCode::Enter => app.confirm_delete(),
            KeyCode::Char('n') => app.close_modal(),
            _ => {}
        },
    }
}
