use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mybranches_core::{action::Action, browser::BrowserState};

fn is_ctrl_c(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Resolve a key event into an Action based on the browser's current view
pub fn resolve_browser_action(key: KeyEvent, state: &BrowserState) -> Option<Action> {
    // Global quit
    if is_ctrl_c(key) {
        return Some(Action::Quit);
    }

    if state.is_confirming_delete() {
        resolve_confirm_key(key.code)
    } else {
        resolve_main_key(key.code)
    }
}

fn resolve_main_key(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Char('c') => Some(Action::Copy),
        KeyCode::Char('d') => Some(Action::StartDelete),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Select),
        _ => None,
    }
}

fn resolve_confirm_key(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('y') => Some(Action::ConfirmDelete),
        KeyCode::Char('n') | KeyCode::Esc => Some(Action::CancelDelete),
        _ => None,
    }
}

/// The cleanup view only understands quitting
pub fn resolve_cleanup_action(key: KeyEvent) -> Option<Action> {
    if is_ctrl_c(key) || key.code == KeyCode::Char('q') {
        Some(Action::Quit)
    } else {
        None
    }
}
