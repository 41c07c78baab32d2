use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::App;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.quit();
        }
        KeyCode::Esc => {
            app.quit();
        }
        KeyCode::Backspace => {
            app.search.remove_chr();
        }
        KeyCode::Enter => {
            app.submit();
        }
        // Ctrl/Alt chords are not text.
        KeyCode::Char(c) if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() => {
            app.search.push(c);
        }
        _ => {}
    }
}
