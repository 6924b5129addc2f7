use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use gridfm_core::session::Dialog;
use gridfm_core::{Intent, SortMode};

/// Maps a key event to an [`Intent`] given the dialog currently open.
///
/// Browse keys are fixed; while a dialog is open only the keys that dialog
/// understands are forwarded. Returns `None` for keys with no meaning.
pub fn key_to_intent(key: KeyEvent, dialog: Option<&Dialog>) -> Option<Intent> {
    match dialog {
        None => handle_browse_key(key),
        Some(Dialog::Text { .. }) => handle_text_key(key),
        Some(Dialog::Confirm { .. }) => handle_confirm_key(key),
        Some(Dialog::Menu { .. }) => handle_menu_key(key),
    }
}

fn handle_browse_key(key: KeyEvent) -> Option<Intent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Intent::Quit),
            _ => None,
        };
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        return match key.code {
            KeyCode::Char(c @ '1'..='4') => Some(Intent::QuickColumns(c as usize - '0' as usize)),
            _ => None,
        };
    }

    let intent = match key.code {
        KeyCode::Up => Intent::Up,
        KeyCode::Down => Intent::Down,
        KeyCode::Left => Intent::Left,
        KeyCode::Right => Intent::Right,
        KeyCode::PageUp => Intent::PageUp,
        KeyCode::PageDown => Intent::PageDown,
        KeyCode::Enter => Intent::Open,
        KeyCode::Backspace => Intent::Back,
        KeyCode::Esc => Intent::Esc,
        KeyCode::Delete => Intent::Delete,
        KeyCode::F(5) => Intent::Refresh,
        KeyCode::Char(' ') => Intent::Toggle,
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            Intent::QuickSort(SortMode::ALL[index])
        }
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'a' => Intent::SelectAll,
            's' => Intent::Sort,
            'w' => Intent::View,
            'l' => Intent::Layout,
            'c' => Intent::Copy,
            'x' => Intent::Cut,
            'v' => Intent::Paste,
            'r' => Intent::Rename,
            'd' => Intent::Delete,
            'n' => Intent::NewFolder,
            't' => Intent::NewFile,
            '/' => Intent::Search,
            'f' => Intent::Filter,
            'z' => Intent::Compress,
            'e' => Intent::Extract,
            'q' => Intent::Quit,
            _ => return None,
        },
        _ => return None,
    };
    Some(intent)
}

fn handle_text_key(key: KeyEvent) -> Option<Intent> {
    match key.code {
        KeyCode::Esc => Some(Intent::Esc),
        KeyCode::Enter => Some(Intent::Submit),
        KeyCode::Backspace => Some(Intent::Backspace),
        KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => None,
        KeyCode::Char(c) => Some(Intent::Char(c)),
        _ => None,
    }
}

fn handle_confirm_key(key: KeyEvent) -> Option<Intent> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => Some(Intent::Confirm(true)),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(Intent::Confirm(false)),
        KeyCode::Enter => Some(Intent::Submit),
        KeyCode::Esc => Some(Intent::Esc),
        _ => None,
    }
}

fn handle_menu_key(key: KeyEvent) -> Option<Intent> {
    match key.code {
        KeyCode::Up => Some(Intent::Up),
        KeyCode::Down => Some(Intent::Down),
        KeyCode::Enter => Some(Intent::Submit),
        KeyCode::Esc => Some(Intent::Esc),
        KeyCode::Char(c) => Some(Intent::Char(c)),
        _ => None,
    }
}
