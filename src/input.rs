//! Key event to game command mapping
//!
//! Every key press is one discrete command; there is no auto-repeat beyond
//! what the terminal itself sends.

use blockfall::{Command, KeyBindings as KeyNames};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

/// What a key press asks the shell to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Game(Command),
    Quit,
}

/// Key bindings resolved to key codes - supports multiple keys per action
#[derive(Debug, Clone)]
pub struct InputHandler {
    move_left: Vec<KeyCode>,
    move_right: Vec<KeyCode>,
    soft_drop: Vec<KeyCode>,
    rotate: Vec<KeyCode>,
    quit: Vec<KeyCode>,
}

impl InputHandler {
    /// Resolve the configured key names
    pub fn from_bindings(names: &KeyNames) -> Self {
        Self {
            move_left: parse_keys(&names.move_left),
            move_right: parse_keys(&names.move_right),
            soft_drop: parse_keys(&names.soft_drop),
            rotate: parse_keys(&names.rotate),
            quit: parse_keys(&names.quit),
        }
    }

    /// Map a key press to an action
    pub fn action_for(&self, key: KeyEvent) -> Option<Action> {
        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        let code = normalize_key(key.code);
        if self.move_left.contains(&code) {
            Some(Action::Game(Command::MoveLeft))
        } else if self.move_right.contains(&code) {
            Some(Action::Game(Command::MoveRight))
        } else if self.soft_drop.contains(&code) {
            Some(Action::Game(Command::SoftDrop))
        } else if self.rotate.contains(&code) {
            Some(Action::Game(Command::Rotate))
        } else if self.quit.contains(&code) {
            Some(Action::Quit)
        } else {
            None
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::from_bindings(&KeyNames::default())
    }
}

/// Parse a key string into KeyCode
fn parse_key(s: &str) -> Option<KeyCode> {
    let lower = s.to_lowercase();
    let code = match lower.as_str() {
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "space" => KeyCode::Char(' '),
        "enter" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "esc" | "escape" => KeyCode::Esc,
        _ => {
            let mut chars = lower.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };
    Some(code)
}

/// Parse a list of key strings, skipping names that are not keys
fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
    keys.iter()
        .filter_map(|name| {
            let code = parse_key(name);
            if code.is_none() {
                warn!(key = %name, "ignoring unknown key name");
            }
            code
        })
        .collect()
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
