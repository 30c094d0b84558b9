//! Key-state map fed by the terminal driver and read by entities.
//!
//! Entities only ever ask "is this logical key down right now?". The driver
//! turns crossterm events into presses and releases before each update pass.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use std::collections::HashMap;

/// Logical key identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    ArrowUp,
    ArrowDown,
    Char(char),
}

/// Key that restarts the run after a game over.
pub const RESTART_KEY: Key = Key::Char('r');

impl Key {
    /// Parse a logical key id such as `"ArrowUp"`, `" "` or `"r"`.
    pub fn from_id(id: &str) -> Option<Key> {
        match id {
            " " | "Space" => Some(Key::Space),
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            _ => {
                let mut chars = id.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::Char(c.to_ascii_lowercase())),
                    _ => None,
                }
            }
        }
    }

    /// Map a terminal key code onto a logical key.
    pub fn from_key_code(code: KeyCode) -> Option<Key> {
        match code {
            KeyCode::Char(' ') => Some(Key::Space),
            KeyCode::Up => Some(Key::ArrowUp),
            KeyCode::Down => Some(Key::ArrowDown),
            KeyCode::Char(c) => Some(Key::Char(c.to_ascii_lowercase())),
            _ => None,
        }
    }
}

/// Pressed/released state per logical key.
///
/// With `auto_release` on, a key that has not been seen for the hold window
/// counts as released. Terminals without keyboard enhancement only report
/// presses and auto-repeats, never releases.
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    pressed: HashMap<Key, u64>,
    auto_release: bool,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_auto_release(auto_release: bool) -> Self {
        Self {
            pressed: HashMap::new(),
            auto_release,
        }
    }

    pub fn set_auto_release(&mut self, auto_release: bool) {
        self.auto_release = auto_release;
    }

    /// Record a press (or auto-repeat) seen at `now_ms`.
    pub fn press(&mut self, key: Key, now_ms: u64) {
        self.pressed.insert(key, now_ms);
    }

    pub fn release(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    /// Set a key's state directly.
    pub fn set(&mut self, key: Key, down: bool) {
        if down {
            self.press(key, 0);
        } else {
            self.release(key);
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains_key(&key)
    }

    pub fn jump_pressed(&self) -> bool {
        self.is_pressed(Key::Space) || self.is_pressed(Key::ArrowUp)
    }

    pub fn duck_pressed(&self) -> bool {
        self.is_pressed(Key::ArrowDown)
    }

    pub fn restart_pressed(&self) -> bool {
        self.is_pressed(RESTART_KEY)
    }

    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    /// Release keys not seen within `hold_ms`. No-op unless auto-release is on.
    pub fn expire(&mut self, now_ms: u64, hold_ms: u64) {
        if !self.auto_release {
            return;
        }
        self.pressed
            .retain(|_, seen| now_ms.saturating_sub(*seen) <= hold_ms);
    }

    /// Fold a terminal key event into the map. Unmapped keys are ignored.
    pub fn apply_event(&mut self, event: &KeyEvent, now_ms: u64) {
        let Some(key) = Key::from_key_code(event.code) else {
            return;
        };
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.press(key, now_ms),
            KeyEventKind::Release => self.release(key),
        }
    }
}
