use std::time::Instant;

use crossterm::event::{KeyCode, KeyEventKind};

use crate::config::{KEY_RELEASE_TIMEOUT, KEY_REPEAT_GAP};
use crate::paddle::Intent;

/// The game's logical key set. Everything the simulation reacts to is one of
/// these; the shell never hands raw terminal codes to the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKey {
    P1Up,
    P1Down,
    P2Up,
    P2Down,
    TogglePause,
    ToggleMode,
    CycleDifficulty,
    Restart,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Release,
}

#[derive(Debug, Clone, Copy)]
pub struct KeyEvent {
    pub key: GameKey,
    pub action: KeyAction,
    pub at: Instant,
}

/// P1 plays W/S, P2 the arrow keys. Q and Esc both quit.
pub fn map_key(code: KeyCode) -> Option<GameKey> {
    match code {
        KeyCode::Char('w') | KeyCode::Char('W') => Some(GameKey::P1Up),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(GameKey::P1Down),
        KeyCode::Up => Some(GameKey::P2Up),
        KeyCode::Down => Some(GameKey::P2Down),
        KeyCode::Char(' ') => Some(GameKey::TogglePause),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(GameKey::ToggleMode),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(GameKey::CycleDifficulty),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameKey::Restart),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(GameKey::Quit),
        _ => None,
    }
}

/// Auto-repeat counts as a fresh press; it is what keeps a held key alive on
/// terminals that never report releases.
pub fn map_kind(kind: KeyEventKind) -> KeyAction {
    match kind {
        KeyEventKind::Press | KeyEventKind::Repeat => KeyAction::Press,
        KeyEventKind::Release => KeyAction::Release,
    }
}

const MOVE_SLOTS: usize = 4;

/// Turns a stream of discrete movement-key presses into persistent held
/// state. Terminals generally deliver only press/repeat events, so a key is
/// considered released once it has not been seen for [`KEY_RELEASE_TIMEOUT`].
/// Terminals that do report releases short-circuit the timeout.
#[derive(Debug)]
pub struct Debouncer {
    /// Last press per movement key, slot order P1Up, P1Down, P2Up, P2Down.
    held: [Option<Instant>; MOVE_SLOTS],
}

impl Debouncer {
    pub fn new() -> Self {
        debug_assert!(
            KEY_RELEASE_TIMEOUT > KEY_REPEAT_GAP,
            "held keys would flicker between auto-repeats"
        );
        Self {
            held: [None; MOVE_SLOTS],
        }
    }

    fn slot(key: GameKey) -> Option<usize> {
        match key {
            GameKey::P1Up => Some(0),
            GameKey::P1Down => Some(1),
            GameKey::P2Up => Some(2),
            GameKey::P2Down => Some(3),
            _ => None,
        }
    }

    /// Record a press or auto-repeat. A player cannot hold both directions:
    /// pressing one releases the other immediately.
    pub fn press(&mut self, key: GameKey, at: Instant) {
        if let Some(slot) = Self::slot(key) {
            self.held[slot] = Some(at);
            self.held[slot ^ 1] = None;
        }
    }

    pub fn release(&mut self, key: GameKey) {
        if let Some(slot) = Self::slot(key) {
            self.held[slot] = None;
        }
    }

    /// Drop every entry that has gone quiet for longer than the release
    /// timeout. Called once per tick.
    pub fn expire(&mut self, now: Instant) {
        for entry in &mut self.held {
            if let Some(at) = *entry {
                if now.duration_since(at) > KEY_RELEASE_TIMEOUT {
                    *entry = None;
                }
            }
        }
    }

    pub fn p1_intent(&self) -> Intent {
        Self::intent(self.held[0], self.held[1])
    }

    pub fn p2_intent(&self) -> Intent {
        Self::intent(self.held[2], self.held[3])
    }

    fn intent(up: Option<Instant>, down: Option<Instant>) -> Intent {
        if up.is_some() {
            Intent::Up
        } else if down.is_some() {
            Intent::Down
        } else {
            Intent::Hold
        }
    }
}
