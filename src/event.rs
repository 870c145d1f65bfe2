use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::thread;
use std::time::Instant;

use crossterm::event::{self, Event};

use crate::config::{INPUT_POLL_INTERVAL, INPUT_QUEUE_DEPTH};
use crate::input::{self, GameKey, KeyAction, KeyEvent};

/// Background key listener. Crossterm events are mapped to logical keys on
/// the producer side and handed over through a bounded queue; the tick loop
/// drains it without ever blocking on input.
pub struct InputSource {
    receiver: Receiver<KeyEvent>,
}

impl InputSource {
    pub fn spawn() -> Self {
        let (sender, receiver) = mpsc::sync_channel(INPUT_QUEUE_DEPTH);
        thread::spawn(move || listen(sender));
        Self { receiver }
    }

    /// Everything that arrived since the last frame. Never blocks.
    pub fn drain(&self) -> Vec<KeyEvent> {
        self.receiver.try_iter().collect()
    }
}

fn listen(sender: SyncSender<KeyEvent>) {
    loop {
        let ready = match event::poll(INPUT_POLL_INTERVAL) {
            Ok(ready) => ready,
            Err(_) => break,
        };
        if !ready {
            continue;
        }
        let Ok(read) = event::read() else { break };
        let Event::Key(key) = read else { continue };
        let Some(game_key) = input::map_key(key.code) else {
            continue;
        };

        let event = KeyEvent {
            key: game_key,
            action: input::map_kind(key.kind),
            at: Instant::now(),
        };
        match sender.try_send(event) {
            // a full queue means the consumer is stalled; dropping a repeat
            // beats wedging the terminal
            Ok(()) | Err(TrySendError::Full(_)) => {}
            Err(TrySendError::Disconnected(_)) => return,
        }
    }

    // the event source is gone; ask the game to shut down rather than leave
    // it running deaf
    let _ = sender.try_send(KeyEvent {
        key: GameKey::Quit,
        action: KeyAction::Press,
        at: Instant::now(),
    });
}
