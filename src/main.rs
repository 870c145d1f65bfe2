use std::{io::stdout, thread, time::Instant};

use color_eyre::eyre::{bail, Result};
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{execute, terminal};
use ratatui::DefaultTerminal;

mod ai;
mod ball;
mod config;
mod event;
mod game;
mod input;
mod paddle;
mod ui;

use crate::config::{GameConfig, FRAME_INTERVAL, MIN_FIELD_HEIGHT, MIN_FIELD_WIDTH};
use crate::event::InputSource;
use crate::game::GameSession;

fn main() -> Result<()> {
    color_eyre::install()?;

    // check before touching raw mode; a cramped terminal gets a plain
    // message instead of a corrupted game field
    let (width, height) = terminal::size()?;
    if width < MIN_FIELD_WIDTH || height < MIN_FIELD_HEIGHT {
        bail!(
            "terminal too small: need at least {MIN_FIELD_WIDTH}x{MIN_FIELD_HEIGHT} characters, got {width}x{height}"
        );
    }

    let terminal = ratatui::init();

    // Terminals speaking the kitty protocol report real key releases; the
    // debouncer's timeout heuristic covers everything else.
    let enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true));
    if enhanced {
        let _ = execute!(
            stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        );
    }

    let result = run(terminal, GameConfig::new(width, height));

    if enhanced {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
    }
    ratatui::restore();

    let score = result?;
    println!("Thanks for playing!");
    println!("Final Score: {} - {}", score[0], score[1]);
    Ok(())
}

fn run(mut terminal: DefaultTerminal, config: GameConfig) -> Result<[u16; 2]> {
    let input = InputSource::spawn();
    let mut session = GameSession::new(config, Instant::now());

    loop {
        let events = input.drain();
        if !session.tick(&events, Instant::now()) {
            break;
        }
        let view = session.frame();
        terminal.draw(|frame| ui::draw(frame, &view))?;
        thread::sleep(FRAME_INTERVAL);
    }

    Ok(session.frame().score)
}
