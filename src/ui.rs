use ratatui::{
    layout::{Alignment, Margin, Rect},
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use tui_big_text::{BigText, PixelSize};

use crate::game::{Mode, Notice, RenderableFrame};
use crate::paddle::Side;

/// Field color scheme: chrome for borders/paddles/text, accent for the ball
/// and difficulty, info for scores and hints, alert for the end screen.
struct Palette {
    chrome: Color,
    accent: Color,
    info: Color,
    alert: Color,
}

const PALETTE: Palette = Palette {
    chrome: Color::White,
    accent: Color::Yellow,
    info: Color::Green,
    alert: Color::Red,
};

/// Render one frame. The field keeps its creation-time size; if the
/// terminal has shrunk since, every rect is clipped against the real screen
/// and off-screen pieces are skipped rather than crashing the draw.
pub fn draw(frame: &mut Frame, view: &RenderableFrame) {
    let screen = frame.area();
    let field = Rect::new(0, 0, view.width, view.height).intersection(screen);
    if field.width < 4 || field.height < 8 {
        return;
    }

    let block = Block::default()
        .title(" pong ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Thick)
        .style(Style::default().fg(PALETTE.chrome));
    frame.render_widget(block, field);

    // Wipe the interior every frame. Ratatui alternates two buffers, so a
    // cell nobody writes this frame resurfaces with what it held two frames
    // ago; moving objects leave ghost trails without this.
    frame.render_widget(Clear, field.inner(Margin::new(1, 1)));

    draw_net(frame, view, screen);
    draw_hud(frame, view, screen);

    if let Some(winner) = view.winner {
        draw_game_over(frame, view, winner, screen);
        return;
    }

    draw_paddles(frame, view, screen);
    if view.paused {
        centered(
            frame,
            view,
            view.height / 2,
            "PAUSED - Press SPACE to continue",
            PALETTE.info,
            screen,
        );
    } else {
        draw_ball(frame, view, screen);
    }
    draw_instructions(frame, view, screen);
}

fn draw_net(frame: &mut Frame, view: &RenderableFrame, screen: Rect) {
    let x = view.width / 2;
    for y in (1..view.height.saturating_sub(1)).step_by(2) {
        line(frame, screen, x, y, "│", PALETTE.chrome);
    }
}

fn draw_hud(frame: &mut Frame, view: &RenderableFrame, screen: Rect) {
    let score = format!("{}    {}", view.score[0], view.score[1]);
    centered(frame, view, 1, &score, PALETTE.info, screen);
    centered(frame, view, 2, view.mode.label(), PALETTE.chrome, screen);
    let difficulty = format!("Difficulty: {}", view.difficulty.label());
    centered(frame, view, 3, &difficulty, PALETTE.accent, screen);

    match view.notice {
        Some(Notice::ModeChanged(mode)) => {
            let text = format!("Switched to {} Mode!", mode.label());
            centered(frame, view, 4, &text, PALETTE.accent, screen);
        }
        Some(Notice::DifficultyChanged(level)) => {
            let text = format!("Difficulty: {}!", level.label());
            centered(frame, view, 5, &text, PALETTE.info, screen);
        }
        None => {}
    }
}

fn draw_paddles(frame: &mut Frame, view: &RenderableFrame, screen: Rect) {
    let bar = vec!["█"; view.paddle_height as usize].join("\n");
    for (x, y) in [(view.left_x, view.left_y), (view.right_x, view.right_y)] {
        let area = Rect::new(x, y.round() as u16, 1, view.paddle_height).intersection(screen);
        if area.width == 0 || area.height == 0 {
            continue;
        }
        frame.render_widget(
            Paragraph::new(bar.clone()).style(Style::default().fg(PALETTE.chrome)),
            area,
        );
    }
}

fn draw_ball(frame: &mut Frame, view: &RenderableFrame, screen: Rect) {
    let x = view.ball_x.round();
    let y = view.ball_y.round();
    if x < 0.0 || y < 0.0 {
        return;
    }
    let area = Rect::new(x as u16, y as u16, 1, 1).intersection(screen);
    if area.width == 0 || area.height == 0 {
        return;
    }
    frame.render_widget(
        Paragraph::new("●").style(Style::default().fg(PALETTE.accent)),
        area,
    );
}

fn draw_instructions(frame: &mut Frame, view: &RenderableFrame, screen: Rect) {
    let controls = match view.mode {
        Mode::SinglePlayer => "Player: W/S",
        Mode::TwoPlayer => "P1: W/S, P2: ↑/↓",
    };
    let switches = match view.mode {
        Mode::SinglePlayer => "M: Two Player | D: Difficulty",
        Mode::TwoPlayer => "M: Single Player | D: Difficulty",
    };
    let goal = format!("First to {} wins!", view.target_score);
    let lines = [controls, switches, "Q: Quit | Space: Pause", goal.as_str()];

    let start = view.height.saturating_sub(lines.len() as u16 + 1);
    for (i, text) in lines.iter().enumerate() {
        line(frame, screen, 1, start + i as u16, text, PALETTE.chrome);
    }
}

fn draw_game_over(frame: &mut Frame, view: &RenderableFrame, winner: Side, screen: Rect) {
    let banner = BigText::builder()
        .pixel_size(PixelSize::Quadrant)
        .style(Style::default().fg(PALETTE.alert))
        .lines(vec!["GAME OVER".into()])
        .alignment(Alignment::Center)
        .build();
    let banner_row = (view.height / 2).saturating_sub(7);
    let banner_area = Rect::new(0, banner_row, view.width, 4).intersection(screen);
    if banner_area.height > 0 {
        frame.render_widget(banner, banner_area);
    }

    let winner_text = match (view.mode, winner) {
        (Mode::SinglePlayer, Side::Left) => "You Win!",
        (Mode::SinglePlayer, Side::Right) => "Computer Wins!",
        (Mode::TwoPlayer, Side::Left) => "Player 1 Wins!",
        (Mode::TwoPlayer, Side::Right) => "Player 2 Wins!",
    };
    let score = format!("Final Score: {} - {}", view.score[0], view.score[1]);
    let difficulty = format!("Difficulty: {}", view.difficulty.label());
    let summary: [(&str, Color); 8] = [
        (winner_text, PALETTE.alert),
        (score.as_str(), PALETTE.alert),
        (difficulty.as_str(), PALETTE.alert),
        ("", PALETTE.info),
        ("Press R to restart", PALETTE.info),
        ("Press M to change mode", PALETTE.info),
        ("Press D to change difficulty", PALETTE.info),
        ("Press Q to quit", PALETTE.info),
    ];

    let mut row = (view.height / 2).saturating_sub(2);
    for (text, color) in summary {
        if !text.is_empty() {
            centered(frame, view, row, text, color, screen);
        }
        row += 1;
    }
}

fn centered(
    frame: &mut Frame,
    view: &RenderableFrame,
    row: u16,
    text: &str,
    color: Color,
    screen: Rect,
) {
    let width = text.chars().count() as u16;
    let x = view.width.saturating_sub(width) / 2;
    line(frame, screen, x, row, text, color);
}

fn line(frame: &mut Frame, screen: Rect, x: u16, y: u16, text: &str, color: Color) {
    let width = text.chars().count() as u16;
    let area = Rect::new(x, y, width, 1).intersection(screen);
    if area.width == 0 || area.height == 0 {
        return;
    }
    frame.render_widget(Paragraph::new(text).style(Style::default().fg(color)), area);
}
