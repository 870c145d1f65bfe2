use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::ai;
use crate::ball::Ball;
use crate::config::{Difficulty, GameConfig, NOTICE_DURATION};
use crate::input::{Debouncer, GameKey, KeyAction, KeyEvent};
use crate::paddle::{Control, Intent, Paddle, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    SinglePlayer,
    TwoPlayer,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::SinglePlayer => "Single Player",
            Mode::TwoPlayer => "Two Player",
        }
    }

    fn toggled(self) -> Self {
        match self {
            Mode::SinglePlayer => Mode::TwoPlayer,
            Mode::TwoPlayer => Mode::SinglePlayer,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Playing,
    Paused,
    GameOver(Side),
}

/// Short-lived banner after a mode or difficulty switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    ModeChanged(Mode),
    DifficultyChanged(Difficulty),
}

/// Everything the renderer needs for one frame, and nothing it could do
/// game logic with. The shell maps this to glyphs and colors.
#[derive(Debug)]
pub struct RenderableFrame {
    pub width: u16,
    pub height: u16,
    pub paddle_height: u16,
    pub left_x: u16,
    pub right_x: u16,
    pub left_y: f32,
    pub right_y: f32,
    pub ball_x: f32,
    pub ball_y: f32,
    pub score: [u16; 2],
    pub target_score: u16,
    pub mode: Mode,
    pub difficulty: Difficulty,
    pub paused: bool,
    pub winner: Option<Side>,
    pub notice: Option<Notice>,
}

/// The whole game: one owned value, mutated once per tick, no statics.
pub struct GameSession {
    config: GameConfig,
    mode: Mode,
    status: Status,
    left: Paddle,
    right: Paddle,
    ball: Ball,
    score: [u16; 2],
    keys: Debouncer,
    rng: StdRng,
    /// Reference point for the paddle-motion dt.
    last_motion: Instant,
    notice: Option<(Notice, Instant)>,
}

impl GameSession {
    pub fn new(config: GameConfig, now: Instant) -> Self {
        Self::with_rng(config, StdRng::from_os_rng(), now)
    }

    fn with_rng(config: GameConfig, mut rng: StdRng, now: Instant) -> Self {
        let ball = Ball::new(&config, &mut rng, now);
        Self {
            mode: Mode::SinglePlayer,
            status: Status::Playing,
            left: Paddle::new(Side::Left, Control::Human, &config),
            right: Paddle::new(Side::Right, Control::Computer, &config),
            ball,
            score: [0, 0],
            keys: Debouncer::new(),
            rng,
            last_motion: now,
            notice: None,
            config,
        }
    }

    /// One frame of simulation: apply this frame's input, derive intents,
    /// step both paddles, advance the ball through its time gate, settle
    /// score and state. Returns false once the player asks to quit.
    pub fn tick(&mut self, events: &[KeyEvent], now: Instant) -> bool {
        for event in events {
            if !self.apply_key(event, now) {
                return false;
            }
        }
        self.keys.expire(now);

        let dt = now.duration_since(self.last_motion).as_secs_f32();
        self.last_motion = now;

        if self.status == Status::Playing {
            self.left.set_drive(self.keys.p1_intent(), 1.0);
            match self.mode {
                Mode::TwoPlayer => self.right.set_drive(self.keys.p2_intent(), 1.0),
                Mode::SinglePlayer => {
                    let (intent, throttle) =
                        ai::drive(&self.right, &self.ball, &self.config, &mut self.rng);
                    self.right.set_drive(intent, throttle);
                }
            }
            self.left.step(dt, &self.config);
            self.right.step(dt, &self.config);

            if let Some(scorer) = self.ball.advance(&self.left, &self.right, &self.config, now) {
                self.award_point(scorer, now);
            }
        } else {
            // hold everything still; the refreshed gate means resuming
            // replays nothing of the time spent paused
            self.left.set_drive(Intent::Hold, 0.0);
            self.right.set_drive(Intent::Hold, 0.0);
            self.ball.rearm(now);
        }

        if let Some((_, since)) = self.notice {
            if now.duration_since(since) >= NOTICE_DURATION {
                self.notice = None;
            }
        }
        true
    }

    pub fn frame(&self) -> RenderableFrame {
        RenderableFrame {
            width: self.config.width,
            height: self.config.height,
            paddle_height: self.config.paddle_height,
            left_x: self.left.x(&self.config),
            right_x: self.right.x(&self.config),
            left_y: self.left.y,
            right_y: self.right.y,
            ball_x: self.ball.x,
            ball_y: self.ball.y,
            score: self.score,
            target_score: self.config.target_score,
            mode: self.mode,
            difficulty: self.config.difficulty,
            paused: self.status == Status::Paused,
            winner: match self.status {
                Status::GameOver(side) => Some(side),
                _ => None,
            },
            notice: self.notice.map(|(notice, _)| notice),
        }
    }

    fn apply_key(&mut self, event: &KeyEvent, now: Instant) -> bool {
        if event.action == KeyAction::Release {
            self.keys.release(event.key);
            return true;
        }
        match event.key {
            GameKey::Quit => return false,
            GameKey::TogglePause => match self.status {
                Status::Playing => self.status = Status::Paused,
                Status::Paused => self.status = Status::Playing,
                Status::GameOver(_) => {}
            },
            GameKey::ToggleMode => self.toggle_mode(now),
            GameKey::CycleDifficulty => self.cycle_difficulty(now),
            GameKey::Restart => {
                if matches!(self.status, Status::GameOver(_)) {
                    self.reset(now);
                }
            }
            GameKey::P1Up | GameKey::P1Down | GameKey::P2Up | GameKey::P2Down => {
                self.keys.press(event.key, event.at);
            }
        }
        true
    }

    /// Mode switches never carry a half-played score along; outside the
    /// game-over screen they restart the match on the spot.
    fn toggle_mode(&mut self, now: Instant) {
        self.mode = self.mode.toggled();
        self.right.control = match self.mode {
            Mode::SinglePlayer => Control::Computer,
            Mode::TwoPlayer => Control::Human,
        };
        self.notice = Some((Notice::ModeChanged(self.mode), now));
        if !matches!(self.status, Status::GameOver(_)) {
            self.reset(now);
        }
    }

    /// Ball interval and the AI multipliers are derived from the config on
    /// read, so the new level takes effect the moment this returns.
    fn cycle_difficulty(&mut self, now: Instant) {
        self.config.difficulty = self.config.difficulty.next();
        self.notice = Some((Notice::DifficultyChanged(self.config.difficulty), now));
        if !matches!(self.status, Status::GameOver(_)) {
            self.reset(now);
        }
    }

    fn reset(&mut self, now: Instant) {
        self.score = [0, 0];
        self.left.reset(&self.config);
        self.right.reset(&self.config);
        self.ball.serve(&self.config, &mut self.rng, now);
        self.status = Status::Playing;
        self.last_motion = now;
    }

    fn award_point(&mut self, scorer: Side, now: Instant) {
        let index = match scorer {
            Side::Left => 0,
            Side::Right => 1,
        };
        self.score[index] += 1;
        if self.score[index] >= self.config.target_score {
            self.status = Status::GameOver(scorer);
        } else {
            self.ball.serve(&self.config, &mut self.rng, now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn press(key: GameKey, at: Instant) -> KeyEvent {
        KeyEvent {
            key,
            action: KeyAction::Press,
            at,
        }
    }

    fn session(now: Instant) -> GameSession {
        GameSession::with_rng(GameConfig::new(80, 24), StdRng::seed_from_u64(99), now)
    }

    /// Session flipped to two-player, so no AI advances the session RNG.
    fn two_player(now: Instant) -> GameSession {
        let mut game = session(now);
        game.tick(&[press(GameKey::ToggleMode, now)], now);
        game
    }

    #[test]
    fn quit_ends_the_session() {
        let t0 = Instant::now();
        let mut game = session(t0);
        assert!(game.tick(&[], t0 + Duration::from_millis(16)));
        assert!(!game.tick(&[press(GameKey::Quit, t0)], t0 + Duration::from_millis(32)));
    }

    #[test]
    fn held_key_moves_the_left_paddle() {
        let t0 = Instant::now();
        let mut game = session(t0);
        let start = game.left.y;

        let mut now = t0;
        for _ in 0..10 {
            now += Duration::from_millis(16);
            game.tick(&[press(GameKey::P1Down, now)], now);
        }

        assert!(game.left.y > start);
        assert!(game.left.vy > 0.0);
    }

    #[test]
    fn stale_key_stops_moving_the_paddle() {
        let t0 = Instant::now();
        let mut game = session(t0);

        let mut now = t0 + Duration::from_millis(16);
        game.tick(&[press(GameKey::P1Down, now)], now);
        assert_eq!(game.left.intent, Intent::Down);

        // no refresh for well past the release timeout
        now += Duration::from_millis(200);
        game.tick(&[], now);
        assert_eq!(game.left.intent, Intent::Hold);
    }

    #[test]
    fn pause_freezes_and_resumes_without_drift() {
        let t0 = Instant::now();
        let mut game = two_player(t0);

        // let the ball take a few gated steps first
        let mut now = t0;
        for _ in 0..5 {
            now += Duration::from_millis(16);
            game.tick(&[], now);
        }

        now += Duration::from_millis(16);
        game.tick(&[press(GameKey::TogglePause, now)], now);
        assert_eq!(game.status, Status::Paused);

        let ball = (game.ball.x, game.ball.y, game.ball.dx, game.ball.dy);
        let paddles = (game.left.y, game.left.vy, game.right.y, game.right.vy);

        for _ in 0..30 {
            now += Duration::from_millis(100);
            game.tick(&[], now);
        }
        assert_eq!(ball, (game.ball.x, game.ball.y, game.ball.dx, game.ball.dy));

        // unpause a hair after the last paused tick: still no movement
        now += Duration::from_millis(1);
        game.tick(&[press(GameKey::TogglePause, now)], now);
        assert_eq!(game.status, Status::Playing);
        assert_eq!(ball, (game.ball.x, game.ball.y, game.ball.dx, game.ball.dy));
        assert_eq!(
            paddles,
            (game.left.y, game.left.vy, game.right.y, game.right.vy)
        );

        // and the next gated step is an ordinary one-velocity move
        let before = (game.ball.x, game.ball.y);
        now += Duration::from_millis(25);
        game.tick(&[], now);
        assert_eq!(game.ball.x, before.0 + game.ball.dx);
        assert_eq!(game.ball.y, before.1 + game.ball.dy);
    }

    #[test]
    fn conceding_a_point_re_serves_from_center() {
        let t0 = Instant::now();
        let mut game = two_player(t0);

        game.ball.x = 0.4;
        game.ball.y = 2.5;
        game.ball.dx = -1.0;
        game.ball.dy = 0.0;

        let now = t0 + Duration::from_millis(25);
        game.tick(&[], now);

        assert_eq!(game.score, [0, 1]);
        assert_eq!(game.status, Status::Playing);
        assert_eq!(game.ball.x, game.config.center_x());
        assert_eq!(game.ball.y, game.config.center_y());
    }

    #[test]
    fn reaching_target_score_ends_the_game() {
        let t0 = Instant::now();
        let mut game = two_player(t0);
        game.score = [0, 9];

        game.ball.x = 0.4;
        game.ball.y = 2.5;
        game.ball.dx = -1.0;
        game.ball.dy = 0.0;

        let now = t0 + Duration::from_millis(25);
        game.tick(&[], now);

        assert_eq!(game.score, [0, 10]);
        assert_eq!(game.status, Status::GameOver(Side::Right));
        assert_eq!(game.frame().winner, Some(Side::Right));
    }

    #[test]
    fn restart_works_only_from_game_over() {
        let t0 = Instant::now();
        let mut game = two_player(t0);
        game.score = [3, 2];

        let mut now = t0 + Duration::from_millis(16);
        game.tick(&[press(GameKey::Restart, now)], now);
        assert_eq!(game.score, [3, 2], "restart must not reset a live game");

        game.status = Status::GameOver(Side::Left);
        now += Duration::from_millis(16);
        game.tick(&[press(GameKey::Restart, now)], now);
        assert_eq!(game.score, [0, 0]);
        assert_eq!(game.status, Status::Playing);
    }

    #[test]
    fn pause_key_is_dead_on_the_game_over_screen() {
        let t0 = Instant::now();
        let mut game = two_player(t0);
        game.status = Status::GameOver(Side::Left);

        let now = t0 + Duration::from_millis(16);
        game.tick(&[press(GameKey::TogglePause, now)], now);
        assert_eq!(game.status, Status::GameOver(Side::Left));
    }

    #[test]
    fn mode_switch_restarts_the_match() {
        let t0 = Instant::now();
        let mut game = session(t0);
        game.score = [3, 2];

        let now = t0 + Duration::from_millis(16);
        game.tick(&[press(GameKey::ToggleMode, now)], now);

        assert_eq!(game.mode, Mode::TwoPlayer);
        assert_eq!(game.right.control, Control::Human);
        assert_eq!(game.score, [0, 0]);
        assert_eq!(
            game.frame().notice,
            Some(Notice::ModeChanged(Mode::TwoPlayer))
        );
    }

    #[test]
    fn mode_switch_on_the_game_over_screen_keeps_the_result() {
        let t0 = Instant::now();
        let mut game = session(t0);
        game.score = [10, 4];
        game.status = Status::GameOver(Side::Left);

        let now = t0 + Duration::from_millis(16);
        game.tick(&[press(GameKey::ToggleMode, now)], now);

        assert_eq!(game.mode, Mode::TwoPlayer);
        assert_eq!(game.score, [10, 4]);
        assert_eq!(game.status, Status::GameOver(Side::Left));
    }

    #[test]
    fn difficulty_cycle_retunes_and_restarts() {
        let t0 = Instant::now();
        let mut game = session(t0);
        game.score = [1, 1];

        let now = t0 + Duration::from_millis(16);
        game.tick(&[press(GameKey::CycleDifficulty, now)], now);

        assert_eq!(game.config.difficulty, Difficulty::Hard);
        assert_eq!(game.config.ball_interval(), Duration::from_millis(10));
        assert_eq!(game.score, [0, 0]);
        assert_eq!(
            game.frame().notice,
            Some(Notice::DifficultyChanged(Difficulty::Hard))
        );
    }

    #[test]
    fn notice_expires_after_its_window() {
        let t0 = Instant::now();
        let mut game = session(t0);

        let now = t0 + Duration::from_millis(16);
        game.tick(&[press(GameKey::CycleDifficulty, now)], now);
        assert!(game.frame().notice.is_some());

        game.tick(&[], now + NOTICE_DURATION + Duration::from_millis(1));
        assert!(game.frame().notice.is_none());
    }

    #[test]
    fn computer_tracks_an_incoming_ball() {
        let t0 = Instant::now();
        let mut game = session(t0);
        assert_eq!(game.mode, Mode::SinglePlayer);

        let start = game.right.y;
        let mut now = t0;
        for _ in 0..20 {
            // pin the ball high and incoming so the target stays put
            game.ball.x = 50.0;
            game.ball.y = 3.0;
            game.ball.dx = 0.5;
            game.ball.dy = 0.0;
            now += Duration::from_millis(16);
            game.tick(&[], now);
        }

        assert!(game.right.y < start, "paddle should chase the ball upward");
    }

    #[test]
    fn frame_mirrors_the_session() {
        let t0 = Instant::now();
        let game = session(t0);
        let frame = game.frame();

        assert_eq!(frame.width, 80);
        assert_eq!(frame.height, 24);
        assert_eq!(frame.paddle_height, 5);
        assert_eq!(frame.left_x, 2);
        assert_eq!(frame.right_x, 77);
        assert_eq!(frame.left_y, game.left.y);
        assert_eq!(frame.right_y, game.right.y);
        assert_eq!(frame.ball_x, game.ball.x);
        assert_eq!(frame.score, [0, 0]);
        assert_eq!(frame.target_score, 10);
        assert_eq!(frame.mode, Mode::SinglePlayer);
        assert_eq!(frame.difficulty, Difficulty::Medium);
        assert!(!frame.paused);
        assert!(frame.winner.is_none());
        assert!(frame.notice.is_none());
    }
}
