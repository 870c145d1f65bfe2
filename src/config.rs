use std::time::Duration;

/// Smallest terminal the field is playable in.
pub const MIN_FIELD_WIDTH: u16 = 60;
pub const MIN_FIELD_HEIGHT: u16 = 20;

pub const TARGET_SCORE: u16 = 10;
pub const PADDLE_HEIGHT: u16 = 5;
pub const PADDLE_WIDTH: u16 = 1;

/// Human paddle speed, cells per second.
pub const PADDLE_SPEED: f32 = 15.0;
/// Ramp toward the target velocity, cells per second squared.
pub const PADDLE_ACCEL: f32 = 50.0;
/// Below this gap the velocity snaps to target instead of oscillating
/// around it.
pub const VELOCITY_SNAP: f32 = 0.1;
/// Largest dt a single motion step will integrate; anything longer (frame
/// hitch, debugger stop) is truncated.
pub const MAX_MOTION_DT: f32 = 0.1;

/// Serve speed before the difficulty multiplier, cells per gated tick.
pub const BALL_BASE_SPEED: f32 = 2.0;
/// Full-paddle sweep of the hit deflection: an edge hit bends dy by a
/// quarter of this.
pub const DEFLECT_GAIN: f32 = 0.5;

pub const AI_BASE_SPEED: f32 = 0.8;
pub const AI_BASE_PREDICTION: f32 = 0.3;
/// The computer ramps up a little softer than a human key press.
pub const AI_ACCEL_FACTOR: f32 = 0.8;
/// Gap (cells) inside which the computer stops chasing the target.
pub const AI_DEADBAND: f32 = 0.5;
/// Throttle reaches 1.0 once the target is this many cells away.
pub const AI_THROTTLE_RANGE: f32 = 3.0;
pub const AI_NOISE_CHANCE: f32 = 0.1;
pub const AI_NOISE_SPAN: f32 = 2.0;

/// A movement key not seen again within this window counts as released.
/// Most terminals only deliver press/repeat events, so release is inferred.
pub const KEY_RELEASE_TIMEOUT: Duration = Duration::from_millis(80);
/// Expected upper bound on the terminal's key auto-repeat gap. The release
/// timeout must stay above it or held keys flicker.
pub const KEY_REPEAT_GAP: Duration = Duration::from_millis(50);

/// How long a mode/difficulty banner stays on screen.
pub const NOTICE_DURATION: Duration = Duration::from_secs(2);
/// Frame pacing for the tick loop, ~60 fps.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);
pub const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(5);
pub const INPUT_QUEUE_DEPTH: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Wall-clock gap between ball steps; the ball gets faster by stepping
    /// more often, not by moving further per step.
    pub fn ball_interval(self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(40),
            Difficulty::Medium => Duration::from_millis(20),
            Difficulty::Hard => Duration::from_millis(10),
        }
    }

    pub fn ball_speed_factor(self) -> f32 {
        match self {
            Difficulty::Easy => 0.8,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => 1.4,
        }
    }

    /// Scales both the computer's top speed and its prediction accuracy.
    pub fn ai_factor(self) -> f32 {
        match self {
            Difficulty::Easy => 0.6,
            Difficulty::Medium => 0.8,
            Difficulty::Hard => 1.0,
        }
    }
}

/// Immutable per-game settings plus the field geometry derived from the
/// terminal size at startup.
#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    pub paddle_height: u16,
    pub target_score: u16,
    pub difficulty: Difficulty,
}

impl GameConfig {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            paddle_height: PADDLE_HEIGHT,
            target_score: TARGET_SCORE,
            difficulty: Difficulty::Medium,
        }
    }

    pub fn ball_interval(&self) -> Duration {
        self.difficulty.ball_interval()
    }

    pub fn ball_speed(&self) -> f32 {
        BALL_BASE_SPEED * self.difficulty.ball_speed_factor()
    }

    pub fn ai_speed(&self) -> f32 {
        AI_BASE_SPEED * self.difficulty.ai_factor()
    }

    pub fn ai_prediction(&self) -> f32 {
        AI_BASE_PREDICTION * self.difficulty.ai_factor()
    }

    pub fn left_paddle_x(&self) -> u16 {
        2
    }

    pub fn right_paddle_x(&self) -> u16 {
        self.width - 3
    }

    /// Paddles live in [min, max]; the rows above and below belong to the
    /// borders.
    pub fn paddle_min_y(&self) -> f32 {
        1.0
    }

    pub fn paddle_max_y(&self) -> f32 {
        (self.height - self.paddle_height - 1) as f32
    }

    pub fn paddle_start_y(&self) -> f32 {
        (self.height / 2 - self.paddle_height / 2) as f32
    }

    pub fn center_x(&self) -> f32 {
        (self.width / 2) as f32
    }

    pub fn center_y(&self) -> f32 {
        (self.height / 2) as f32
    }
}
