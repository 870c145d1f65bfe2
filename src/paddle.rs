use crate::config::{
    GameConfig, AI_ACCEL_FACTOR, MAX_MOTION_DT, PADDLE_ACCEL, PADDLE_SPEED, VELOCITY_SNAP,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// What the paddle is being asked to do this frame. Up and Down are mutually
/// exclusive; the debouncer and the AI both guarantee that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Intent {
    #[default]
    Hold,
    Up,
    Down,
}

impl Intent {
    /// Screen coordinates grow downward, so Up is negative.
    fn direction(self) -> f32 {
        match self {
            Intent::Hold => 0.0,
            Intent::Up => -1.0,
            Intent::Down => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Human,
    Computer,
}

#[derive(Debug)]
pub struct Paddle {
    pub side: Side,
    pub control: Control,
    /// Top row of the paddle, fractional so slow drives still move.
    pub y: f32,
    pub vy: f32,
    pub intent: Intent,
    /// Velocity scale in 0..=1; humans drive at full throttle, the AI eases
    /// off as it closes on its target.
    pub throttle: f32,
}

impl Paddle {
    pub fn new(side: Side, control: Control, config: &GameConfig) -> Self {
        Self {
            side,
            control,
            y: config.paddle_start_y(),
            vy: 0.0,
            intent: Intent::Hold,
            throttle: 0.0,
        }
    }

    pub fn x(&self, config: &GameConfig) -> u16 {
        match self.side {
            Side::Left => config.left_paddle_x(),
            Side::Right => config.right_paddle_x(),
        }
    }

    pub fn center_y(&self, config: &GameConfig) -> f32 {
        self.y + (config.paddle_height / 2) as f32
    }

    pub fn set_drive(&mut self, intent: Intent, throttle: f32) {
        self.intent = intent;
        self.throttle = throttle;
    }

    pub fn reset(&mut self, config: &GameConfig) {
        self.y = config.paddle_start_y();
        self.vy = 0.0;
        self.intent = Intent::Hold;
        self.throttle = 0.0;
    }

    /// One frame of the shared motion law: accelerate toward the target
    /// velocity, clamp overshoot, integrate, stop dead at the field walls.
    /// Human and computer paddles differ only in their speed and
    /// acceleration limits.
    pub fn step(&mut self, dt: f32, config: &GameConfig) {
        let dt = dt.min(MAX_MOTION_DT);
        let (max_speed, accel) = match self.control {
            Control::Human => (PADDLE_SPEED, PADDLE_ACCEL),
            Control::Computer => (
                PADDLE_SPEED * config.ai_speed(),
                PADDLE_ACCEL * AI_ACCEL_FACTOR,
            ),
        };

        let target = self.intent.direction() * max_speed * self.throttle;
        let gap = target - self.vy;
        if gap.abs() > VELOCITY_SNAP {
            self.vy += accel * gap.signum() * dt;
            // discrete steps can jump past the target; land on it instead
            if (gap > 0.0 && self.vy > target) || (gap < 0.0 && self.vy < target) {
                self.vy = target;
            }
        } else {
            self.vy = target;
        }

        let next = self.y + self.vy * dt;
        if next >= config.paddle_min_y() && next <= config.paddle_max_y() {
            self.y = next;
        } else {
            self.vy = 0.0;
        }
    }
}
