use std::f32::consts::{FRAC_PI_4, PI};
use std::time::Instant;

use rand::Rng;

use crate::config::{GameConfig, DEFLECT_GAIN, PADDLE_WIDTH};
use crate::paddle::{Paddle, Side};

/// Ball position is continuous; velocity is the displacement applied per
/// gated step, so ball speed is set by the step interval, not the frame
/// rate.
#[derive(Debug)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    last_move: Instant,
}

impl Ball {
    pub fn new(config: &GameConfig, rng: &mut impl Rng, now: Instant) -> Self {
        let mut ball = Ball {
            x: 0.0,
            y: 0.0,
            dx: 0.0,
            dy: 0.0,
            last_move: now,
        };
        ball.serve(config, rng, now);
        ball
    }

    /// Re-center and launch at most 45 degrees off horizontal, toward a
    /// random side, at the difficulty-scaled speed.
    pub fn serve(&mut self, config: &GameConfig, rng: &mut impl Rng, now: Instant) {
        self.x = config.center_x();
        self.y = config.center_y();

        let mut angle = rng.random_range(-FRAC_PI_4..=FRAC_PI_4);
        if rng.random_bool(0.5) {
            angle += PI;
        }
        let speed = config.ball_speed();
        self.dx = speed * angle.cos();
        self.dy = speed * angle.sin();
        self.last_move = now;
    }

    /// Keep the movement gate fresh without integrating. Used while the
    /// simulation is paused so resuming does not replay the gap as a
    /// catch-up step.
    pub fn rearm(&mut self, now: Instant) {
        self.last_move = now;
    }

    /// One gated simulation step: integrate, bounce off the walls, deflect
    /// off paddles, detect a goal. Returns the scoring side, if any.
    pub fn advance(
        &mut self,
        left: &Paddle,
        right: &Paddle,
        config: &GameConfig,
        now: Instant,
    ) -> Option<Side> {
        if now.duration_since(self.last_move) < config.ball_interval() {
            return None;
        }
        self.last_move = now;

        self.x += self.dx;
        self.y += self.dy;

        if self.y <= 1.0 || self.y >= (config.height - 2) as f32 {
            self.dy = -self.dy;
            self.y = self.y.clamp(2.0, (config.height - 3) as f32);
        }

        // paddle hits work on rounded cells, the same cells the renderer
        // draws; the dx-sign check stops a fresh bounce from re-triggering
        // while the ball is still inside the paddle column
        let bx = self.x.round() as i32;
        let by = self.y.round() as i32;
        let span = config.paddle_height as i32 - 1;

        let left_y = left.y.round() as i32;
        if self.dx < 0.0
            && bx <= (config.left_paddle_x() + PADDLE_WIDTH) as i32
            && by >= left_y
            && by <= left_y + span
        {
            self.dx = self.dx.abs();
            self.dy += Self::deflection(by - left_y, span);
        }

        let right_y = right.y.round() as i32;
        if self.dx > 0.0
            && bx >= config.right_paddle_x() as i32 - 1
            && by >= right_y
            && by <= right_y + span
        {
            self.dx = -self.dx.abs();
            self.dy += Self::deflection(by - right_y, span);
        }

        if self.x < 0.0 {
            Some(Side::Right)
        } else if self.x > config.width as f32 {
            Some(Side::Left)
        } else {
            None
        }
    }

    /// Offset 0..=span maps to an extra -0.25..=+0.25 of dy; a dead-center
    /// hit leaves the trajectory alone. No renormalization afterwards, so
    /// repeated edge hits can grow the ball's speed.
    fn deflection(offset: i32, span: i32) -> f32 {
        let hit = offset as f32 / span as f32;
        (hit - 0.5) * DEFLECT_GAIN
    }
}
