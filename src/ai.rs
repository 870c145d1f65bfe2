use rand::Rng;

use crate::ball::Ball;
use crate::config::{GameConfig, AI_DEADBAND, AI_NOISE_CHANCE, AI_NOISE_SPAN, AI_THROTTLE_RANGE};
use crate::paddle::{Intent, Paddle};

/// Where the ball will cross the given column, assuming straight-line
/// travel. The under-unity prediction factor makes the computer commit to a
/// point short of the true intercept, which is what keeps it beatable.
fn predicted_impact_y(ball: &Ball, paddle_x: f32, prediction: f32) -> f32 {
    let time_to_paddle = (paddle_x - ball.x) / ball.dx.abs();
    ball.y + ball.dy * time_to_paddle * prediction
}

/// Synthesize movement intent for the computer paddle. Returns the intent
/// plus a throttle in 0..=1 that shrinks as the paddle closes on its target,
/// so it settles instead of oscillating. The result feeds the same motion
/// law as a human key press.
pub fn drive(
    paddle: &Paddle,
    ball: &Ball,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> (Intent, f32) {
    let target_y = if ball.dx > 0.0 {
        let mut y = predicted_impact_y(ball, paddle.x(config) as f32, config.ai_prediction());
        // occasional misread, independent of difficulty
        if rng.random::<f32>() < AI_NOISE_CHANCE {
            y += rng.random_range(-AI_NOISE_SPAN..=AI_NOISE_SPAN);
        }
        y
    } else {
        // ball is heading away; fall back toward the middle
        config.center_y()
    };

    let gap = target_y - paddle.center_y(config);
    if gap.abs() <= AI_DEADBAND {
        return (Intent::Hold, 0.0);
    }
    let throttle = (gap.abs() / AI_THROTTLE_RANGE).min(1.0);
    let intent = if gap > 0.0 { Intent::Down } else { Intent::Up };
    (intent, throttle)
}
