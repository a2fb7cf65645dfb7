//! Ballistic trajectory math
//!
//! Shots are lobbed, not hitscan: a bullet gets an initial velocity solved so
//! that its parabolic path under constant gravity passes through the target
//! point at a computed flight time. The same solve drives the dashed
//! aim-preview path the renderer draws each frame.

use glam::Vec2;

use crate::consts::{AIM_PATH_STEP, BULLET_GRAVITY, SHOT_SPEED_SCALE};

/// Solve the initial velocity that carries a projectile from `start` through
/// `target`.
///
/// Flight time is `distance / SHOT_SPEED_SCALE`; the vertical component
/// compensates for the gravity drop accumulated over that time:
/// `vy = (dy - g*t^2/2) / t`.
///
/// Returns `None` for a zero-distance aim, which would otherwise divide by
/// zero. Callers treat that as a no-effect shot.
pub fn launch_velocity(start: Vec2, target: Vec2) -> Option<(Vec2, f32)> {
    let delta = target - start;
    let distance = delta.length();
    if distance == 0.0 {
        return None;
    }
    let flight_time = distance / SHOT_SPEED_SCALE;
    let vx = delta.x / flight_time;
    let vy = (delta.y - 0.5 * BULLET_GRAVITY * flight_time * flight_time) / flight_time;
    Some((Vec2::new(vx, vy), flight_time))
}

/// Closed-form position along a trajectory at time `t`.
pub fn position_at(start: Vec2, vel: Vec2, t: f32) -> Vec2 {
    Vec2::new(
        start.x + vel.x * t,
        start.y + vel.y * t + 0.5 * BULLET_GRAVITY * t * t,
    )
}

/// Sample the trajectory from `start` toward `target` for the aim preview.
///
/// Stateless: recomputed from the current target every frame, never stored in
/// world state. A degenerate aim yields an empty path.
pub fn aim_path(start: Vec2, target: Vec2) -> Vec<Vec2> {
    let Some((vel, flight_time)) = launch_velocity(start, target) else {
        return Vec::new();
    };
    let mut points = Vec::with_capacity((flight_time / AIM_PATH_STEP) as usize + 1);
    let mut t = 0.0;
    while t <= flight_time {
        points.push(position_at(start, vel, t));
        t += AIM_PATH_STEP;
    }
    points
}
