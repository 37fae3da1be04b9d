//! Slingshot aiming: pull the virtual cursor away from the ball, release to
//! launch the opposite way.
//!
//! The cursor is an accumulator of relative pointer movement, so aiming keeps
//! working when the real pointer is pinned at a screen edge.

use std::f32::consts::PI;

use glam::Vec2;

use crate::ball::BallState;
use crate::tuning::Tuning;

/// Trajectory dots are drawn at a third of their power-scaled distance.
const TRAJECTORY_SCALE: f32 = 3.0;
const MIN_DOT_SPACING: f32 = 5.0;
const MIN_TRAJECTORY_LENGTH: f32 = 5.0;

/// An aim in progress. Exists only between pointer-down and release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimState {
    pub start: Vec2,
    pub cursor: Vec2,
}

impl AimState {
    /// Start aiming, but only from a ball at rest on the ground.
    /// Horizontal velocity must be exactly zero.
    pub fn begin(ball: &BallState) -> Option<Self> {
        if ball.velocity.x != 0.0 || !ball.on_ground {
            return None;
        }
        Some(Self {
            start: ball.position,
            cursor: ball.position,
        })
    }

    pub fn push_delta(&mut self, delta: Vec2) {
        self.cursor += delta;
    }

    /// Angle and power for a ball currently at `ball`.
    pub fn sample(&self, ball: Vec2, tuning: &Tuning) -> AimSample {
        let pull = self.cursor - ball;
        AimSample {
            angle: pull.y.atan2(pull.x) + PI,
            power: (pull.length() * tuning.power_multiplier).clamp(0.0, tuning.max_power),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimSample {
    /// Launch direction in radians, opposite the pull.
    pub angle: f32,
    pub power: f32,
}

/// Result of releasing an aim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub velocity: Vec2,
    /// Only shots moving on both axes count as a stroke.
    pub counts_as_stroke: bool,
}

impl AimSample {
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }

    pub fn shot(&self) -> Shot {
        let velocity = self.direction() * self.power;
        Shot {
            velocity,
            counts_as_stroke: velocity.x != 0.0 && velocity.y != 0.0,
        }
    }

    /// Power as a whole percentage of `max_power`.
    pub fn percent(&self, tuning: &Tuning) -> u32 {
        if tuning.max_power <= 0.0 {
            return 0;
        }
        (self.power / tuning.max_power * 100.0).round() as u32
    }

    pub fn tier(&self, tuning: &Tuning) -> PowerTier {
        PowerTier::of(self.power, tuning.max_power)
    }
}

/// Power meter band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PowerTier {
    Low,
    Medium,
    High,
    Max,
}

impl PowerTier {
    pub fn of(power: f32, max_power: f32) -> Self {
        if power > max_power * 0.75 {
            PowerTier::Max
        } else if power > max_power * 0.5 {
            PowerTier::High
        } else if power > max_power * 0.25 {
            PowerTier::Medium
        } else {
            PowerTier::Low
        }
    }

    /// Meter fill color, green through red.
    pub fn color(self) -> u32 {
        match self {
            PowerTier::Low => 0x00ff00,
            PowerTier::Medium => 0xffff00,
            PowerTier::High => 0xffa500,
            PowerTier::Max => 0xff0000,
        }
    }
}

/// Preview dots from `origin` along the launch direction.
/// Spacing grows with power so a full-power preview stays at about ten dots.
pub fn trajectory_dots(origin: Vec2, sample: &AimSample) -> Vec<Vec2> {
    let max_len = sample.power.max(MIN_TRAJECTORY_LENGTH);
    let spacing = (sample.power / 10.0).max(MIN_DOT_SPACING);
    let dir = sample.direction();

    let mut dots = Vec::new();
    let mut distance = 0.0;
    while distance <= max_len {
        dots.push(origin + dir * distance / TRAJECTORY_SCALE);
        distance += spacing;
    }
    dots
}
