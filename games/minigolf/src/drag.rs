//! Per-tick drag selection: bouncing, rolling or flying.

use glam::Vec2;
use putt_engine::{EngineContext, EntityId};

use crate::tuning::Tuning;

/// Drag to apply to the ball for the next step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Drag {
    /// Horizontal coefficient only; vertical stays as last set.
    Horizontal(f32),
    /// Same coefficient on both axes.
    Both(f32),
}

impl Drag {
    pub fn apply(self, ctx: &mut EngineContext, ball: EntityId) {
        match self {
            Drag::Horizontal(x) => ctx.set_drag_x(ball, x),
            Drag::Both(d) => ctx.set_drag(ball, Vec2::splat(d)),
        }
    }
}

/// Recomputed from scratch every tick; no smoothing between ticks.
pub fn select_drag(touching_down: bool, velocity_y: f32, tuning: &Tuning) -> Drag {
    if !touching_down {
        Drag::Both(tuning.air_drag)
    } else if velocity_y.abs() > tuning.bounce_threshold {
        Drag::Horizontal(tuning.bounce_drag)
    } else {
        Drag::Horizontal(tuning.ground_drag)
    }
}
