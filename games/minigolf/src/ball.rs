//! The golf ball: spawning and the per-tick snapshot game logic reads.

use glam::Vec2;
use putt_engine::{
    BodyDesc, ColliderDesc, ColliderMaterial, EngineContext, Entity, EntityId, EntityKind,
    ShapeComponent,
};

use crate::tuning::Tuning;

pub const BALL_COLOR: u32 = 0xff4500;

/// Snapshot of the ball after the last physics step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallState {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Resting on something, from the engine's contact report.
    pub on_ground: bool,
}

impl BallState {
    pub fn read(ctx: &EngineContext, id: EntityId) -> Option<Self> {
        let entity = ctx.scene.get(id)?;
        Some(Self {
            position: entity.pos,
            velocity: ctx.velocity(id),
            on_ground: ctx.touching_down(id),
        })
    }
}

/// Surfaces are frictionless; drag does the slowing down. Restitution
/// combines by average, so matching the ball keeps its bounce unchanged.
pub fn surface_material(tuning: &Tuning) -> ColliderMaterial {
    ColliderMaterial {
        restitution: tuning.ball_restitution,
        friction: 0.0,
        density: 1.0,
    }
}

pub fn spawn_ball(ctx: &mut EngineContext, pos: Vec2, tuning: &Tuning) -> EntityId {
    let id = ctx.next_id();
    let entity = Entity::new(id)
        .with_kind(EntityKind::Ball)
        .with_size(Vec2::splat(tuning.ball_radius * 2.0))
        .with_shape(ShapeComponent::circle(BALL_COLOR));
    let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: tuning.ball_radius })
        .with_position(pos)
        .with_gravity_scale(tuning.ball_gravity_scale)
        .with_fixed_rotation(true)
        .with_ccd(true)
        // Contact state is read every tick, even at rest
        .with_sleeping(false);
    let material = ColliderMaterial {
        restitution: tuning.ball_restitution,
        friction: 0.0,
        density: tuning.ball_density,
    };
    ctx.spawn_with_body(entity, desc, material);
    ctx.set_drag(id, Vec2::splat(tuning.air_drag));
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use putt_engine::GameConfig;

    fn world(tuning: &Tuning) -> EngineContext {
        EngineContext::with_config(&GameConfig {
            gravity: Vec2::new(0.0, tuning.gravity),
            ..GameConfig::default()
        })
    }

    #[test]
    fn spawned_ball_starts_airborne_and_still() {
        let tuning = Tuning::default();
        let mut ctx = world(&tuning);
        let id = spawn_ball(&mut ctx, Vec2::new(100.0, 400.0), &tuning);

        let ball = BallState::read(&ctx, id).unwrap();
        assert_eq!(ball.position, Vec2::new(100.0, 400.0));
        assert_eq!(ball.velocity, Vec2::ZERO);
        assert!(!ball.on_ground);
        assert_eq!(ctx.scene.get(id).unwrap().kind, EntityKind::Ball);
    }

    #[test]
    fn ball_falls_with_extra_gravity() {
        let tuning = Tuning::default();
        let mut ctx = world(&tuning);
        let id = spawn_ball(&mut ctx, Vec2::ZERO, &tuning);
        for _ in 0..30 {
            ctx.step_physics();
        }
        // Half a second at 1000 units/s² minus a little air drag
        let vy = ctx.velocity(id).y;
        assert!(vy > 450.0 && vy < 510.0, "vy={}", vy);
    }

    #[test]
    fn missing_ball_reads_none() {
        let ctx = EngineContext::new();
        assert!(BallState::read(&ctx, EntityId(7)).is_none());
    }
}
