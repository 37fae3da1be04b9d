use crate::core::scene::Scene;
use crate::api::types::{EntityId, GameEvent};
use crate::components::entity::Entity;
use crate::input::queue::InputQueue;
use crate::renderer::instance::RenderBuffer;
#[cfg(feature = "physics")]
use crate::core::physics::{PhysicsWorld, BodyDesc, ColliderMaterial, PhysicsBody};
use glam::Vec2;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Initial world width in game units. Games may resize the world later.
    pub world_width: f32,
    /// Initial world height in game units.
    pub world_height: f32,
    /// Maximum number of render instances per frame (default: 512).
    pub max_instances: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Gravity vector. Y points down, so positive Y pulls toward the ground.
    #[cfg(feature = "physics")]
    pub gravity: Vec2,
    /// Rapier length unit: the size of a typical object in world units.
    #[cfg(feature = "physics")]
    pub length_unit: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 800.0,
            world_height: 600.0,
            max_instances: 512,
            max_events: 32,
            #[cfg(feature = "physics")]
            gravity: Vec2::ZERO,
            #[cfg(feature = "physics")]
            length_unit: 1.0,
        }
    }
}

/// The contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed tick of game logic. Runs before the physics step.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Optional read-only render pass for overlay instances.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub events: Vec<GameEvent>,
    next_id: u32,
    world_size: Vec2,
    #[cfg(feature = "physics")]
    pub physics: PhysicsWorld,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default())
    }

    /// Create a context whose world size and physics follow `config`.
    pub fn with_config(config: &GameConfig) -> Self {
        #[cfg(feature = "physics")]
        let physics = {
            let mut world = PhysicsWorld::new(config.gravity);
            world.set_dt(config.fixed_dt);
            world.set_length_unit(config.length_unit);
            world
        };
        Self {
            scene: Scene::new(),
            events: Vec::new(),
            next_id: 1,
            world_size: Vec2::new(config.world_width, config.world_height),
            #[cfg(feature = "physics")]
            physics,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data: the first `delivered` events, which
    /// the host has already read. Events emitted since then (from host calls
    /// between frames) carry over into the next frame.
    pub fn clear_frame_data(&mut self, delivered: usize) {
        let delivered = delivered.min(self.events.len());
        self.events.drain(..delivered);
    }

    pub fn world_size(&self) -> Vec2 {
        self.world_size
    }

    /// Resize the world; the host re-derives camera bounds from this.
    pub fn set_world_size(&mut self, size: Vec2) {
        self.world_size = size;
    }

    /// Remove every entity (and its physics body).
    pub fn clear_scene(&mut self) {
        let removed: Vec<Entity> = self.scene.drain().collect();
        #[cfg(feature = "physics")]
        for entity in &removed {
            if let Some(body) = &entity.body {
                self.physics.remove_body(body);
            }
        }
        log::debug!("cleared {} entities", removed.len());
    }

    // -- Physics convenience methods --

    /// Spawn an entity with a physics body. Returns the EntityId.
    #[cfg(feature = "physics")]
    pub fn spawn_with_body(
        &mut self,
        entity: Entity,
        desc: BodyDesc,
        material: ColliderMaterial,
    ) -> EntityId {
        let id = entity.id;
        let body = self.physics.create_body(id, &desc, material);
        let entity = entity.with_pos(desc.position).with_body(body);
        self.scene.spawn(entity);
        id
    }

    /// Despawn an entity, cleaning up its physics body if present.
    #[cfg(feature = "physics")]
    pub fn despawn(&mut self, id: EntityId) {
        if let Some(entity) = self.scene.despawn(id) {
            if let Some(body) = &entity.body {
                self.physics.remove_body(body);
            }
        }
    }

    #[cfg(feature = "physics")]
    fn body(&self, id: EntityId) -> Option<PhysicsBody> {
        self.scene.get(id).and_then(|e| e.body)
    }

    /// Set the linear velocity of an entity's physics body.
    #[cfg(feature = "physics")]
    pub fn set_velocity(&mut self, id: EntityId, vel: Vec2) {
        if let Some(body) = self.body(id) {
            self.physics.set_velocity(&body, vel);
        }
    }

    /// Get the linear velocity of an entity's physics body.
    #[cfg(feature = "physics")]
    pub fn velocity(&self, id: EntityId) -> Vec2 {
        self.body(id)
            .map(|body| self.physics.velocity(&body))
            .unwrap_or(Vec2::ZERO)
    }

    /// Set both drag coefficients.
    #[cfg(feature = "physics")]
    pub fn set_drag(&mut self, id: EntityId, drag: Vec2) {
        if let Some(body) = self.body(id) {
            self.physics.set_drag(&body, drag);
        }
    }

    /// Set horizontal drag, leaving vertical drag unchanged.
    #[cfg(feature = "physics")]
    pub fn set_drag_x(&mut self, id: EntityId, drag_x: f32) {
        if let Some(body) = self.body(id) {
            self.physics.set_drag_x(&body, drag_x);
        }
    }

    #[cfg(feature = "physics")]
    pub fn set_gravity_scale(&mut self, id: EntityId, scale: f32) {
        if let Some(body) = self.body(id) {
            self.physics.set_gravity_scale(&body, scale);
        }
    }

    /// Whether the entity rests on something below it after the last step.
    #[cfg(feature = "physics")]
    pub fn touching_down(&self, id: EntityId) -> bool {
        self.body(id)
            .map(|body| self.physics.touching_down(&body))
            .unwrap_or(false)
    }

    /// Whether two entities overlap, where at least one is a sensor.
    #[cfg(feature = "physics")]
    pub fn intersecting(&self, a: EntityId, b: EntityId) -> bool {
        match (self.body(a), self.body(b)) {
            (Some(a), Some(b)) => self.physics.intersecting(&a, &b),
            _ => false,
        }
    }

    /// Step the physics simulation and sync positions back to entities.
    /// Called by the runner after `Game::update()`.
    #[cfg(feature = "physics")]
    pub fn step_physics(&mut self) {
        self.physics.step();

        for entity in self.scene.iter_mut() {
            if let Some(body) = &entity.body {
                entity.pos = self.physics.body_position(body);
            }
        }
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render context for optional overlay commands.
pub struct RenderContext<'a> {
    pub render_buffer: &'a mut RenderBuffer,
}


#[cfg(test)]
#[cfg(feature = "physics")]
mod physics_tests {
    use super::*;
    use crate::components::entity::EntityKind;
    use crate::core::physics::ColliderDesc;

    fn ball(ctx: &mut EngineContext, pos: Vec2) -> EntityId {
        let id = ctx.next_id();
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: 10.0 })
            .with_position(pos)
            .with_sleeping(false);
        ctx.spawn_with_body(Entity::new(id).with_kind(EntityKind::Ball), desc, ColliderMaterial::default())
    }

    #[test]
    fn spawn_with_body_creates_entity_and_physics() {
        let mut ctx = EngineContext::new();
        let id = ball(&mut ctx, Vec2::new(100.0, 200.0));

        assert_eq!(ctx.scene.len(), 1);
        assert_eq!(ctx.physics.body_count(), 1);
        let entity = ctx.scene.get(id).unwrap();
        assert!(entity.body.is_some());
        assert_eq!(entity.pos, Vec2::new(100.0, 200.0));
    }

    #[test]
    fn despawn_cleans_up_physics() {
        let mut ctx = EngineContext::new();
        let id = ball(&mut ctx, Vec2::ZERO);
        ctx.despawn(id);
        assert_eq!(ctx.scene.len(), 0);
        assert_eq!(ctx.physics.body_count(), 0);
    }

    #[test]
    fn clear_scene_removes_all_bodies() {
        let mut ctx = EngineContext::new();
        ball(&mut ctx, Vec2::ZERO);
        ball(&mut ctx, Vec2::new(100.0, 0.0));
        ctx.clear_scene();
        assert!(ctx.scene.is_empty());
        assert_eq!(ctx.physics.body_count(), 0);
    }

    #[test]
    fn step_physics_syncs_positions() {
        let config = GameConfig {
            gravity: Vec2::new(0.0, 100.0),
            ..GameConfig::default()
        };
        let mut ctx = EngineContext::with_config(&config);
        let id = ball(&mut ctx, Vec2::new(100.0, 0.0));

        for _ in 0..10 {
            ctx.step_physics();
        }
        let entity = ctx.scene.get(id).unwrap();
        assert!(entity.pos.y > 0.0, "Entity should have moved down: y={}", entity.pos.y);
    }

    #[test]
    fn missing_entity_reads_as_neutral() {
        let ctx = EngineContext::new();
        assert_eq!(ctx.velocity(EntityId(42)), Vec2::ZERO);
        assert!(!ctx.touching_down(EntityId(42)));
        assert!(!ctx.intersecting(EntityId(1), EntityId(2)));
    }
}
