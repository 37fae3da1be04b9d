use glam::Vec2;
use crate::api::types::EntityId;
use crate::components::shape::ShapeComponent;
#[cfg(feature = "physics")]
use crate::core::physics::PhysicsBody;

/// What role an entity plays in a level. Used for lookups and teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EntityKind {
    #[default]
    Prop,
    Ball,
    Platform,
    GoalWall,
    GoalSensor,
    Boundary,
}

/// Fat Entity: a single struct with optional components.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    pub kind: EntityKind,
    /// Whether this entity is active (inactive entities are not drawn).
    pub active: bool,
    /// Center position in world space.
    pub pos: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    /// World-space extent (width, height).
    pub size: Vec2,
    /// Shape component (entities without one are invisible).
    pub shape: Option<ShapeComponent>,
    /// Physics body (requires the "physics" feature).
    #[cfg(feature = "physics")]
    pub body: Option<PhysicsBody>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            kind: EntityKind::Prop,
            active: true,
            pos: Vec2::ZERO,
            rotation: 0.0,
            size: Vec2::ONE,
            shape: None,
            #[cfg(feature = "physics")]
            body: None,
        }
    }

    // -- Builder pattern --

    pub fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_shape(mut self, shape: ShapeComponent) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.active = false;
        self
    }

    #[cfg(feature = "physics")]
    pub fn with_body(mut self, body: PhysicsBody) -> Self {
        self.body = Some(body);
        self
    }
}
