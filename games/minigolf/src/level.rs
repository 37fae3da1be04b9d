//! Level blueprints: platforms, ball spawn and the U-shaped goal.
//!
//! Levels arrive as JSON records shaped like
//! `{name, width, height, groundHeight, ballSpawn, platforms, goal}` and are
//! validated as they are parsed, so a `LevelSet` never holds a level that
//! cannot be built.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::levels;

/// Fill color for platforms that do not name one.
pub const DEFAULT_PLATFORM_COLOR: u32 = 0x228b22;
/// Goal walls and base.
pub const GOAL_COLOR: u32 = 0xffd700;
/// The sensor is this much narrower than the goal base.
pub const SENSOR_MARGIN: f32 = 10.0;

#[derive(Error, Debug)]
pub enum LevelError {
    #[error("level data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("level set is empty")]
    Empty,

    #[error("level '{name}' is invalid: {reason}")]
    Invalid { name: String, reason: String },

    #[error("level index {index} out of range (have {count})")]
    OutOfRange { index: usize, count: usize },
}

/// Axis-aligned rectangle stored by its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_top_left(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self::new(left + width * 0.5, top + height * 0.5, width, height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn left(&self) -> f32 {
        self.x - self.width * 0.5
    }

    pub fn right(&self) -> f32 {
        self.x + self.width * 0.5
    }

    pub fn top(&self) -> f32 {
        self.y - self.height * 0.5
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height * 0.5
    }

    /// Edges count as inside.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl From<Point> for Vec2 {
    fn from(p: Point) -> Self {
        Vec2::new(p.x, p.y)
    }
}

/// A static, center-based platform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default = "default_color")]
    pub color: u32,
}

fn default_color() -> u32 {
    DEFAULT_PLATFORM_COLOR
}

impl PlatformRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height, color: DEFAULT_PLATFORM_COLOR }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalWalls {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalBase {
    pub width: f32,
}

/// A U-shaped pocket: two walls joined by a base, with a sensor inside.
/// `position` is the center of the U.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalSpec {
    pub walls: GoalWalls,
    pub base: GoalBase,
    pub position: Point,
}

impl GoalSpec {
    pub fn left_wall(&self) -> Rect {
        Rect::new(
            self.position.x - self.base.width * 0.5,
            self.position.y,
            self.walls.width,
            self.walls.height,
        )
    }

    pub fn right_wall(&self) -> Rect {
        Rect::new(
            self.position.x + self.base.width * 0.5,
            self.position.y,
            self.walls.width,
            self.walls.height,
        )
    }

    /// The floor of the U, flush with the bottom of the walls.
    pub fn floor(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y + self.walls.height * 0.5 - self.walls.width * 0.5,
            self.base.width,
            self.walls.width,
        )
    }

    /// Overlap trigger covering the lower half of the pocket.
    pub fn sensor(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y + self.walls.height * 0.25,
            self.base.width - SENSOR_MARGIN,
            self.walls.height * 0.5,
        )
    }

    /// Where the ball's center must stay for the dwell to count.
    pub fn area(&self) -> Rect {
        Rect::from_top_left(
            self.position.x - self.base.width * 0.5,
            self.position.y - self.walls.height * 0.25,
            self.base.width,
            self.walls.height * 0.75,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelConfig {
    pub name: String,
    pub width: f32,
    pub height: f32,
    pub ground_height: f32,
    pub ball_spawn: Point,
    pub platforms: Vec<PlatformRect>,
    pub goal: GoalSpec,
}

impl LevelConfig {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Full-width floor along the bottom edge of the world.
    pub fn ground(&self) -> PlatformRect {
        PlatformRect::new(
            self.width * 0.5,
            self.height - self.ground_height * 0.5,
            self.width,
            self.ground_height,
        )
    }

    pub fn validate(&self) -> Result<(), LevelError> {
        let invalid = |reason: String| LevelError::Invalid {
            name: self.name.clone(),
            reason,
        };

        if !positive(self.width) || !positive(self.height) {
            let (w, h) = (self.width, self.height);
            return Err(invalid(format!("world size {}x{} must be positive", w, h)));
        }
        if !positive(self.ground_height) || self.ground_height >= self.height {
            let ground = self.ground_height;
            return Err(invalid(format!("ground height {} does not fit the world", ground)));
        }
        let spawn = Vec2::from(self.ball_spawn);
        let world = Rect::from_top_left(0.0, 0.0, self.width, self.height);
        if !spawn.is_finite() || !world.contains(spawn) {
            let (x, y) = (spawn.x, spawn.y);
            return Err(invalid(format!("ball spawn ({}, {}) is outside the world", x, y)));
        }
        for (i, p) in self.platforms.iter().enumerate() {
            if !p.x.is_finite() || !p.y.is_finite() || !positive(p.width) || !positive(p.height) {
                return Err(invalid(format!("platform {} has a bad position or size", i)));
            }
        }
        let goal = &self.goal;
        if !positive(goal.walls.width) || !positive(goal.walls.height) {
            return Err(invalid("goal walls must have a positive size".into()));
        }
        if !goal.base.width.is_finite() || goal.base.width <= SENSOR_MARGIN {
            return Err(invalid(format!("goal base must be wider than {}", SENSOR_MARGIN)));
        }
        if !Vec2::from(goal.position).is_finite() {
            return Err(invalid("goal position is not finite".into()));
        }
        Ok(())
    }
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

/// Ordered, non-empty list of levels.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSet {
    levels: Vec<LevelConfig>,
}

impl LevelSet {
    pub fn new(levels: Vec<LevelConfig>) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::Empty);
        }
        for level in &levels {
            level.validate()?;
        }
        Ok(Self { levels })
    }

    /// Parse a JSON array of level records.
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let levels: Vec<LevelConfig> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    pub fn get(&self, index: usize) -> Result<&LevelConfig, LevelError> {
        self.levels.get(index).ok_or(LevelError::OutOfRange {
            index,
            count: self.levels.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelConfig> {
        self.levels.iter()
    }
}

impl Default for LevelSet {
    /// The nine built-in levels.
    fn default() -> Self {
        Self {
            levels: levels::builtin(),
        }
    }
}
