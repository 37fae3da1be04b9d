//! Built-in course: nine levels.

use crate::level::{GoalBase, GoalSpec, GoalWalls, LevelConfig, PlatformRect, Point};

const GROUND_HEIGHT: f32 = 40.0;
const GOAL_WALLS: GoalWalls = GoalWalls { width: 5.0, height: 40.0 };
const GOAL_BASE: GoalBase = GoalBase { width: 40.0 };

/// Compact level table entry. Platforms are `(x, y, width, height)`.
struct LevelDef {
    width: f32,
    height: f32,
    spawn: (f32, f32),
    goal: (f32, f32),
    platforms: &'static [(f32, f32, f32, f32)],
}

const SMALL: (f32, f32) = (1200.0, 500.0);
const LARGE: (f32, f32) = (2400.0, 1000.0);

const LEVELS: [LevelDef; 9] = [
    // 1: flat run to the cup
    LevelDef {
        width: SMALL.0, height: SMALL.1,
        spawn: (100.0, 400.0), goal: (1000.0, 440.0),
        platforms: &[
            (1118.0, 440.0, 200.0, 40.0),
            (400.0, 440.0, 100.0, 40.0),
            (854.0, 440.0, 250.0, 40.0),
        ],
    },
    // 2: raised cup
    LevelDef {
        width: SMALL.0, height: SMALL.1,
        spawn: (100.0, 400.0), goal: (1000.0, 400.0),
        platforms: &[
            (1000.0, 440.0, 200.0, 40.0),
            (1045.0, 400.0, 50.0, 40.0),
            (955.0, 400.0, 50.0, 40.0),
        ],
    },
    // 3: higher cup
    LevelDef {
        width: SMALL.0, height: SMALL.1,
        spawn: (100.0, 400.0), goal: (1000.0, 350.0),
        platforms: &[
            (1000.0, 390.0, 170.0, 40.0),
            (1072.0, 350.0, 100.0, 40.0),
            (932.0, 350.0, 100.0, 40.0),
        ],
    },
    // 4: pillars with gaps
    LevelDef {
        width: LARGE.0, height: LARGE.1,
        spawn: (100.0, 900.0), goal: (2250.0, 940.0),
        platforms: &[
            (550.0, 0.0, 40.0, 1400.0),
            (550.0, 900.0, 40.0, 250.0),
            (950.0, 0.0, 40.0, 1200.0),
            (950.0, 900.0, 40.0, 400.0),
            (1350.0, 0.0, 40.0, 1300.0),
            (1350.0, 900.0, 40.0, 300.0),
            (2345.0, 940.0, 150.0, 40.0),
            (2155.0, 940.0, 150.0, 40.0),
        ],
    },
    // 5: cup on a shelf behind the tee
    LevelDef {
        width: SMALL.0, height: SMALL.1,
        spawn: (100.0, 400.0), goal: (22.0, 200.0),
        platforms: &[
            (0.0, 240.0, 900.0, 40.0),
            (90.0, 200.0, 100.0, 40.0),
            (430.0, 60.0, 40.0, 200.0),
            (430.0, 420.0, 40.0, 200.0),
        ],
    },
    // 6: zig-zag obstacle field
    LevelDef {
        width: SMALL.0, height: SMALL.1,
        spawn: (100.0, 400.0), goal: (170.0, 100.0),
        platforms: &[
            (100.0, 100.0, 100.0, 40.0),
            (215.0, 100.0, 50.0, 40.0),
            (530.0, 250.0, 1000.0, 40.0),
            (980.0, 70.0, 40.0, 200.0),
            (350.0, 450.0, 40.0, 200.0),
            (600.0, 500.0, 40.0, 200.0),
            (850.0, 420.0, 40.0, 200.0),
            (750.0, 155.0, 40.0, 150.0),
            (450.0, 200.0, 40.0, 100.0),
            (50.0, 155.0, 40.0, 150.0),
            (250.0, 155.0, 40.0, 150.0),
        ],
    },
    // 7: climb to the tower
    LevelDef {
        width: LARGE.0, height: LARGE.1,
        spawn: (100.0, 900.0), goal: (2200.0, 750.0),
        platforms: &[
            (2140.0, 750.0, 75.0, 40.0),
            (2122.0, 695.0, 40.0, 150.0),
            (2320.0, 750.0, 200.0, 40.0),
            (2202.0, 600.0, 200.0, 40.0),
            (2202.0, 450.0, 500.0, 40.0),
            (1972.0, 640.0, 40.0, 400.0),
            (1800.0, 660.0, 40.0, 600.0),
            (1450.0, 380.0, 700.0, 40.0),
            (900.0, 500.0, 40.0, 300.0),
            (1180.0, 670.0, 600.0, 40.0),
            (400.0, 820.0, 40.0, 300.0),
        ],
    },
    // 8: over the wall and down
    LevelDef {
        width: SMALL.0, height: SMALL.1,
        spawn: (100.0, 400.0), goal: (950.0, 440.0),
        platforms: &[
            (600.0, 305.0, 40.0, 450.0),
            (300.0, 420.0, 40.0, 100.0),
            (440.0, 100.0, 350.0, 40.0),
            (150.0, 250.0, 350.0, 40.0),
            (900.0, 360.0, 40.0, 200.0),
            (900.0, 140.0, 40.0, 100.0),
            (1060.0, 110.0, 350.0, 40.0),
            (960.0, 300.0, 150.0, 40.0),
            (1180.0, 300.0, 150.0, 40.0),
            (920.0, 440.0, 25.0, 40.0),
            (995.0, 440.0, 50.0, 40.0),
        ],
    },
    // 9: level 3 in a bigger world
    LevelDef {
        width: LARGE.0, height: LARGE.1,
        spawn: (100.0, 400.0), goal: (1000.0, 350.0),
        platforms: &[
            (1000.0, 390.0, 170.0, 40.0),
            (1072.0, 350.0, 100.0, 40.0),
            (932.0, 350.0, 100.0, 40.0),
            (1400.0, 650.0, 700.0, 40.0),
        ],
    },
];

/// Expand the level table into full configs.
pub fn builtin() -> Vec<LevelConfig> {
    LEVELS
        .iter()
        .enumerate()
        .map(|(i, def)| LevelConfig {
            name: format!("default {}", i + 1),
            width: def.width,
            height: def.height,
            ground_height: GROUND_HEIGHT,
            ball_spawn: Point { x: def.spawn.0, y: def.spawn.1 },
            platforms: def
                .platforms
                .iter()
                .map(|&(x, y, w, h)| PlatformRect::new(x, y, w, h))
                .collect(),
            goal: GoalSpec {
                walls: GOAL_WALLS,
                base: GOAL_BASE,
                position: Point { x: def.goal.0, y: def.goal.1 },
            },
        })
        .collect()
}
