//! Mini-golf on Rapier2D: pull back to aim, release to shoot, and keep the
//! ball in the cup long enough to finish the hole.

use glam::Vec2;
use putt_engine::api::game::GameConfig;
use putt_engine::input::queue::{InputEvent, InputQueue};
use putt_engine::{
    BodyDesc, ColliderDesc, EngineContext, Entity, EntityId, EntityKind, Game, GameEvent,
    RenderContext, RenderInstance, ShapeComponent,
};

use crate::aim::{trajectory_dots, AimSample, AimState};
use crate::ball::{spawn_ball, surface_material, BallState, BALL_COLOR};
use crate::drag::select_drag;
use crate::goal::{GoalDwell, GoalSignal};
use crate::level::{LevelError, LevelSet, Rect, GOAL_COLOR};
use crate::session::Session;
use crate::tuning::{Tuning, TuningError};

const FIXED_DT: f32 = 1.0 / 60.0;
const DOT_RADIUS: f32 = 2.0;
/// Invisible walls just outside the world edges.
const BOUNDARY_THICKNESS: f32 = 100.0;

/// Custom event kinds from the UI
pub mod events {
    pub const NEXT_LEVEL: u32 = 1;
    /// `a` = level index
    pub const SELECT_LEVEL: u32 = 2;
}

/// Game event kinds to the UI
pub mod game_events {
    /// a = stroke count
    pub const STROKES: f32 = 1.0;
    /// a = angle (radians), b = power, c = power percent
    pub const AIM: f32 = 2.0;
    pub const AIM_END: f32 = 3.0;
    /// a = level index, b = world width, c = world height
    pub const LEVEL_LOADED: f32 = 4.0;
    /// a = strokes taken, b = level index
    pub const LEVEL_COMPLETE: f32 = 5.0;
    /// a = 1 to capture the pointer, 0 to release it
    pub const POINTER_LOCK: f32 = 6.0;
    /// a = power tier (0 low .. 3 max), b = meter colour 0xRRGGBB
    pub const POWER_TIER: f32 = 7.0;
}

/// Entities the game talks to every tick.
#[derive(Debug, Clone, Copy)]
struct LevelHandles {
    ball: EntityId,
    sensor: EntityId,
}

pub struct MiniGolf {
    levels: LevelSet,
    tuning: Tuning,
    session: Session,
    handles: Option<LevelHandles>,
    goal: Option<GoalDwell>,
    aim: Option<AimState>,
    /// Last absolute pointer position while aiming
    last_pointer: Option<Vec2>,
    /// Ball position and aim sample for the trajectory overlay
    preview: Option<(Vec2, AimSample)>,
}

impl MiniGolf {
    pub fn new() -> Self {
        Self::with_levels(LevelSet::default())
    }

    pub fn with_levels(levels: LevelSet) -> Self {
        let session = Session::new(levels.len());
        Self {
            levels,
            tuning: Tuning::default(),
            session,
            handles: None,
            goal: None,
            aim: None,
            last_pointer: None,
            preview: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn aim(&self) -> Option<&AimState> {
        self.aim.as_ref()
    }

    pub fn ball(&self) -> Option<EntityId> {
        self.handles.map(|h| h.ball)
    }

    pub fn level_complete(&self) -> bool {
        self.goal.as_ref().is_some_and(GoalDwell::is_complete)
    }

    /// Replace the course and restart from its first level.
    pub fn set_levels(&mut self, ctx: &mut EngineContext, levels: LevelSet) {
        log::info!("loaded {} levels", levels.len());
        self.session = Session::new(levels.len());
        self.levels = levels;
        if let Err(err) = self.load_level(ctx, 0) {
            log::error!("failed to load first level: {}", err);
        }
    }

    /// Gravity changes at once; ball and drag settings apply from the next
    /// tick or level load. Out-of-range tuning is rejected and the current
    /// tuning stays.
    pub fn set_tuning(
        &mut self,
        ctx: &mut EngineContext,
        tuning: Tuning,
    ) -> Result<(), TuningError> {
        tuning.validate()?;
        ctx.physics.set_gravity(Vec2::new(0.0, tuning.gravity));
        log::info!(
            "tuning updated: max_power={} dwell={}s",
            tuning.max_power,
            tuning.goal_dwell_secs
        );
        self.tuning = tuning;
        Ok(())
    }

    /// Tear down the current level and build level `index`.
    /// An unknown index leaves everything as it was.
    pub fn load_level(&mut self, ctx: &mut EngineContext, index: usize) -> Result<(), LevelError> {
        let level = self.levels.get(index)?.clone();

        ctx.clear_scene();
        self.handles = None;
        self.goal = None;
        self.aim = None;
        self.last_pointer = None;
        self.preview = None;

        ctx.set_world_size(level.size());

        for platform in level.platforms.iter().chain(std::iter::once(&level.ground())) {
            self.spawn_block(ctx, platform.rect(), platform.color, EntityKind::Platform);
        }
        self.spawn_boundaries(ctx, level.size());

        let goal = &level.goal;
        for wall in [goal.left_wall(), goal.right_wall(), goal.floor()] {
            self.spawn_block(ctx, wall, GOAL_COLOR, EntityKind::GoalWall);
        }
        let sensor = Self::spawn_sensor(ctx, goal.sensor());
        let ball = spawn_ball(ctx, level.ball_spawn.into(), &self.tuning);

        self.handles = Some(LevelHandles { ball, sensor });
        self.goal = Some(GoalDwell::new(goal.area(), self.tuning.goal_dwell_secs));
        self.session.start_level(index);

        ctx.emit_event(GameEvent::new(
            game_events::LEVEL_LOADED,
            index as f32,
            level.width,
            level.height,
        ));
        ctx.emit_event(GameEvent::new(game_events::STROKES, 0.0, 0.0, 0.0));
        log::info!(
            "level {} '{}' loaded ({}x{}, {} platforms)",
            index,
            level.name,
            level.width,
            level.height,
            level.platforms.len()
        );
        Ok(())
    }

    fn spawn_block(
        &self,
        ctx: &mut EngineContext,
        rect: Rect,
        color: u32,
        kind: EntityKind,
    ) -> EntityId {
        let id = ctx.next_id();
        let entity = Entity::new(id)
            .with_kind(kind)
            .with_size(rect.size())
            .with_shape(ShapeComponent::rect(color));
        ctx.spawn_with_body(entity, fixed_rect(rect), surface_material(&self.tuning))
    }

    /// Keeps the ball inside the world.
    fn spawn_boundaries(&self, ctx: &mut EngineContext, size: Vec2) {
        let t = BOUNDARY_THICKNESS;
        let walls = [
            Rect::new(-t * 0.5, size.y * 0.5, t, size.y + 2.0 * t),
            Rect::new(size.x + t * 0.5, size.y * 0.5, t, size.y + 2.0 * t),
            Rect::new(size.x * 0.5, -t * 0.5, size.x + 2.0 * t, t),
            Rect::new(size.x * 0.5, size.y + t * 0.5, size.x + 2.0 * t, t),
        ];
        for rect in walls {
            let id = ctx.next_id();
            let entity = Entity::new(id).with_kind(EntityKind::Boundary).with_size(rect.size());
            ctx.spawn_with_body(entity, fixed_rect(rect), surface_material(&self.tuning));
        }
    }

    fn spawn_sensor(ctx: &mut EngineContext, rect: Rect) -> EntityId {
        let id = ctx.next_id();
        let entity = Entity::new(id).with_kind(EntityKind::GoalSensor).with_size(rect.size());
        ctx.spawn_with_body(entity, fixed_rect(rect).as_sensor(), Default::default())
    }

    fn handle_input(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::Custom { kind: events::NEXT_LEVEL, .. } => self.next_level(ctx),
                InputEvent::Custom { kind: events::SELECT_LEVEL, a, .. } => {
                    self.select_level(ctx, a)
                }
                InputEvent::Custom { kind, .. } => log::debug!("unknown custom event {}", kind),
                InputEvent::FocusLost | InputEvent::FocusGained => self.cancel_aim(ctx),
                _ if self.level_complete() => log::debug!("input ignored: level complete"),
                InputEvent::PointerDown { x, y } => self.begin_aim(ctx, Vec2::new(x, y)),
                InputEvent::PointerMove { x, y } => {
                    let pointer = Vec2::new(x, y);
                    if let (Some(aim), Some(last)) = (self.aim.as_mut(), self.last_pointer) {
                        aim.push_delta(pointer - last);
                        self.last_pointer = Some(pointer);
                    }
                }
                InputEvent::PointerDelta { dx, dy } => {
                    if let Some(aim) = self.aim.as_mut() {
                        aim.push_delta(Vec2::new(dx, dy));
                    }
                }
                InputEvent::PointerUp { .. } => self.release(ctx),
            }
        }
    }

    fn begin_aim(&mut self, ctx: &mut EngineContext, pointer: Vec2) {
        if self.aim.is_some() {
            return;
        }
        let Some(ball) = self.ball().and_then(|id| BallState::read(ctx, id)) else {
            return;
        };
        match AimState::begin(&ball) {
            Some(aim) => {
                self.aim = Some(aim);
                self.last_pointer = Some(pointer);
                ctx.emit_event(GameEvent::new(game_events::POINTER_LOCK, 1.0, 0.0, 0.0));
            }
            None => log::debug!(
                "aim ignored: ball moving or airborne (v={:?}, on_ground={})",
                ball.velocity,
                ball.on_ground
            ),
        }
    }

    /// Commit the shot.
    fn release(&mut self, ctx: &mut EngineContext) {
        let Some(aim) = self.aim.take() else {
            return;
        };
        self.end_aim(ctx);
        let Some(ball_id) = self.ball() else {
            return;
        };
        let position = ctx.scene.get(ball_id).map(|e| e.pos).unwrap_or(aim.start);
        let sample = aim.sample(position, &self.tuning);
        let shot = sample.shot();
        ctx.set_velocity(ball_id, shot.velocity);

        if shot.counts_as_stroke {
            let strokes = self.session.record_stroke();
            ctx.emit_event(GameEvent::new(game_events::STROKES, strokes as f32, 0.0, 0.0));
        }
        log::debug!(
            "shot: angle={:.3} power={:.1} stroke={}",
            sample.angle,
            sample.power,
            shot.counts_as_stroke
        );
    }

    /// Drop an aim without shooting.
    fn cancel_aim(&mut self, ctx: &mut EngineContext) {
        if self.aim.take().is_some() {
            self.end_aim(ctx);
            log::debug!("aim discarded");
        }
    }

    fn end_aim(&mut self, ctx: &mut EngineContext) {
        self.last_pointer = None;
        self.preview = None;
        ctx.emit_event(GameEvent::new(game_events::AIM_END, 0.0, 0.0, 0.0));
        ctx.emit_event(GameEvent::new(game_events::POINTER_LOCK, 0.0, 0.0, 0.0));
    }

    fn next_level(&mut self, ctx: &mut EngineContext) {
        if !self.level_complete() {
            log::debug!("next level ignored: current level not complete");
            return;
        }
        let index = self.session.finish_level();
        if let Err(err) = self.load_level(ctx, index) {
            log::error!("failed to load level {}: {}", index, err);
        }
    }

    fn select_level(&mut self, ctx: &mut EngineContext, index: f32) {
        if !index.is_finite() || index < 0.0 {
            log::warn!("level select ignored: bad index {}", index);
            return;
        }
        if let Err(err) = self.load_level(ctx, index as usize) {
            log::warn!("level select ignored: {}", err);
        }
    }

    fn update_preview(&mut self, ctx: &mut EngineContext, ball: Vec2) {
        let Some(aim) = &self.aim else {
            return;
        };
        let sample = aim.sample(ball, &self.tuning);
        let previous = self.preview.map(|(_, prev)| prev);
        if previous != Some(sample) {
            ctx.emit_event(GameEvent::new(
                game_events::AIM,
                sample.angle,
                sample.power,
                sample.percent(&self.tuning) as f32,
            ));
        }
        let tier = sample.tier(&self.tuning);
        if previous.map(|prev| prev.tier(&self.tuning)) != Some(tier) {
            ctx.emit_event(GameEvent::new(
                game_events::POWER_TIER,
                tier as u8 as f32,
                tier.color() as f32,
                0.0,
            ));
        }
        self.preview = Some((ball, sample));
    }

    fn watch_goal(&mut self, ctx: &mut EngineContext, handles: LevelHandles, ball: Vec2) {
        let Some(goal) = self.goal.as_mut() else {
            return;
        };
        if ctx.intersecting(handles.ball, handles.sensor) && goal.arm() == GoalSignal::Armed {
            log::debug!("goal armed at {:?}", ball);
        }
        match goal.poll(ball, FIXED_DT) {
            GoalSignal::Cancelled => log::debug!("goal dwell cancelled: ball left the cup"),
            GoalSignal::Completed => self.win(ctx, handles.ball),
            GoalSignal::Armed | GoalSignal::None => {}
        }
    }

    /// Freeze the ball and report the result.
    fn win(&mut self, ctx: &mut EngineContext, ball: EntityId) {
        ctx.set_velocity(ball, Vec2::ZERO);
        ctx.set_gravity_scale(ball, 0.0);
        self.cancel_aim(ctx);
        ctx.emit_event(GameEvent::new(
            game_events::LEVEL_COMPLETE,
            self.session.stroke_count as f32,
            self.session.level_index as f32,
            0.0,
        ));
        log::info!(
            "level {} complete in {} strokes",
            self.session.level_index,
            self.session.stroke_count
        );
    }
}

fn fixed_rect(rect: Rect) -> BodyDesc {
    BodyDesc::fixed(ColliderDesc::rect(rect.width, rect.height)).with_position(rect.center())
}

impl Default for MiniGolf {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for MiniGolf {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: FIXED_DT,
            world_width: 1200.0,
            world_height: 500.0,
            max_instances: 256,
            max_events: 64,
            gravity: Vec2::new(0.0, self.tuning.gravity),
            // About one ball across
            length_unit: 20.0,
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        if let Err(err) = self.load_level(ctx, self.session.level_index) {
            log::error!("failed to load level: {}", err);
        }
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        self.handle_input(ctx, input);

        let Some(handles) = self.handles else {
            return;
        };
        let Some(ball) = BallState::read(ctx, handles.ball) else {
            return;
        };

        self.update_preview(ctx, ball.position);
        if self.level_complete() {
            return;
        }

        select_drag(ball.on_ground, ball.velocity.y, &self.tuning).apply(ctx, handles.ball);
        self.watch_goal(ctx, handles, ball.position);
    }

    fn render(&self, ctx: &mut RenderContext) {
        let Some((origin, sample)) = &self.preview else {
            return;
        };
        for dot in trajectory_dots(*origin, sample) {
            if !ctx.render_buffer.push(RenderInstance::dot(dot.x, dot.y, DOT_RADIUS, BALL_COLOR)) {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aim::PowerTier;
    use putt_engine::RenderBuffer;
    use putt_web::GameRunner;

    fn start(game: &mut MiniGolf) -> EngineContext {
        let mut ctx = EngineContext::with_config(&game.config());
        game.init(&mut ctx);
        ctx
    }

    /// One fixed step as the runner drives it. Returns the events it emitted.
    fn tick(
        game: &mut MiniGolf,
        ctx: &mut EngineContext,
        input: Vec<InputEvent>,
    ) -> Vec<GameEvent> {
        let delivered = ctx.events.len();
        ctx.clear_frame_data(delivered);
        game.update(ctx, &InputQueue::from(input));
        ctx.step_physics();
        ctx.events.clone()
    }

    fn settle(game: &mut MiniGolf, ctx: &mut EngineContext) -> BallState {
        for _ in 0..900 {
            tick(game, ctx, vec![]);
            let ball = BallState::read(ctx, game.ball().unwrap()).unwrap();
            if ball.on_ground && ball.velocity.x == 0.0 && ball.velocity.y.abs() < 1.0 {
                return ball;
            }
        }
        panic!("ball never came to rest");
    }

    fn kinds(events: &[GameEvent]) -> Vec<f32> {
        events.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn init_builds_first_level() {
        let mut game = MiniGolf::new();
        let ctx = start(&mut game);

        // Three platforms plus the ground
        assert_eq!(ctx.scene.count_kind(EntityKind::Platform), 4);
        assert_eq!(ctx.scene.count_kind(EntityKind::GoalWall), 3);
        assert_eq!(ctx.scene.count_kind(EntityKind::GoalSensor), 1);
        assert_eq!(ctx.scene.count_kind(EntityKind::Boundary), 4);
        assert_eq!(ctx.scene.count_kind(EntityKind::Ball), 1);
        assert_eq!(ctx.world_size(), Vec2::new(1200.0, 500.0));

        assert_eq!(ctx.events[0], GameEvent::new(game_events::LEVEL_LOADED, 0.0, 1200.0, 500.0));
        assert_eq!(ctx.events[1], GameEvent::new(game_events::STROKES, 0.0, 0.0, 0.0));
    }

    #[test]
    fn out_of_range_load_changes_nothing() {
        let mut game = MiniGolf::new();
        let mut ctx = start(&mut game);
        let before = ctx.scene.len();

        let err = game.load_level(&mut ctx, 42).unwrap_err();
        assert!(matches!(err, LevelError::OutOfRange { index: 42, count: 9 }));
        assert_eq!(ctx.scene.len(), before);
        assert_eq!(game.session().level_index, 0);
        assert!(game.ball().is_some());
    }

    #[test]
    fn reload_replaces_entities_and_bodies() {
        let mut game = MiniGolf::new();
        let mut ctx = start(&mut game);
        game.load_level(&mut ctx, 3).unwrap();

        // Eight platforms plus ground, goal, sensor, walls, ball
        assert_eq!(ctx.scene.count_kind(EntityKind::Platform), 9);
        assert_eq!(ctx.scene.count_kind(EntityKind::Ball), 1);
        assert_eq!(ctx.physics.body_count(), ctx.scene.len());
        assert_eq!(ctx.world_size(), Vec2::new(2400.0, 1000.0));
    }

    #[test]
    fn ball_settles_on_the_ground() {
        let mut game = MiniGolf::new();
        let mut ctx = start(&mut game);
        let ball = settle(&mut game, &mut ctx);
        // Ground top is at 460, ball radius 10
        assert!((ball.position.y - 450.0).abs() < 2.0, "y={}", ball.position.y);
        assert_eq!(ball.position.x, 100.0);
    }

    #[test]
    fn shot_counts_one_stroke() {
        let mut game = MiniGolf::new();
        let mut ctx = start(&mut game);
        settle(&mut game, &mut ctx);

        let down = tick(&mut game, &mut ctx, vec![InputEvent::PointerDown { x: 0.0, y: 0.0 }]);
        assert!(game.aim().is_some());
        assert!(down.contains(&GameEvent::new(game_events::POINTER_LOCK, 1.0, 0.0, 0.0)));

        // Pull down-right: launch up-left
        let pull = InputEvent::PointerDelta { dx: 100.0, dy: 40.0 };
        let aimed = tick(&mut game, &mut ctx, vec![pull]);
        let aim_event = aimed.iter().find(|e| e.kind == game_events::AIM).unwrap();
        assert!(aim_event.b > 0.0 && aim_event.b <= 1000.0);

        let shot = tick(&mut game, &mut ctx, vec![InputEvent::PointerUp { x: 0.0, y: 0.0 }]);
        assert!(game.aim().is_none());
        assert_eq!(game.session().stroke_count, 1);
        assert!(shot.contains(&GameEvent::new(game_events::STROKES, 1.0, 0.0, 0.0)));
        assert!(kinds(&shot).contains(&game_events::AIM_END));

        let v = ctx.velocity(game.ball().unwrap());
        assert!(v.x < 0.0 && v.y < 0.0, "v={:?}", v);

        // Moving ball cannot be aimed
        tick(&mut game, &mut ctx, vec![InputEvent::PointerDown { x: 0.0, y: 0.0 }]);
        assert!(game.aim().is_none());
    }

    #[test]
    fn zero_pull_release_is_not_a_stroke() {
        let mut game = MiniGolf::new();
        let mut ctx = start(&mut game);
        settle(&mut game, &mut ctx);

        tick(&mut game, &mut ctx, vec![
            InputEvent::PointerDown { x: 5.0, y: 5.0 },
            InputEvent::PointerUp { x: 5.0, y: 5.0 },
        ]);
        assert_eq!(game.session().stroke_count, 0);
        assert_eq!(ctx.velocity(game.ball().unwrap()).x, 0.0);
    }

    #[test]
    fn focus_loss_discards_aim() {
        let mut game = MiniGolf::new();
        let mut ctx = start(&mut game);
        settle(&mut game, &mut ctx);

        let events = tick(&mut game, &mut ctx, vec![
            InputEvent::PointerDown { x: 0.0, y: 0.0 },
            InputEvent::PointerDelta { dx: 150.0, dy: 60.0 },
            InputEvent::FocusLost,
            InputEvent::PointerUp { x: 0.0, y: 0.0 },
        ]);
        assert!(game.aim().is_none());
        assert_eq!(game.session().stroke_count, 0);
        assert!(kinds(&events).contains(&game_events::AIM_END));
        assert_eq!(ctx.velocity(game.ball().unwrap()).x, 0.0);
    }

    #[test]
    fn absolute_moves_feed_the_accumulator() {
        let mut game = MiniGolf::new();
        let mut ctx = start(&mut game);
        let ball = settle(&mut game, &mut ctx);

        tick(&mut game, &mut ctx, vec![
            InputEvent::PointerDown { x: 500.0, y: 300.0 },
            InputEvent::PointerMove { x: 560.0, y: 300.0 },
            InputEvent::PointerMove { x: 600.0, y: 340.0 },
            InputEvent::PointerDelta { dx: -10.0, dy: 0.0 },
        ]);
        let aim = game.aim().unwrap();
        assert_eq!(aim.cursor, ball.position + Vec2::new(90.0, 40.0));
    }

    #[test]
    fn trajectory_is_drawn_while_aiming() {
        let mut game = MiniGolf::new();
        let mut ctx = start(&mut game);
        settle(&mut game, &mut ctx);
        tick(&mut game, &mut ctx, vec![
            InputEvent::PointerDown { x: 0.0, y: 0.0 },
            InputEvent::PointerDelta { dx: -600.0, dy: 300.0 },
        ]);

        // Full power: a dot every 100 units out to 1000
        let mut buffer = RenderBuffer::with_capacity(64);
        game.render(&mut RenderContext { render_buffer: &mut buffer });
        assert_eq!(buffer.instance_count(), 11);
        assert_eq!(buffer.instances[0].color as u32, BALL_COLOR);
    }

    #[test]
    fn power_meter_reports_tier_changes_only() {
        let mut game = MiniGolf::new();
        let mut ctx = start(&mut game);
        settle(&mut game, &mut ctx);
        let tiers = |events: &[GameEvent]| -> Vec<GameEvent> {
            events.iter().filter(|e| e.kind == game_events::POWER_TIER).copied().collect()
        };

        let low = tick(&mut game, &mut ctx, vec![
            InputEvent::PointerDown { x: 0.0, y: 0.0 },
            InputEvent::PointerDelta { dx: 50.0, dy: 0.0 },
        ]);
        let low_color = PowerTier::Low.color() as f32;
        assert_eq!(tiers(&low), vec![GameEvent::new(game_events::POWER_TIER, 0.0, low_color, 0.0)]);

        let max = tick(&mut game, &mut ctx, vec![InputEvent::PointerDelta { dx: 550.0, dy: 0.0 }]);
        let max_color = PowerTier::Max.color() as f32;
        assert_eq!(tiers(&max), vec![GameEvent::new(game_events::POWER_TIER, 3.0, max_color, 0.0)]);

        // Still full power: no repeat
        let same = tick(&mut game, &mut ctx, vec![InputEvent::PointerDelta { dx: 0.0, dy: 5.0 }]);
        assert!(tiers(&same).is_empty());
    }

    #[test]
    fn ball_off_target_never_completes() {
        let mut game = MiniGolf::new();
        let mut ctx = start(&mut game);
        for _ in 0..240 {
            let events = tick(&mut game, &mut ctx, vec![]);
            assert!(!kinds(&events).contains(&game_events::LEVEL_COMPLETE));
        }
        assert!(!game.level_complete());
    }

    fn cup_level() -> LevelSet {
        let mut level = LevelSet::default().get(0).unwrap().clone();
        level.name = "cup".into();
        // Drop straight into the goal at (1000, 440)
        level.ball_spawn = crate::level::Point { x: 1000.0, y: 440.0 };
        LevelSet::new(vec![level]).unwrap()
    }

    #[test]
    fn resting_in_cup_completes_once() {
        let mut game = MiniGolf::with_levels(cup_level());
        let mut ctx = start(&mut game);

        let mut completions = Vec::new();
        for _ in 0..120 {
            let events = tick(&mut game, &mut ctx, vec![]);
            let done = events.into_iter().filter(|e| e.kind == game_events::LEVEL_COMPLETE);
            completions.extend(done);
        }
        assert_eq!(completions, vec![GameEvent::new(game_events::LEVEL_COMPLETE, 0.0, 0.0, 0.0)]);
        assert!(game.level_complete());

        // Frozen in place
        let ball = game.ball().unwrap();
        assert!(ctx.velocity(ball).length() < 1e-3);

        // Aim input is ignored until the next level
        tick(&mut game, &mut ctx, vec![InputEvent::PointerDown { x: 0.0, y: 0.0 }]);
        assert!(game.aim().is_none());

        // Single-level course wraps onto itself
        let events = tick(&mut game, &mut ctx, vec![InputEvent::Custom {
            kind: events::NEXT_LEVEL,
            a: 0.0,
            b: 0.0,
            c: 0.0,
        }]);
        assert!(kinds(&events).contains(&game_events::LEVEL_LOADED));
        assert!(!game.level_complete());
        assert_eq!(game.session().level_index, 0);
        assert_eq!(game.session().stroke_count, 0);
    }

    #[test]
    fn next_level_requires_completion() {
        let mut game = MiniGolf::new();
        let mut ctx = start(&mut game);
        let next = InputEvent::Custom { kind: events::NEXT_LEVEL, a: 0.0, b: 0.0, c: 0.0 };
        tick(&mut game, &mut ctx, vec![next]);
        assert_eq!(game.session().level_index, 0);
    }

    #[test]
    fn select_level_loads_valid_index_only() {
        let mut game = MiniGolf::new();
        let mut ctx = start(&mut game);
        let select = |a| InputEvent::Custom { kind: events::SELECT_LEVEL, a, b: 0.0, c: 0.0 };

        tick(&mut game, &mut ctx, vec![select(3.0)]);
        assert_eq!(game.session().level_index, 3);
        assert_eq!(ctx.world_size(), Vec2::new(2400.0, 1000.0));

        tick(&mut game, &mut ctx, vec![select(99.0)]);
        tick(&mut game, &mut ctx, vec![select(-1.0)]);
        assert_eq!(game.session().level_index, 3);
    }

    #[test]
    fn replacing_levels_restarts_course() {
        let mut game = MiniGolf::new();
        let mut ctx = start(&mut game);
        game.load_level(&mut ctx, 5).unwrap();

        game.set_levels(&mut ctx, cup_level());
        assert_eq!(game.session().level_index, 0);
        assert_eq!(game.session().level_count, 1);
        let ball = ctx.scene.get(game.ball().unwrap()).unwrap();
        assert_eq!(ball.pos, Vec2::new(1000.0, 440.0));
    }

    #[test]
    fn rejected_tuning_keeps_aiming_safe() {
        let mut game = MiniGolf::new();
        let mut ctx = start(&mut game);
        settle(&mut game, &mut ctx);

        let bad = Tuning { max_power: -1.0, ..Tuning::default() };
        let err = game.set_tuning(&mut ctx, bad).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "max_power", .. }));
        assert_eq!(game.tuning().max_power, 1000.0);

        let events = tick(&mut game, &mut ctx, vec![
            InputEvent::PointerDown { x: 0.0, y: 0.0 },
            InputEvent::PointerDelta { dx: 50.0, dy: 20.0 },
        ]);
        assert!(kinds(&events).contains(&game_events::AIM));
    }

    #[test]
    fn level_events_reach_the_host_through_the_runner() {
        let loaded = |runner: &GameRunner<MiniGolf>| {
            runner
                .context()
                .events
                .iter()
                .any(|e| e.kind == game_events::LEVEL_LOADED)
        };
        let mut runner = GameRunner::new(MiniGolf::new());
        runner.init();
        runner.tick(FIXED_DT);
        assert!(loaded(&runner));

        runner.tick(FIXED_DT);
        assert!(!loaded(&runner));

        // Level upload between frames
        let (game, ctx) = runner.game_mut();
        game.set_levels(ctx, cup_level());
        runner.tick(FIXED_DT);
        let events = &runner.context().events;
        assert!(events.contains(&GameEvent::new(game_events::LEVEL_LOADED, 0.0, 1200.0, 500.0)));
        assert!(events.contains(&GameEvent::new(game_events::STROKES, 0.0, 0.0, 0.0)));
    }

    #[test]
    fn tuning_updates_gravity() {
        let mut game = MiniGolf::new();
        let mut ctx = start(&mut game);
        let tuning = Tuning { gravity: 0.0, ..Tuning::default() };
        game.set_tuning(&mut ctx, tuning).unwrap();

        for _ in 0..30 {
            tick(&mut game, &mut ctx, vec![]);
        }
        let ball = ctx.scene.get(game.ball().unwrap()).unwrap();
        assert_eq!(ball.pos, Vec2::new(100.0, 400.0));
    }
}
