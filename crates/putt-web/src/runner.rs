use putt_engine::{
    Game, GameConfig, EngineContext, RenderContext,
    InputEvent, InputQueue, RenderBuffer,
    FixedTimestep, ProtocolLayout, build_render_buffer,
};
use putt_engine::bridge::protocol::HEADER_FLOATS;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    /// Handed to every fixed step after the first one in a frame.
    idle: InputQueue,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    frame: u32,
    /// Events the host saw at the end of the last tick.
    delivered: usize,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let layout = ProtocolLayout::from_config(&config);
        let render_buffer = RenderBuffer::with_capacity(config.max_instances);

        Self {
            game,
            ctx: EngineContext::with_config(&config),
            input: InputQueue::new(),
            idle: InputQueue::new(),
            render_buffer,
            timestep,
            layout,
            config,
            header: [0.0; HEADER_FLOATS],
            frame: 0,
            delivered: 0,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.write_header();
        log::debug!(
            "runner ready: dt={:.4}s, {} instances, {} events",
            self.config.fixed_dt,
            self.layout.max_instances,
            self.layout.max_events,
        );
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame tick: fixed updates with physics, then the render buffer.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Events from init or host calls since the last tick are still unread
        self.ctx.clear_frame_data(self.delivered);

        let steps = self.timestep.accumulate(dt);
        for step in 0..steps {
            // Each event is seen by exactly one fixed step
            let input = if step == 0 { &self.input } else { &self.idle };
            self.game.update(&mut self.ctx, input);
            #[cfg(feature = "physics")]
            self.ctx.step_physics();
        }

        // A frame with no fixed step leaves input queued for the next one
        if steps > 0 {
            self.input.drain();
        }

        build_render_buffer(self.ctx.scene.iter(), &mut self.render_buffer);

        // Allow game to add overlay instances (aim trajectory)
        {
            let mut render_ctx = RenderContext {
                render_buffer: &mut self.render_buffer,
            };
            self.game.render(&mut render_ctx);
        }

        self.frame = self.frame.wrapping_add(1);
        self.delivered = self.ctx.events.len();
        self.write_header();
    }

    fn write_header(&mut self) {
        let world = self.ctx.world_size();
        self.layout.write_header(
            &mut self.header,
            self.frame,
            self.render_buffer.instances.len(),
            self.ctx.events.len(),
            (world.x, world.y),
        );
    }

    /// Direct access to the game, for host calls that bypass the input queue
    /// (level data and tuning uploads).
    pub fn game_mut(&mut self) -> (&mut G, &mut EngineContext) {
        (&mut self.game, &mut self.ctx)
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    // ---- Pointer accessors for shared memory reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    /// World size follows the loaded level, not the initial config.
    pub fn world_width(&self) -> f32 {
        self.ctx.world_size().x
    }

    pub fn world_height(&self) -> f32 {
        self.ctx.world_size().y
    }

    // ---- Capacity accessors ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn fixed_dt(&self) -> f32 {
        self.config.fixed_dt
    }
}
