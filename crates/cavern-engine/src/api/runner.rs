use crate::api::game::{EngineContext, Game, GameConfig};
use crate::api::types::WireEvent;
use crate::bridge::protocol::{FrameHeader, ProtocolLayout};
use crate::bridge::snapshot::SnapshotBuffer;
use crate::core::time::FixedTimestep;
use crate::input::queue::{InputEvent, InputQueue};
use crate::systems::snapshot::build_snapshot;

/// Generic game runner that wires up the engine loop.
///
/// The host feeds it variable frame durations and input; the runner turns
/// them into fixed ticks and exposes the interpolated snapshot, the frame's
/// events and the packed frame buffer afterwards.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    snapshot: SnapshotBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    /// Flat buffer the host reads: header, instances, events.
    frame_buffer: Vec<f32>,
    wire_events: Vec<WireEvent>,
    frame: u64,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let mut config = game.config();
        if let Err(err) = config.validate() {
            log::warn!("invalid game config ({}), using defaults", err);
            config = GameConfig::default();
        }

        let timestep = FixedTimestep::new(config.fixed_step_ms())
            .with_max_steps(config.max_steps_per_frame);
        let layout = ProtocolLayout::from_config(&config);

        Self {
            game,
            ctx: EngineContext::from_config(&config),
            input: InputQueue::new(),
            snapshot: SnapshotBuffer::with_capacity(config.max_snapshot_instances),
            timestep,
            frame_buffer: layout.allocate(),
            wire_events: Vec::with_capacity(config.max_events),
            layout,
            config,
            frame: 0,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.ctx.scene.capture_all();
        build_snapshot(self.ctx.scene.iter(), 0.0, &mut self.snapshot);
        self.initialized = true;
        log::info!(
            "runner initialized: {} actors, {:.2}ms step, {} max steps per frame",
            self.ctx.scene.len(),
            self.timestep.step_ms(),
            self.config.max_steps_per_frame
        );
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame of `frame_ms` milliseconds. Returns the number of
    /// fixed ticks that ran.
    ///
    /// Queued input is seen by the first tick of the frame and drained after
    /// it. A frame too short to tick leaves the input queued for the next one.
    pub fn tick(&mut self, frame_ms: f32) -> u32 {
        if !self.initialized {
            return 0;
        }

        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(frame_ms);
        for step in 0..steps {
            self.step();
            if step == 0 {
                self.input.clear();
            }
        }

        build_snapshot(self.ctx.scene.iter(), self.timestep.alpha(), &mut self.snapshot);

        self.wire_events.clear();
        self.wire_events.extend(self.ctx.events.iter().map(|e| e.to_wire()));

        self.frame += 1;
        let header = FrameHeader {
            frame: self.frame,
            tick_count: self.timestep.tick_count(),
            step_ms: self.timestep.step_ms(),
        };
        self.layout
            .write_frame(&mut self.frame_buffer, header, &self.snapshot, &self.wire_events);

        steps
    }

    /// One fixed tick, in the order combat correctness depends on.
    fn step(&mut self) {
        self.ctx.scene.capture_all();
        self.game.update(&mut self.ctx, &self.input);
        self.ctx.step_movement();
        self.game.resolve_combat(&mut self.ctx);
        self.ctx.tick_timers();
    }

    // ---- Read access for the host ----

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    /// Direct access for hosts and tests that stage scenes by hand.
    pub fn context_mut(&mut self) -> &mut EngineContext {
        &mut self.ctx
    }

    pub fn snapshot(&self) -> &SnapshotBuffer {
        &self.snapshot
    }

    /// Events emitted during the last frame.
    pub fn events(&self) -> &[WireEvent] {
        &self.wire_events
    }

    pub fn frame_buffer(&self) -> &[f32] {
        &self.frame_buffer
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn alpha(&self) -> f32 {
        self.timestep.alpha()
    }

    pub fn tick_count(&self) -> u64 {
        self.timestep.tick_count()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{EntityId, GameEvent};
    use crate::bridge::protocol::HEADER_TICK_COUNT;
    use crate::components::actor::{Actor, ActorKind};
    use crate::components::tilemap::CollisionMap;
    use crate::core::physics::PhysicsBody;

    /// Records the order hooks run in and the input each tick saw.
    #[derive(Default)]
    struct Probe {
        log: Vec<&'static str>,
        steps_seen: Vec<i32>,
        player_y_at_combat: Vec<f32>,
    }

    impl Game for Probe {
        fn config(&self) -> GameConfig {
            GameConfig { tick_rate_hz: 20.0, ..Default::default() }
        }

        fn init(&mut self, ctx: &mut EngineContext) {
            ctx.map = CollisionMap::from_rows(&["......", "......", "######"]);
            let id = ctx.next_id();
            ctx.scene.spawn(Actor::new(id, ActorKind::Player).with_body(PhysicsBody::new(1, 0.0)));
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
            self.log.push("update");
            for event in input.iter() {
                if let InputEvent::Step { direction } = *event {
                    self.steps_seen.push(direction);
                    if let Some(player) = ctx.scene.get_mut(EntityId(1)) {
                        ctx.movement.move_horizontal(&mut player.body, direction, &ctx.map);
                    }
                }
            }
        }

        fn resolve_combat(&mut self, ctx: &mut EngineContext) {
            self.log.push("combat");
            if let Some(player) = ctx.scene.get(EntityId(1)) {
                self.player_y_at_combat.push(player.body.logical_y);
            }
        }
    }

    fn runner() -> GameRunner<Probe> {
        let mut runner = GameRunner::new(Probe::default());
        runner.init();
        runner
    }

    #[test]
    fn tick_before_init_does_nothing() {
        let mut runner = GameRunner::new(Probe::default());
        assert_eq!(runner.tick(100.0), 0);
        assert!(runner.game().log.is_empty());
    }

    #[test]
    fn hooks_run_in_tick_order() {
        let mut runner = runner();
        assert_eq!(runner.tick(100.0), 2);
        assert_eq!(runner.game().log, vec!["update", "combat", "update", "combat"]);
    }

    #[test]
    fn combat_sees_post_movement_positions() {
        let mut runner = runner();
        runner.tick(50.0);
        let y = runner.game().player_y_at_combat[0];
        assert!(y > 0.0, "combat saw pre-movement y={}", y);
    }

    #[test]
    fn input_reaches_exactly_one_tick() {
        let mut runner = runner();
        runner.push_input(InputEvent::Step { direction: 1 });
        runner.tick(20.0);
        assert!(runner.game().steps_seen.is_empty());

        runner.tick(200.0);
        assert_eq!(runner.game().steps_seen, vec![1]);
        assert_eq!(runner.context().scene.get(EntityId(1)).unwrap().body.grid_x, 2);
    }

    #[test]
    fn landing_event_reaches_frame_buffer() {
        let mut runner = runner();
        let mut landed = false;
        for _ in 0..20 {
            runner.tick(50.0);
            landed |= runner
                .events()
                .iter()
                .any(|e| e.kind == GameEvent::KIND_LANDED);
        }
        assert!(landed);
        assert_eq!(runner.frame_buffer()[HEADER_TICK_COUNT], 20.0);
        assert_eq!(runner.snapshot().instance_count(), 1);
    }

    #[test]
    fn snapshot_is_interpolated_between_ticks() {
        let mut runner = runner();
        runner.tick(75.0);
        assert!((runner.alpha() - 0.5).abs() < 0.001);
        let inst = runner.snapshot().instances[0];
        let actor = runner.context().scene.get(EntityId(1)).unwrap();
        let expected = actor.visual_position(0.5);
        assert!((inst.y - expected.y).abs() < 0.001);
    }
}
