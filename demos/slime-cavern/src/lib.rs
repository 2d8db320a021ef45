pub mod game;

use cavern_engine::*;

pub use game::{Session, SlimeCavern};

/// One scripted input and when the host sends it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedInput {
    pub at_ms: f32,
    pub event: InputEvent,
}

const fn at(at_ms: f32, event: InputEvent) -> ScriptedInput {
    ScriptedInput { at_ms, event }
}

/// Walk toward the first slime, fight it, hop around, then wander back.
///
/// Every send time sits 80ms past a multiple of 200ms. At 15Hz that is a
/// fifth of a tick after a tick boundary, so at 30 FPS or faster the command
/// lands on the same tick.
pub const DEMO_SCRIPT: [ScriptedInput; 16] = [
    at(80.0, InputEvent::Step { direction: 1 }),
    at(280.0, InputEvent::Step { direction: 1 }),
    at(480.0, InputEvent::Step { direction: 1 }),
    at(680.0, InputEvent::Attack { holding_down: false }),
    at(880.0, InputEvent::Attack { holding_down: false }),
    at(1080.0, InputEvent::Attack { holding_down: false }),
    at(1280.0, InputEvent::Jump),
    at(1480.0, InputEvent::Attack { holding_down: true }),
    at(1880.0, InputEvent::Step { direction: 1 }),
    at(2080.0, InputEvent::Attack { holding_down: false }),
    at(2280.0, InputEvent::Step { direction: 1 }),
    at(2480.0, InputEvent::Attack { holding_down: false }),
    at(2880.0, InputEvent::Step { direction: -1 }),
    at(3080.0, InputEvent::Jump),
    at(3280.0, InputEvent::Step { direction: -1 }),
    at(3480.0, InputEvent::Attack { holding_down: false }),
];

/// Logical end state of a run. Visual state is left out on purpose: only
/// what the fixed tick computes has to agree across frame rates.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub ticks: u64,
    /// (id, column, logical y, hp) per surviving actor, spawn order.
    pub actors: Vec<(EntityId, i32, f32, u32)>,
    pub session: Session,
    /// Every event emitted during the run, in order.
    pub events: Vec<WireEvent>,
}

/// Drive the cavern through `script` at a fixed render rate until `ticks`
/// fixed ticks have run.
pub fn run_scripted(fps: f32, script: &[ScriptedInput], ticks: u64) -> Result<Outcome, LevelError> {
    let mut runner = GameRunner::new(SlimeCavern::new()?);
    runner.init();

    let frame_ms = 1000.0 / fps;
    let mut elapsed_ms = 0.0_f64;
    let mut next = 0;
    let mut events = Vec::new();

    while runner.tick_count() < ticks {
        while next < script.len() && f64::from(script[next].at_ms) <= elapsed_ms {
            runner.push_input(script[next].event);
            next += 1;
        }
        runner.tick(frame_ms);
        elapsed_ms += f64::from(frame_ms);
        events.extend_from_slice(runner.events());
    }

    log::debug!(
        "{} FPS: {} frames for {} ticks",
        fps,
        runner.frame_count(),
        runner.tick_count()
    );

    Ok(Outcome {
        ticks: runner.tick_count(),
        actors: runner
            .context()
            .scene
            .iter()
            .map(|a| (a.id, a.body.grid_x, a.body.logical_y, a.health.hp))
            .collect(),
        session: runner.game().session,
        events,
    })
}
