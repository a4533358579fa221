//=========================================================================
// Fixed-Step Loop Scenarios
//=========================================================================
//
// End-to-end behaviour of `FixedStepLoop` through the public API, driven
// by scripted clocks and recording fakes. No window, no real time.
//
//=========================================================================

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use cadence_engine::core::clock::ScriptedClock;
use cadence_engine::prelude::*;

//=== Recording Fakes =====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    ShouldClose,
    Input,
    Advance(Duration),
    Render,
    Present,
    Dispose,
}

type Log = Rc<RefCell<Vec<Call>>>;

struct RecordingScene {
    log: Log,
}

impl Scene for RecordingScene {
    fn handle_input(&mut self) -> anyhow::Result<()> {
        self.log.borrow_mut().push(Call::Input);
        Ok(())
    }

    fn advance(&mut self, dt: Duration) -> anyhow::Result<()> {
        self.log.borrow_mut().push(Call::Advance(dt));
        Ok(())
    }

    fn render(&mut self) -> anyhow::Result<()> {
        self.log.borrow_mut().push(Call::Render);
        Ok(())
    }
}

struct RecordingSurface {
    log: Log,
    close_on_check: Option<usize>,
    checks: usize,
}

impl PresentationSurface for RecordingSurface {
    fn should_close(&mut self) -> bool {
        self.checks += 1;
        self.log.borrow_mut().push(Call::ShouldClose);
        self.close_on_check.is_some_and(|n| self.checks >= n)
    }

    fn present(&mut self) -> anyhow::Result<()> {
        self.log.borrow_mut().push(Call::Present);
        Ok(())
    }

    fn dispose(&mut self) -> anyhow::Result<()> {
        self.log.borrow_mut().push(Call::Dispose);
        Ok(())
    }
}

fn fakes(log: &Log) -> (RecordingScene, RecordingSurface) {
    (
        RecordingScene { log: log.clone() },
        RecordingSurface { log: log.clone(), close_on_check: None, checks: 0 },
    )
}

fn count(log: &Log, wanted: fn(&Call) -> bool) -> usize {
    log.borrow().iter().filter(|c| wanted(c)).count()
}

fn advances(log: &Log) -> usize {
    count(log, |c| matches!(c, Call::Advance(_)))
}

fn presents(log: &Log) -> usize {
    count(log, |c| *c == Call::Present)
}

fn millis(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

//=========================================================================
// Accumulator Tests
//=========================================================================

#[test]
fn accumulator_stays_within_one_frame_for_irregular_deltas() {
    let log = Log::default();
    let (scene, surface) = fakes(&log);

    // Deterministic spread of 0..=5ms deltas with sub-millisecond noise.
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    let deltas: Vec<Duration> = (0..500)
        .map(|_| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            Duration::from_nanos((seed >> 33) % 5_000_001)
        })
        .collect();

    let budget = FrameBudget::from_rate(1000.0).unwrap();
    let frame_time = budget.frame_time();
    let mut game = FixedStepLoop::new(ScriptedClock::from_deltas(deltas), scene, surface, budget)
        .unwrap()
        .with_idle(NoIdle);

    game.begin();
    for _ in 0..500 {
        game.run_iteration().unwrap();
        let acc = game.accumulator();
        assert!((0.0..frame_time).contains(&acc), "accumulator out of range: {}", acc);
    }
}

#[test]
fn step_count_is_independent_of_chunking() {
    let chunkings: [Vec<Duration>; 4] = [
        vec![Duration::from_micros(10_500)],
        vec![Duration::from_micros(3_500); 3],
        vec![Duration::from_micros(500); 21],
        vec![millis(4), Duration::from_micros(100), Duration::from_micros(6_400)],
    ];

    for deltas in chunkings {
        let iterations = deltas.len();
        let log = Log::default();
        let (scene, surface) = fakes(&log);
        let budget = FrameBudget::from_rate(1000.0).unwrap();
        let mut game =
            FixedStepLoop::new(ScriptedClock::from_deltas(deltas.clone()), scene, surface, budget)
                .unwrap()
                .with_idle(NoIdle);

        game.begin();
        for _ in 0..iterations {
            game.run_iteration().unwrap();
        }

        assert_eq!(advances(&log), 10, "chunking {:?}", deltas);
        assert!((game.accumulator() - 0.0005).abs() < 1e-9);
    }
}

#[test]
fn every_advance_receives_the_fixed_step() {
    let log = Log::default();
    let (scene, surface) = fakes(&log);
    let budget = FrameBudget::from_rate(250.0).unwrap();
    let mut game = FixedStepLoop::new(ScriptedClock::repeating(millis(9)), scene, surface, budget)
        .unwrap()
        .with_idle(NoIdle);

    game.begin();
    for _ in 0..10 {
        game.run_iteration().unwrap();
    }

    let log = log.borrow();
    assert!(log.iter().any(|c| matches!(c, Call::Advance(_))));
    for call in log.iter() {
        if let Call::Advance(dt) = call {
            assert_eq!(*dt, millis(4));
        }
    }
}

//=========================================================================
// Frame Tests
//=========================================================================

#[test]
fn five_small_deltas_make_exactly_one_frame() {
    let log = Log::default();
    let (scene, surface) = fakes(&log);
    let budget = FrameBudget::from_rate(1000.0).unwrap();
    let clock = ScriptedClock::repeating(Duration::from_micros(200));
    let mut game = FixedStepLoop::new(clock, scene, surface, budget).unwrap().with_idle(NoIdle);

    game.begin();
    let rendered: Vec<bool> = (0..5).map(|_| game.run_iteration().unwrap().rendered).collect();

    assert_eq!(rendered, [false, false, false, false, true]);
    assert_eq!(advances(&log), 1);
    assert_eq!(count(&log, |c| *c == Call::Render), 1);
    assert_eq!(presents(&log), 1);
    assert!(game.accumulator().abs() < 1e-12);
}

//=========================================================================
// Shutdown Tests
//=========================================================================

#[test]
fn close_request_finishes_the_step_and_its_frame() {
    let log = Log::default();
    let (scene, mut surface) = fakes(&log);
    surface.close_on_check = Some(3);
    let budget = FrameBudget::from_rate(1000.0).unwrap();
    let mut game = FixedStepLoop::new(ScriptedClock::repeating(millis(1)), scene, surface, budget)
        .unwrap()
        .with_idle(NoIdle);

    game.start().unwrap();

    let step = millis(1);
    let one_frame = [
        Call::ShouldClose,
        Call::Input,
        Call::Advance(step),
        Call::Render,
        Call::Present,
    ];
    let expected: Vec<Call> = one_frame
        .iter()
        .cycle()
        .take(one_frame.len() * 3)
        .copied()
        .chain([Call::Dispose])
        .collect();

    assert_eq!(*log.borrow(), expected);
    assert_eq!(game.state(), LoopState::Stopped);
    assert_eq!(game.stats().iterations, 3);
}
