// runner.rs - Cooperative frame loop over an input source and a clock

use crate::detector::Termination;
use crate::input::{Action, InputAdapter};
use crate::session::{Flow, SessionState};
use std::time::{Duration, Instant};

/// Paces frames. Returns the time elapsed since the previous frame.
pub trait FrameClock {
    fn wait_frame(&mut self) -> Duration;
}

/// Sleeps to hold a fixed frame rate.
pub struct FixedRate {
    interval: Duration,
    last: Instant,
}

impl FixedRate {
    pub fn new(interval: Duration) -> Self {
        Self { interval, last: Instant::now() }
    }
}

impl FrameClock for FixedRate {
    fn wait_frame(&mut self) -> Duration {
        let due = self.last + self.interval;
        let now = Instant::now();
        if due > now {
            std::thread::sleep(due - now);
        }
        let now = Instant::now();
        let elapsed = now - self.last;
        self.last = now;
        elapsed
    }
}

/// Never sleeps; every frame reports the same nominal duration.
pub struct Unpaced(pub Duration);

impl FrameClock for Unpaced {
    fn wait_frame(&mut self) -> Duration {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Quit or acknowledgement arrived.
    Exited { termination: Option<Termination> },
    /// The input source closed first.
    InputClosed { termination: Option<Termination> },
    /// `max_frames` ran out.
    FrameLimit,
}

/// Runs frames until the session exits, the input closes, or `max_frames`
/// is reached.
pub fn run<I, C>(state: &mut SessionState, input: &mut I, clock: &mut C, max_frames: Option<u64>) -> Outcome
where
    I: InputAdapter,
    C: FrameClock,
{
    let mut actions: Vec<Action> = Vec::new();
    let mut frames = 0u64;
    loop {
        if max_frames.is_some_and(|max| frames >= max) {
            tracing::info!(frames, generation = state.generation(), "frame limit reached");
            return Outcome::FrameLimit;
        }
        let elapsed = clock.wait_frame();

        actions.clear();
        let open = input.poll(&mut actions);
        let flow = state.tick(actions.drain(..), elapsed);
        frames += 1;

        let termination = state.termination().copied();
        if flow == Flow::Exit {
            return Outcome::Exited { termination };
        }
        if !open {
            return Outcome::InputClosed { termination };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Scene, SessionConfig};
    use crate::detector::EndReason;
    use crate::input::ScriptedInput;

    fn session() -> SessionState {
        SessionState::new(SessionConfig { rows: 8, cols: 8, scene: Scene::Empty, ..Default::default() }).unwrap()
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut state = session();
        let mut input = ScriptedInput::new([vec![], vec![Action::Quit], vec![Action::Start]]);
        let outcome = run(&mut state, &mut input, &mut Unpaced(Duration::ZERO), None);
        assert_eq!(outcome, Outcome::Exited { termination: None });
        assert_eq!(input.remaining(), 1);
    }

    #[test]
    fn frame_limit_bounds_an_endless_source() {
        struct Idle;
        impl InputAdapter for Idle {
            fn poll(&mut self, _out: &mut Vec<Action>) -> bool {
                true
            }
        }
        let mut state = session();
        let outcome = run(&mut state, &mut Idle, &mut Unpaced(Duration::ZERO), Some(3));
        assert_eq!(outcome, Outcome::FrameLimit);
    }

    #[test]
    fn terminated_run_is_reported_when_acknowledged() {
        let mut state = session();
        let mut frames = vec![vec![Action::Toggle { row: 1, col: 1 }, Action::Toggle { row: 1, col: 2 },
            Action::Toggle { row: 2, col: 1 }, Action::Toggle { row: 2, col: 2 }, Action::Start]];
        frames.extend(std::iter::repeat_with(Vec::new).take(15));
        frames.push(vec![Action::Acknowledge]);
        let mut input = ScriptedInput::new(frames);

        match run(&mut state, &mut input, &mut Unpaced(Duration::from_millis(16)), None) {
            Outcome::Exited { termination: Some(t) } => assert_eq!(t.reason, EndReason::Stable),
            other => panic!("unexpected outcome {other:?}"),
        }
    }
}
