//! Frame pacing and the optional fixed physics step.

use std::time::{Duration, Instant};

/// Caps the loop at a target rate by sleeping off whatever is left of each frame.
#[derive(Debug)]
pub struct FramePacer {
    budget: Duration,
    started: Instant,
    last_frame: Duration,
}

impl FramePacer {
    /// a target of 0 fps disables sleeping, as does one too fast to fit a nanosecond budget
    pub fn new(target_fps: u64) -> Self {
        let budget = if target_fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_nanos(1_000_000_000 / target_fps)
        };

        Self {
            budget,
            started: Instant::now(),
            last_frame: budget,
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// seconds the previous frame took, sleep included
    pub fn dt(&self) -> f32 {
        self.last_frame.as_secs_f32()
    }

    pub fn begin(&mut self) {
        self.started = Instant::now();
    }

    /// sleep for whatever is left of the budget and return the whole frame's duration
    pub fn finish(&mut self) -> Duration {
        if let Some(left) = self.remaining(self.started.elapsed()) {
            std::thread::sleep(left);
        }
        self.last_frame = self.started.elapsed();
        self.last_frame
    }

    /// time left in the budget after `elapsed` of work
    pub fn remaining(&self, elapsed: Duration) -> Option<Duration> {
        self.budget
            .checked_sub(elapsed)
            .filter(|left| !left.is_zero())
    }
}

/// Splits wall-clock time into constant physics steps.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct FixedStep {
    step: f32,
    accumulator: f32,
    max_steps: u32,
}

impl FixedStep {
    pub fn new(step: f32, max_steps: u32) -> Self {
        debug_assert!(step > 0., "physics step must be positive");
        Self {
            step,
            accumulator: 0.,
            max_steps,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Add `dt` seconds and return how many whole steps to run.
    ///
    /// At most `max_steps` are returned; time beyond that is dropped so a stall does not
    /// snowball into ever longer frames.
    pub fn steps(&mut self, dt: f32) -> u32 {
        if dt.is_finite() && dt > 0. {
            self.accumulator += dt;
        }

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            self.accumulator -= self.step;
            steps += 1;
        }

        if steps == self.max_steps && self.accumulator >= self.step {
            log::debug!("dropping {:.3}s of simulation time", self.accumulator);
            self.accumulator %= self.step;
        }

        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_budget() {
        let pacer = FramePacer::new(20);
        assert_eq!(pacer.budget(), Duration::from_millis(50));
        assert_eq!(
            pacer.remaining(Duration::from_millis(20)),
            Some(Duration::from_millis(30))
        );
        assert_eq!(pacer.remaining(Duration::from_millis(50)), None);
        assert_eq!(pacer.remaining(Duration::from_millis(80)), None);
    }

    #[test]
    fn unpaced() {
        let pacer = FramePacer::new(0);
        assert_eq!(pacer.remaining(Duration::ZERO), None);
    }

    #[test]
    fn rates_beyond_u32_do_not_wrap() {
        let pacer = FramePacer::new(1 << 32);
        assert_eq!(pacer.budget(), Duration::ZERO);
        assert_eq!(pacer.remaining(Duration::ZERO), None);

        let pacer = FramePacer::new((1 << 32) + 30);
        assert_eq!(pacer.budget(), Duration::ZERO);
        assert_eq!(FramePacer::new(30).budget(), Duration::from_nanos(33_333_333));
    }

    #[test]
    fn finish_sleeps_to_the_budget() {
        let mut pacer = FramePacer::new(100);
        pacer.begin();
        let frame = pacer.finish();
        assert!(frame >= Duration::from_millis(10));
        assert!((pacer.dt() - frame.as_secs_f32()).abs() < 1e-6);
    }

    #[test]
    fn fixed_step_accumulates_remainders() {
        let mut fixed = FixedStep::new(0.25, 8);
        assert_eq!(fixed.steps(0.1), 0);
        assert_eq!(fixed.steps(0.1), 0);
        assert_eq!(fixed.steps(0.1), 1);
        assert_eq!(fixed.steps(0.5), 2);
        assert_eq!(fixed.steps(0.), 0);
    }

    #[test]
    fn fixed_step_caps_catch_up() {
        let mut fixed = FixedStep::new(0.125, 4);
        assert_eq!(fixed.steps(10.), 4);
        assert!(fixed.accumulator < fixed.step());
        assert_eq!(fixed.steps(f32::NAN), 0);
    }
}
