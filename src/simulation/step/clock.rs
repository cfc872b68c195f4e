use crate::core::constants::DEFAULT_TIMESTEP;

/// Fixed-timestep accumulator.
///
/// Wall-clock frame deltas go in, whole physics steps come out. At most
/// `max_substeps` steps per frame; any backlog beyond that is dropped so a
/// stalled tab does not replay seconds of physics at once.
#[derive(Debug, Clone, PartialEq)]
pub struct StepClock {
    timestep: f32,
    max_substeps: u32,
    duration: Option<f32>,
    accumulator: f32,
    elapsed: f32,
}

impl StepClock {
    pub fn new(timestep: f32, max_substeps: u32, duration: Option<f32>) -> Self {
        Self {
            timestep,
            max_substeps: max_substeps.max(1),
            duration,
            accumulator: 0.0,
            elapsed: 0.0,
        }
    }

    /// Clock for a session with nothing loaded
    pub fn idle(max_substeps: u32) -> Self {
        Self::new(DEFAULT_TIMESTEP, max_substeps, None)
    }

    pub fn timestep(&self) -> f32 {
        self.timestep
    }

    /// Simulated seconds since load or the last replay
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_finished(&self) -> bool {
        match self.duration {
            Some(limit) => self.elapsed >= limit,
            None => false,
        }
    }

    pub fn restart(&mut self) {
        self.accumulator = 0.0;
        self.elapsed = 0.0;
    }

    /// Feed a frame delta and return how many fixed steps to run.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if self.is_finished() {
            return 0;
        }
        if dt.is_finite() && dt > 0.0 {
            self.accumulator += dt;
        }

        let mut steps = 0;
        while self.accumulator >= self.timestep && steps < self.max_substeps {
            self.accumulator -= self.timestep;
            self.elapsed += self.timestep;
            steps += 1;
            if self.is_finished() {
                self.accumulator = 0.0;
                break;
            }
        }
        if steps == self.max_substeps {
            self.accumulator = 0.0;
        }
        steps
    }
}
