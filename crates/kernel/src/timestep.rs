/// Fixed-timestep accumulator.
///
/// Frame time is accumulated and consumed in whole steps so the simulation
/// advances identically regardless of render frame rate. Leftover time
/// carries into the next frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
    max_frame_time: f32,
}

impl FixedTimestep {
    /// Default clamp on a single frame's elapsed time, in seconds.
    pub const DEFAULT_MAX_FRAME_TIME: f32 = 0.25;

    pub fn new(step: f32) -> Self {
        Self::with_max_frame_time(step, Self::DEFAULT_MAX_FRAME_TIME)
    }

    /// Create an accumulator that clamps each frame's elapsed time to
    /// `max_frame_time`, so a long stall cannot trigger a runaway catch-up.
    pub fn with_max_frame_time(step: f32, max_frame_time: f32) -> Self {
        debug_assert!(step > 0.0);
        Self {
            step,
            accumulator: 0.0,
            max_frame_time: max_frame_time.max(step),
        }
    }

    /// Feed `elapsed` seconds and return how many whole steps to run.
    pub fn advance(&mut self, elapsed: f32) -> usize {
        self.accumulator += elapsed.clamp(0.0, self.max_frame_time);

        let mut steps = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            steps += 1;
        }
        steps
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Time carried over to the next frame.
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
