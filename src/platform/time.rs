use crate::consts::MAX_SUBSTEPS;

/// Longest frame gap fed to the accumulator (tab switches, breakpoints)
const MAX_FRAME_MS: f64 = 100.0;

/// Fixed timestep accumulator driven by host timestamps
#[derive(Debug, Clone)]
pub struct FrameClock {
    step_ms: f64,
    accumulator_ms: f64,
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new(step_ms: f64) -> Self {
        Self {
            step_ms,
            accumulator_ms: 0.0,
            last_ms: None,
        }
    }

    /// Feed a frame timestamp, returns how many fixed steps to run
    ///
    /// The first call only sets the baseline. At most [`MAX_SUBSTEPS`] steps
    /// are returned per frame; time beyond that is dropped.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let Some(last) = self.last_ms.replace(now_ms) else {
            return 0;
        };

        let frame_ms = (now_ms - last).clamp(0.0, MAX_FRAME_MS);
        self.accumulator_ms =
            (self.accumulator_ms + frame_ms).min(self.step_ms * MAX_SUBSTEPS as f64);

        let steps = (self.accumulator_ms / self.step_ms) as u32;
        self.accumulator_ms -= steps as f64 * self.step_ms;
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0)
    pub fn alpha(&self) -> f32 {
        (self.accumulator_ms / self.step_ms) as f32
    }

    /// Forget the baseline, e.g. after the host was suspended
    pub fn reset(&mut self) {
        self.accumulator_ms = 0.0;
        self.last_ms = None;
    }
}
