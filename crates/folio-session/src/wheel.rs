#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Accumulates wheel deltas until one zoom step's worth has arrived.
///
/// Smooth trackpads emit many tiny deltas and notched mice few large ones;
/// thresholding the running sum gives both a comparable step cadence.
#[derive(Debug, Default)]
pub struct WheelAccumulator {
    accumulated: f32,
}

impl WheelAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one wheel delta (scroll-down positive). Returns the zoom step to
    /// take once the accumulated magnitude reaches `threshold`, resetting the
    /// accumulator.
    pub fn accumulate(&mut self, delta: f32, threshold: f32) -> Option<ZoomDirection> {
        self.accumulated += delta;

        if self.accumulated.abs() < threshold {
            return None;
        }

        let direction = if self.accumulated > 0.0 {
            ZoomDirection::Out
        } else {
            ZoomDirection::In
        };
        self.accumulated = 0.0;
        Some(direction)
    }

    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }

    pub fn value(&self) -> f32 {
        self.accumulated
    }
}
