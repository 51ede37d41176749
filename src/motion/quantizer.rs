//! Sub-step position to whole-step burst quantization.

use super::fixed::QFormat;

/// Truncate-and-carry quantizer (a digital differential analyzer).
///
/// Tracks how much of the fixed-point position integral has already been
/// emitted as whole steps. Each call emits only the whole steps not yet sent,
/// so the sum of all bursts always equals the truncated position and no
/// rounding error accumulates across ticks.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepQuantizer {
    emitted_q: i64,
}

impl StepQuantizer {
    /// Create a quantizer with nothing emitted.
    #[inline]
    pub const fn new() -> Self {
        Self { emitted_q: 0 }
    }

    /// Emit the whole steps between what was already sent and `position_q`.
    pub fn emit(&mut self, position_q: i64, q: QFormat) -> i64 {
        let burst = q.whole_steps(position_q - self.emitted_q);
        self.emitted_q += q.from_steps(burst);
        burst
    }

    /// Total emitted so far, in Q units.
    #[inline]
    pub fn emitted_q(&self) -> i64 {
        self.emitted_q
    }

    /// Forget everything emitted; the next move starts from zero.
    #[inline]
    pub fn reset(&mut self) {
        self.emitted_q = 0;
    }
}
