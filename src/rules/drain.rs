use crate::data::DrainTuning;
use crate::time::{SpendContext, TimeError, TimeResource, reason, source};

use super::{ForcedSpend, spend_or_snap};

/// Passive drain applied once per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DrainRule {
    pub per_second: f64,
    pub max_delta_seconds: f64,
    pub ignore_first_frame: bool,
    skip_next: bool,
}

impl DrainRule {
    pub fn new(tuning: &DrainTuning) -> Self {
        Self {
            per_second: tuning.per_second,
            max_delta_seconds: tuning.max_delta_seconds,
            ignore_first_frame: tuning.ignore_first_frame,
            skip_next: tuning.ignore_first_frame,
        }
    }

    /// Re-arms the first-frame skip, e.g. after a restart.
    pub fn reset(&mut self) {
        self.skip_next = self.ignore_first_frame;
    }

    /// Drains `per_second * dt`. The first frame after construction or
    /// `reset` is ignored when configured, and `dt` is capped at
    /// `max_delta_seconds` to absorb load spikes. Returns `None` when the
    /// frame was skipped.
    pub fn tick(
        &mut self,
        time: &mut TimeResource,
        dt: f64,
    ) -> Result<Option<ForcedSpend>, TimeError> {
        if self.per_second <= 0.0 {
            return Ok(None);
        }
        if self.skip_next {
            self.skip_next = false;
            return Ok(None);
        }
        if dt.is_nan() || dt <= 0.0 {
            return Ok(None);
        }

        let dt = if self.max_delta_seconds > 0.0 {
            dt.min(self.max_delta_seconds)
        } else {
            dt
        };
        let context = SpendContext::new(reason::AUTO_DRAIN).with_source(source::PER_SECOND);
        spend_or_snap(time, self.per_second * dt, context).map(Some)
    }
}
