use crate::time::{GainContext, SpendContext, TimeError, TimeResource, reason, source};

use super::{ForcedSpend, spend_or_snap};

/// Player defensive state at the moment a hit lands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefenseState {
    pub invincible: bool,
    pub perfect_window: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitOutcome {
    Dodged,
    PerfectDodged,
    Damaged,
}

/// Invincibility turns a hit into a dodge, a perfect one inside the window.
pub fn resolve_hit(defense: DefenseState) -> HitOutcome {
    match (defense.invincible, defense.perfect_window) {
        (true, true) => HitOutcome::PerfectDodged,
        (true, false) => HitOutcome::Dodged,
        (false, _) => HitOutcome::Damaged,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamagePenaltyRule {
    pub penalty: f64,
}

impl DamagePenaltyRule {
    pub fn new(penalty: f64) -> Self {
        Self { penalty }
    }

    /// Charges the penalty for a damaging hit from `source_id`. A penalty
    /// larger than the time left empties the clock.
    pub fn apply(
        &self,
        time: &mut TimeResource,
        source_id: &str,
    ) -> Result<ForcedSpend, TimeError> {
        let context = SpendContext::new(reason::HIT).with_source(source_id);
        spend_or_snap(time, self.penalty, context)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerfectDodgeRewardRule {
    pub reward: f64,
}

impl PerfectDodgeRewardRule {
    pub fn new(reward: f64) -> Self {
        Self { reward }
    }

    pub fn apply(&self, time: &mut TimeResource) -> Result<(), TimeError> {
        time.gain(
            self.reward,
            GainContext::new(reason::PERFECT_DODGE).with_source(source::REWARD),
        )?;
        tracing::debug!(reward = self.reward, current = time.current(), "perfect dodge reward");
        Ok(())
    }
}
