mod combat;
mod drain;
mod game_over;
mod kill_reward;
mod skill;

pub use combat::{DamagePenaltyRule, DefenseState, HitOutcome, PerfectDodgeRewardRule, resolve_hit};
pub use drain::DrainRule;
pub use game_over::GameOverRule;
pub use kill_reward::{KillEvent, KillRewardReport, KillRewardRule};
pub use skill::{CastOutcome, SkillCaster};

use crate::time::{SetContext, SpendContext, TimeError, TimeResource};

/// Result of a spend that must not leave time on the clock when it fails.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ForcedSpend {
    Spent(f64),
    /// Not enough time was left, so the remainder was forced to zero.
    SnappedToZero,
    /// Already at zero; nothing changed.
    Exhausted,
}

/// Spends `amount`, or snaps the clock to zero if it cannot be paid.
pub fn spend_or_snap(
    time: &mut TimeResource,
    amount: f64,
    context: SpendContext,
) -> Result<ForcedSpend, TimeError> {
    let reason = context.reason.clone();
    if time.try_spend(amount, context)? {
        return Ok(ForcedSpend::Spent(amount));
    }
    if time.current() > 0.0 {
        tracing::debug!(amount, current = time.current(), %reason, "spend failed, snapping to zero");
        time.set_current(0.0, SetContext::new(reason));
        return Ok(ForcedSpend::SnappedToZero);
    }
    Ok(ForcedSpend::Exhausted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::reason;

    #[test]
    fn failed_spend_snaps_remaining_time() {
        let mut time = TimeResource::new(10.0, 2.0).unwrap();
        let outcome = spend_or_snap(&mut time, 3.0, SpendContext::new(reason::HIT)).unwrap();
        assert_eq!(outcome, ForcedSpend::SnappedToZero);
        assert_eq!(time.current(), 0.0);

        let outcome = spend_or_snap(&mut time, 3.0, SpendContext::new(reason::HIT)).unwrap();
        assert_eq!(outcome, ForcedSpend::Exhausted);
    }
}
