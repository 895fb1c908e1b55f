use std::collections::HashSet;

use crate::data::{EnemyRewardInfo, KillRewardTuning};
use crate::formula::ComboRewardCalculator;
use crate::time::{GainContext, TimeError, TimeResource, reason};

/// A death observed by the kill-reward rule.
#[derive(Debug, Clone, PartialEq)]
pub struct KillEvent {
    /// Unique per spawned entity; the same id is rewarded at most once.
    pub entity_id: u64,
    /// Fallback source label when the entity carries no reward info.
    pub label: String,
    pub reward_info: Option<EnemyRewardInfo>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KillRewardReport {
    pub streak: u32,
    pub combo_multiplier: f64,
    pub enemy_multiplier: f64,
    pub final_multiplier: f64,
    pub gain: f64,
    pub source_id: String,
    pub time: f64,
}

#[derive(Debug, Clone)]
pub struct KillRewardRule {
    tuning: KillRewardTuning,
    combo: ComboRewardCalculator,
    rewarded: HashSet<u64>,
    last_report: Option<KillRewardReport>,
}

impl KillRewardRule {
    pub fn new(tuning: KillRewardTuning) -> Self {
        Self {
            tuning,
            combo: ComboRewardCalculator::new(),
            rewarded: HashSet::new(),
            last_report: None,
        }
    }

    pub fn last_report(&self) -> Option<&KillRewardReport> {
        self.last_report.as_ref()
    }

    pub fn streak(&self) -> u32 {
        self.combo.streak()
    }

    pub fn is_rewarded(&self, entity_id: u64) -> bool {
        self.rewarded.contains(&entity_id)
    }

    /// Forgets every rewarded id and the current streak.
    pub fn reset(&mut self) {
        self.combo.reset();
        self.rewarded.clear();
        self.last_report = None;
    }

    /// Rewards a kill at `now`. Returns `None` for an entity that was
    /// already rewarded, so duplicate death notifications are harmless.
    pub fn on_enemy_killed(
        &mut self,
        time: &mut TimeResource,
        event: &KillEvent,
        now: f64,
    ) -> Result<Option<KillRewardReport>, TimeError> {
        if self.rewarded.contains(&event.entity_id) {
            tracing::debug!(entity = event.entity_id, "kill already rewarded");
            return Ok(None);
        }

        let mut combo = self.combo.clone();
        let streak = combo.update_and_get_streak(now, self.tuning.combo_window_seconds);
        let combo_multiplier = ComboRewardCalculator::compute_combo_multiplier(
            streak,
            self.tuning.combo_step,
            self.tuning.combo_max_multiplier,
        );

        let (enemy_multiplier, source_id) = match &event.reward_info {
            Some(info) if !info.source_id.is_empty() => {
                (info.kill_reward_multiplier.max(0.0), info.source_id.clone())
            }
            Some(info) => (info.kill_reward_multiplier.max(0.0), event.label.clone()),
            None => (1.0, event.label.clone()),
        };

        let final_multiplier = combo_multiplier * enemy_multiplier;
        let gain = ComboRewardCalculator::compute_final_reward(
            self.tuning.base_gain_seconds,
            combo_multiplier,
            enemy_multiplier,
        );

        time.gain(
            gain,
            GainContext::new(reason::KILL)
                .with_source(source_id.as_str())
                .with_multiplier(final_multiplier),
        )?;
        self.combo = combo;
        self.rewarded.insert(event.entity_id);

        let report = KillRewardReport {
            streak,
            combo_multiplier,
            enemy_multiplier,
            final_multiplier,
            gain,
            source_id,
            time: now,
        };
        tracing::debug!(
            streak,
            gain,
            source = %report.source_id,
            "kill rewarded"
        );
        self.last_report = Some(report.clone());
        Ok(Some(report))
    }
}
