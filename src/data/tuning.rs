use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunTuning {
    #[serde(default)]
    pub time: TimeTuning,
    #[serde(default)]
    pub drain: DrainTuning,
    #[serde(default)]
    pub damage: DamageTuning,
    #[serde(default)]
    pub perfect_dodge: PerfectDodgeTuning,
    #[serde(default)]
    pub kill_reward: KillRewardTuning,
    #[serde(default)]
    pub debug: DebugTuning,
    #[serde(default)]
    pub skills: Vec<SkillDefinition>,
    #[serde(default)]
    pub enemies: Vec<EnemyRewardInfo>,
}

impl Default for RunTuning {
    fn default() -> Self {
        Self {
            time: TimeTuning::default(),
            drain: DrainTuning::default(),
            damage: DamageTuning::default(),
            perfect_dodge: PerfectDodgeTuning::default(),
            kill_reward: KillRewardTuning::default(),
            debug: DebugTuning::default(),
            skills: vec![SkillDefinition::default()],
            enemies: vec![
                EnemyRewardInfo {
                    source_id: "enemy_slime".to_string(),
                    kill_reward_multiplier: 1.0,
                },
                EnemyRewardInfo {
                    source_id: "enemy_elite".to_string(),
                    kill_reward_multiplier: 2.0,
                },
                EnemyRewardInfo {
                    source_id: "enemy_boss".to_string(),
                    kill_reward_multiplier: 5.0,
                },
            ],
        }
    }
}

impl RunTuning {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.time.max_seconds.is_finite() && self.time.max_seconds > 0.0,
            "time.max_seconds must be greater than zero, got {}",
            self.time.max_seconds
        );
        ensure!(
            self.time.start_seconds >= 0.0,
            "time.start_seconds must not be negative, got {}",
            self.time.start_seconds
        );
        ensure!(
            self.drain.per_second >= 0.0 && self.drain.max_delta_seconds >= 0.0,
            "drain rates must not be negative"
        );
        ensure!(
            self.damage.penalty >= 0.0,
            "damage.penalty must not be negative, got {}",
            self.damage.penalty
        );
        ensure!(
            self.perfect_dodge.reward >= 0.0,
            "perfect_dodge.reward must not be negative, got {}",
            self.perfect_dodge.reward
        );
        ensure!(
            self.kill_reward.base_gain_seconds >= 0.0
                && self.kill_reward.combo_window_seconds >= 0.0
                && self.kill_reward.combo_step >= 0.0,
            "kill_reward values must not be negative"
        );
        ensure!(
            self.kill_reward.combo_max_multiplier >= 1.0,
            "kill_reward.combo_max_multiplier must be at least 1, got {}",
            self.kill_reward.combo_max_multiplier
        );
        for skill in &self.skills {
            ensure!(!skill.skill_id.is_empty(), "skill_id must not be empty");
            ensure!(
                skill.base_time_cost >= 0.0
                    && skill.chain_reset_seconds >= 0.0
                    && skill.chain_add_multiplier >= 0.0,
                "skill {} has a negative cost parameter",
                skill.skill_id
            );
            ensure!(
                skill.chain_curve.is_finite(),
                "skill {} chain_curve must be finite, got {}",
                skill.skill_id,
                skill.chain_curve
            );
        }
        for enemy in &self.enemies {
            ensure!(
                enemy.kill_reward_multiplier.is_finite(),
                "enemy {} kill_reward_multiplier must be finite, got {}",
                enemy.source_id,
                enemy.kill_reward_multiplier
            );
        }
        Ok(())
    }

    pub fn enemy(&self, source_id: &str) -> Option<&EnemyRewardInfo> {
        self.enemies.iter().find(|enemy| enemy.source_id == source_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeTuning {
    pub max_seconds: f64,
    pub start_seconds: f64,
}

impl Default for TimeTuning {
    fn default() -> Self {
        Self {
            max_seconds: 60.0,
            start_seconds: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrainTuning {
    pub per_second: f64,
    /// Upper bound for one frame's delta; 0 disables the clamp.
    #[serde(default = "default_max_delta_seconds")]
    pub max_delta_seconds: f64,
    #[serde(default = "default_true")]
    pub ignore_first_frame: bool,
}

impl Default for DrainTuning {
    fn default() -> Self {
        Self {
            per_second: 1.0,
            max_delta_seconds: default_max_delta_seconds(),
            ignore_first_frame: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageTuning {
    pub penalty: f64,
}

impl Default for DamageTuning {
    fn default() -> Self {
        Self { penalty: 3.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerfectDodgeTuning {
    pub reward: f64,
}

impl Default for PerfectDodgeTuning {
    fn default() -> Self {
        Self { reward: 2.5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KillRewardTuning {
    pub base_gain_seconds: f64,
    pub combo_window_seconds: f64,
    pub combo_step: f64,
    pub combo_max_multiplier: f64,
}

impl Default for KillRewardTuning {
    fn default() -> Self {
        Self {
            base_gain_seconds: 1.0,
            combo_window_seconds: 3.0,
            combo_step: 0.2,
            combo_max_multiplier: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugTuning {
    pub spend_amount: f64,
    pub gain_amount: f64,
}

impl Default for DebugTuning {
    fn default() -> Self {
        Self {
            spend_amount: 5.0,
            gain_amount: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDefinition {
    pub skill_id: String,
    pub base_time_cost: f64,
    /// Idle time after which the cast chain starts over.
    pub chain_reset_seconds: f64,
    #[serde(default)]
    pub chain_add_multiplier: f64,
    /// 1 is linear, larger values grow steeper.
    #[serde(default = "default_chain_curve")]
    pub chain_curve: f64,
}

impl Default for SkillDefinition {
    fn default() -> Self {
        Self {
            skill_id: "skill_test".to_string(),
            base_time_cost: 2.0,
            chain_reset_seconds: 1.2,
            chain_add_multiplier: 0.35,
            chain_curve: default_chain_curve(),
        }
    }
}

/// Per-enemy reward scaling (elite 2, boss 5, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyRewardInfo {
    pub source_id: String,
    #[serde(default = "default_kill_reward_multiplier")]
    pub kill_reward_multiplier: f64,
}

const fn default_max_delta_seconds() -> f64 {
    0.05
}

const fn default_true() -> bool {
    true
}

const fn default_chain_curve() -> f64 {
    1.2
}

const fn default_kill_reward_multiplier() -> f64 {
    1.0
}
