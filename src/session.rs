use crate::data::{RunTuning, SkillDefinition};
use crate::rules::{
    CastOutcome, DamagePenaltyRule, DefenseState, DrainRule, ForcedSpend, GameOverRule,
    HitOutcome, KillEvent, KillRewardReport, KillRewardRule, PerfectDodgeRewardRule, SkillCaster,
    resolve_hit,
};
use crate::time::{
    GainContext, NotificationOutbox, SpendContext, TimeError, TimeNotification, TimeResource,
    reason,
};

/// One run of the time-attack loop: the time resource plus every rule that
/// spends or restores it.
///
/// Every mutating method settles its notifications before returning, so
/// `is_game_over` is current as soon as the call ends. `pump` hands the
/// settled notifications out for presentation.
#[derive(Debug)]
pub struct RunSession {
    time: TimeResource,
    tuning: RunTuning,
    outbox: NotificationOutbox,
    settled: Vec<TimeNotification>,
    drain: DrainRule,
    damage: DamagePenaltyRule,
    perfect_dodge: PerfectDodgeRewardRule,
    skills: Vec<SkillCaster>,
    kill_reward: KillRewardRule,
    game_over: GameOverRule,
}

impl RunSession {
    pub fn new(tuning: RunTuning) -> Result<Self, TimeError> {
        let mut time = TimeResource::new(tuning.time.max_seconds, tuning.time.start_seconds)?;
        let outbox = NotificationOutbox::new();
        outbox.attach(&mut time);
        tracing::info!(current = time.current(), max = time.max(), "time resource created");

        Ok(Self {
            time,
            outbox,
            settled: Vec::new(),
            drain: DrainRule::new(&tuning.drain),
            damage: DamagePenaltyRule::new(tuning.damage.penalty),
            perfect_dodge: PerfectDodgeRewardRule::new(tuning.perfect_dodge.reward),
            skills: tuning.skills.iter().cloned().map(SkillCaster::new).collect(),
            kill_reward: KillRewardRule::new(tuning.kill_reward.clone()),
            game_over: GameOverRule::new(),
            tuning,
        })
    }

    pub fn time(&self) -> &TimeResource {
        &self.time
    }

    /// Direct access for collaborators that own their own rules.
    pub fn time_mut(&mut self) -> &mut TimeResource {
        &mut self.time
    }

    pub fn tuning(&self) -> &RunTuning {
        &self.tuning
    }

    pub fn kill_reward(&self) -> &KillRewardRule {
        &self.kill_reward
    }

    pub fn skills(&self) -> impl Iterator<Item = &SkillDefinition> {
        self.skills.iter().map(SkillCaster::skill)
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over.is_game_over()
    }

    pub fn game_over(&self) -> &GameOverRule {
        &self.game_over
    }

    /// Passive drain for one frame of `dt` seconds. Nothing drains once the
    /// run is over.
    pub fn tick(&mut self, dt: f64) -> Result<Option<ForcedSpend>, TimeError> {
        if self.is_game_over() {
            return Ok(None);
        }
        let outcome = self.drain.tick(&mut self.time, dt);
        self.settle();
        outcome
    }

    /// Cost a cast of `skill_id` would have at `now`.
    pub fn preview_skill_cost(&self, skill_id: &str, now: f64) -> Option<f64> {
        self.skills
            .iter()
            .find(|caster| caster.skill().skill_id == skill_id)
            .map(|caster| caster.preview_cost(now))
    }

    /// `None` when no skill with that id is configured or the run is over.
    pub fn cast_skill(
        &mut self,
        skill_id: &str,
        now: f64,
    ) -> Result<Option<CastOutcome>, TimeError> {
        if self.is_game_over() {
            return Ok(None);
        }
        let Some(caster) = self
            .skills
            .iter_mut()
            .find(|caster| caster.skill().skill_id == skill_id)
        else {
            tracing::warn!(skill_id, "unknown skill");
            return Ok(None);
        };
        let outcome = caster.cast(&mut self.time, now).map(Some);
        self.settle();
        outcome
    }

    pub fn receive_hit(
        &mut self,
        defense: DefenseState,
        source_id: &str,
    ) -> Result<HitOutcome, TimeError> {
        let outcome = resolve_hit(defense);
        let applied = match outcome {
            HitOutcome::Damaged => self.damage.apply(&mut self.time, source_id).map(drop),
            HitOutcome::PerfectDodged => self.perfect_dodge.apply(&mut self.time),
            HitOutcome::Dodged => Ok(()),
        };
        self.settle();
        applied?;
        tracing::debug!(?outcome, source_id, "hit resolved");
        Ok(outcome)
    }

    pub fn enemy_killed(
        &mut self,
        event: &KillEvent,
        now: f64,
    ) -> Result<Option<KillRewardReport>, TimeError> {
        if self.is_game_over() {
            return Ok(None);
        }
        let report = self.kill_reward.on_enemy_killed(&mut self.time, event, now);
        self.settle();
        report
    }

    pub fn debug_spend(&mut self) -> Result<bool, TimeError> {
        let spent = self.time.try_spend(
            self.tuning.debug.spend_amount,
            SpendContext::new(reason::DEBUG).with_source("debug_spend"),
        );
        self.settle();
        spent
    }

    pub fn debug_gain(&mut self) -> Result<(), TimeError> {
        let gained = self.time.gain(
            self.tuning.debug.gain_amount,
            GainContext::new(reason::DEBUG).with_source("debug_gain"),
        );
        self.settle();
        gained
    }

    /// Starts a fresh run with the configured range, keeping subscribers.
    /// Depletions from the finished run are settled first and never reach
    /// the new one.
    pub fn restart(&mut self) -> Result<(), TimeError> {
        self.settle();
        self.time.reset(
            self.tuning.time.max_seconds,
            self.tuning.time.start_seconds,
            reason::RESTART,
        )?;
        self.drain.reset();
        self.skills.iter_mut().for_each(SkillCaster::reset);
        self.kill_reward.reset();
        self.game_over.reset();
        self.settle();
        Ok(())
    }

    /// Returns every notification settled since the last call, in emission
    /// order.
    pub fn pump(&mut self) -> Vec<TimeNotification> {
        self.settle();
        std::mem::take(&mut self.settled)
    }

    /// Moves queued notifications out of the outbox, ending the run on the
    /// first depletion.
    fn settle(&mut self) {
        for notification in self.outbox.drain() {
            if let TimeNotification::Depleted(record) = &notification {
                self.game_over.handle_depleted(record);
            }
            self.settled.push(notification);
        }
    }
}
