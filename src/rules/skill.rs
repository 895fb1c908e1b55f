use crate::data::SkillDefinition;
use crate::formula::ChainCostCalculator;
use crate::time::{SpendContext, TimeError, TimeResource, reason};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CastOutcome {
    Cast { cost: f64, chain_count: u32 },
    /// Not enough time; the skill does not execute.
    Insufficient { cost: f64, current: f64 },
}

/// Pays for casts of one skill, escalating the cost of rapid re-casts.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillCaster {
    skill: SkillDefinition,
    chain: ChainCostCalculator,
}

impl SkillCaster {
    pub fn new(skill: SkillDefinition) -> Self {
        Self {
            skill,
            chain: ChainCostCalculator::new(),
        }
    }

    pub fn skill(&self) -> &SkillDefinition {
        &self.skill
    }

    pub fn chain_count(&self) -> u32 {
        self.chain.chain_count()
    }

    pub fn reset(&mut self) {
        self.chain.reset();
    }

    /// Price of a cast at `now` without recording it.
    pub fn preview_cost(&self, now: f64) -> f64 {
        let mut chain = self.chain.clone();
        let chain_count = chain.update_and_get_chain_count(now, self.skill.chain_reset_seconds);
        self.cost_for(chain_count)
    }

    pub fn cast(&mut self, time: &mut TimeResource, now: f64) -> Result<CastOutcome, TimeError> {
        let chain_count = self
            .chain
            .update_and_get_chain_count(now, self.skill.chain_reset_seconds);
        let cost = self.cost_for(chain_count);

        let context = SpendContext::new(reason::SKILL)
            .with_source(self.skill.skill_id.as_str())
            .with_chain_count(chain_count);
        if !time.try_spend(cost, context)? {
            tracing::debug!(
                skill = %self.skill.skill_id,
                cost,
                current = time.current(),
                "skill cast failed: not enough time"
            );
            return Ok(CastOutcome::Insufficient {
                cost,
                current: time.current(),
            });
        }

        tracing::debug!(
            skill = %self.skill.skill_id,
            cost,
            chain_count,
            current = time.current(),
            "skill cast"
        );
        Ok(CastOutcome::Cast { cost, chain_count })
    }

    fn cost_for(&self, chain_count: u32) -> f64 {
        ChainCostCalculator::compute_cost(
            self.skill.base_time_cost,
            chain_count,
            self.skill.chain_add_multiplier,
            self.skill.chain_curve,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rapid_casts_cost_more_then_reset() {
        let mut time = TimeResource::new(60.0, 60.0).unwrap();
        let mut caster = SkillCaster::new(SkillDefinition::default());

        let first = caster.cast(&mut time, 1.0).unwrap();
        let second = caster.cast(&mut time, 1.5).unwrap();
        let rested = caster.cast(&mut time, 5.0).unwrap();

        let CastOutcome::Cast { cost: first_cost, chain_count: 0 } = first else {
            panic!("unexpected {first:?}");
        };
        let CastOutcome::Cast { cost: second_cost, chain_count: 1 } = second else {
            panic!("unexpected {second:?}");
        };
        assert_eq!(first_cost, 2.0);
        assert!(second_cost > first_cost);
        assert_eq!(
            rested,
            CastOutcome::Cast {
                cost: 2.0,
                chain_count: 0
            }
        );
    }

    #[test]
    fn insufficient_time_blocks_the_cast() {
        let mut time = TimeResource::new(60.0, 1.0).unwrap();
        let mut caster = SkillCaster::new(SkillDefinition::default());

        assert_eq!(
            caster.cast(&mut time, 0.0).unwrap(),
            CastOutcome::Insufficient {
                cost: 2.0,
                current: 1.0
            }
        );
        assert_eq!(time.current(), 1.0);
    }

    #[test]
    fn preview_does_not_advance_chain() {
        let mut time = TimeResource::new(60.0, 60.0).unwrap();
        let mut caster = SkillCaster::new(SkillDefinition::default());
        caster.cast(&mut time, 0.0).unwrap();

        let preview = caster.preview_cost(0.5);
        assert!(preview > 2.0);
        assert_eq!(caster.chain_count(), 0);
    }
}
