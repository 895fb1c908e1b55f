/// Escalating cost for one repeatable action type.
///
/// The clock is supplied by the caller, so pausing or replaying time never
/// needs the calculator's cooperation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChainCostCalculator {
    chain_count: u32,
    last_action_time: Option<f64>,
}

impl ChainCostCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chain_count(&self) -> u32 {
        self.chain_count
    }

    pub fn last_action_time(&self) -> Option<f64> {
        self.last_action_time
    }

    /// Records an action at `now`. The first action, or one at least
    /// `reset_window_seconds` after the previous, restarts the chain at 0.
    pub fn update_and_get_chain_count(&mut self, now: f64, reset_window_seconds: f64) -> u32 {
        self.chain_count = match self.last_action_time {
            Some(last) if now - last < reset_window_seconds => self.chain_count + 1,
            _ => 0,
        };
        self.last_action_time = Some(now);
        self.chain_count
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// `base * (1 + (chain * add_multiplier) ^ curve)`, or `base` for an
    /// unchained action. `curve` is a tuning input, usually in `[1, 3]`.
    pub fn compute_cost(
        base_cost: f64,
        chain_count: u32,
        add_multiplier: f64,
        curve_exponent: f64,
    ) -> f64 {
        if chain_count == 0 {
            return base_cost;
        }
        let x = f64::from(chain_count) * add_multiplier;
        base_cost * (1.0 + x.powf(curve_exponent))
    }
}

#[cfg(test)]
mod tests {
    use super::ChainCostCalculator;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn unchained_cost_is_base() {
        assert_eq!(ChainCostCalculator::compute_cost(2.0, 0, 0.35, 1.2), 2.0);
    }

    #[test]
    fn first_chained_cost_matches_curve() {
        let cost = ChainCostCalculator::compute_cost(2.0, 1, 0.35, 1.2);
        let expected = 2.0 * (1.0 + 0.35_f64.powf(1.2));
        assert!((cost - expected).abs() <= EPSILON);
        assert!((cost - 2.56).abs() < 0.01, "got {cost}");
    }

    #[test]
    fn cost_strictly_increases_with_chain() {
        let mut previous = ChainCostCalculator::compute_cost(2.0, 0, 0.35, 1.2);
        for chain in 1..16 {
            let cost = ChainCostCalculator::compute_cost(2.0, chain, 0.35, 1.2);
            assert!(cost > previous, "chain {chain}: {cost} <= {previous}");
            previous = cost;
        }
    }

    #[test]
    fn linear_curve_adds_proportionally() {
        let cost = ChainCostCalculator::compute_cost(4.0, 3, 0.5, 1.0);
        assert!((cost - 10.0).abs() <= EPSILON);
    }

    #[test]
    fn rapid_actions_escalate() {
        let mut chain = ChainCostCalculator::new();
        assert_eq!(chain.update_and_get_chain_count(10.0, 1.2), 0);
        assert_eq!(chain.update_and_get_chain_count(10.5, 1.2), 1);
        assert_eq!(chain.update_and_get_chain_count(11.0, 1.2), 2);
    }

    #[test]
    fn pause_at_window_resets() {
        let mut chain = ChainCostCalculator::new();
        assert_eq!(chain.update_and_get_chain_count(1.0, 1.2), 0);
        assert_eq!(chain.update_and_get_chain_count(2.2, 1.2), 0);
        assert_eq!(chain.update_and_get_chain_count(5.0, 1.2), 0);
        assert_eq!(chain.last_action_time(), Some(5.0));
    }

    #[test]
    fn first_action_at_time_zero_is_unchained() {
        let mut chain = ChainCostCalculator::new();
        assert_eq!(chain.update_and_get_chain_count(0.0, 1.2), 0);
        assert_eq!(chain.update_and_get_chain_count(0.1, 1.2), 1);
    }
}
