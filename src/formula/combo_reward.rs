/// Kill streak tracking inside a rolling window.
///
/// Which entities were already rewarded is not tracked here; see
/// [`KillRewardRule`](crate::rules::KillRewardRule).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComboRewardCalculator {
    streak: u32,
    last_event_time: Option<f64>,
}

impl ComboRewardCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn last_event_time(&self) -> Option<f64> {
        self.last_event_time
    }

    /// Records a kill at `now`. Kills no more than `combo_window_seconds`
    /// apart extend the streak; anything else starts a new one at 1.
    pub fn update_and_get_streak(&mut self, now: f64, combo_window_seconds: f64) -> u32 {
        self.streak = match self.last_event_time {
            Some(last) if now - last <= combo_window_seconds => self.streak + 1,
            _ => 1,
        };
        self.last_event_time = Some(now);
        self.streak
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn compute_combo_multiplier(streak: u32, step: f64, max_multiplier: f64) -> f64 {
        let raw = 1.0 + f64::from(streak.saturating_sub(1)) * step;
        raw.min(max_multiplier)
    }

    pub fn compute_final_reward(
        base_amount: f64,
        combo_multiplier: f64,
        source_multiplier: f64,
    ) -> f64 {
        base_amount * combo_multiplier * source_multiplier
    }
}
