use std::fmt;

use super::context::{
    ChangeContext, ChangeRecord, DepletionRecord, GainContext, MaxChangedContext, SetContext,
    SpendContext,
};
use super::error::TimeError;

pub type ChangeHandler = Box<dyn FnMut(&ChangeRecord) + Send + Sync>;
pub type DepletionHandler = Box<dyn FnMut(&DepletionRecord) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// One-shot guard for depletion notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepletionLatch {
    /// The next drop to zero notifies.
    Armed,
    /// Already notified for the current zero-streak.
    Fired,
}

impl DepletionLatch {
    fn for_value(current: f64) -> Self {
        if current <= 0.0 { Self::Fired } else { Self::Armed }
    }
}

/// The run's time budget, doubling as the player's life total.
///
/// Every mutation keeps `0 <= current <= max` and `max > 0`. Subscribers are
/// called synchronously in subscription order, change handlers before
/// depletion handlers. Handlers only observe; a reaction that needs to
/// mutate the resource is applied by the owner after the mutator returns.
pub struct TimeResource {
    current: f64,
    max: f64,
    latch: DepletionLatch,
    next_subscription: u64,
    change_handlers: Vec<(SubscriptionId, ChangeHandler)>,
    depletion_handlers: Vec<(SubscriptionId, DepletionHandler)>,
}

impl fmt::Debug for TimeResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeResource")
            .field("current", &self.current)
            .field("max", &self.max)
            .field("latch", &self.latch)
            .field("change_handlers", &self.change_handlers.len())
            .field("depletion_handlers", &self.depletion_handlers.len())
            .finish()
    }
}

impl TimeResource {
    pub fn new(max: f64, start_current: f64) -> Result<Self, TimeError> {
        validate_max("max", max)?;
        let current = clamp_into(start_current, max);
        Ok(Self {
            current,
            max,
            latch: DepletionLatch::for_value(current),
            next_subscription: 0,
            change_handlers: Vec::new(),
            depletion_handlers: Vec::new(),
        })
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Fill ratio in `[0, 1]`, for gauges.
    pub fn ratio(&self) -> f64 {
        self.current / self.max
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    pub fn latch(&self) -> DepletionLatch {
        self.latch
    }

    pub fn on_changed(
        &mut self,
        handler: impl FnMut(&ChangeRecord) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = self.allocate_subscription();
        self.change_handlers.push((id, Box::new(handler)));
        id
    }

    pub fn on_depleted(
        &mut self,
        handler: impl FnMut(&DepletionRecord) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = self.allocate_subscription();
        self.depletion_handlers.push((id, Box::new(handler)));
        id
    }

    /// Returns false when the id was not (or no longer) subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.change_handlers.len() + self.depletion_handlers.len();
        self.change_handlers.retain(|(entry, _)| *entry != id);
        self.depletion_handlers.retain(|(entry, _)| *entry != id);
        before != self.change_handlers.len() + self.depletion_handlers.len()
    }

    pub fn can_spend(&self, amount: f64) -> bool {
        if amount <= 0.0 {
            return true;
        }
        self.current >= amount
    }

    /// Spends `amount` if enough time is left. `Ok(false)` leaves the state
    /// untouched and notifies nobody.
    pub fn try_spend(&mut self, amount: f64, context: SpendContext) -> Result<bool, TimeError> {
        validate_amount(amount)?;
        if amount == 0.0 {
            return Ok(true);
        }
        if !self.can_spend(amount) {
            return Ok(false);
        }

        let before = self.current;
        self.current = clamp_into(self.current - amount, self.max);
        let context = ChangeContext::from(context);
        self.raise_changed(ChangeRecord::new(before, self.current, -amount, context.clone()));
        self.check_depleted(context);
        Ok(true)
    }

    pub fn gain(&mut self, amount: f64, context: GainContext) -> Result<(), TimeError> {
        validate_amount(amount)?;
        if amount == 0.0 {
            return Ok(());
        }

        let before = self.current;
        self.current = clamp_into(self.current + amount, self.max);
        self.raise_changed(ChangeRecord::new(
            before,
            self.current,
            self.current - before,
            context.into(),
        ));
        if self.current > 0.0 {
            self.latch = DepletionLatch::Armed;
        }
        Ok(())
    }

    /// Forces the current value. Any input is clamped into `[0, max]`; NaN
    /// counts as zero. Never re-arms the depletion latch.
    pub fn set_current(&mut self, new_current: f64, context: SetContext) {
        let before = self.current;
        self.current = clamp_into(new_current, self.max);
        let context = ChangeContext::from(context);
        self.raise_changed(ChangeRecord::new(
            before,
            self.current,
            self.current - before,
            context.clone(),
        ));
        self.check_depleted(context);
    }

    /// Changes the maximum. With `keep_ratio` the fill ratio survives the
    /// change, otherwise `current` is only clamped into the new range.
    pub fn set_max(
        &mut self,
        new_max: f64,
        keep_ratio: bool,
        context: MaxChangedContext,
    ) -> Result<(), TimeError> {
        validate_max("new_max", new_max)?;

        let before_current = self.current;
        let before_max = self.max;
        self.max = new_max;
        self.current = if keep_ratio {
            let ratio = if before_max <= 0.0 {
                1.0
            } else {
                before_current / before_max
            };
            clamp_into(self.max * ratio, self.max)
        } else {
            clamp_into(before_current, self.max)
        };

        let context = ChangeContext::from(context);
        self.raise_changed(ChangeRecord::new(
            before_current,
            self.current,
            self.current - before_current,
            context.clone(),
        ));
        self.check_depleted(context);
        Ok(())
    }

    /// Restarts the run in place: new range and starting value, latch
    /// derived from the start value as on construction. Subscribers stay.
    pub fn reset(&mut self, max: f64, start_current: f64, reason: &str) -> Result<(), TimeError> {
        validate_max("max", max)?;

        let before = self.current;
        self.max = max;
        self.current = clamp_into(before, max);
        self.raise_changed(ChangeRecord::new(
            before,
            self.current,
            self.current - before,
            MaxChangedContext::new(reason).into(),
        ));

        let before = self.current;
        self.current = clamp_into(start_current, max);
        self.latch = DepletionLatch::for_value(self.current);
        self.raise_changed(ChangeRecord::new(
            before,
            self.current,
            self.current - before,
            SetContext::new(reason).into(),
        ));

        tracing::debug!(current = self.current, max = self.max, reason, "time resource reset");
        Ok(())
    }

    fn allocate_subscription(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        id
    }

    fn raise_changed(&mut self, record: ChangeRecord) {
        tracing::trace!(%record, "time changed");
        for (_, handler) in &mut self.change_handlers {
            handler(&record);
        }
    }

    fn check_depleted(&mut self, context: ChangeContext) {
        if self.current > 0.0 {
            return;
        }
        if self.latch == DepletionLatch::Fired {
            return;
        }

        self.latch = DepletionLatch::Fired;
        tracing::debug!(%context, "time depleted");
        let record = DepletionRecord { context };
        for (_, handler) in &mut self.depletion_handlers {
            handler(&record);
        }
    }
}

fn validate_amount(amount: f64) -> Result<(), TimeError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(TimeError::non_negative("amount", amount));
    }
    Ok(())
}

fn validate_max(name: &'static str, max: f64) -> Result<(), TimeError> {
    if !max.is_finite() || max <= 0.0 {
        return Err(TimeError::positive(name, max));
    }
    Ok(())
}

fn clamp_into(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, max)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::time::context::{ChangeKind, reason};

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    type Recorded<T> = Arc<Mutex<Vec<T>>>;

    fn record_all(time: &mut TimeResource) -> (Recorded<ChangeRecord>, Recorded<DepletionRecord>) {
        let changes = Arc::new(Mutex::new(Vec::new()));
        let depletions = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&changes);
        time.on_changed(move |record| sink.lock().unwrap().push(record.clone()));
        let sink = Arc::clone(&depletions);
        time.on_depleted(move |record| sink.lock().unwrap().push(record.clone()));
        (changes, depletions)
    }

    fn spend() -> SpendContext {
        SpendContext::new(reason::DEBUG)
    }

    fn gain() -> GainContext {
        GainContext::new(reason::DEBUG)
    }

    #[test]
    fn construction_rejects_non_positive_max() {
        assert!(TimeResource::new(0.0, 10.0).is_err());
        assert!(TimeResource::new(-5.0, 10.0).is_err());
        assert!(TimeResource::new(f64::NAN, 10.0).is_err());
        assert!(TimeResource::new(f64::INFINITY, 10.0).is_err());
    }

    #[test]
    fn construction_clamps_start_and_derives_latch() {
        let time = TimeResource::new(60.0, 90.0).unwrap();
        assert_close(time.current(), 60.0);
        assert_eq!(time.latch(), DepletionLatch::Armed);

        let time = TimeResource::new(60.0, -3.0).unwrap();
        assert_close(time.current(), 0.0);
        assert_eq!(time.latch(), DepletionLatch::Fired);
    }

    #[test]
    fn can_spend_never_blocks_free_actions() {
        let time = TimeResource::new(10.0, 0.0).unwrap();
        assert!(time.can_spend(0.0));
        assert!(time.can_spend(-1.0));
        assert!(!time.can_spend(0.5));
    }

    #[test]
    fn negative_amounts_are_rejected_without_mutation() {
        let mut time = TimeResource::new(10.0, 5.0).unwrap();
        let (changes, _) = record_all(&mut time);

        assert!(matches!(
            time.try_spend(-1.0, spend()),
            Err(TimeError::InvalidArgument { name: "amount", .. })
        ));
        assert!(time.gain(-1.0, gain()).is_err());
        assert!(time.gain(f64::NAN, gain()).is_err());
        assert_close(time.current(), 5.0);
        assert!(changes.lock().unwrap().is_empty());
    }

    #[test]
    fn zero_amounts_are_silent() {
        let mut time = TimeResource::new(10.0, 5.0).unwrap();
        let (changes, _) = record_all(&mut time);

        assert_eq!(time.try_spend(0.0, spend()), Ok(true));
        time.gain(0.0, gain()).unwrap();
        assert!(changes.lock().unwrap().is_empty());
    }

    #[test]
    fn insufficient_spend_leaves_state_unchanged() {
        let mut time = TimeResource::new(10.0, 5.0).unwrap();
        let (changes, depletions) = record_all(&mut time);

        assert_eq!(time.try_spend(5.5, spend()), Ok(false));
        assert_close(time.current(), 5.0);
        assert!(changes.lock().unwrap().is_empty());
        assert!(depletions.lock().unwrap().is_empty());
    }

    #[test]
    fn spend_record_carries_requested_delta_and_context() {
        let mut time = TimeResource::new(10.0, 8.0).unwrap();
        let (changes, _) = record_all(&mut time);

        let ctx = SpendContext::new(reason::SKILL)
            .with_source("skill_test")
            .with_chain_count(1);
        assert_eq!(time.try_spend(3.0, ctx.clone()), Ok(true));

        let changes = changes.lock().unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, ChangeKind::Spend);
        assert_close(changes[0].before, 8.0);
        assert_close(changes[0].after, 5.0);
        assert_close(changes[0].delta, -3.0);
        assert_eq!(changes[0].context, ChangeContext::Spend(ctx));
    }

    #[test]
    fn gain_clamps_to_max_and_reports_applied_delta() {
        let mut time = TimeResource::new(10.0, 8.0).unwrap();
        let (changes, _) = record_all(&mut time);

        time.gain(5.0, gain()).unwrap();
        assert_close(time.current(), 10.0);
        assert_close(changes.lock().unwrap()[0].delta, 2.0);
    }

    #[test]
    fn change_is_delivered_before_depletion() {
        let mut time = TimeResource::new(10.0, 4.0).unwrap();
        let order = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&order);
        time.on_depleted(move |_| sink.lock().unwrap().push("depleted"));
        let sink = Arc::clone(&order);
        time.on_changed(move |_| sink.lock().unwrap().push("changed"));

        time.try_spend(4.0, spend()).unwrap();
        assert_eq!(*order.lock().unwrap(), vec!["changed", "depleted"]);
    }

    #[test]
    fn depletion_fires_once_per_zero_streak() {
        let mut time = TimeResource::new(10.0, 4.0).unwrap();
        let (_, depletions) = record_all(&mut time);

        time.try_spend(4.0, spend()).unwrap();
        time.try_spend(0.0, spend()).unwrap();
        time.set_current(0.0, SetContext::new(reason::DEBUG));
        time.set_max(20.0, true, MaxChangedContext::new(reason::DEBUG))
            .unwrap();

        let depletions = depletions.lock().unwrap();
        assert_eq!(depletions.len(), 1);
        assert_eq!(depletions[0].context, ChangeContext::Spend(spend()));
    }

    #[test]
    fn gain_rearms_the_latch() {
        let mut time = TimeResource::new(10.0, 1.0).unwrap();
        let (_, depletions) = record_all(&mut time);

        time.try_spend(1.0, spend()).unwrap();
        time.gain(2.0, gain()).unwrap();
        assert_eq!(time.latch(), DepletionLatch::Armed);
        time.try_spend(2.0, spend()).unwrap();

        assert_eq!(depletions.lock().unwrap().len(), 2);
    }

    #[test]
    fn set_current_to_positive_does_not_rearm() {
        let mut time = TimeResource::new(10.0, 1.0).unwrap();
        let (_, depletions) = record_all(&mut time);

        time.try_spend(1.0, spend()).unwrap();
        time.set_current(5.0, SetContext::new(reason::DEBUG));
        assert_eq!(time.latch(), DepletionLatch::Fired);
        time.try_spend(5.0, spend()).unwrap();

        assert_close(time.current(), 0.0);
        assert_eq!(depletions.lock().unwrap().len(), 1);
    }

    #[test]
    fn set_current_clamps_any_input() {
        let mut time = TimeResource::new(10.0, 5.0).unwrap();
        time.set_current(99.0, SetContext::new(reason::DEBUG));
        assert_close(time.current(), 10.0);
        time.set_current(f64::NAN, SetContext::new(reason::DEBUG));
        assert_close(time.current(), 0.0);
        time.set_current(f64::INFINITY, SetContext::new(reason::DEBUG));
        assert_close(time.current(), 10.0);
    }

    #[test]
    fn set_max_keeps_ratio() {
        let mut time = TimeResource::new(60.0, 30.0).unwrap();
        time.set_max(120.0, true, MaxChangedContext::new(reason::DEBUG))
            .unwrap();
        assert_close(time.max(), 120.0);
        assert_close(time.current(), 60.0);
    }

    #[test]
    fn set_max_without_ratio_only_clamps() {
        let mut time = TimeResource::new(60.0, 50.0).unwrap();
        let (changes, _) = record_all(&mut time);

        time.set_max(40.0, false, MaxChangedContext::new(reason::DEBUG))
            .unwrap();
        assert_close(time.current(), 40.0);
        time.set_max(80.0, false, MaxChangedContext::new(reason::DEBUG))
            .unwrap();
        assert_close(time.current(), 40.0);

        let changes = changes.lock().unwrap();
        assert_eq!(changes[0].kind, ChangeKind::SetMax);
        assert_close(changes[0].delta, -10.0);
        assert_close(changes[1].delta, 0.0);
    }

    #[test]
    fn set_max_rejects_non_positive_without_mutation() {
        let mut time = TimeResource::new(60.0, 30.0).unwrap();
        assert!(
            time.set_max(0.0, true, MaxChangedContext::new(reason::DEBUG))
                .is_err()
        );
        assert!(
            time.set_max(-1.0, false, MaxChangedContext::new(reason::DEBUG))
                .is_err()
        );
        assert_close(time.max(), 60.0);
        assert_close(time.current(), 30.0);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut time = TimeResource::new(10.0, 10.0).unwrap();
        let count = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&count);
        let id = time.on_changed(move |_| *sink.lock().unwrap() += 1);

        time.try_spend(1.0, spend()).unwrap();
        assert!(time.unsubscribe(id));
        assert!(!time.unsubscribe(id));
        time.try_spend(1.0, spend()).unwrap();

        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn reset_rearms_and_keeps_subscribers() {
        let mut time = TimeResource::new(60.0, 5.0).unwrap();
        let (changes, depletions) = record_all(&mut time);

        time.try_spend(5.0, spend()).unwrap();
        time.reset(30.0, 30.0, reason::RESTART).unwrap();
        assert_close(time.max(), 30.0);
        assert_close(time.current(), 30.0);
        assert_eq!(time.latch(), DepletionLatch::Armed);

        time.try_spend(30.0, spend()).unwrap();
        assert_eq!(depletions.lock().unwrap().len(), 2);

        let kinds: Vec<_> = changes.lock().unwrap().iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ChangeKind::Spend,
                ChangeKind::SetMax,
                ChangeKind::SetCurrent,
                ChangeKind::Spend
            ]
        );
    }
}
