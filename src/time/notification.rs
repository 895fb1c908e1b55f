use std::sync::{Arc, Mutex, PoisonError};

use super::context::{ChangeRecord, DepletionRecord};
use super::resource::{SubscriptionId, TimeResource};

#[derive(Debug, Clone, PartialEq)]
pub enum TimeNotification {
    Changed(ChangeRecord),
    Depleted(DepletionRecord),
}

/// Queues notifications for the loop that owns the resource.
///
/// Handlers cannot touch the resource while it is notifying them, so
/// reactions (game over, follow-up gains) read the outbox after the mutator
/// returned and apply their effects then. Delivery order is preserved.
#[derive(Debug, Clone, Default)]
pub struct NotificationOutbox {
    queue: Arc<Mutex<Vec<TimeNotification>>>,
}

impl NotificationOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, time: &mut TimeResource) -> [SubscriptionId; 2] {
        let queue = Arc::clone(&self.queue);
        let changed = time.on_changed(move |record| {
            push(&queue, TimeNotification::Changed(record.clone()));
        });
        let queue = Arc::clone(&self.queue);
        let depleted = time.on_depleted(move |record| {
            push(&queue, TimeNotification::Depleted(record.clone()));
        });
        [changed, depleted]
    }

    pub fn drain(&self) -> Vec<TimeNotification> {
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *queue)
    }

    pub fn len(&self) -> usize {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn push(queue: &Mutex<Vec<TimeNotification>>, notification: TimeNotification) {
    queue
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(notification);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{GainContext, SpendContext, reason};

    #[test]
    fn outbox_preserves_delivery_order() {
        let mut time = TimeResource::new(10.0, 2.0).unwrap();
        let outbox = NotificationOutbox::new();
        outbox.attach(&mut time);

        time.try_spend(2.0, SpendContext::new(reason::HIT)).unwrap();
        time.gain(1.0, GainContext::new(reason::KILL)).unwrap();

        let drained = outbox.drain();
        assert_eq!(drained.len(), 3);
        assert!(matches!(drained[0], TimeNotification::Changed(_)));
        assert!(matches!(drained[1], TimeNotification::Depleted(_)));
        assert!(matches!(drained[2], TimeNotification::Changed(_)));
        assert!(outbox.is_empty());
    }

    #[test]
    fn reaction_applied_after_mutator_does_not_refire_depletion() {
        let mut time = TimeResource::new(10.0, 1.0).unwrap();
        let outbox = NotificationOutbox::new();
        outbox.attach(&mut time);

        time.try_spend(1.0, SpendContext::new(reason::HIT)).unwrap();
        for notification in outbox.drain() {
            if let TimeNotification::Depleted(_) = notification {
                time.try_spend(0.0, SpendContext::new(reason::DEBUG)).unwrap();
                time.set_current(0.0, crate::time::SetContext::new(reason::DEBUG));
            }
        }

        let drained = outbox.drain();
        assert_eq!(drained.len(), 1);
        assert!(matches!(drained[0], TimeNotification::Changed(_)));
    }
}
