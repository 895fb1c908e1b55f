mod context;
mod error;
mod notification;
mod resource;

pub use context::{
    ChangeContext, ChangeKind, ChangeRecord, DepletionRecord, GainContext, MaxChangedContext,
    SetContext, SpendContext, reason, source,
};
pub use error::TimeError;
pub use notification::{NotificationOutbox, TimeNotification};
pub use resource::{ChangeHandler, DepletionHandler, DepletionLatch, SubscriptionId, TimeResource};
