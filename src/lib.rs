pub mod data;
pub mod formula;
pub mod rules;
pub mod session;
pub mod time;

pub use data::{
    EnemyRewardInfo, KillRewardTuning, RunTuning, SkillDefinition, load_tuning,
    load_tuning_from_path,
};
pub use formula::{ChainCostCalculator, ComboRewardCalculator};
pub use rules::{
    CastOutcome, DefenseState, ForcedSpend, HitOutcome, KillEvent, KillRewardReport,
};
pub use session::RunSession;
pub use time::{
    ChangeContext, ChangeKind, ChangeRecord, DepletionLatch, DepletionRecord, GainContext,
    MaxChangedContext, NotificationOutbox, SetContext, SpendContext, SubscriptionId, TimeError,
    TimeNotification, TimeResource,
};
