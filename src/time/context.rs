use std::fmt;

use serde::{Deserialize, Serialize};

/// Standard reason labels. Opaque identifiers for logs and analytics.
pub mod reason {
    pub const AUTO_DRAIN: &str = "auto_drain";
    pub const HIT: &str = "hit";
    pub const SKILL: &str = "skill_cast";
    pub const PERFECT_DODGE: &str = "perfect_dodge";
    pub const KILL: &str = "kill";
    pub const RESTART: &str = "restart";
    pub const DEBUG: &str = "debug";
}

/// Standard source labels.
pub mod source {
    pub const PER_SECOND: &str = "per_second";
    pub const ENEMY_HITBOX: &str = "enemy_hitbox";
    pub const ENEMY_PROJECTILE: &str = "enemy_projectile";
    pub const TRAP: &str = "trap";
    pub const REWARD: &str = "reward";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    Spend,
    Gain,
    SetCurrent,
    SetMax,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendContext {
    pub reason: String,
    pub source_id: Option<String>,
    /// Consecutive-use stack of the action paying this cost, 0 when unused.
    pub chain_count: u32,
}

impl SpendContext {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            source_id: None,
            chain_count: 0,
        }
    }

    pub fn with_source(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = Some(source_id.into());
        self
    }

    pub fn with_chain_count(mut self, chain_count: u32) -> Self {
        self.chain_count = chain_count;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GainContext {
    pub reason: String,
    pub source_id: Option<String>,
    pub multiplier: f64,
}

impl GainContext {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            source_id: None,
            multiplier: 1.0,
        }
    }

    pub fn with_source(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = Some(source_id.into());
        self
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetContext {
    pub reason: String,
}

impl SetContext {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxChangedContext {
    pub reason: String,
}

impl MaxChangedContext {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Cause of a mutation, one variant per mutator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChangeContext {
    Spend(SpendContext),
    Gain(GainContext),
    Set(SetContext),
    MaxChanged(MaxChangedContext),
}

impl ChangeContext {
    pub fn kind(&self) -> ChangeKind {
        match self {
            Self::Spend(_) => ChangeKind::Spend,
            Self::Gain(_) => ChangeKind::Gain,
            Self::Set(_) => ChangeKind::SetCurrent,
            Self::MaxChanged(_) => ChangeKind::SetMax,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            Self::Spend(ctx) => &ctx.reason,
            Self::Gain(ctx) => &ctx.reason,
            Self::Set(ctx) => &ctx.reason,
            Self::MaxChanged(ctx) => &ctx.reason,
        }
    }

    pub fn source_id(&self) -> Option<&str> {
        match self {
            Self::Spend(ctx) => ctx.source_id.as_deref(),
            Self::Gain(ctx) => ctx.source_id.as_deref(),
            Self::Set(_) | Self::MaxChanged(_) => None,
        }
    }
}

impl fmt::Display for ChangeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason())?;
        if let Some(source_id) = self.source_id() {
            write!(f, "@{source_id}")?;
        }
        match self {
            Self::Spend(ctx) if ctx.chain_count > 0 => write!(f, " chain={}", ctx.chain_count),
            Self::Gain(ctx) if ctx.multiplier != 1.0 => write!(f, " x{:.2}", ctx.multiplier),
            _ => Ok(()),
        }
    }
}

impl From<SpendContext> for ChangeContext {
    fn from(ctx: SpendContext) -> Self {
        Self::Spend(ctx)
    }
}

impl From<GainContext> for ChangeContext {
    fn from(ctx: GainContext) -> Self {
        Self::Gain(ctx)
    }
}

impl From<SetContext> for ChangeContext {
    fn from(ctx: SetContext) -> Self {
        Self::Set(ctx)
    }
}

impl From<MaxChangedContext> for ChangeContext {
    fn from(ctx: MaxChangedContext) -> Self {
        Self::MaxChanged(ctx)
    }
}

/// Emitted on every successful mutation. `delta` is `after - before`, except
/// for spends where it is the requested `-amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub kind: ChangeKind,
    pub before: f64,
    pub after: f64,
    pub delta: f64,
    pub context: ChangeContext,
}

impl ChangeRecord {
    pub(crate) fn new(before: f64, after: f64, delta: f64, context: ChangeContext) -> Self {
        Self {
            kind: context.kind(),
            before,
            after,
            delta,
            context,
        }
    }
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {:.2}->{:.2} (delta={:.2}) ctx={}",
            self.kind, self.before, self.after, self.delta, self.context
        )
    }
}

/// Emitted at most once per zero-streak, carrying the context of the
/// mutation that reached zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepletionRecord {
    pub context: ChangeContext,
}
