use crate::time::DepletionRecord;

/// Turns the first depletion of a run into a game over. Later depletions
/// are ignored until `reset`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameOverRule {
    cause: Option<DepletionRecord>,
}

impl GameOverRule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true only for the call that ended the run.
    pub fn handle_depleted(&mut self, record: &DepletionRecord) -> bool {
        if self.cause.is_some() {
            return false;
        }
        tracing::info!(context = %record.context, "game over: time depleted");
        self.cause = Some(record.clone());
        true
    }

    pub fn is_game_over(&self) -> bool {
        self.cause.is_some()
    }

    pub fn cause(&self) -> Option<&DepletionRecord> {
        self.cause.as_ref()
    }

    pub fn reset(&mut self) {
        self.cause = None;
    }
}
