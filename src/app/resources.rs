use bevy::prelude::*;
use hourbound::{ChangeRecord, DefenseState, DepletionRecord, RunSession};

#[derive(Resource, Debug, Clone)]
pub struct RuntimeConfig {
    pub gauge_width: f32,
    pub gauge_height: f32,
    pub decimal_places: usize,
    pub show_max_in_text: bool,
    pub log_changes: bool,
    pub pause_on_game_over: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            gauge_width: 420.0,
            gauge_height: 18.0,
            decimal_places: 0,
            show_max_in_text: true,
            log_changes: true,
            pause_on_game_over: true,
        }
    }
}

#[derive(Resource, Debug)]
pub struct SessionState {
    pub run: RunSession,
    pub next_enemy_id: u64,
}

impl SessionState {
    pub fn new(run: RunSession) -> Self {
        Self {
            run,
            next_enemy_id: 1,
        }
    }

    pub fn allocate_enemy_id(&mut self) -> u64 {
        let id = self.next_enemy_id;
        self.next_enemy_id += 1;
        id
    }
}

#[derive(Event, Debug, Clone)]
pub enum PlayerAction {
    CastSkill,
    Hit {
        defense: DefenseState,
        source_id: &'static str,
    },
    KillEnemy { source_id: &'static str },
    DebugSpend,
    DebugGain,
    Restart,
}

#[derive(Event, Debug, Clone)]
pub struct TimeChanged(pub ChangeRecord);

#[derive(Event, Debug, Clone)]
pub struct TimeDepleted(pub DepletionRecord);

#[derive(Component)]
pub struct HudText;

#[derive(Component)]
pub struct GaugeFill;

#[derive(Component)]
pub struct GameOverText;

/// Formats a time value with at most three decimals.
pub fn format_seconds(value: f64, decimal_places: usize) -> String {
    format!("{value:.prec$}", prec = decimal_places.min(3))
}

pub fn gauge_label(current: f64, max: f64, config: &RuntimeConfig) -> String {
    let current = format_seconds(current, config.decimal_places);
    if !config.show_max_in_text {
        return current;
    }
    format!("{current} / {}", format_seconds(max, config.decimal_places))
}
