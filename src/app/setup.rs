use bevy::prelude::*;
use hourbound::{RunSession, RunTuning, load_tuning};

use super::resources::SessionState;
use super::state::AppPhase;

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((Name::new("PrimaryCamera"), Camera2d));
}

pub fn bootstrap_session(
    mut commands: Commands,
    mut next_phase: ResMut<NextState<AppPhase>>,
    mut exit: EventWriter<AppExit>,
) {
    let tuning = match load_tuning() {
        Ok(tuning) => tuning,
        Err(err) => {
            warn!("using default run tuning: {err:#}");
            RunTuning::default()
        }
    };

    let run = match RunSession::new(tuning) {
        Ok(run) => run,
        Err(err) => {
            error!("failed creating run session: {err}");
            exit.send(AppExit::error());
            return;
        }
    };

    commands.insert_resource(SessionState::new(run));
    next_phase.set(AppPhase::InGame);
}
