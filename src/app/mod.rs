mod input;
mod resources;
mod setup;
mod simulation;
mod state;
mod view;

use bevy::prelude::*;

use resources::{PlayerAction, RuntimeConfig, TimeChanged, TimeDepleted};
use state::AppPhase;

pub struct HourboundAppPlugin;

impl Plugin for HourboundAppPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppPhase>()
            .init_resource::<RuntimeConfig>()
            .add_event::<PlayerAction>()
            .add_event::<TimeChanged>()
            .add_event::<TimeDepleted>()
            .add_systems(Startup, setup::spawn_camera)
            .add_systems(OnEnter(AppPhase::Boot), setup::bootstrap_session)
            .add_systems(OnExit(AppPhase::Boot), view::spawn_hud)
            .add_systems(
                OnEnter(AppPhase::GameOver),
                (simulation::pause_virtual_time, view::spawn_game_over),
            )
            .add_systems(
                OnExit(AppPhase::GameOver),
                (simulation::resume_virtual_time, view::despawn_game_over),
            )
            .add_systems(
                Update,
                (
                    input::handle_keyboard_controls,
                    simulation::apply_player_actions,
                    simulation::drain_time.run_if(in_state(AppPhase::InGame)),
                    simulation::forward_notifications,
                    simulation::log_time_changes,
                    view::refresh_gauge,
                    view::refresh_hud,
                    simulation::follow_run_state,
                )
                    .chain()
                    .run_if(in_state(AppPhase::InGame).or(in_state(AppPhase::GameOver))),
            );
    }
}
