use bevy::prelude::*;
use hourbound::DefenseState;
use hourbound::time::source;

use super::resources::PlayerAction;

pub fn handle_keyboard_controls(
    keys: Res<ButtonInput<KeyCode>>,
    mut actions: EventWriter<PlayerAction>,
) {
    if keys.just_pressed(KeyCode::KeyQ) {
        actions.send(PlayerAction::CastSkill);
    }

    if keys.just_pressed(KeyCode::KeyH) {
        actions.send(PlayerAction::Hit {
            defense: DefenseState::default(),
            source_id: source::ENEMY_HITBOX,
        });
    }
    if keys.just_pressed(KeyCode::KeyJ) {
        actions.send(PlayerAction::Hit {
            defense: DefenseState::default(),
            source_id: source::ENEMY_PROJECTILE,
        });
    }
    if keys.just_pressed(KeyCode::KeyT) {
        actions.send(PlayerAction::Hit {
            defense: DefenseState::default(),
            source_id: source::TRAP,
        });
    }
    if keys.just_pressed(KeyCode::KeyG) {
        actions.send(PlayerAction::Hit {
            defense: DefenseState {
                invincible: true,
                perfect_window: false,
            },
            source_id: source::ENEMY_HITBOX,
        });
    }
    if keys.just_pressed(KeyCode::KeyF) {
        actions.send(PlayerAction::Hit {
            defense: DefenseState {
                invincible: true,
                perfect_window: true,
            },
            source_id: source::ENEMY_HITBOX,
        });
    }

    if keys.just_pressed(KeyCode::KeyK) {
        actions.send(PlayerAction::KillEnemy {
            source_id: "enemy_slime",
        });
    }
    if keys.just_pressed(KeyCode::KeyL) {
        actions.send(PlayerAction::KillEnemy {
            source_id: "enemy_elite",
        });
    }
    if keys.just_pressed(KeyCode::KeyB) {
        actions.send(PlayerAction::KillEnemy {
            source_id: "enemy_boss",
        });
    }

    if keys.just_pressed(KeyCode::KeyA) || keys.just_pressed(KeyCode::NumpadSubtract) {
        actions.send(PlayerAction::DebugSpend);
    }
    if keys.just_pressed(KeyCode::KeyS) || keys.just_pressed(KeyCode::NumpadAdd) {
        actions.send(PlayerAction::DebugGain);
    }

    if keys.just_pressed(KeyCode::KeyR) {
        actions.send(PlayerAction::Restart);
    }
}
