use bevy::prelude::*;
use hourbound::{CastOutcome, KillEvent, TimeError, TimeNotification};

use super::resources::{PlayerAction, RuntimeConfig, SessionState, TimeChanged, TimeDepleted};
use super::state::AppPhase;

pub fn apply_player_actions(
    mut actions: EventReader<PlayerAction>,
    mut session: ResMut<SessionState>,
    real_time: Res<Time<Real>>,
) {
    // Calculators run on the unscaled clock so pausing does not break combos.
    let now = real_time.elapsed_secs_f64();

    for action in actions.read() {
        if session.run.is_game_over() && !matches!(action, PlayerAction::Restart) {
            continue;
        }
        if let Err(err) = apply_action(&mut session, action, now) {
            error!("{action:?} rejected: {err}");
        }
    }
}

fn apply_action(
    session: &mut SessionState,
    action: &PlayerAction,
    now: f64,
) -> Result<(), TimeError> {
    match action {
        PlayerAction::CastSkill => {
            let Some(skill_id) = session.run.skills().next().map(|skill| skill.skill_id.clone())
            else {
                return Ok(());
            };
            match session.run.cast_skill(&skill_id, now)? {
                Some(CastOutcome::Cast { cost, chain_count }) => {
                    info!("cast {skill_id}: cost {cost:.2}, chain {chain_count}");
                }
                Some(CastOutcome::Insufficient { cost, current }) => {
                    info!("cast {skill_id} failed: needs {cost:.2}, {current:.2} left");
                }
                None => {}
            }
        }
        PlayerAction::Hit { defense, source_id } => {
            let outcome = session.run.receive_hit(*defense, source_id)?;
            info!("hit resolved as {outcome:?}");
        }
        PlayerAction::KillEnemy { source_id } => {
            let entity_id = session.allocate_enemy_id();
            let event = KillEvent {
                entity_id,
                label: format!("Enemy({entity_id})"),
                reward_info: session.run.tuning().enemy(source_id).cloned(),
            };
            if let Some(report) = session.run.enemy_killed(&event, now)? {
                info!(
                    "kill {}: streak {} x{:.2} -> +{:.2}",
                    report.source_id, report.streak, report.final_multiplier, report.gain
                );
            }
        }
        PlayerAction::DebugSpend => {
            let spent = session.run.debug_spend()?;
            info!(
                "debug spend ok={spent}, {:.2}/{:.2}",
                session.run.time().current(),
                session.run.time().max()
            );
        }
        PlayerAction::DebugGain => session.run.debug_gain()?,
        PlayerAction::Restart => {
            session.run.restart()?;
            info!("run restarted");
        }
    }
    Ok(())
}

pub fn drain_time(time: Res<Time>, mut session: ResMut<SessionState>) {
    if let Err(err) = session.run.tick(time.delta_secs_f64()) {
        error!("time drain failed: {err}");
    }
}

pub fn forward_notifications(
    mut session: ResMut<SessionState>,
    mut changed: EventWriter<TimeChanged>,
    mut depleted: EventWriter<TimeDepleted>,
) {
    for notification in session.run.pump() {
        match notification {
            TimeNotification::Changed(record) => {
                changed.send(TimeChanged(record));
            }
            TimeNotification::Depleted(record) => {
                depleted.send(TimeDepleted(record));
            }
        }
    }
}

pub fn log_time_changes(mut changes: EventReader<TimeChanged>, config: Res<RuntimeConfig>) {
    for TimeChanged(record) in changes.read() {
        if config.log_changes {
            debug!("[TIME] {record}");
        }
    }
}

pub fn follow_run_state(
    session: Res<SessionState>,
    phase: Res<State<AppPhase>>,
    mut next_phase: ResMut<NextState<AppPhase>>,
) {
    match (phase.get(), session.run.is_game_over()) {
        (AppPhase::InGame, true) => next_phase.set(AppPhase::GameOver),
        (AppPhase::GameOver, false) => next_phase.set(AppPhase::InGame),
        _ => {}
    }
}

pub fn pause_virtual_time(config: Res<RuntimeConfig>, mut time: ResMut<Time<Virtual>>) {
    if config.pause_on_game_over {
        time.pause();
    }
}

pub fn resume_virtual_time(mut time: ResMut<Time<Virtual>>) {
    time.unpause();
}
