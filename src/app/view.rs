use bevy::prelude::*;

use super::resources::{
    GameOverText, GaugeFill, HudText, RuntimeConfig, SessionState, TimeChanged, TimeDepleted,
    gauge_label,
};

const GAUGE_BACKGROUND: Color = Color::srgb(0.11, 0.13, 0.16);
const GAUGE_FILL: Color = Color::srgb(0.95, 0.78, 0.22);
const GAUGE_FILL_LOW: Color = Color::srgb(0.89, 0.27, 0.22);
const LOW_TIME_RATIO: f64 = 0.2;

pub fn spawn_hud(mut commands: Commands, config: Res<RuntimeConfig>) {
    commands
        .spawn((
            Name::new("TimeGauge"),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(12.0),
                top: Val::Px(10.0),
                width: Val::Px(config.gauge_width),
                height: Val::Px(config.gauge_height),
                ..default()
            },
            BackgroundColor(GAUGE_BACKGROUND),
        ))
        .with_children(|gauge| {
            gauge.spawn((
                Name::new("TimeGaugeFill"),
                GaugeFill,
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(GAUGE_FILL),
            ));
        });

    commands.spawn((
        Name::new("HudText"),
        HudText,
        Text::new("Initializing..."),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::srgb(0.94, 0.97, 0.99)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(12.0),
            top: Val::Px(16.0 + config.gauge_height),
            ..default()
        },
    ));
}

pub fn refresh_gauge(
    mut changes: EventReader<TimeChanged>,
    mut depletions: EventReader<TimeDepleted>,
    session: Res<SessionState>,
    mut fill: Query<(&mut Node, &mut BackgroundColor), With<GaugeFill>>,
) {
    let changed = changes.read().count() > 0;
    let depleted = depletions.read().count() > 0;
    if !changed && !depleted && !session.is_added() {
        return;
    }

    let Ok((mut node, mut color)) = fill.get_single_mut() else {
        return;
    };
    let ratio = session.run.time().ratio();
    node.width = Val::Percent((ratio * 100.0) as f32);
    color.0 = if ratio <= LOW_TIME_RATIO {
        GAUGE_FILL_LOW
    } else {
        GAUGE_FILL
    };
}

pub fn refresh_hud(
    session: Res<SessionState>,
    config: Res<RuntimeConfig>,
    real_time: Res<Time<Real>>,
    mut hud_query: Query<&mut Text, With<HudText>>,
) {
    let Ok(mut hud) = hud_query.get_single_mut() else {
        return;
    };

    let run = &session.run;
    let now = real_time.elapsed_secs_f64();
    let time_line = gauge_label(run.time().current(), run.time().max(), &config);

    let skill_line = run
        .skills()
        .next()
        .map(|skill| skill.skill_id.clone())
        .and_then(|skill_id| {
            run.preview_skill_cost(&skill_id, now)
                .map(|cost| format!("Skill {skill_id}: next cost {cost:.2}"))
        })
        .unwrap_or_else(|| "Skill: none".to_string());

    let combo_line = run
        .kill_reward()
        .last_report()
        .map(|report| {
            format!(
                "Combo: streak {} x{:.2} (enemy x{:.2}) last +{:.2} from {}",
                report.streak,
                report.combo_multiplier,
                report.enemy_multiplier,
                report.gain,
                report.source_id
            )
        })
        .unwrap_or_else(|| "Combo: -".to_string());

    *hud = Text::new(format!(
        "Time: {time_line}\n{skill_line}\n{combo_line}\nQ skill, H/J/T hit/projectile/trap, G dodge, F perfect dodge, K/L/B kill slime/elite/boss\nA/S debug spend/gain, R restart",
    ));
}

pub fn spawn_game_over(mut commands: Commands, session: Res<SessionState>) {
    let cause = session
        .run
        .game_over()
        .cause()
        .map(|record| record.context.to_string())
        .unwrap_or_default();

    commands.spawn((
        Name::new("GameOverText"),
        GameOverText,
        Text::new(format!("TIME UP\n{cause}\nPress R to restart")),
        TextFont {
            font_size: 42.0,
            ..default()
        },
        TextColor(GAUGE_FILL_LOW),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Percent(38.0),
            top: Val::Percent(40.0),
            ..default()
        },
    ));
}

pub fn despawn_game_over(mut commands: Commands, texts: Query<Entity, With<GameOverText>>) {
    for entity in &texts {
        commands.entity(entity).despawn_recursive();
    }
}
