//! The death sequence: fall-out detection, the one-shot transition, and the
//! delayed scene restart.
//!
//! Death is a terminal state for the life, entered structurally: the detect
//! system only matches living players (`Without<Dead>`), inserts the `Dead`
//! marker, and from then on no gameplay system can touch the character
//! again. The restart timer is the only deferred action in the game - a
//! one-shot on the main loop, never cancelled once armed.

use bevy::audio::Volume;
use bevy::prelude::*;
use rand::Rng;

use crate::config::Tuning;
use crate::AppState;

use super::animation::{AnimKey, SpriteAnimation};
use super::components::{Body, Dead, DeathParticle, Player, Vel, WorldPos};
use super::controller::fell_out;

// ============================================================================
// EVENTS AND RESOURCES
// ============================================================================

#[derive(Event)]
pub struct PlayerDeathEvent {
    pub position: Vec2,
}

/// Armed by the death transition; fires the scene restart once.
#[derive(Resource)]
pub struct RestartTimer(pub Timer);

// ============================================================================
// DETECTION
// ============================================================================

/// Kill the player once their feet reach the bottom of the world.
///
/// `Without<Dead>` makes this fire at most once per life: the transition
/// below inserts `Dead`, so further frames below the threshold no longer
/// match.
pub fn detect_fall_out(
    tuning: Res<Tuning>,
    query: Query<(&WorldPos, &Body), (With<Player>, Without<Dead>)>,
    mut death_events: EventWriter<PlayerDeathEvent>,
) {
    let Ok((pos, body)) = query.get_single() else {
        return;
    };

    let feet = pos.0.y + body.half.y;
    if fell_out(feet, tuning.death_threshold_y) {
        death_events.send(PlayerDeathEvent { position: pos.0 });
    }
}

// ============================================================================
// THE ONE-SHOT TRANSITION
// ============================================================================

/// Process a death: mark the character dead, give it the escape hop, play
/// the death animation and audio cue, burst particles, arm the restart.
///
/// Bounds clamping and tile landing are alive-only systems, so inserting
/// `Dead` is also what lets the body leave the world.
pub fn handle_player_death(
    mut commands: Commands,
    mut death_events: EventReader<PlayerDeathEvent>,
    tuning: Res<Tuning>,
    asset_server: Res<AssetServer>,
    mut query: Query<(Entity, &mut Vel, &mut SpriteAnimation), (With<Player>, Without<Dead>)>,
) {
    for event in death_events.read() {
        let Ok((entity, mut vel, mut anim)) = query.get_single_mut() else {
            continue;
        };

        info!("Player fell out at {:?}", event.position);

        commands.entity(entity).insert(Dead);
        // Only the vertical component is replaced; whatever horizontal
        // velocity the character died with rides along until restart
        vel.0.y = tuning.death_escape_velocity;
        anim.play(AnimKey::Dead);

        // Audio cue, fire-and-forget
        commands.spawn((
            AudioPlayer::new(asset_server.load("sounds/gameover.ogg")),
            PlaybackSettings::DESPAWN.with_volume(Volume::new(tuning.death_cue_volume)),
        ));

        spawn_death_burst(&mut commands, event.position);

        commands.insert_resource(RestartTimer(Timer::from_seconds(
            tuning.restart_delay_ms as f32 / 1000.0,
            TimerMode::Once,
        )));
    }
}

/// Spawn death burst particles, world space
fn spawn_death_burst(commands: &mut Commands, position: Vec2) {
    let mut rng = rand::thread_rng();
    let particle_count = 12;

    for i in 0..particle_count {
        let angle = (i as f32 / particle_count as f32) * std::f32::consts::TAU;
        let speed = 60.0 + rng.gen::<f32>() * 40.0;
        let velocity = Vec2::new(angle.cos(), angle.sin()) * speed;

        commands.spawn((
            DeathParticle {
                velocity,
                lifetime: 0.5 + rng.gen::<f32>() * 0.3,
            },
            Sprite {
                color: Color::srgb(1.0, 0.5, 0.3),
                custom_size: Some(Vec2::splat(3.0 + rng.gen::<f32>() * 3.0)),
                ..default()
            },
            Transform::from_translation(Vec3::new(position.x, -position.y, 15.0)),
            WorldPos(position),
        ));
    }
}

// ============================================================================
// RESTART
// ============================================================================

/// Tick the armed restart timer; on expiry, bounce through `Restarting` so
/// the scene tears down and rebuilds wholesale.
pub fn tick_restart_timer(
    time: Res<Time>,
    timer: Option<ResMut<RestartTimer>>,
    mut commands: Commands,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(mut timer) = timer else {
        return;
    };

    if timer.0.tick(time.delta()).just_finished() {
        commands.remove_resource::<RestartTimer>();
        next_state.set(AppState::Restarting);
        info!("Restarting scene");
    }
}

/// `Restarting` exists only to re-enter `Playing` on the next frame.
pub fn finish_restart(mut next_state: ResMut<NextState<AppState>>) {
    next_state.set(AppState::Playing);
}
