//! Cloudhop - a one-scene platformer demo
//!
//! A side-scrolling toy: static ground tiles with a gap, a few clouds,
//! one playable character. Walk, jump, fall in the gap, restart.

mod config;
mod game;

use bevy::prelude::*;
use bevy::render::camera::ScalingMode;
use bevy::window::WindowMode;

use config::Tuning;
use game::GamePlugin;

/// Game states
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    #[default]
    Playing,
    /// One-frame bounce state so the scene tears down and rebuilds wholesale
    Restarting,
}

fn main() {
    App::new()
        // Bevy defaults with custom window
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Cloudhop".into(),
                resolution: (768., 732.).into(),
                mode: WindowMode::Windowed,
                ..default()
            }),
            ..default()
        }))
        // Game state
        .init_state::<AppState>()
        // Tuning constants (may be overridden from assets/tuning.json)
        .init_resource::<Tuning>()
        // Our plugin
        .add_plugins(GamePlugin)
        // Startup
        .add_systems(Startup, (config::load_tuning, setup_2d_camera))
        .run();
}

/// 2D camera showing a 256x244 slice of the world, sky-blue clear color
fn setup_2d_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb(0.02, 0.61, 0.85)),
            ..default()
        },
        OrthographicProjection {
            // Show exactly one world-height of 244 units vertically
            scaling_mode: ScalingMode::FixedVertical {
                viewport_height: game::WORLD_HEIGHT,
            },
            near: -1000.0,
            far: 1000.0,
            ..OrthographicProjection::default_2d()
        },
    ));

    info!("Cloudhop initialized!");
}
