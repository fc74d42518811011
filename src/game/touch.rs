//! Touch zones: left half of the window steers left, right half steers
//! right. A latch is held true for as long as a touch stays down in its
//! zone, simulating a continuous key-hold from discrete press/release
//! events.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Latched touch steering for the current frame
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct TouchLatches {
    pub left: bool,
    pub right: bool,
}

/// Rebuild the latches from the set of currently-active touches.
pub fn update_touch_latches(
    touches: Res<Touches>,
    window: Query<&Window, With<PrimaryWindow>>,
    mut latches: ResMut<TouchLatches>,
) {
    let Ok(window) = window.get_single() else {
        return;
    };
    let midline = window.width() / 2.0;

    let mut next = TouchLatches::default();
    for touch in touches.iter() {
        if touch.position().x < midline {
            next.left = true;
        } else {
            next.right = true;
        }
    }

    *latches = next;
}
