//! Keyboard to `InputFrame`.

use bevy::prelude::*;

use asteroid_dodger::InputFrame;

/// Space presses seen since the last fixed tick.
///
/// Presses are caught every frame and handed to the next simulation step,
/// so a tap between two steps still fires.
#[derive(Resource, Default)]
pub struct FireLatch {
    pressed: bool,
}

impl FireLatch {
    pub fn press(&mut self) {
        self.pressed = true;
    }

    /// Consume the latched press.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pressed)
    }
}

pub fn latch_fire(keyboard: Res<ButtonInput<KeyCode>>, mut latch: ResMut<FireLatch>) {
    if keyboard.just_pressed(KeyCode::Space) {
        latch.press();
    }
}

/// Held direction keys plus a latched trigger.
pub fn read_input(keyboard: &ButtonInput<KeyCode>, fire: bool) -> InputFrame {
    let held = |a: KeyCode, b: KeyCode| keyboard.pressed(a) || keyboard.pressed(b);

    let mut frame = InputFrame::new();
    frame.set(InputFrame::UP, held(KeyCode::KeyW, KeyCode::ArrowUp));
    frame.set(InputFrame::DOWN, held(KeyCode::KeyS, KeyCode::ArrowDown));
    frame.set(InputFrame::LEFT, held(KeyCode::KeyA, KeyCode::ArrowLeft));
    frame.set(InputFrame::RIGHT, held(KeyCode::KeyD, KeyCode::ArrowRight));
    frame.set(InputFrame::FIRE, fire);
    frame
}
