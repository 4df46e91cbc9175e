//! Scripted input for the headless demo session

use hub_engine::input::{InputEvent, KeyCode, MouseButton, ScriptedInput};

use crate::scenes::credits::FIRST_LINK_Y;

fn idle(input: &mut ScriptedInput, frames: usize) {
    for _ in 0..frames {
        input.push_idle();
    }
}

fn press(input: &mut ScriptedInput, key: KeyCode) {
    input.push_frame(vec![InputEvent::KeyDown(key), InputEvent::KeyUp(key)]);
}

/// Menu → Snake → menu → Credits (follow a link) → menu → Quit
pub fn demo_session(input: &mut ScriptedInput, screen_width: f32) {
    idle(input, 5);
    press(input, KeyCode::Enter);
    idle(input, 30);
    press(input, KeyCode::Escape);
    idle(input, 5);

    // Snake → Blackjack → Roadrunner → Credits
    for _ in 0..3 {
        press(input, KeyCode::Down);
        idle(input, 2);
    }
    idle(input, 3);
    press(input, KeyCode::Space);
    idle(input, 5);

    // Link lines are centred, so the screen's middle column hits them
    input.push_frame(vec![InputEvent::MouseButtonDown {
        x: screen_width / 2.0,
        y: FIRST_LINK_Y + 5.0,
        button: MouseButton::Left,
    }]);
    idle(input, 5);
    press(input, KeyCode::Escape);
    idle(input, 5);

    press(input, KeyCode::Up);
    idle(input, 2);
    press(input, KeyCode::Enter);
}
