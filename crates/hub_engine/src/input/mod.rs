//! Input polling and dispatch
//!
//! A platform [`InputSource`] is drained once per frame by the [`InputPump`],
//! which updates [`KeyState`] and re-emits each event on its channel.

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use crate::events::{listener, Events, KeyEvent, Listener, MouseButtonEvent};

/// Raw input from the platform layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window close or equivalent
    Quit,
    /// Key pressed
    KeyDown(KeyCode),
    /// Key released
    KeyUp(KeyCode),
    /// Mouse button pressed at framebuffer position
    MouseButtonDown {
        /// Cursor x
        x: f32,
        /// Cursor y
        y: f32,
        /// Button pressed
        button: MouseButton,
    },
}

/// Source of platform input, drained once per frame
pub trait InputSource {
    /// Events received since the previous poll, oldest first
    fn poll(&mut self) -> Vec<InputEvent>;
}

/// Shared handle to an input source
pub type SharedInput = Rc<RefCell<dyn InputSource>>;

/// Input source fed from a script, one batch per poll.
///
/// Polling an exhausted script yields no events.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    /// Create an empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the events delivered by the next unscripted poll
    pub fn push_frame(&mut self, events: Vec<InputEvent>) {
        self.frames.push_back(events);
    }

    /// Queue a frame with no input
    pub fn push_idle(&mut self) {
        self.frames.push_back(Vec::new());
    }

    /// Frames still queued
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Vec<InputEvent> {
        self.frames.pop_front().unwrap_or_default()
    }
}

/// Keys currently held down
#[derive(Debug, Default)]
pub struct KeyState {
    held: HashSet<KeyCode>,
}

impl KeyState {
    /// Create an empty key state
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` is held
    pub fn is_down(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Number of keys held
    pub fn held_count(&self) -> usize {
        self.held.len()
    }

    fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown(key) => {
                self.held.insert(key);
            }
            InputEvent::KeyUp(key) => {
                self.held.remove(&key);
            }
            _ => {}
        }
    }
}

/// Drains an [`InputSource`] into the event channels
pub struct InputPump;

impl InputPump {
    /// Poll `source` and dispatch each event in order.
    ///
    /// The source is released before any listener runs.
    pub fn pump(source: &RefCell<dyn InputSource>, keys: &RefCell<KeyState>, events: &Events) -> usize {
        let batch = source.borrow_mut().poll();
        for event in &batch {
            keys.borrow_mut().apply(event);
            match *event {
                InputEvent::Quit => {
                    log::info!("Quit requested");
                    events.quit.emit(&());
                }
                InputEvent::KeyDown(key) => events.key_down.emit(&KeyEvent { key }),
                InputEvent::KeyUp(key) => events.key_up.emit(&KeyEvent { key }),
                InputEvent::MouseButtonDown { x, y, button } => {
                    events.mouse_button_down.emit(&MouseButtonEvent { x, y, button });
                }
            }
        }
        batch.len()
    }

    /// Subscribe the pump to the pre-tick phase
    pub fn attach(source: SharedInput, keys: Rc<RefCell<KeyState>>, events: &Events) -> Listener<()> {
        let channels = events.clone();
        let pump = listener(move |_: &()| {
            Self::pump(&source, &keys, &channels);
        });
        events.pre_tick.subscribe(Rc::clone(&pump));
        pump
    }
}

/// Keyboard keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_scripted_input_yields_one_frame_per_poll() {
        let mut input = ScriptedInput::new();
        input.push_frame(vec![InputEvent::KeyDown(KeyCode::A)]);
        input.push_idle();
        input.push_frame(vec![InputEvent::Quit]);

        assert_eq!(input.poll(), vec![InputEvent::KeyDown(KeyCode::A)]);
        assert!(input.poll().is_empty());
        assert_eq!(input.poll(), vec![InputEvent::Quit]);
        assert!(input.poll().is_empty());
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn test_pump_dispatches_in_order_and_tracks_keys() {
        let events = Events::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let log = Rc::clone(&log);
            events.key_down.subscribe(listener(move |e: &KeyEvent| log.borrow_mut().push(format!("down {:?}", e.key))));
        }
        {
            let log = Rc::clone(&log);
            events.key_up.subscribe(listener(move |e: &KeyEvent| log.borrow_mut().push(format!("up {:?}", e.key))));
        }
        {
            let log = Rc::clone(&log);
            events.mouse_button_down.subscribe(listener(move |e: &MouseButtonEvent| {
                log.borrow_mut().push(format!("click {} {}", e.x, e.y));
            }));
        }

        let mut script = ScriptedInput::new();
        script.push_frame(vec![
            InputEvent::KeyDown(KeyCode::Left),
            InputEvent::KeyDown(KeyCode::Space),
            InputEvent::KeyUp(KeyCode::Left),
            InputEvent::MouseButtonDown { x: 3.0, y: 4.0, button: MouseButton::Left },
        ]);
        let source: SharedInput = Rc::new(RefCell::new(script));
        let keys = Rc::new(RefCell::new(KeyState::new()));

        let count = InputPump::pump(&source, &keys, &events);
        assert_eq!(count, 4);
        assert_eq!(*log.borrow(), vec!["down Left", "down Space", "up Left", "click 3 4"]);
        assert!(keys.borrow().is_down(KeyCode::Space));
        assert!(!keys.borrow().is_down(KeyCode::Left));
        assert_eq!(keys.borrow().held_count(), 1);
    }

    #[test]
    fn test_attached_pump_emits_quit_on_pre_tick() {
        let events = Events::new();
        let quits = Rc::new(Cell::new(0));
        {
            let quits = Rc::clone(&quits);
            events.quit.subscribe(listener(move |_: &()| quits.set(quits.get() + 1)));
        }
        let mut script = ScriptedInput::new();
        script.push_frame(vec![InputEvent::Quit]);
        let source: SharedInput = Rc::new(RefCell::new(script));

        let pump = InputPump::attach(source, Rc::new(RefCell::new(KeyState::new())), &events);
        assert!(events.pre_tick.contains(&pump));
        events.pre_tick.emit(&());
        events.pre_tick.emit(&());
        assert_eq!(quits.get(), 1);
    }
}
