//! Typed publish/subscribe channels
//!
//! An [`EventBus`] is an ordered list of listener callbacks. Delivery is
//! synchronous and follows subscription order. Subscribing the same listener
//! twice delivers to it twice, and `unsubscribe` removes the first match only.
//!
//! `emit` works on a snapshot of the listener list taken when it starts.
//! Listeners may subscribe or unsubscribe on the bus they are being called
//! from. Such changes take effect from the next `emit`.
//!
//! [`Events`] is the hub of engine channels shared by systems and scenes.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::ecs::{ColliderId, Entity};
use crate::input::{KeyCode, MouseButton};

/// A subscriber callback. Identity is the allocation behind the `Rc`.
pub type Listener<A> = Rc<dyn Fn(&A)>;

/// Wrap a closure as a [`Listener`]
pub fn listener<A, F>(f: F) -> Listener<A>
where
    F: Fn(&A) + 'static,
{
    Rc::new(f)
}

fn same_listener<A>(a: &Listener<A>, b: &Listener<A>) -> bool {
    // Compare data addresses only; vtable pointers are not unique.
    std::ptr::eq(listener_addr(a), listener_addr(b))
}

/// A single typed channel. Clones are handles to the same listener list.
pub struct EventBus<A> {
    listeners: Rc<RefCell<Vec<Listener<A>>>>,
}

impl<A> Clone for EventBus<A> {
    fn clone(&self) -> Self {
        Self {
            listeners: Rc::clone(&self.listeners),
        }
    }
}

impl<A> Default for EventBus<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for EventBus<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.len())
            .finish()
    }
}

impl<A> EventBus<A> {
    /// Create an empty channel
    pub fn new() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Append a listener
    pub fn subscribe(&self, listener: Listener<A>) {
        self.listeners.borrow_mut().push(listener);
    }

    /// Remove the first occurrence of `listener`. Returns whether one was found.
    ///
    /// Unsubscribing a listener that is not attached is a silent no-op.
    pub fn unsubscribe(&self, listener: &Listener<A>) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        match listeners.iter().position(|l| same_listener(l, listener)) {
            Some(index) => {
                listeners.remove(index);
                true
            }
            None => false,
        }
    }

    /// Invoke every listener subscribed at the time of the call, in order
    pub fn emit(&self, args: &A) {
        let snapshot: Vec<Listener<A>> = self.listeners.borrow().clone();
        for listener in &snapshot {
            listener(args);
        }
    }

    /// Whether `listener` is currently attached
    pub fn contains(&self, listener: &Listener<A>) -> bool {
        self.listeners
            .borrow()
            .iter()
            .any(|l| same_listener(l, listener))
    }

    /// Number of attached listeners (duplicates counted)
    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Whether no listener is attached
    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }

    /// Whether two handles refer to the same channel
    pub fn same_channel(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.listeners, &other.listeners)
    }

    /// Address identifying this channel, shared by all its handles
    pub(crate) fn channel_addr(&self) -> *const () {
        Rc::as_ptr(&self.listeners).cast::<()>()
    }
}

/// Address identifying a listener allocation
pub(crate) fn listener_addr<A>(listener: &Listener<A>) -> *const () {
    Rc::as_ptr(listener).cast::<()>()
}

/// Arguments of the tick phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Seconds since the previous frame
    pub dt: f32,
}

/// Keyboard event payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Key that changed state
    pub key: KeyCode,
}

/// Mouse press payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseButtonEvent {
    /// Cursor x in framebuffer pixels
    pub x: f32,
    /// Cursor y in framebuffer pixels
    pub y: f32,
    /// Button pressed
    pub button: MouseButton,
}

/// Emitted once per overlapping collider pair per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    /// Earlier entity in live-list order
    pub entity_a: Entity,
    /// Later entity in live-list order
    pub entity_b: Entity,
    /// Collider owned by `entity_a`
    pub collider_a: ColliderId,
    /// Collider owned by `entity_b`
    pub collider_b: ColliderId,
}

impl CollisionEvent {
    /// Whether `entity` takes part in this collision
    pub fn involves(&self, entity: Entity) -> bool {
        self.entity_a == entity || self.entity_b == entity
    }

    /// The other participant, if `entity` is one of the pair
    pub fn other(&self, entity: Entity) -> Option<Entity> {
        if self.entity_a == entity {
            Some(self.entity_b)
        } else if self.entity_b == entity {
            Some(self.entity_a)
        } else {
            None
        }
    }
}

/// Achievement unlocked by gameplay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementUnlocked {
    /// Backend achievement identifier
    pub id: String,
}

/// The engine's channel hub. Cloning shares every channel.
#[derive(Debug, Clone, Default)]
pub struct Events {
    /// Start of frame: input polling, then the collision sweep
    pub pre_tick: EventBus<()>,
    /// Gameplay and scene update
    pub tick: EventBus<Tick>,
    /// Rendering
    pub late_tick: EventBus<()>,
    /// Shutdown request
    pub quit: EventBus<()>,
    /// Key pressed
    pub key_down: EventBus<KeyEvent>,
    /// Key released
    pub key_up: EventBus<KeyEvent>,
    /// Mouse button pressed
    pub mouse_button_down: EventBus<MouseButtonEvent>,
    /// Overlapping collider pairs
    pub collision: EventBus<CollisionEvent>,
    /// Achievement unlocks
    pub achievement_unlocked: EventBus<AchievementUnlocked>,
}

impl Events {
    /// Create a hub with empty channels
    pub fn new() -> Self {
        Self::default()
    }
}
