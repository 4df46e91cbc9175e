//! Collision detection system
//!
//! Keeps the registry of active colliders and runs one exhaustive pairwise
//! sweep per frame during the pre-tick phase. There is no broad phase:
//! a sweep over `n` candidates performs `n * (n - 1) / 2` box tests.
//!
//! There is no memory between frames. Overlapping pairs are reported again
//! on every frame they overlap. Entering, staying in and leaving contact
//! all look the same to listeners.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ecs::{ColliderId, SharedWorld, World};
use crate::events::{listener, CollisionEvent, EventBus, Events, Listener};

/// Counters from a single sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Entities eligible this frame
    pub candidates: usize,
    /// Box tests performed
    pub pairs_tested: usize,
    /// Collision events emitted
    pub collisions: usize,
}

/// Registry of active colliders
#[derive(Debug, Default)]
pub struct CollisionSystem {
    registered: Vec<ColliderId>,
}

impl CollisionSystem {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a collider. Registering twice is a no-op with a warning.
    pub fn register(&mut self, collider: ColliderId) -> bool {
        if self.registered.contains(&collider) {
            log::warn!("Collider {:?} is already registered", collider);
            return false;
        }
        self.registered.push(collider);
        true
    }

    /// Remove a collider. Unknown colliders are ignored.
    pub fn unregister(&mut self, collider: ColliderId) -> bool {
        match self.registered.iter().position(|&c| c == collider) {
            Some(index) => {
                self.registered.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether `collider` is registered
    pub fn is_registered(&self, collider: ColliderId) -> bool {
        self.registered.contains(&collider)
    }

    /// Registered colliders in registration order
    pub fn iter(&self) -> impl Iterator<Item = ColliderId> + '_ {
        self.registered.iter().copied()
    }

    /// Number of registered colliders
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    /// Run one sweep and emit a [`CollisionEvent`] per overlapping pair.
    ///
    /// Candidates are the active entities that own a registered collider and
    /// a Transform, taken in live-list order. Each unordered pair `(i, j)`
    /// with `i < j` is tested once. The world is not borrowed while a
    /// listener runs, so listeners may move, deactivate or despawn entities.
    /// A pair whose collider was unregistered earlier in the same sweep is
    /// skipped.
    pub fn update(world: &RefCell<World>, channel: &EventBus<CollisionEvent>) -> SweepStats {
        let candidates = world.borrow().collision_candidates();
        let mut stats = SweepStats {
            candidates: candidates.len(),
            ..SweepStats::default()
        };

        for (i, &(entity_a, collider_a)) in candidates.iter().enumerate() {
            for &(entity_b, collider_b) in &candidates[i + 1..] {
                stats.pairs_tested += 1;

                let hit = {
                    let world = world.borrow();
                    world.collision().is_registered(collider_a)
                        && world.collision().is_registered(collider_b)
                        && world.colliders_intersect(collider_a, collider_b)
                };

                if hit {
                    stats.collisions += 1;
                    channel.emit(&CollisionEvent {
                        entity_a,
                        entity_b,
                        collider_a,
                        collider_b,
                    });
                }
            }
        }

        log::trace!(
            "Collision sweep: {} candidates, {} tests, {} hits",
            stats.candidates,
            stats.pairs_tested,
            stats.collisions
        );
        stats
    }

    /// Subscribe the sweep to the pre-tick phase.
    ///
    /// The latest sweep's counters are written to `stats`.
    pub fn attach(
        world: SharedWorld,
        events: &Events,
        stats: Rc<RefCell<SweepStats>>,
    ) -> Listener<()> {
        let channel = events.collision.clone();
        let sweep = listener(move |_: &()| {
            let result = Self::update(&world, &channel);
            *stats.borrow_mut() = result;
        });
        events.pre_tick.subscribe(Rc::clone(&sweep));
        sweep
    }
}
