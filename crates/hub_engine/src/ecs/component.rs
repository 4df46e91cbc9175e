//! Component trait and the per-entity component map

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Marker trait for per-entity data records
pub trait Component: Any {}

/// Tag identifying a component type. Used as the component map key.
#[derive(Clone, Copy)]
pub struct ComponentKind {
    id: TypeId,
    name: &'static str,
}

impl ComponentKind {
    /// Kind of component type `T`
    pub fn of<T: Component>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Fully qualified type name, for diagnostics
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ComponentKind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ComponentKind {}

impl Hash for ComponentKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// At most one component instance per kind
#[derive(Default)]
pub struct ComponentMap {
    components: HashMap<ComponentKind, Box<dyn Any>>,
}

impl fmt::Debug for ComponentMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.components.keys()).finish()
    }
}

impl ComponentMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `component`, returning the instance it replaced
    pub fn insert<T: Component>(&mut self, component: T) -> Option<T> {
        self.components
            .insert(ComponentKind::of::<T>(), Box::new(component))
            .and_then(|old| old.downcast::<T>().ok())
            .map(|old| *old)
    }

    /// Borrow the component of kind `T`
    pub fn get<T: Component>(&self) -> Option<&T> {
        self.components
            .get(&ComponentKind::of::<T>())
            .and_then(|c| c.downcast_ref::<T>())
    }

    /// Mutably borrow the component of kind `T`
    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components
            .get_mut(&ComponentKind::of::<T>())
            .and_then(|c| c.downcast_mut::<T>())
    }

    /// Remove and return the component of kind `T`
    pub fn remove<T: Component>(&mut self) -> Option<T> {
        self.components
            .remove(&ComponentKind::of::<T>())
            .and_then(|c| c.downcast::<T>().ok())
            .map(|c| *c)
    }

    /// Whether a component of kind `T` is present
    pub fn contains<T: Component>(&self) -> bool {
        self.contains_kind(ComponentKind::of::<T>())
    }

    /// Whether a component of `kind` is present
    pub fn contains_kind(&self, kind: ComponentKind) -> bool {
        self.components.contains_key(&kind)
    }

    /// Kinds currently present (unordered)
    pub fn kinds(&self) -> impl Iterator<Item = ComponentKind> + '_ {
        self.components.keys().copied()
    }

    /// Number of components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the map holds no components
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Health(i32);
    impl Component for Health {}

    #[derive(Debug, PartialEq)]
    struct Score(u32);
    impl Component for Score {}

    #[test]
    fn test_latest_insert_wins() {
        let mut map = ComponentMap::new();
        assert_eq!(map.insert(Health(10)), None);
        assert_eq!(map.insert(Health(3)), Some(Health(10)));
        assert_eq!(map.insert(Health(7)), Some(Health(3)));

        assert_eq!(map.len(), 1);
        assert_eq!(map.get::<Health>(), Some(&Health(7)));
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut map = ComponentMap::new();
        map.insert(Health(1));
        map.insert(Score(2));

        assert_eq!(map.len(), 2);
        assert!(map.contains_kind(ComponentKind::of::<Score>()));
        assert_eq!(map.remove::<Health>(), Some(Health(1)));
        assert!(!map.contains::<Health>());
        assert!(map.contains::<Score>());
    }

    #[test]
    fn test_get_mut_mutates_in_place() {
        let mut map = ComponentMap::new();
        map.insert(Score(0));
        if let Some(score) = map.get_mut::<Score>() {
            score.0 += 5;
        }
        assert_eq!(map.get::<Score>(), Some(&Score(5)));
    }

    #[test]
    fn test_kind_name_for_diagnostics() {
        assert!(ComponentKind::of::<Health>().name().ends_with("Health"));
        assert_eq!(ComponentKind::of::<Health>(), ComponentKind::of::<Health>());
        assert_ne!(ComponentKind::of::<Health>(), ComponentKind::of::<Score>());
    }
}
