//! Visual handles controls switch between.
//!
//! Controls never draw. They hold [`Visual`]s supplied by the host and mark
//! exactly one of them active per state; the host bridges these objects to its
//! scene graph. [`VisualNode`] is the stock implementation and is enough for
//! hosts that poll state, and for tests.
//!
//! [`SwitchNode`] maps state ids to visuals and keeps exactly one of them
//! active.

use std::fmt;
use std::sync::Arc;

use horizon_tactile_core::{Point, Property, Size, StateError, StateId};
use parking_lot::Mutex;

/// A visual object in the host scene graph.
pub trait Visual: Send + Sync {
    /// Show or hide the visual.
    fn set_active(&self, active: bool);

    /// Whether the visual is shown.
    fn is_active(&self) -> bool;

    /// Current size.
    fn size(&self) -> Size;

    /// Resize the visual.
    fn set_size(&self, size: Size);

    /// Position relative to the owning control.
    fn position(&self) -> Point;

    /// Move the visual.
    fn set_position(&self, position: Point);
}

/// A visual shared between a control and the host.
pub type SharedVisual = Arc<dyn Visual>;

/// The stock [`Visual`], holding its attributes in [`Property`]s.
pub struct VisualNode {
    name: String,
    active: Property<bool>,
    size: Property<Size>,
    position: Property<Point>,
}

impl VisualNode {
    /// Create an inactive visual at the origin.
    pub fn new(name: impl Into<String>, size: Size) -> Self {
        Self {
            name: name.into(),
            active: Property::new(false),
            size: Property::new(size),
            position: Property::new(Point::ZERO),
        }
    }

    /// Create a visual already wrapped for sharing.
    pub fn shared(name: impl Into<String>, size: Size) -> Arc<Self> {
        Arc::new(Self::new(name, size))
    }

    /// The diagnostic name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Visual for VisualNode {
    fn set_active(&self, active: bool) {
        self.active.set(active);
    }

    fn is_active(&self) -> bool {
        self.active.get()
    }

    fn size(&self) -> Size {
        self.size.get()
    }

    fn set_size(&self, size: Size) {
        self.size.set(size);
    }

    fn position(&self) -> Point {
        self.position.get()
    }

    fn set_position(&self, position: Point) {
        self.position.set(position);
    }
}

impl fmt::Debug for VisualNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisualNode")
            .field("name", &self.name)
            .field("active", &self.active.get())
            .field("size", &self.size.get())
            .field("position", &self.position.get())
            .finish()
    }
}

/// A set of visuals keyed by state, of which exactly one is active.
///
/// The same visual may back several ids, e.g. a missing disabled image falls
/// back to the up image. A `SwitchNode` is itself a [`Visual`]: resizing or
/// moving it applies to every visual it holds, and hiding it hides the
/// current one.
pub struct SwitchNode<K> {
    name: String,
    entries: Vec<(K, SharedVisual)>,
    current: Mutex<Option<K>>,
    shown: Property<bool>,
}

impl<K: StateId> SwitchNode<K> {
    /// Create an empty switch.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            current: Mutex::new(None),
            shown: Property::new(true),
        }
    }

    /// Map `id` to `visual`, replacing any previous mapping.
    pub fn insert(&mut self, id: K, visual: SharedVisual) {
        match self.entries.iter_mut().find(|(k, _)| *k == id) {
            Some(entry) => entry.1 = visual,
            None => self.entries.push((id, visual)),
        }
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, id: K, visual: SharedVisual) -> Self {
        self.insert(id, visual);
        self
    }

    /// The visual mapped to `id`.
    pub fn get(&self, id: K) -> Option<&SharedVisual> {
        self.entries.iter().find(|(k, _)| *k == id).map(|(_, v)| v)
    }

    /// Check whether `id` is mapped.
    pub fn contains(&self, id: K) -> bool {
        self.get(id).is_some()
    }

    /// The id that was activated last.
    pub fn active_id(&self) -> Option<K> {
        *self.current.lock()
    }

    /// Activate the visual for `id` and deactivate all others.
    ///
    /// Fails with [`StateError::UnknownState`] if `id` is not mapped; no
    /// visual changes in that case.
    pub fn set_active_id(&self, id: K) -> Result<(), StateError> {
        let Some(target) = self.get(id).cloned() else {
            return Err(StateError::unknown(&self.name, id));
        };
        for (_, visual) in &self.entries {
            visual.set_active(false);
        }
        if self.shown.get() {
            target.set_active(true);
        }
        *self.current.lock() = Some(id);
        Ok(())
    }

    /// Iterate over the mappings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &SharedVisual)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    /// Number of mapped ids.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether no id is mapped.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn current_visual(&self) -> Option<&SharedVisual> {
        self.active_id().and_then(|id| self.get(id))
    }

    fn first_visual(&self) -> Option<&SharedVisual> {
        self.current_visual().or_else(|| self.entries.first().map(|(_, v)| v))
    }
}

impl<K: StateId + Sync> Visual for SwitchNode<K> {
    fn set_active(&self, active: bool) {
        self.shown.set(active);
        if let Some(visual) = self.current_visual() {
            visual.set_active(active);
        }
    }

    fn is_active(&self) -> bool {
        self.shown.get()
    }

    fn size(&self) -> Size {
        self.first_visual().map(|v| v.size()).unwrap_or_default()
    }

    fn set_size(&self, size: Size) {
        for (_, visual) in &self.entries {
            visual.set_size(size);
        }
    }

    fn position(&self) -> Point {
        self.first_visual().map(|v| v.position()).unwrap_or_default()
    }

    fn set_position(&self, position: Point) {
        for (_, visual) in &self.entries {
            visual.set_position(position);
        }
    }
}

impl<K: StateId> fmt::Debug for SwitchNode<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwitchNode")
            .field("name", &self.name)
            .field("ids", &self.entries.iter().map(|(k, _)| *k).collect::<Vec<_>>())
            .field("active_id", &self.active_id())
            .finish()
    }
}

static_assertions::assert_impl_all!(VisualNode: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Face {
        Up,
        Down,
        Disabled,
    }

    fn faces() -> (Arc<VisualNode>, Arc<VisualNode>, SwitchNode<Face>) {
        let up = VisualNode::shared("up", Size::new(40.0, 20.0));
        let down = VisualNode::shared("down", Size::new(40.0, 20.0));
        let switch = SwitchNode::new("faces")
            .with(Face::Up, up.clone())
            .with(Face::Down, down.clone())
            .with(Face::Disabled, up.clone());
        (up, down, switch)
    }

    #[test]
    fn test_visual_node_properties() {
        let node = VisualNode::new("thumb", Size::new(10.0, 10.0));
        assert!(!node.is_active());
        assert_eq!(node.name(), "thumb");

        node.set_active(true);
        node.set_position(Point::new(3.0, 0.0));
        node.set_size(Size::new(12.0, 10.0));

        assert!(node.is_active());
        assert_eq!(node.position(), Point::new(3.0, 0.0));
        assert_eq!(node.size(), Size::new(12.0, 10.0));
    }

    #[test]
    fn test_exactly_one_active() {
        let (up, down, switch) = faces();

        switch.set_active_id(Face::Down).unwrap();
        assert!(down.is_active());
        assert!(!up.is_active());
        assert_eq!(switch.active_id(), Some(Face::Down));

        switch.set_active_id(Face::Up).unwrap();
        assert!(up.is_active());
        assert!(!down.is_active());
    }

    #[test]
    fn test_shared_visual_for_two_ids() {
        let (up, down, switch) = faces();

        switch.set_active_id(Face::Disabled).unwrap();
        assert!(up.is_active());
        assert!(!down.is_active());
        assert_eq!(switch.active_id(), Some(Face::Disabled));
    }

    #[test]
    fn test_unmapped_id_fails_without_change() {
        let up = VisualNode::shared("up", Size::ZERO);
        let switch = SwitchNode::new("partial").with(Face::Up, up.clone());
        switch.set_active_id(Face::Up).unwrap();

        let err = switch.set_active_id(Face::Down).unwrap_err();
        assert!(matches!(err, StateError::UnknownState { .. }));
        assert!(up.is_active());
        assert_eq!(switch.active_id(), Some(Face::Up));
    }

    #[test]
    fn test_geometry_forwarded_to_all() {
        let (up, down, switch) = faces();

        switch.set_size(Size::new(8.0, 20.0));
        switch.set_position(Point::new(0.0, 30.0));

        assert_eq!(up.size(), Size::new(8.0, 20.0));
        assert_eq!(down.size(), Size::new(8.0, 20.0));
        assert_eq!(down.position(), Point::new(0.0, 30.0));
        assert_eq!(switch.size(), Size::new(8.0, 20.0));
    }

    #[test]
    fn test_hidden_switch_keeps_children_hidden() {
        let (up, down, switch) = faces();
        switch.set_active_id(Face::Up).unwrap();

        switch.set_active(false);
        assert!(!up.is_active());

        switch.set_active_id(Face::Down).unwrap();
        assert!(!down.is_active());

        switch.set_active(true);
        assert!(down.is_active());
    }

    #[test]
    fn test_insert_replaces() {
        let (_, down, mut switch) = faces();
        switch.insert(Face::Disabled, down.clone());
        assert_eq!(switch.len(), 3);

        switch.set_active_id(Face::Disabled).unwrap();
        assert!(down.is_active());
    }
}
