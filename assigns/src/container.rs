use crate::{Assigns, Atom, ChangeTracker, Data, ParentAssigns, TrackingMode, Value};
use tracing::trace;

/// Assigns together with their change tracker and, for child components, a snapshot of the
/// parent's assigns.
///
/// Operations consume the container and return the updated one. Cloning is cheap (the assigns and
/// the tracker are persistent maps), so keeping a clone is how a caller holds on to a previous
/// snapshot; it is never affected by later operations.
///
/// Operations chained on one container must be applied in order: each equality or inheritance
/// decision depends on the state left by the previous step.
#[derive(Clone, Debug)]
pub struct AssignsContainer {
    pub(crate) assigns: Assigns,
    pub(crate) tracker: ChangeTracker,
    pub(crate) parent: Option<ParentAssigns>,
}

impl AssignsContainer {
    /// Creates an empty container tracking changes with the specified mode.
    pub fn new(mode: TrackingMode) -> AssignsContainer {
        AssignsContainer::from_assigns(Assigns::new(), mode)
    }

    /// Container for a stateful component. Records which keys changed.
    pub fn component() -> AssignsContainer {
        AssignsContainer::new(TrackingMode::Marks)
    }

    /// Container for assigns computed inside a render pass. Records baselines.
    pub fn plain() -> AssignsContainer {
        AssignsContainer::new(TrackingMode::Values)
    }

    /// Container without change tracking: every key reports as changed.
    pub fn untracked() -> AssignsContainer {
        AssignsContainer::new(TrackingMode::Disabled)
    }

    /// Wraps existing assigns. Nothing is marked as changed.
    pub fn from_assigns(assigns: Assigns, mode: TrackingMode) -> AssignsContainer {
        AssignsContainer {
            assigns,
            tracker: ChangeTracker::new(mode),
            parent: None,
        }
    }

    /// Attaches a snapshot of the parent's assigns, consulted by `assign_new`.
    #[must_use]
    pub fn with_parent(mut self, parent: ParentAssigns) -> AssignsContainer {
        self.parent = Some(parent);
        self
    }

    pub fn assigns(&self) -> &Assigns {
        &self.assigns
    }

    pub fn tracker(&self) -> &ChangeTracker {
        &self.tracker
    }

    pub fn parent(&self) -> Option<&ParentAssigns> {
        self.parent.as_ref()
    }

    /// Returns the current value of an assign.
    pub fn get(&self, key: impl Into<Atom>) -> Option<&Value> {
        self.assigns.get(&key.into())
    }

    /// Sets an assign.
    ///
    /// If the key already holds a value that is the [same](Data::same) as `value`, the container
    /// is returned untouched and nothing is marked. Otherwise the value is stored and the key is
    /// marked as changed.
    #[must_use]
    pub fn assign(mut self, key: impl Into<Atom>, value: impl Into<Value>) -> AssignsContainer {
        self.assign_in_place(key.into(), value.into());
        self
    }

    /// Sets several assigns, in order.
    ///
    /// Equivalent to calling [`assign`](Self::assign) for each pair: a pair is compared against
    /// the state left by the pairs before it.
    #[must_use]
    pub fn assign_all<I, K, V>(mut self, pairs: I) -> AssignsContainer
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Atom>,
        V: Into<Value>,
    {
        for (key, value) in pairs {
            self.assign_in_place(key.into(), value.into());
        }
        self
    }

    /// Sets an assign and marks it as changed, without comparing against the current value.
    #[must_use]
    pub fn force_assign(mut self, key: impl Into<Atom>, value: impl Into<Value>) -> AssignsContainer {
        self.force_assign_in_place(key.into(), value.into());
        self
    }

    /// Returns whether `key` changed since the last checkpoint.
    ///
    /// Always true for untracked containers.
    pub fn changed(&self, key: impl Into<Atom>) -> bool {
        self.tracker.is_changed(&key.into())
    }

    /// Returns whether any key changed since the last checkpoint.
    pub fn has_changes(&self) -> bool {
        self.tracker.has_changes()
    }

    /// Clears the change marks, signaling that the renderer consumed them.
    #[must_use]
    pub fn checkpoint(mut self) -> AssignsContainer {
        self.tracker.checkpoint();
        self
    }

    /// Checkpoints the container and returns the tracker as it was before.
    pub fn take_changes(mut self) -> (AssignsContainer, ChangeTracker) {
        let changes = self.tracker.clone();
        self.tracker.checkpoint();
        (self, changes)
    }

    pub fn into_assigns(self) -> Assigns {
        self.assigns
    }

    pub(crate) fn assign_in_place(&mut self, key: Atom, value: Value) {
        if self.assigns.get(&key).is_some_and(|current| current.same(&value)) {
            trace!(%key, "assign skipped, value unchanged");
            return;
        }
        self.force_assign_in_place(key, value);
    }

    pub(crate) fn force_assign_in_place(&mut self, key: Atom, value: Value) {
        let old = self.assigns.insert(key.clone(), value);
        self.tracker.record_change(&key, old);
    }
}

#[cfg(test)]
mod tests {
    use super::AssignsContainer;
    use crate::{Baseline, TrackingMode, Value};

    #[test]
    fn unchanged_value_is_not_marked() {
        let c = AssignsContainer::component().assign("existing", "foo").checkpoint();
        let c = c.assign("existing", "foo");
        assert!(!c.changed("existing"));
        assert!(!c.has_changes());

        let c = c.assign("existing", "bar");
        assert!(c.changed("existing"));
        assert_eq!(c.get("existing"), Some(&Value::from("bar")));
    }

    #[test]
    fn new_key_is_marked() {
        let c = AssignsContainer::component().assign("title", Value::Nil);
        assert!(c.changed("title"));
        assert!(!c.changed("other"));
    }

    #[test]
    fn assign_twice_marks_once() {
        let once = AssignsContainer::component().assign("a", 1);
        let twice = once.clone().assign("a", 1);
        assert_eq!(once.tracker().len(), 1);
        assert_eq!(twice.tracker().len(), 1);
    }

    #[test]
    fn previous_snapshot_unaffected() {
        let before = AssignsContainer::plain().assign("count", 1).checkpoint();
        let after = before.clone().assign("count", 2);
        assert_eq!(before.get("count"), Some(&Value::Int(1)));
        assert!(!before.changed("count"));
        assert_eq!(after.get("count"), Some(&Value::Int(2)));
        assert!(after.changed("count"));
    }

    #[test]
    fn bulk_assign_is_sequential() {
        // the second pair compares against the value written by the first
        let c = AssignsContainer::plain()
            .assign("a", 0)
            .checkpoint()
            .assign_all([("a", 1), ("b", 2), ("a", 1)]);
        assert!(c.changed("a"));
        assert!(c.changed("b"));
        assert_eq!(c.tracker().baseline(&"a".into()), Some(&Baseline::Value(Value::Int(0))));
        assert_eq!(c.tracker().baseline(&"b".into()), Some(&Baseline::Absent));
        let keys: Vec<_> = c.assigns().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn force_assign_marks_equal_value() {
        let c = AssignsContainer::component().assign("a", 1).checkpoint().force_assign("a", 1);
        assert!(c.changed("a"));
    }

    #[test]
    fn untracked_always_changed() {
        let c = AssignsContainer::untracked().assign("a", 1).checkpoint();
        assert!(c.changed("a"));
        assert!(c.changed("never-assigned"));
        assert_eq!(c.tracker().mode(), TrackingMode::Disabled);
    }

    #[test]
    fn take_changes_resets() {
        let (c, changes) = AssignsContainer::component().assign("a", 1).take_changes();
        assert!(changes.is_changed(&"a".into()));
        assert!(!c.changed("a"));
        assert_eq!(c.get("a"), Some(&Value::Int(1)));
    }
}
