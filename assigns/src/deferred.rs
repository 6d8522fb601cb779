use crate::{AssignError, AssignsContainer, Atom, DynFn, Producer};
use tracing::trace;

impl AssignsContainer {
    /// Assigns `key` only if it is not already assigned.
    ///
    /// Resolution order:
    /// 1. if the container already holds `key`, it is returned untouched and `producer` is not
    ///    called;
    /// 2. otherwise, if the parent snapshot holds `key`, its value is inherited;
    /// 3. otherwise `producer` is called, with the container's current assigns if it is
    ///    [`Producer::Unary`].
    ///
    /// In cases 2 and 3 the key is marked as changed unconditionally. Because case 1 checks the
    /// container's own assigns, a later `assign_new` in the same chain sees values resolved by
    /// earlier ones, including inherited ones.
    #[must_use]
    pub fn assign_new(mut self, key: impl Into<Atom>, producer: Producer<'_>) -> AssignsContainer {
        let key = key.into();
        if self.assigns.contains_key(&key) {
            trace!(%key, "assign_new skipped, already assigned");
            return self;
        }

        let inherited = self.parent.as_mut().and_then(|parent| parent.request(&key)).cloned();
        let value = match inherited {
            Some(value) => {
                trace!(%key, "assign_new inherited from parent");
                value
            }
            None => {
                trace!(%key, arity = producer.arity(), "assign_new computing default");
                producer.produce(&self.assigns)
            }
        };
        self.force_assign_in_place(key, value);
        self
    }

    /// Like [`assign_new`](Self::assign_new), with a callable whose arity is checked at runtime.
    ///
    /// The arity is checked before anything else, so a mismatched callable is reported even when
    /// it would not have been called.
    pub fn try_assign_new(self, key: impl Into<Atom>, producer: DynFn<'_>) -> Result<AssignsContainer, AssignError> {
        let producer = Producer::try_from(producer)?;
        Ok(self.assign_new(key, producer))
    }
}

#[cfg(test)]
mod tests {
    use crate::{AssignError, AssignsContainer, Assigns, Atom, DynFn, ParentAssigns, Producer, Value};
    use std::cell::Cell;

    fn parent(pairs: &[(&str, &str)]) -> ParentAssigns {
        ParentAssigns::new(pairs.iter().copied().collect::<Assigns>())
    }

    #[test]
    fn producer_not_called_when_present() {
        let calls = Cell::new(0);
        let c = AssignsContainer::component()
            .assign("existing", "foo")
            .checkpoint()
            .assign_new(
                "existing",
                Producer::nullary(|| {
                    calls.set(calls.get() + 1);
                    "new"
                }),
            );
        assert_eq!(calls.get(), 0);
        assert_eq!(c.get("existing"), Some(&Value::from("foo")));
        assert!(!c.changed("existing"));
    }

    #[test]
    fn producer_called_once_across_chain() {
        let calls = Cell::new(0);
        let counter = &calls;
        let produce = move || {
            Producer::nullary(move || {
                counter.set(counter.get() + 1);
                "computed"
            })
        };
        let c = AssignsContainer::component()
            .assign_new("key", produce())
            .assign_new("key", produce())
            .assign_new("key", produce());
        assert_eq!(calls.get(), 1);
        assert!(c.changed("key"));
        assert_eq!(c.tracker().len(), 1);
    }

    #[test]
    fn inherits_from_parent() {
        let c = AssignsContainer::component()
            .with_parent(parent(&[("existing", "existing-parent")]))
            .assign_new("existing", Producer::nullary(|| "new-existing"));
        assert_eq!(c.get("existing"), Some(&Value::from("existing-parent")));
        assert!(c.changed("existing"));
        assert!(c.parent().is_some_and(|p| p.was_requested(&Atom::from("existing"))));
    }

    #[test]
    fn inherited_value_has_absent_baseline() {
        let c = AssignsContainer::plain()
            .with_parent(parent(&[("title", "same")]))
            .assign_new("title", Producer::nullary(|| "unused"));
        assert!(c.changed("title"));
        assert_eq!(
            c.tracker().baseline(&Atom::from("title")).and_then(|b| b.as_value()),
            None
        );
    }

    #[test]
    fn falls_back_to_producer_and_records_request() {
        let c = AssignsContainer::component()
            .with_parent(parent(&[("other", "x")]))
            .assign_new("missing", Producer::nullary(|| "default"));
        assert_eq!(c.get("missing"), Some(&Value::from("default")));
        let parent = c.parent().unwrap();
        assert!(parent.was_requested(&Atom::from("missing")));
        assert!(!parent.was_requested(&Atom::from("other")));
        // the parent snapshot is left as it was
        assert_eq!(parent.assigns().len(), 1);
    }

    #[test]
    fn unary_producer_sees_earlier_results() {
        let c = AssignsContainer::component()
            .with_parent(parent(&[("user", "jose")]))
            .assign_new("user", Producer::nullary(|| "nobody"))
            .assign_new(
                "greeting",
                Producer::unary(|assigns: &Assigns| {
                    let user = assigns.get(&Atom::from("user")).and_then(Value::as_str).unwrap_or("?");
                    format!("hello {user}")
                }),
            );
        assert_eq!(c.get("greeting"), Some(&Value::from("hello jose")));
    }

    #[test]
    fn dyn_producer() {
        let c = AssignsContainer::component()
            .assign("a", 1)
            .try_assign_new("b", DynFn::new(1, |args| Value::from(args[0].as_map().map_or(0, |m| m.len() as i64))))
            .unwrap();
        assert_eq!(c.get("b"), Some(&Value::Int(1)));

        let err = AssignsContainer::component()
            .try_assign_new("b", DynFn::new(3, |_| Value::Nil))
            .unwrap_err();
        assert!(matches!(err, AssignError::Arity { found: 3, .. }));
    }
}
