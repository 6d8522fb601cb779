use crate::{AssignError, AssignsContainer, Atom, DynFn, Transform};

impl AssignsContainer {
    /// Replaces the value of an existing assign with one derived from it.
    ///
    /// A [`Transform::Binary`] also receives all assigns as they were before this update. The
    /// result goes through [`assign`](Self::assign), so an unchanged result marks nothing.
    ///
    /// # Errors
    ///
    /// [`AssignError::MissingAssign`] if `key` is not assigned; the key is never created.
    pub fn update(mut self, key: impl Into<Atom>, transform: Transform<'_>) -> Result<AssignsContainer, AssignError> {
        let key = key.into();
        let Some(old) = self.assigns.get(&key).cloned() else {
            return Err(AssignError::MissingAssign { key });
        };
        let new = transform.apply(old, &self.assigns);
        self.assign_in_place(key, new);
        Ok(self)
    }

    /// Like [`update`](Self::update), with a callable whose arity is checked at runtime.
    pub fn try_update(self, key: impl Into<Atom>, transform: DynFn<'_>) -> Result<AssignsContainer, AssignError> {
        let transform = Transform::try_from(transform)?;
        self.update(key, transform)
    }
}

#[cfg(test)]
mod tests {
    use crate::{AssignError, AssignsContainer, Assigns, Atom, DynFn, Transform, Value};

    #[test]
    fn unary_update() {
        let c = AssignsContainer::component()
            .assign("count", 1)
            .checkpoint()
            .update("count", Transform::unary(|old| old.as_int().unwrap_or(0) + 1))
            .unwrap();
        assert_eq!(c.get("count"), Some(&Value::Int(2)));
        assert!(c.changed("count"));
    }

    #[test]
    fn identity_update_marks_nothing() {
        let c = AssignsContainer::component()
            .assign("count", 1)
            .checkpoint()
            .update("count", Transform::unary(|old| old))
            .unwrap();
        assert!(!c.changed("count"));
    }

    #[test]
    fn binary_sees_prior_snapshot() {
        let c = AssignsContainer::plain()
            .assign_all([("count", 1), ("step", 10)])
            .update(
                "count",
                Transform::binary(|old, assigns: &Assigns| {
                    // the snapshot still holds the old count
                    assert_eq!(assigns.get(&Atom::from("count")), Some(&old));
                    let step = assigns.get(&Atom::from("step")).and_then(Value::as_int).unwrap_or(0);
                    old.as_int().unwrap_or(0) + step
                }),
            )
            .unwrap();
        assert_eq!(c.get("count"), Some(&Value::Int(11)));
    }

    #[test]
    fn missing_key_fails() {
        let err = AssignsContainer::component()
            .update("missing", Transform::unary(|old| old))
            .unwrap_err();
        assert_eq!(err, AssignError::MissingAssign { key: "missing".into() });
        assert_eq!(err.to_string(), "cannot update `missing`: no such assign");
    }

    #[test]
    fn dyn_transform() {
        let c = AssignsContainer::component()
            .assign("n", 2)
            .try_update("n", DynFn::new(1, |args| Value::from(args[0].as_int().unwrap_or(0) * 2)))
            .unwrap();
        assert_eq!(c.get("n"), Some(&Value::Int(4)));

        let err = c.try_update("n", DynFn::new(3, |_| Value::Nil)).unwrap_err();
        assert_eq!(err, AssignError::Arity { expected: "1 or 2", found: 3 });
    }
}
