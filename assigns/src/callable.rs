//! Callables accepted by `assign_new` and `update`.
//!
//! Statically-typed closures are wrapped in [`Producer`] or [`Transform`], whose variants fix the
//! arity. [`DynFn`] carries a callable whose arity is only known at runtime (e.g. one handed over
//! by a template bridge); converting it checks the arity and is the only place an
//! [`AssignError::Arity`] can originate.
use crate::{AssignError, Assigns, Value};
use std::fmt;

/// Computes a default value for [`assign_new`](crate::AssignsContainer::assign_new).
pub enum Producer<'a> {
    /// Takes no arguments.
    Nullary(Box<dyn FnOnce() -> Value + 'a>),
    /// Receives the container's assigns as of the call.
    Unary(Box<dyn FnOnce(&Assigns) -> Value + 'a>),
}

impl<'a> Producer<'a> {
    pub fn nullary<F, V>(f: F) -> Producer<'a>
    where
        F: FnOnce() -> V + 'a,
        V: Into<Value>,
    {
        Producer::Nullary(Box::new(move || f().into()))
    }

    pub fn unary<F, V>(f: F) -> Producer<'a>
    where
        F: FnOnce(&Assigns) -> V + 'a,
        V: Into<Value>,
    {
        Producer::Unary(Box::new(move |assigns: &Assigns| f(assigns).into()))
    }

    pub fn arity(&self) -> usize {
        match self {
            Producer::Nullary(_) => 0,
            Producer::Unary(_) => 1,
        }
    }

    pub(crate) fn produce(self, assigns: &Assigns) -> Value {
        match self {
            Producer::Nullary(f) => f(),
            Producer::Unary(f) => f(assigns),
        }
    }
}

impl fmt::Debug for Producer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Producer").field("arity", &self.arity()).finish_non_exhaustive()
    }
}

/// Derives a new value from the current one, for [`update`](crate::AssignsContainer::update).
pub enum Transform<'a> {
    /// Receives the current value.
    Unary(Box<dyn FnOnce(Value) -> Value + 'a>),
    /// Receives the current value and all assigns as they were before the update.
    Binary(Box<dyn FnOnce(Value, &Assigns) -> Value + 'a>),
}

impl<'a> Transform<'a> {
    pub fn unary<F, V>(f: F) -> Transform<'a>
    where
        F: FnOnce(Value) -> V + 'a,
        V: Into<Value>,
    {
        Transform::Unary(Box::new(move |old| f(old).into()))
    }

    pub fn binary<F, V>(f: F) -> Transform<'a>
    where
        F: FnOnce(Value, &Assigns) -> V + 'a,
        V: Into<Value>,
    {
        Transform::Binary(Box::new(move |old, assigns: &Assigns| f(old, assigns).into()))
    }

    pub fn arity(&self) -> usize {
        match self {
            Transform::Unary(_) => 1,
            Transform::Binary(_) => 2,
        }
    }

    pub(crate) fn apply(self, old: Value, assigns: &Assigns) -> Value {
        match self {
            Transform::Unary(f) => f(old),
            Transform::Binary(f) => f(old, assigns),
        }
    }
}

impl fmt::Debug for Transform<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Transform").field("arity", &self.arity()).finish_non_exhaustive()
    }
}

/// A callable with a runtime-declared arity.
///
/// Arguments are passed positionally; assigns are passed as a `Value::Map`.
pub struct DynFn<'a> {
    arity: usize,
    f: Box<dyn FnOnce(Vec<Value>) -> Value + 'a>,
}

impl<'a> DynFn<'a> {
    pub fn new(arity: usize, f: impl FnOnce(Vec<Value>) -> Value + 'a) -> DynFn<'a> {
        DynFn { arity, f: Box::new(f) }
    }

    pub fn arity(&self) -> usize {
        self.arity
    }
}

impl fmt::Debug for DynFn<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DynFn").field("arity", &self.arity).finish_non_exhaustive()
    }
}

impl<'a> TryFrom<DynFn<'a>> for Producer<'a> {
    type Error = AssignError;

    fn try_from(dyn_fn: DynFn<'a>) -> Result<Self, AssignError> {
        let DynFn { arity, f } = dyn_fn;
        match arity {
            0 => Ok(Producer::Nullary(Box::new(move || f(Vec::new())))),
            1 => Ok(Producer::Unary(Box::new(move |assigns: &Assigns| {
                f(vec![Value::Map(assigns.clone())])
            }))),
            found => Err(AssignError::Arity {
                expected: "0 or 1",
                found,
            }),
        }
    }
}

impl<'a> TryFrom<DynFn<'a>> for Transform<'a> {
    type Error = AssignError;

    fn try_from(dyn_fn: DynFn<'a>) -> Result<Self, AssignError> {
        let DynFn { arity, f } = dyn_fn;
        match arity {
            1 => Ok(Transform::Unary(Box::new(move |old| f(vec![old])))),
            2 => Ok(Transform::Binary(Box::new(move |old, assigns: &Assigns| {
                f(vec![old, Value::Map(assigns.clone())])
            }))),
            found => Err(AssignError::Arity {
                expected: "1 or 2",
                found,
            }),
        }
    }
}
