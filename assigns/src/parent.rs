use crate::{Assigns, Atom};
use imbl::HashSet;

/// Read-only snapshot of an ancestor's resolved assigns, consulted by
/// [`assign_new`](crate::AssignsContainer::assign_new).
///
/// The snapshot is a plain value held by the child container. The child records each key it asked the parent for in
/// [`requested_keys`](Self::requested_keys); the parent assigns themselves are never modified.
#[derive(Clone, Debug, Default)]
pub struct ParentAssigns {
    assigns: Assigns,
    requested: HashSet<Atom>,
}

impl ParentAssigns {
    pub fn new(assigns: Assigns) -> ParentAssigns {
        ParentAssigns {
            assigns,
            requested: HashSet::new(),
        }
    }

    /// The parent's assigns.
    pub fn assigns(&self) -> &Assigns {
        &self.assigns
    }

    /// Keys looked up through `assign_new`, whether or not the parent had them.
    pub fn requested_keys(&self) -> impl Iterator<Item = &Atom> + '_ {
        self.requested.iter()
    }

    pub fn was_requested(&self, key: &Atom) -> bool {
        self.requested.contains(key)
    }

    /// Records `key` as requested and returns the parent's value for it.
    pub(crate) fn request(&mut self, key: &Atom) -> Option<&crate::Value> {
        self.requested.insert(key.clone());
        self.assigns.get(key)
    }
}
