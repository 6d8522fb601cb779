//! Change tracking for server-rendered component assigns.
//!
//! A component's state is a set of named values ("assigns"). Between two renders, a pipeline
//! threads an [`AssignsContainer`] through [`assign`](AssignsContainer::assign),
//! [`assign_new`](AssignsContainer::assign_new) and [`update`](AssignsContainer::update) calls.
//! The renderer then asks [`changed`](AssignsContainer::changed) for each key it depends on,
//! recomputes what changed, and calls [`checkpoint`](AssignsContainer::checkpoint) before the next
//! round.
//!
//! ```text
//!   assign / assign_new / update ──► AssignsContainer ──► changed(key)? ──► re-render
//!            ▲                                                                  │
//!            └──────────────────────── checkpoint ◄─────────────────────────────┘
//! ```
//!
//! Trackers come in three modes (see [`TrackingMode`]): disabled (everything reports as changed),
//! marks (which keys changed) and values (which keys changed, plus the value each held when the
//! epoch started, so that nested values can be diffed).
//!
//! ```
//! use assigns::{AssignsContainer, Producer};
//!
//! let c = AssignsContainer::component()
//!     .assign("title", "hello")
//!     .assign_new("count", Producer::nullary(|| 0))
//!     .checkpoint();
//!
//! let c = c.assign("title", "hello").assign("count", 1);
//! assert!(!c.changed("title"));
//! assert!(c.changed("count"));
//! ```

mod attributes;
mod callable;
mod container;
mod deferred;
mod error;
mod parent;
mod tracker;
mod update;

pub use crate::{
    attributes::{assigns_to_attributes, value_to_attributes, ReservedKeys},
    callable::{DynFn, Producer, Transform},
    container::AssignsContainer,
    error::AssignError,
    parent::ParentAssigns,
    tracker::{Baseline, ChangeTracker, TrackingMode},
};
pub use assigns_common::{Atom, Data, Value, ValueMap};

/// Named values held by a component, in insertion order.
pub type Assigns = ValueMap;
