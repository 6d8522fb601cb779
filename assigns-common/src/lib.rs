//! Value types shared by the assigns engine and the renderers that consume it.

mod atom;
mod data;
mod map;
mod value;

pub use crate::{atom::Atom, data::Data, map::ValueMap, value::Value};
