//! Projection of assigns onto forwardable attributes.
use crate::{AssignError, Assigns, AssignsContainer, Atom, Value};
use serde::{Deserialize, Serialize};

/// Bookkeeping keys that are never forwarded as attributes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservedKeys {
    /// Slot holding the change tracker when assigns are exchanged as a plain map.
    pub tracker: Atom,
    /// Content-block payload.
    pub inner_block: Atom,
    /// Slot-name marker.
    pub slot: Atom,
}

impl Default for ReservedKeys {
    fn default() -> Self {
        ReservedKeys {
            tracker: Atom::from("__changed__"),
            inner_block: Atom::from("inner_block"),
            slot: Atom::from("__slot__"),
        }
    }
}

impl ReservedKeys {
    pub fn contains(&self, key: &Atom) -> bool {
        *key == self.tracker || *key == self.inner_block || *key == self.slot
    }

    /// Returns the entries of `assigns` that can be forwarded as attributes, in insertion order.
    ///
    /// Reserved keys and the keys listed in `exclude` are dropped.
    pub fn project(&self, assigns: &Assigns, exclude: &[&str]) -> Vec<(Atom, Value)> {
        assigns
            .iter()
            .filter(|(key, _)| !self.contains(key) && !exclude.iter().any(|e| *e == key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Like [`project`](Self::project), for assigns held in a dynamic value.
    ///
    /// # Errors
    ///
    /// [`AssignError::InvalidAssigns`] if `value` is not a map.
    pub fn project_value(&self, value: &Value, exclude: &[&str]) -> Result<Vec<(Atom, Value)>, AssignError> {
        match value {
            Value::Map(assigns) => Ok(self.project(assigns, exclude)),
            other => Err(AssignError::InvalidAssigns { found: other.kind() }),
        }
    }
}

/// Returns the forwardable attributes of `assigns`, dropping the default reserved keys and the
/// keys in `exclude`.
pub fn assigns_to_attributes(assigns: &Assigns, exclude: &[&str]) -> Vec<(Atom, Value)> {
    ReservedKeys::default().project(assigns, exclude)
}

/// Like [`assigns_to_attributes`], for assigns held in a dynamic value.
pub fn value_to_attributes(value: &Value, exclude: &[&str]) -> Result<Vec<(Atom, Value)>, AssignError> {
    ReservedKeys::default().project_value(value, exclude)
}

impl AssignsContainer {
    /// Returns the forwardable attributes of this container's assigns.
    pub fn to_attributes(&self, exclude: &[&str]) -> Vec<(Atom, Value)> {
        assigns_to_attributes(&self.assigns, exclude)
    }
}

#[cfg(test)]
mod tests {
    use super::{assigns_to_attributes, value_to_attributes, ReservedKeys};
    use crate::{AssignError, Assigns, AssignsContainer, Atom, Value};

    fn pairs(attrs: &[(Atom, Value)]) -> Vec<(&str, &Value)> {
        attrs.iter().map(|(k, v)| (k.as_str(), v)).collect()
    }

    #[test]
    fn excludes_listed_keys() {
        let assigns: Assigns = [("a", 1), ("b", 2)].into_iter().collect();
        let attrs = assigns_to_attributes(&assigns, &["a"]);
        assert_eq!(pairs(&attrs), [("b", &Value::Int(2))]);
    }

    #[test]
    fn drops_reserved_keys_and_keeps_order() {
        let assigns: Assigns = [
            ("z", Value::from(1)),
            ("__changed__", Value::Nil),
            ("inner_block", Value::from("block")),
            ("class", Value::from("btn")),
            ("__slot__", Value::from("header")),
            ("a", Value::from(true)),
        ]
        .into_iter()
        .collect();
        let attrs = assigns_to_attributes(&assigns, &[]);
        let keys: Vec<_> = attrs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["z", "class", "a"]);
    }

    #[test]
    fn rejects_non_map() {
        let err = value_to_attributes(&Value::from(vec![1, 2]), &[]).unwrap_err();
        assert_eq!(err, AssignError::InvalidAssigns { found: "list" });
    }

    #[test]
    fn custom_reserved_keys() {
        let reserved: ReservedKeys = serde_json::from_str(r#"{"slot": "__slot_name__"}"#).unwrap();
        assert_eq!(reserved.tracker, "__changed__");
        let assigns: Assigns = [("__slot__", 1), ("__slot_name__", 2)].into_iter().collect();
        let attrs = reserved.project(&assigns, &[]);
        assert_eq!(pairs(&attrs), [("__slot__", &Value::Int(1))]);
    }

    #[test]
    fn container_attributes() {
        let c = AssignsContainer::component().assign("id", "main").assign("rest", 1);
        let attrs = c.to_attributes(&["id"]);
        assert_eq!(pairs(&attrs), [("rest", &Value::Int(1))]);
    }
}
