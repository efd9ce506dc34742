//! Domain Layer - Core Entity Trait
//!
//! Every persisted record has an identifier assigned by the remote store.

/// Core trait for all domain entities
pub trait Entity: Clone {
    /// The type of the entity's unique identifier
    type Id: Clone + Eq + std::hash::Hash;

    /// Returns the entity's unique identifier
    fn id(&self) -> &Self::Id;
}

/// Replace the entity with the same ID in place.
///
/// Returns false when no entity matched.
pub fn replace_entity<T: Entity>(list: &mut [T], updated: T) -> bool {
    match list.iter_mut().find(|e| e.id() == updated.id()) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}

/// Remove the entity with the given ID, returning it if present
pub fn remove_entity<T: Entity>(list: &mut Vec<T>, id: &T::Id) -> Option<T> {
    let index = list.iter().position(|e| e.id() == id)?;
    Some(list.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        text: &'static str,
    }

    impl Entity for Row {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.id
        }
    }

    #[test]
    fn test_replace_entity() {
        let mut rows = vec![Row { id: 1, text: "a" }, Row { id: 2, text: "b" }];
        assert!(replace_entity(&mut rows, Row { id: 2, text: "B" }));
        assert_eq!(rows[1].text, "B");
        assert!(!replace_entity(&mut rows, Row { id: 9, text: "x" }));
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_remove_entity() {
        let mut rows = vec![Row { id: 1, text: "a" }, Row { id: 2, text: "b" }];
        assert_eq!(remove_entity(&mut rows, &1).map(|r| r.text), Some("a"));
        assert!(remove_entity(&mut rows, &1).is_none());
        assert_eq!(rows, vec![Row { id: 2, text: "b" }]);
    }
}
