//! Tree identity and the capabilities shared by every node kind
//!
//! Nodes are immutable once constructed. Editing a node means building a new
//! value through a `with_*` copy constructor, which keeps the [`TreeId`], and
//! replacing the reference in a freshly built parent chain.

use crate::markers::Markers;
use crate::space::Space;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Stable identity of a tree element
///
/// Assigned once at creation and carried through every `with_*` copy, so
/// downstream tools can follow "the same" logical element across rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TreeId(Uuid);

impl TreeId {
    /// Generate a fresh identity
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Capability of carrying a [`Markers`] side channel
pub trait HasMarkers {
    fn markers(&self) -> &Markers;

    fn with_markers(&self, markers: Markers) -> Self
    where
        Self: Sized;
}

impl<T: HasMarkers> HasMarkers for Arc<T> {
    fn markers(&self) -> &Markers {
        (**self).markers()
    }

    fn with_markers(&self, markers: Markers) -> Self {
        if markers.same(self.markers()) {
            return Arc::clone(self);
        }
        Arc::new((**self).with_markers(markers))
    }
}

/// Common surface of every LST node
pub trait Tree: HasMarkers {
    fn id(&self) -> TreeId;

    /// Whitespace and comments immediately preceding the node's first token
    fn prefix(&self) -> &Space;

    fn with_prefix(&self, prefix: Space) -> Self
    where
        Self: Sized;
}

/// Reference equality used by default visits to decide whether to rebuild
///
/// Shared nodes compare by pointer, plain values by value.
pub trait Same {
    fn same(&self, other: &Self) -> bool;
}

impl<T: ?Sized> Same for Arc<T> {
    fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: Same> Same for Option<T> {
    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.same(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: Same> Same for Vec<T> {
    fn same(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.same(b))
    }
}

macro_rules! same_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Same for $ty {
                fn same(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

same_by_value!((), bool, String, Space);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(TreeId::random(), TreeId::random());
    }

    #[test]
    fn arcs_compare_by_pointer() {
        let a = Arc::new(String::from("x"));
        let b = Arc::new(String::from("x"));
        assert!(a.same(&Arc::clone(&a)));
        assert!(!a.same(&b));
    }

    #[test]
    fn vectors_compare_elementwise() {
        let a = Arc::new(1);
        let left = vec![Arc::clone(&a)];
        assert!(left.same(&vec![Arc::clone(&a)]));
        assert!(!left.same(&vec![Arc::new(1)]));
        assert!(!left.same(&Vec::new()));
    }
}
