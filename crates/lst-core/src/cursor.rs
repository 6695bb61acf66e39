//! Parent-linked traversal context
//!
//! A [`Cursor`] frame lives on the stack of the visit that pushed it and
//! points at its parent frame, so a chain costs nothing to build and cannot
//! outlive the traversal. Each language supplies a `Copy` element enum of
//! borrowed node references as `T`.

/// Extract a specific kind from a language's cursor element
pub trait Projection<K> {
    fn project(&self) -> Option<K>;
}

#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a, T> {
    parent: Option<&'a Cursor<'a, T>>,
    value: T,
}

impl<'a, T: Copy> Cursor<'a, T> {
    pub fn root(value: T) -> Self {
        Self {
            parent: None,
            value,
        }
    }

    /// New frame whose parent is `self`
    pub fn push(&'a self, value: T) -> Cursor<'a, T> {
        Cursor {
            parent: Some(self),
            value,
        }
    }

    pub fn value(&self) -> T {
        self.value
    }

    pub fn parent(&self) -> Option<&'a Cursor<'a, T>> {
        self.parent
    }

    pub fn parent_value(&self) -> Option<T> {
        self.parent.map(|parent| parent.value)
    }

    /// Frame values from this one up to the root
    pub fn ancestors(&self) -> impl Iterator<Item = T> + '_ {
        std::iter::successors(Some(self), |frame| frame.parent).map(|frame| frame.value)
    }

    /// Number of frames above this one
    pub fn depth(&self) -> usize {
        self.ancestors().count() - 1
    }

    /// Nearest frame, this one included, holding a `K`
    pub fn first_enclosing<K>(&self) -> Option<K>
    where
        T: Projection<K>,
    {
        self.ancestors().find_map(|value| value.project())
    }

    pub fn count_enclosing<K>(&self) -> usize
    where
        T: Projection<K>,
    {
        self.ancestors()
            .filter(|value| value.project().is_some())
            .count()
    }
}
