//! Padded wrappers
//!
//! Some whitespace belongs to a syntactic position rather than to a node:
//! the space before a `,` or `)`, or before an infix operator. These wrappers
//! hold an element together with that space so a node can be moved or
//! replaced without losing the formatting around its slot.

use crate::markers::Markers;
use crate::space::Space;
use crate::tree::{HasMarkers, Same};

/// Element followed by whitespace, e.g. a list item and the space before its comma
#[derive(Debug, Clone)]
pub struct RightPadded<T> {
    element: T,
    after: Space,
    markers: Markers,
}

impl<T> RightPadded<T> {
    pub fn new(element: T, after: Space) -> Self {
        Self {
            element,
            after,
            markers: Markers::empty(),
        }
    }

    pub fn build(element: T) -> Self {
        Self::new(element, Space::EMPTY)
    }

    pub fn from_parts(element: T, after: Space, markers: Markers) -> Self {
        Self {
            element,
            after,
            markers,
        }
    }

    pub fn element(&self) -> &T {
        &self.element
    }

    pub fn into_element(self) -> T {
        self.element
    }

    pub fn after(&self) -> &Space {
        &self.after
    }

    pub fn with_after(self, after: Space) -> Self {
        Self { after, ..self }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RightPadded<U> {
        RightPadded {
            element: f(self.element),
            after: self.after,
            markers: self.markers,
        }
    }
}

impl<T: Clone> RightPadded<T> {
    /// Copy with a new element, keeping the padding and markers
    pub fn with_element(&self, element: T) -> Self {
        Self {
            element,
            after: self.after.clone(),
            markers: self.markers.clone(),
        }
    }

    /// Copy that takes over the padding of `closing`, the slot right before
    /// a list's closing delimiter
    pub fn with_closing_of(&self, closing: &RightPadded<T>) -> Self {
        Self {
            element: self.element.clone(),
            after: closing.after.clone(),
            markers: closing.markers.clone(),
        }
    }
}

impl<T: Clone> HasMarkers for RightPadded<T> {
    fn markers(&self) -> &Markers {
        &self.markers
    }

    fn with_markers(&self, markers: Markers) -> Self {
        Self {
            markers,
            ..self.clone()
        }
    }
}

impl<T: Same> Same for RightPadded<T> {
    fn same(&self, other: &Self) -> bool {
        self.element.same(&other.element)
            && self.after == other.after
            && self.markers.same(&other.markers)
    }
}

/// Element preceded by whitespace, e.g. an infix operator and the space before it
#[derive(Debug, Clone)]
pub struct LeftPadded<T> {
    before: Space,
    element: T,
    markers: Markers,
}

impl<T> LeftPadded<T> {
    pub fn new(before: Space, element: T) -> Self {
        Self {
            before,
            element,
            markers: Markers::empty(),
        }
    }

    pub fn build(element: T) -> Self {
        Self::new(Space::EMPTY, element)
    }

    pub fn from_parts(before: Space, element: T, markers: Markers) -> Self {
        Self {
            before,
            element,
            markers,
        }
    }

    pub fn before(&self) -> &Space {
        &self.before
    }

    pub fn element(&self) -> &T {
        &self.element
    }

    pub fn into_element(self) -> T {
        self.element
    }

    pub fn with_before(self, before: Space) -> Self {
        Self { before, ..self }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LeftPadded<U> {
        LeftPadded {
            before: self.before,
            element: f(self.element),
            markers: self.markers,
        }
    }
}

impl<T: Clone> LeftPadded<T> {
    pub fn with_element(&self, element: T) -> Self {
        Self {
            before: self.before.clone(),
            element,
            markers: self.markers.clone(),
        }
    }
}

impl<T: Clone> HasMarkers for LeftPadded<T> {
    fn markers(&self) -> &Markers {
        &self.markers
    }

    fn with_markers(&self, markers: Markers) -> Self {
        Self {
            markers,
            ..self.clone()
        }
    }
}

impl<T: Same> Same for LeftPadded<T> {
    fn same(&self, other: &Self) -> bool {
        self.before == other.before
            && self.element.same(&other.element)
            && self.markers.same(&other.markers)
    }
}

/// Delimited list: the space before the opening delimiter plus right-padded
/// elements, whose `after` holds the space before each separator or closer
#[derive(Debug, Clone)]
pub struct Container<T> {
    before: Space,
    elements: Vec<RightPadded<T>>,
    markers: Markers,
}

impl<T> Container<T> {
    pub fn new(before: Space, elements: Vec<RightPadded<T>>) -> Self {
        Self {
            before,
            elements,
            markers: Markers::empty(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Space::EMPTY, Vec::new())
    }

    pub fn from_parts(before: Space, elements: Vec<RightPadded<T>>, markers: Markers) -> Self {
        Self {
            before,
            elements,
            markers,
        }
    }

    pub fn before(&self) -> &Space {
        &self.before
    }

    pub fn with_before(self, before: Space) -> Self {
        Self { before, ..self }
    }

    /// Unwrapped view of the elements
    pub fn elements(&self) -> impl ExactSizeIterator<Item = &T> {
        self.elements.iter().map(RightPadded::element)
    }

    /// The padded view, including the space before each separator
    pub fn padded_elements(&self) -> &[RightPadded<T>] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<T: Clone> Container<T> {
    pub fn with_padded_elements(&self, elements: Vec<RightPadded<T>>) -> Self {
        Self {
            before: self.before.clone(),
            elements,
            markers: self.markers.clone(),
        }
    }

    /// Replace the elements, reusing the padding of the slot each lands in
    ///
    /// Extra elements get empty padding. When the list shrinks, the new last
    /// element keeps the padding of the original last slot.
    pub fn with_elements(&self, elements: Vec<T>) -> Self {
        let shrinking = elements.len() < self.elements.len();
        let mut padded: Vec<RightPadded<T>> = elements
            .into_iter()
            .enumerate()
            .map(|(i, element)| match self.elements.get(i) {
                Some(slot) => RightPadded {
                    element,
                    after: slot.after.clone(),
                    markers: slot.markers.clone(),
                },
                None => RightPadded::build(element),
            })
            .collect();
        if shrinking {
            close_list(&mut padded, &self.elements);
        }
        self.with_padded_elements(padded)
    }

    /// Insert an element at `index`, shifting later elements right
    pub fn insert(&self, index: usize, element: RightPadded<T>) -> Self {
        let mut elements = self.elements.clone();
        let index = index.min(elements.len());
        elements.insert(index, element);
        self.with_padded_elements(elements)
    }

    /// Remove the element at `index`; out of range leaves the list intact
    ///
    /// Removing the last element hands its padding to the new last one.
    pub fn remove(&self, index: usize) -> Self {
        if index >= self.elements.len() {
            return self.clone();
        }
        let mut elements = self.elements.clone();
        elements.remove(index);
        if index == elements.len() {
            close_list(&mut elements, &self.elements);
        }
        self.with_padded_elements(elements)
    }
}

/// Give the last of `elements` the closing padding of `original`, for use
/// once the original last slot has been dropped
pub fn close_list<T: Clone>(elements: &mut [RightPadded<T>], original: &[RightPadded<T>]) {
    if let (Some(last), Some(closing)) = (elements.last_mut(), original.last()) {
        *last = last.with_closing_of(closing);
    }
}

impl<T: Clone> HasMarkers for Container<T> {
    fn markers(&self) -> &Markers {
        &self.markers
    }

    fn with_markers(&self, markers: Markers) -> Self {
        Self {
            markers,
            ..self.clone()
        }
    }
}

impl<T: Same> Same for Container<T> {
    fn same(&self, other: &Self) -> bool {
        self.before == other.before
            && self.elements.same(&other.elements)
            && self.markers.same(&other.markers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn list(items: &[&str]) -> Container<Arc<String>> {
        Container::new(
            Space::EMPTY,
            items
                .iter()
                .map(|item| RightPadded::new(Arc::new(item.to_string()), Space::single_space()))
                .collect(),
        )
    }

    #[test]
    fn unwrapped_view_skips_padding() {
        let container = list(&["a", "b"]);
        let names: Vec<&str> = container.elements().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(container.padded_elements()[1].after(), &Space::single_space());
    }

    #[test]
    fn with_elements_reuses_slot_padding() {
        let container = list(&["a"]);
        let updated = container.with_elements(vec![
            Arc::new("x".to_string()),
            Arc::new("y".to_string()),
        ]);
        assert_eq!(updated.padded_elements()[0].after(), &Space::single_space());
        assert!(updated.padded_elements()[1].after().is_empty());
    }

    #[test]
    fn insert_and_remove() {
        let container = list(&["a", "c"]);
        let inserted = container.insert(1, RightPadded::build(Arc::new("b".to_string())));
        let names: Vec<String> = inserted.elements().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);

        let removed = inserted.remove(0);
        assert_eq!(removed.len(), 2);
        assert_eq!(inserted.remove(10).len(), 3);
    }

    #[test]
    fn removing_the_last_element_keeps_the_closing_padding() {
        let container = Container::new(
            Space::EMPTY,
            vec![
                RightPadded::new(Arc::new("a".to_string()), Space::EMPTY),
                RightPadded::new(Arc::new("b".to_string()), Space::from_whitespace("\n")),
            ],
        );
        let removed = container.remove(1);
        assert_eq!(removed.len(), 1);
        assert_eq!(removed.padded_elements()[0].after(), &Space::from_whitespace("\n"));

        let shrunk = container.with_elements(vec![Arc::new("x".to_string())]);
        assert_eq!(shrunk.padded_elements()[0].after(), &Space::from_whitespace("\n"));

        let middle = list(&["a", "b", "c"]).remove(0);
        assert_eq!(middle.padded_elements()[1].after(), &Space::single_space());
    }

    #[test]
    fn same_follows_elements() {
        let container = list(&["a"]);
        let copy = container.clone();
        assert!(container.same(&copy));

        let replaced = container.with_elements(vec![Arc::new("a".to_string())]);
        assert!(!container.same(&replaced));
    }
}
