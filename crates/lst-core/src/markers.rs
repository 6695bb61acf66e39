//! Typed metadata attached to tree nodes
//!
//! Markers never affect printed text unless a printer chooses to render them
//! (search results are rendered as `~~>` decorations). A [`Markers`] list is
//! immutable; every mutating operation returns a new list.

use crate::tree::{Same, TreeId};
use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

/// A single typed annotation
pub trait Marker: Any + Debug + Send + Sync {
    fn id(&self) -> TreeId;

    fn as_any(&self) -> &dyn Any;
}

/// Ordered, immutable list of markers
#[derive(Debug, Clone)]
pub struct Markers {
    entries: Arc<[Arc<dyn Marker>]>,
}

impl Default for Markers {
    fn default() -> Self {
        Self::empty()
    }
}

impl Markers {
    pub fn empty() -> Self {
        Self {
            entries: Arc::from(Vec::<Arc<dyn Marker>>::new()),
        }
    }

    pub fn build(entries: Vec<Arc<dyn Marker>>) -> Self {
        Self {
            entries: Arc::from(entries),
        }
    }

    pub fn entries(&self) -> &[Arc<dyn Marker>] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn find_all<M: Marker>(&self) -> impl Iterator<Item = &M> {
        self.entries
            .iter()
            .filter_map(|entry| entry.as_any().downcast_ref::<M>())
    }

    pub fn find_first<M: Marker>(&self) -> Option<&M> {
        self.find_all::<M>().next()
    }

    pub fn contains<M: Marker>(&self) -> bool {
        self.find_first::<M>().is_some()
    }

    /// Append a marker
    pub fn add(&self, marker: impl Marker) -> Self {
        let mut entries = self.entries.to_vec();
        entries.push(Arc::new(marker));
        Self::build(entries)
    }

    /// Append a marker unless one of the same type is already present
    pub fn add_if_absent<M: Marker>(&self, marker: M) -> Self {
        if self.contains::<M>() {
            return self.clone();
        }
        self.add(marker)
    }

    /// Replace every marker of type `M` with `marker`
    ///
    /// The replacement takes the position of the first removed marker, or is
    /// appended when no marker of that type exists.
    pub fn set_by_type<M: Marker>(&self, marker: M) -> Self {
        let mut entries: Vec<Arc<dyn Marker>> = Vec::with_capacity(self.entries.len() + 1);
        let mut replacement: Option<Arc<dyn Marker>> = Some(Arc::new(marker));
        for entry in self.entries.iter() {
            if entry.as_any().is::<M>() {
                if let Some(new) = replacement.take() {
                    entries.push(new);
                }
            } else {
                entries.push(Arc::clone(entry));
            }
        }
        if let Some(new) = replacement {
            entries.push(new);
        }
        Self::build(entries)
    }

    /// Insert `marker`, or combine it with an existing marker of the same type
    ///
    /// `remap(existing, incoming)` produces the merged marker.
    pub fn compute_by_type<M, F>(&self, marker: M, remap: F) -> Self
    where
        M: Marker,
        F: FnOnce(&M, M) -> M,
    {
        match self.find_first::<M>() {
            Some(existing) => {
                let merged = remap(existing, marker);
                self.set_by_type(merged)
            }
            None => self.add(marker),
        }
    }

    pub fn remove_by_type<M: Marker>(&self) -> Self {
        if !self.contains::<M>() {
            return self.clone();
        }
        Self::build(
            self.entries
                .iter()
                .filter(|entry| !entry.as_any().is::<M>())
                .cloned()
                .collect(),
        )
    }

    /// Mark the owner as a search hit
    ///
    /// Repeated hits on the same node keep one marker; a new description
    /// replaces the old one.
    pub fn search_result(&self, description: Option<&str>) -> Self {
        let incoming = SearchResult::new(description.map(str::to_string));
        self.compute_by_type(incoming, |existing, incoming| SearchResult {
            id: existing.id,
            description: incoming.description.or_else(|| existing.description.clone()),
        })
    }
}

impl Same for Markers {
    fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
            || (self.entries.is_empty() && other.entries.is_empty())
    }
}

/// Search hit, optionally with a human readable description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    id: TreeId,
    description: Option<String>,
}

impl SearchResult {
    pub fn new(description: Option<String>) -> Self {
        Self {
            id: TreeId::random(),
            description,
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl Marker for SearchResult {
    fn id(&self) -> TreeId {
        self.id
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Recoverable problem noticed while parsing, e.g. a missing delimiter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    id: TreeId,
    offset: usize,
    message: String,
}

impl ParseWarning {
    pub fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            id: TreeId::random(),
            offset,
            message: message.into(),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Marker for ParseWarning {
    fn id(&self) -> TreeId {
        self.id
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Printed output of a freshly parsed file differed from its input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTripMismatch {
    id: TreeId,
    diff: String,
}

impl RoundTripMismatch {
    pub fn new(diff: impl Into<String>) -> Self {
        Self {
            id: TreeId::random(),
            diff: diff.into(),
        }
    }

    /// Unified diff between the input and the printed tree
    pub fn diff(&self) -> &str {
        &self.diff
    }
}

impl Marker for RoundTripMismatch {
    fn id(&self) -> TreeId {
        self.id
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
