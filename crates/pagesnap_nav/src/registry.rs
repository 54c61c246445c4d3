//! Section registry
//!
//! The ordered set of navigable sections. Sections are registered once by
//! the page's components and live until the whole registry is torn down
//! with its controller; there is no individual removal.

use pagesnap_core::SharedSnapTarget;
use smallvec::SmallVec;
use std::sync::Arc;

/// One navigable region of the page
pub struct Section {
    target: SharedSnapTarget,
}

impl Section {
    /// Fresh measurement of the section's top edge relative to the
    /// viewport top. Never cached.
    pub fn offset_top(&self) -> f32 {
        self.target.offset_top()
    }

    /// The handle this section was registered with.
    pub fn target(&self) -> &SharedSnapTarget {
        &self.target
    }
}

/// Ordered collection of sections, ascending by offset at registration time
///
/// Real pages carry a handful of sections, so the backing store is a
/// `SmallVec` that stays inline for typical counts.
#[derive(Default)]
pub struct SectionRegistry {
    sections: SmallVec<[Section; 8]>,
}

impl SectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a section unless its handle is already registered, then restore
    /// ascending offset order.
    ///
    /// Idempotent per handle (identity is `Arc::ptr_eq`). The sort is
    /// stable and keyed on offsets measured once at registration, so
    /// re-registration never reorders unrelated entries beyond the natural
    /// re-sort, and exact offset ties keep registration order.
    ///
    /// Returns false for a duplicate handle.
    pub fn register(&mut self, target: SharedSnapTarget) -> bool {
        let duplicate = self
            .sections
            .iter()
            .any(|section| Arc::ptr_eq(&section.target, &target));
        if duplicate {
            tracing::trace!("section handle already registered; ignoring");
            return false;
        }

        self.sections.push(Section { target });

        // Measure once, then sort on the captured offsets
        let mut keyed: SmallVec<[(f32, Section); 8]> = self
            .sections
            .drain(..)
            .map(|section| (section.offset_top(), section))
            .collect();
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
        self.sections = keyed.into_iter().map(|(_, section)| section).collect();

        tracing::debug!("registered section ({} total)", self.sections.len());
        true
    }

    /// Index of the section nearest the viewport top right now.
    ///
    /// Offsets are measured on demand; the smallest absolute offset wins,
    /// ties go to the lowest index, and an empty registry answers 0.
    pub fn closest(&self) -> usize {
        let mut best = 0;
        let mut best_distance = f32::INFINITY;
        for (index, section) in self.sections.iter().enumerate() {
            let distance = section.offset_top().abs();
            if distance < best_distance {
                best = index;
                best_distance = distance;
            }
        }
        best
    }

    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
