//! Structured tracing for segment-level transitions.
//!
//! With the `tracing` feature enabled, publication, stealing, and bulk
//! reorganisation of segments emit `tracing` events. Without it, every hook
//! compiles to a no-op.

#[cfg(feature = "tracing")]
mod imp {
    pub(crate) fn segment_published(entries: usize, pool_segments: usize) {
        tracing::trace!(entries, pool_segments, "segment_published");
    }

    pub(crate) fn segment_stolen(entries: usize) {
        tracing::trace!(entries, "segment_stolen");
    }

    pub(crate) fn merged(segments_moved: usize) {
        tracing::debug!(segments_moved, "worklists_merged");
    }

    pub(crate) fn swapped(segments_in: usize, segments_out: usize) {
        tracing::debug!(segments_in, segments_out, "worklists_swapped");
    }

    pub(crate) fn cleared(segments_dropped: usize) {
        tracing::debug!(segments_dropped, "worklist_cleared");
    }
}

#[cfg(not(feature = "tracing"))]
mod imp {
    pub(crate) fn segment_published(_entries: usize, _pool_segments: usize) {}

    pub(crate) fn segment_stolen(_entries: usize) {}

    pub(crate) fn merged(_segments_moved: usize) {}

    pub(crate) fn swapped(_segments_in: usize, _segments_out: usize) {}

    pub(crate) fn cleared(_segments_dropped: usize) {}
}

pub(crate) use imp::{cleared, merged, segment_published, segment_stolen, swapped};
