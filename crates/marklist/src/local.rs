//! Per-worker views with private push and pop segments.

use crate::segment::{Segment, Slot};
use crate::worklist::Worklist;

/// A thread-local view on a [`Worklist`]. Work that is not published from
/// the local view is not visible to the global worklist.
///
/// The view owns two segment slots. Pushes fill the push segment and hand it
/// to the worklist when it runs full; pops drain the pop segment and refill
/// it either by reusing the push segment or by stealing one segment from the
/// worklist. Both hot paths run without touching the worklist's lock.
///
/// A view is owned by a single worker; all mutating operations take
/// `&mut self`. It borrows its worklist, so it cannot outlive it, and it is
/// move-only: a moved-from view is statically unusable.
///
/// Entries popped by a view that both produces and consumes are LIFO until
/// a segment is published; once segments circulate through the worklist the
/// caller must treat the whole structure as an unordered pool.
///
/// # Examples
///
/// ```
/// use marklist::Worklist;
///
/// let worklist = Worklist::<usize, 4>::new();
/// let mut producer = worklist.local();
/// for i in 0..8 {
///     producer.push(i);
/// }
/// producer.publish();
///
/// std::thread::scope(|scope| {
///     scope.spawn(|| {
///         let mut consumer = worklist.local();
///         let mut seen = 0;
///         while consumer.pop().is_some() {
///             seen += 1;
///         }
///         assert_eq!(seen, 8);
///     });
/// });
/// ```
pub struct Local<'w, E, const MIN_SEGMENT_SIZE: usize> {
    worklist: &'w Worklist<E, MIN_SEGMENT_SIZE>,
    push_segment: Slot<E, MIN_SEGMENT_SIZE>,
    pop_segment: Slot<E, MIN_SEGMENT_SIZE>,
}

impl<'w, E, const MIN_SEGMENT_SIZE: usize> Local<'w, E, MIN_SEGMENT_SIZE> {
    pub(crate) const fn new(worklist: &'w Worklist<E, MIN_SEGMENT_SIZE>) -> Self {
        Self {
            worklist,
            push_segment: Slot::Sentinel,
            pop_segment: Slot::Sentinel,
        }
    }

    /// Appends an entry to the push segment, publishing the segment to the
    /// worklist first if it is full.
    ///
    /// The sentinel reports full, so the cold-start allocation of the first
    /// segment rides the same branch as a publication.
    #[inline]
    pub fn push(&mut self, entry: E) {
        if self.push_segment.is_full() {
            self.publish_push_segment();
        }
        self.push_segment.segment_mut().push(entry);
    }

    /// Removes and returns an entry, or `None` if neither the local
    /// segments nor the worklist have any work.
    ///
    /// An empty pop segment is refilled from the push segment when
    /// possible, avoiding the worklist entirely for a worker that consumes
    /// its own work; otherwise one segment is stolen from the worklist.
    /// Pushes never steal, only pops do.
    #[inline]
    pub fn pop(&mut self) -> Option<E> {
        if self.pop_segment.is_empty() {
            if self.push_segment.is_empty() {
                if !self.steal_pop_segment() {
                    return None;
                }
            } else {
                std::mem::swap(&mut self.push_segment, &mut self.pop_segment);
            }
        }
        Some(self.pop_segment.segment_mut().pop())
    }

    /// Hands both non-empty segments to the worklist, making all locally
    /// buffered work visible to other workers.
    ///
    /// Publishing twice in a row is idempotent: the second call finds both
    /// slots empty and does nothing.
    pub fn publish(&mut self) {
        if !self.push_segment.is_empty() {
            self.publish_push_segment();
        }
        if !self.pop_segment.is_empty() {
            self.publish_pop_segment();
        }
    }

    /// Publishes `other` and then moves every segment of `other`'s worklist
    /// into this view's worklist. The two views may be attached to
    /// different worklist instances.
    pub fn merge(&mut self, other: &mut Local<'_, E, MIN_SEGMENT_SIZE>) {
        other.publish();
        self.worklist.merge(other.worklist);
    }

    /// Drops all locally buffered entries without publishing them.
    pub fn clear(&mut self) {
        self.push_segment.clear();
        self.pop_segment.clear();
    }

    /// Returns `true` if both local segments are empty.
    #[must_use]
    pub fn is_local_empty(&self) -> bool {
        self.push_segment.is_empty() && self.pop_segment.is_empty()
    }

    /// Returns `true` if the attached worklist is empty (approximate, see
    /// [`Worklist::is_empty`]).
    #[must_use]
    pub fn is_global_empty(&self) -> bool {
        self.worklist.is_empty()
    }

    /// Termination probe: `true` if no work is buffered locally or
    /// published globally. Conservative only when queried after
    /// [`Local::publish`], since other views' unpublished work is never
    /// visible.
    #[must_use]
    pub fn is_local_and_global_empty(&self) -> bool {
        self.is_local_empty() && self.is_global_empty()
    }

    /// Number of entries currently buffered in the push segment.
    #[must_use]
    pub fn push_segment_size(&self) -> usize {
        self.push_segment.len()
    }

    fn publish_push_segment(&mut self) {
        if let Some(segment) = self.push_segment.take() {
            self.worklist.push_segment(segment);
        }
        self.push_segment = Slot::Owned(Segment::new());
    }

    fn publish_pop_segment(&mut self) {
        if let Some(segment) = self.pop_segment.take() {
            self.worklist.push_segment(segment);
        }
        self.pop_segment = Slot::Owned(Segment::new());
    }

    fn steal_pop_segment(&mut self) -> bool {
        if self.worklist.is_empty() {
            return false;
        }
        match self.worklist.pop_segment() {
            Some(stolen) => {
                self.pop_segment = Slot::Owned(stolen);
                true
            }
            None => false,
        }
    }
}

impl<E, const MIN_SEGMENT_SIZE: usize> Drop for Local<'_, E, MIN_SEGMENT_SIZE> {
    fn drop(&mut self) {
        debug_assert!(
            self.push_segment.is_empty(),
            "local view dropped with unpublished entries"
        );
        debug_assert!(
            self.pop_segment.is_empty(),
            "local view dropped with unconsumed entries"
        );
    }
}
