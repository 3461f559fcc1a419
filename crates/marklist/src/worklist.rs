//! The shared, lock-protected pool of published segments.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::local::Local;
use crate::segment::Segment;
use crate::trace;

/// A global worklist based on segments which allows for a thread-local
/// producer/consumer pattern with global work stealing.
///
/// - Entries in the worklist are of type `E`.
/// - Segments hold up to `MIN_SEGMENT_SIZE` entries each.
///
/// All methods on the worklist itself only consider the list of published
/// segments. Unpublished work held by [`Local`] views is not visible.
///
/// The worklist is the only cross-thread rendezvous: the mutex guards
/// nothing but segment-list surgery, so the amortised synchronisation cost
/// per entry is inversely proportional to the segment size.
///
/// # Examples
///
/// ```
/// use marklist::Worklist;
///
/// let worklist = Worklist::<u32, 16>::new();
/// let mut local = worklist.local();
///
/// local.push(7);
/// assert_eq!(local.pop(), Some(7));
/// ```
pub struct Worklist<E, const MIN_SEGMENT_SIZE: usize> {
    /// Head of the singly-linked list of published segments. Every linked
    /// segment is non-empty and owned by the list.
    head: Mutex<Option<Box<Segment<E, MIN_SEGMENT_SIZE>>>>,
    /// Number of linked segments. Equals the list length whenever the lock
    /// is free; concurrent readers see an approximation.
    size: AtomicUsize,
}

impl<E, const MIN_SEGMENT_SIZE: usize> Worklist<E, MIN_SEGMENT_SIZE> {
    /// The capacity of every segment produced by this worklist.
    pub const SEGMENT_CAPACITY: usize = MIN_SEGMENT_SIZE;

    /// Creates an empty worklist.
    #[must_use]
    pub const fn new() -> Self {
        assert!(MIN_SEGMENT_SIZE >= 1, "segments must hold at least one entry");
        Self {
            head: Mutex::new(None),
            size: AtomicUsize::new(0),
        }
    }

    /// Attaches a new local view to this worklist.
    #[must_use]
    pub fn local(&self) -> Local<'_, E, MIN_SEGMENT_SIZE> {
        Local::new(self)
    }

    /// Returns `true` if the worklist holds no published segments. May be
    /// read concurrently for an approximation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of published segments. May be read concurrently
    /// for an approximation: the counter is atomic, but a reader may not
    /// immediately observe another thread's update.
    #[must_use]
    pub fn len(&self) -> usize {
        self.size.load(Ordering::Relaxed)
    }

    /// Links a non-empty, unlinked segment at the head of the list. This is
    /// the publication point from a local view.
    pub(crate) fn push_segment(&self, mut segment: Box<Segment<E, MIN_SEGMENT_SIZE>>) {
        debug_assert!(!segment.is_empty(), "published segments must be non-empty");
        debug_assert!(segment.next.is_none(), "published segments must be unlinked");
        let mut head = self.head.lock();
        segment.next = head.take();
        let published = segment.len();
        *head = Some(segment);
        let segments = self.size.fetch_add(1, Ordering::Relaxed) + 1;
        trace::segment_published(published, segments);
    }

    /// Unlinks and returns the head segment, or `None` if the list is empty.
    pub(crate) fn pop_segment(&self) -> Option<Box<Segment<E, MIN_SEGMENT_SIZE>>> {
        let mut head = self.head.lock();
        let mut segment = head.take()?;
        *head = segment.next.take();
        self.size.fetch_sub(1, Ordering::Relaxed);
        trace::segment_stolen(segment.len());
        Some(segment)
    }

    /// Moves all segments from `other` into this worklist.
    ///
    /// The two lists are never locked at the same time: `other`'s list is
    /// detached under `other`'s lock, walked without any lock (no other
    /// thread can reach a detached segment), and spliced in front of this
    /// list under this worklist's lock.
    pub fn merge(&self, other: &Self) {
        let (mut detached, moved) = {
            let mut other_head = other.head.lock();
            let Some(detached) = other_head.take() else {
                return;
            };
            (detached, other.size.swap(0, Ordering::Relaxed))
        };

        let mut tail_link = &mut detached.next;
        while let Some(segment) = tail_link {
            tail_link = &mut segment.next;
        }

        let mut head = self.head.lock();
        *tail_link = head.take();
        *head = Some(detached);
        self.size.fetch_add(moved, Ordering::Relaxed);
        trace::merged(moved);
    }

    /// Exchanges the segment lists and counters of the two worklists.
    ///
    /// Locks are acquired in address order so that two threads swapping the
    /// same pair in opposite directions cannot deadlock. Swapping a
    /// worklist with itself is a caller error.
    pub fn swap(&self, other: &Self) {
        debug_assert!(
            !std::ptr::eq(self, other),
            "cannot swap a worklist with itself"
        );
        if std::ptr::eq(self, other) {
            return;
        }
        let (first, second) = if std::ptr::from_ref(self) < std::ptr::from_ref(other) {
            (self, other)
        } else {
            (other, self)
        };
        let mut first_head = first.head.lock();
        let mut second_head = second.head.lock();
        std::mem::swap(&mut *first_head, &mut *second_head);
        let first_size = first.size.load(Ordering::Relaxed);
        let second_size = second.size.swap(first_size, Ordering::Relaxed);
        first.size.store(second_size, Ordering::Relaxed);
        trace::swapped(second_size, first_size);
    }

    /// Frees every published segment together with its entries.
    pub fn clear(&self) {
        let mut head = self.head.lock();
        let dropped = self.size.swap(0, Ordering::Relaxed);
        let mut current = head.take();
        while let Some(mut segment) = current {
            current = segment.next.take();
        }
        trace::cleared(dropped);
    }

    /// Invokes `pred` on each published entry, keeping those for which it
    /// returns `true`. The predicate may mutate the entry. Segments that
    /// end up empty are unlinked and freed; surviving segments keep their
    /// relative order, as do the entries within each segment.
    ///
    /// Runs under the list lock for its entire duration. Callers invoke
    /// this during global synchronisation phases when no local view is
    /// concurrently pushing or popping.
    pub fn update<F>(&self, mut pred: F)
    where
        F: FnMut(&mut E) -> bool,
    {
        let mut head = self.head.lock();
        let mut removed = 0;
        let mut link = &mut *head;
        loop {
            let now_empty = match link {
                None => break,
                Some(segment) => {
                    segment.update(&mut pred);
                    segment.is_empty()
                }
            };
            if now_empty {
                if let Some(mut empty) = link.take() {
                    *link = empty.next.take();
                    removed += 1;
                }
            } else if let Some(segment) = link {
                link = &mut segment.next;
            }
        }
        self.size.fetch_sub(removed, Ordering::Relaxed);
    }

    /// Invokes `f` on each published entry, head segment first.
    ///
    /// Runs under the list lock; see [`Worklist::update`] for the
    /// exclusivity expectations.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&E),
    {
        let head = self.head.lock();
        let mut current = head.as_deref();
        while let Some(segment) = current {
            segment.for_each(&mut f);
            current = segment.next.as_deref();
        }
    }
}

impl<E, const MIN_SEGMENT_SIZE: usize> Default for Worklist<E, MIN_SEGMENT_SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, const MIN_SEGMENT_SIZE: usize> Drop for Worklist<E, MIN_SEGMENT_SIZE> {
    fn drop(&mut self) {
        debug_assert!(self.is_empty(), "worklist dropped while holding segments");
        self.clear();
    }
}
