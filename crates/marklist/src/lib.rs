//! A segmented work-stealing worklist for parallel producers and consumers.
//!
//! `marklist` buffers work items between worker threads the way a tracing
//! garbage collector distributes marking work: each worker accumulates
//! entries in private fixed-capacity segments and publishes them to a shared
//! pool in whole-segment batches; idle workers refill by stealing one
//! segment at a time. Batching amortises synchronisation, so the common
//! push/pop paths are as cheap as a private stack.
//!
//! # Features
//!
//! - **Lock-free hot path**: local push and pop never touch the shared lock
//! - **Segment-granular stealing**: the shared pool hands out whole batches,
//!   one mutex-protected list operation per `MIN_SEGMENT_SIZE` entries
//! - **Bulk reorganisation**: merge, swap, clear, and in-place filtering of
//!   entire worklists at phase boundaries
//! - **Termination probes**: approximate emptiness queries for distributed
//!   termination detection
//!
//! # Quick Start
//!
//! ```
//! use marklist::Worklist;
//!
//! let worklist = Worklist::<u64, 64>::new();
//!
//! let mut local = worklist.local();
//! local.push(1);
//! local.push(2);
//! assert_eq!(local.pop(), Some(2));
//!
//! // Make the rest visible to other workers.
//! local.publish();
//! assert!(!worklist.is_empty());
//!
//! std::thread::scope(|scope| {
//!     scope.spawn(|| {
//!         let mut stealer = worklist.local();
//!         assert_eq!(stealer.pop(), Some(1));
//!     });
//! });
//! ```
//!
//! # Ordering
//!
//! A single view that pushes and pops without publishing behaves exactly
//! like a stack. Once segments circulate through the shared pool there is
//! no ordering between workers; treat the worklist as an unordered pool.
//!
//! # Thread Safety
//!
//! [`Worklist`] is `Sync` for `Send` entries and is shared by reference.
//! [`Local`] is exclusively owned by one worker; its operations take
//! `&mut self` and never block except on the pool's short list-surgery
//! critical sections.

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod local;
mod segment;
mod trace;
mod worklist;

pub use local::Local;
pub use worklist::Worklist;
