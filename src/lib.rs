//! # Triplet Deque
//!
//! A bounded double-ended queue whose elements live in fixed-capacity segments ("triplets")
//! linked into a doubly linked chain.
//!
//! [`TripletDeque`] is a drop-in alternative to `VecDeque` for workloads that need a hard ceiling
//! on the number of elements and want to avoid whole-buffer copies on growth.
//!
//! ## Key Features
//!
//! * **Segmented storage:** Elements are packed into segments of `triplet_length` slots. Only
//!   whole segments are allocated, linked and retired.
//! * **Bounded:** Every push checks a configurable `max_size` and fails with
//!   [`Error::CapacityExceeded`] (or returns `false` from the `offer_*` forms) once it is reached.
//! * **Segment reuse:** Segments that empty out are retired immediately and kept on a free list,
//!   so oscillating around a segment boundary does not reallocate.
//! * **Compact handles:** Segments link through [`IndexType`] handles. `u16` handles halve the
//!   link overhead for deques of up to 65534 elements.
//! * **Interoperability:** [`TripletDeque`] implements [`AnyDeque`] alongside `VecDeque`, and
//!   bulk removal accepts any [`AnySet`] (`HashSet`, `BTreeSet`, `hashbrown::HashSet`, slices).
//!
//! ## Configuration
//!
//! | Parameter | Default | Constraint |
//! |-----------|---------|------------|
//! | `triplet_length` | 5 | at least 1 |
//! | `max_size` | 1000 | below the handle range of `I` |
//!
//! ## Examples
//!
//! ### Both ends
//!
//! ```rust
//! use triplet_deque::{Error, TripletDeque};
//!
//! let mut deque: TripletDeque<&str> = TripletDeque::with_triplet_length(2).unwrap();
//!
//! deque.push_back("b").unwrap();
//! deque.push_back("c").unwrap();
//! deque.push_front("a").unwrap();
//! assert_eq!(deque.segment_count(), 2);
//!
//! assert_eq!(deque.pop_back(), Ok("c"));
//! assert_eq!(deque.pop_front(), Ok("a"));
//! assert_eq!(deque.pop_front(), Ok("b"));
//! assert_eq!(deque.pop_front(), Err(Error::Empty));
//! ```
//!
//! ### Bounded capacity
//!
//! ```rust
//! use triplet_deque::{DequeConfig, Error, TripletDeque};
//!
//! let config = DequeConfig::new().with_max_size(2);
//! let mut deque: TripletDeque<i32> = TripletDeque::with_config(config).unwrap();
//!
//! assert!(deque.offer(1));
//! assert!(deque.offer(2));
//! assert!(!deque.offer(3));
//! assert_eq!(deque.push_front(0), Err(Error::CapacityExceeded { max_size: 2 }));
//! ```
//!
//! ### Bulk removal
//!
//! ```rust
//! use std::collections::HashSet;
//! use triplet_deque::TripletDeque;
//!
//! let mut deque: TripletDeque<i32> = (1..=8).collect();
//! let unwanted: HashSet<i32> = [2, 4, 6].into_iter().collect();
//!
//! deque.remove_all(&unwanted);
//! deque.retain(|v| *v != 8);
//! assert_eq!(deque.to_vec(), vec![1, 3, 5, 7]);
//! ```

// --- Module Declarations ---

mod chain;
pub mod config;
pub mod deque;
pub mod error;
pub mod iter;
pub mod set;
pub mod utils;

// --- Re-exports ---

pub use config::{DEFAULT_MAX_SIZE, DEFAULT_TRIPLET_LENGTH, DequeConfig};
pub use deque::{AnyDeque, TripletDeque};
pub use error::{Error, Result};
pub use iter::{CursorMut, IntoIter, Iter};
pub use set::AnySet;
pub use utils::index_type::IndexType;
