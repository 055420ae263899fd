//! AVL tree implementation in Rust, stored in a flat array.
//!
//! This crate provides an ordered map from `u64` keys to `u64` values. Nodes
//! live in a 1-indexed, growable arena and refer to each other by index; slot
//! 0 is the null sentinel and unused slots form an intrusive free list. Every
//! node caches its height and the number of its descendants, which keeps
//! `len`, `rank` and bulk construction cheap.
//!
//! Rebalancing is a strategy parameter: [`AvlTreeMap`] keeps the AVL height
//! bound, [`BstMap`] runs the same engine without rotations.
//!
//! ```
//! use avltree::AvlTreeMap;
//!
//! let mut tree = AvlTreeMap::new(1).unwrap();
//! for k in 1..=7 {
//!     tree.insert(k, k * 100).unwrap();
//! }
//! assert_eq!(tree.height(), 3);
//!
//! let hit = tree.search(4);
//! assert_eq!(hit.value, Some(400));
//! assert_eq!(hit.signed_probes(), 1);
//!
//! let removed = tree.remove(4).unwrap();
//! assert_eq!(removed.value, Some(400));
//! assert!(tree.search(4).signed_probes() < 0);
//! ```

mod config;
mod construction;
mod delete_operations;
mod driver;
mod error;
mod event_counter;
mod get_operations;
mod insert_operations;
mod iteration;
mod node;
mod node_arena;
mod range_queries;
mod rebalance;
mod render;
mod tree_structure;
mod types;
mod validation;

pub use config::{TreeConfig, VerifyMode};
pub use driver::{load_pairs, Command, Driver};
pub use error::{
    AvlResult, AvlResultExt, AvlTreeError, InitResult, KeyResult, ModifyResult,
};
pub use event_counter::EventCounter;
pub use iteration::{ItemIterator, KeyIterator, ValueIterator};
pub use node_arena::{FreeSlots, NodeArena, NodeArenaStats};
pub use range_queries::RangeIterator;
pub use rebalance::{Avl, Balancer, Unbalanced};
pub use types::{
    ArenaTreeMap, AvlTreeMap, BstMap, Insertion, Key, KvPair, Lookup, Node, NodeId, Value,
    DEFAULT_CAPACITY, MIN_CAPACITY, NULL_NODE,
};
