//! Balancing strategies for ArenaTreeMap.
//!
//! The binary-search-tree engine calls [`Balancer::rebalance`] on every
//! subtree root it touches while unwinding an insertion, a deletion, or the
//! extraction of a replacement node. The strategy returns the (possibly new)
//! root of that subtree and the engine stores it in the parent link.

use crate::error::{AvlTreeError, TreeResult};
use crate::node_arena::NodeArena;
use crate::types::{NodeId, NULL_NODE};
use std::fmt::Debug;
use tracing::trace;

/// Post-mutation hook applied bottom-up along every modified path.
///
/// Called with a subtree root whose height and subtree count have already
/// been recomputed from its children.
pub trait Balancer: Debug + Clone + Default {
    /// True if the strategy keeps every balance factor within [-1, 1].
    const SELF_BALANCING: bool;

    /// Restore the strategy's shape invariant at `subtree` and return the
    /// index now rooting that subtree.
    fn rebalance(arena: &mut NodeArena, subtree: NodeId) -> TreeResult<NodeId>;
}

/// AVL rebalancing with single and double rotations.
#[derive(Debug, Clone, Copy, Default)]
pub struct Avl;

/// No rebalancing; the tree keeps whatever shape insertion order gives it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbalanced;

impl Balancer for Unbalanced {
    const SELF_BALANCING: bool = false;

    #[inline]
    fn rebalance(_arena: &mut NodeArena, subtree: NodeId) -> TreeResult<NodeId> {
        Ok(subtree)
    }
}

impl Balancer for Avl {
    const SELF_BALANCING: bool = true;

    fn rebalance(arena: &mut NodeArena, subtree: NodeId) -> TreeResult<NodeId> {
        if subtree == NULL_NODE {
            return Ok(NULL_NODE);
        }

        match arena.balance_factor(subtree) {
            -1..=1 => Ok(subtree),
            -2 => {
                let right = arena[subtree].right;
                match arena.balance_factor(right) {
                    1 => {
                        // right-left
                        arena[subtree].right = rotate_right(arena, right);
                        Ok(rotate_left(arena, subtree))
                    }
                    -1 | 0 => Ok(rotate_left(arena, subtree)),
                    other => Err(AvlTreeError::corrupted_tree(
                        "Rebalance",
                        &format!(
                            "unexpected balance factor {} under right-heavy node {}",
                            other, subtree
                        ),
                    )),
                }
            }
            2 => {
                let left = arena[subtree].left;
                match arena.balance_factor(left) {
                    -1 => {
                        // left-right
                        arena[subtree].left = rotate_left(arena, left);
                        Ok(rotate_right(arena, subtree))
                    }
                    1 | 0 => Ok(rotate_right(arena, subtree)),
                    other => Err(AvlTreeError::corrupted_tree(
                        "Rebalance",
                        &format!(
                            "unexpected balance factor {} under left-heavy node {}",
                            other, subtree
                        ),
                    )),
                }
            }
            other => Err(AvlTreeError::corrupted_tree(
                "Rebalance",
                &format!("node {} has balance factor {}", subtree, other),
            )),
        }
    }
}

/// Rotate `root` left around its right child and return the new subtree root.
pub(crate) fn rotate_left(arena: &mut NodeArena, root: NodeId) -> NodeId {
    let pivot = arena[root].right;

    arena[root].right = arena[pivot].left;
    arena.update_height(root);

    arena[pivot].left = root;
    arena.update_height(pivot);

    // pivot now owns exactly what root owned
    arena[pivot].subtree_count = arena[root].subtree_count;
    arena.update_count(root);

    trace!(root, pivot, "rotate left");
    pivot
}

/// Rotate `root` right around its left child and return the new subtree root.
pub(crate) fn rotate_right(arena: &mut NodeArena, root: NodeId) -> NodeId {
    let pivot = arena[root].left;

    arena[root].left = arena[pivot].right;
    arena.update_height(root);

    arena[pivot].right = root;
    arena.update_height(pivot);

    arena[pivot].subtree_count = arena[root].subtree_count;
    arena.update_count(root);

    trace!(root, pivot, "rotate right");
    pivot
}
