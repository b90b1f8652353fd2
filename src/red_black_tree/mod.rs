mod balance;
mod rb_operations;

/// Key ordering and duplicates-policy contracts for stored records.
pub mod ordering;

/// Internal implementation of `RedBlackTree` nodes.
pub mod node;

/// For visualizing (Graphviz, DOT format).
pub mod visualization;

use node::RBNode;
use ordering::{KeyOrdering, KeyedRecord, OrderedKey};

/// A self-balancing Red-Black Tree of keyed records.
///
/// Maintains balance properties:
/// - Every node is either red or black
/// - The root is always black
/// - All leaves (NIL) are black
/// - Red nodes cannot have red children
/// - All paths from root to leaves contain the same number of black nodes
///
/// Ordering is delegated to the record's key type: a total 3-way
/// comparator decides which subtree a record belongs to, and the key's
/// [`DuplicatesPolicy`](ordering::DuplicatesPolicy) decides whether equal
/// keys are rejected or queued Fifo/Lifo among their equals.
///
/// The key of a stored record is read at mutation time only. If a key's
/// ordering changes while its record is stored, the record keeps its old
/// position; remove and reinsert it to reindex.
#[derive(Debug)]
pub struct RedBlackTree<R: KeyedRecord> {
    /// Root node of the tree (private to maintain invariants)
    root: Option<Box<RBNode<R>>>,
}

impl<R: KeyedRecord> RedBlackTree<R> {
    /// Check if the tree maintains Red-Black properties.
    pub fn is_valid_red_black_tree(&self) -> bool {
        // Property 1: Root must be black
        if let Some(root) = &self.root {
            if root.is_red() {
                return false;
            }
        }

        // Check other properties recursively
        self.check_red_property(&self.root) && self.check_black_height(&self.root).is_some()
    }

    /// Checks that no red node has a red child.
    fn check_red_property(&self, node: &Option<Box<RBNode<R>>>) -> bool {
        match node {
            Some(node) => {
                if node.is_red() {
                    // Red node cannot have red children
                    if RBNode::is_red_node(&node.left) || RBNode::is_red_node(&node.right) {
                        return false;
                    }
                }
                self.check_red_property(&node.left) && self.check_red_property(&node.right)
            }
            None => true,
        }
    }

    /// Checks that all paths have the same black height.
    /// Returns Some(height) if valid, None if invalid.
    fn check_black_height(&self, node: &Option<Box<RBNode<R>>>) -> Option<usize> {
        match node {
            None => Some(1), // NIL nodes are black
            Some(node) => {
                let left_height = self.check_black_height(&node.left)?;
                let right_height = self.check_black_height(&node.right)?;

                if left_height != right_height {
                    return None;
                }

                if node.is_black() {
                    Some(left_height + 1)
                } else {
                    Some(left_height)
                }
            }
        }
    }

    /// Check that the in-order record sequence never steps backwards
    /// under the key comparator.
    ///
    /// Equal keys are allowed to sit next to each other (the duplicates
    /// policy places them); only a `BelongsLeft` step is a violation.
    pub fn is_valid_ordering(&self) -> bool {
        self.in_order().windows(2).all(|pair| {
            !matches!(
                pair[1].key().compare(pair[0].key()),
                KeyOrdering::BelongsLeft
            )
        })
    }
}
