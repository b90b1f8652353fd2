use super::ordering::KeyedRecord;

/// Node color in a Red-Black Tree.
///
/// Red-Black Trees maintain balance using color properties:
/// - Every node is either red or black
/// - The root is always black
/// - Red nodes cannot have red children
/// - All paths from root to leaves have the same number of black nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

/// A node in a Red-Black Tree of keyed records.
///
/// Each node carries:
/// - A `record`, ordered by its key
/// - Optional left/right child nodes (wrapped in `Box`)
/// - A color (Red or Black) for maintaining balance properties
#[derive(Debug, Clone)]
pub struct RBNode<R: KeyedRecord> {
    /// The record stored in this node.
    pub record: R,

    /// Left child node.
    pub left: Option<Box<RBNode<R>>>,

    /// Right child node.
    pub right: Option<Box<RBNode<R>>>,

    /// Color of this node (Red or Black).
    pub color: Color,
}

impl<R: KeyedRecord> RBNode<R> {
    /// Creates a new Red `RBNode` holding `record`, with no children.
    ///
    /// New nodes are initially red as they will be rebalanced during insertion.
    pub fn new(record: R) -> Self {
        RBNode {
            record,
            left: None,
            right: None,
            color: Color::Red,
        }
    }

    /// Checks if this node is red.
    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    /// Checks if this node is black.
    pub fn is_black(&self) -> bool {
        self.color == Color::Black
    }

    /// Checks if a node option is red (None is considered black).
    pub fn is_red_node(node: &Option<Box<Self>>) -> bool {
        node.as_ref().map_or(false, |n| n.is_red())
    }

    /// Checks if a node option is an actual black node (not an empty leaf).
    pub fn is_black_node(node: &Option<Box<Self>>) -> bool {
        node.as_ref().map_or(false, |n| n.is_black())
    }
}
