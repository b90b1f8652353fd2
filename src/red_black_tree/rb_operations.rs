use super::*;
use node::{Color, RBNode};
use ordering::DuplicatesPolicy;
use std::collections::VecDeque;

impl<R: KeyedRecord> RedBlackTree<R> {
    /// Creates a new empty `RedBlackTree`.
    pub fn new() -> Self {
        RedBlackTree { root: None }
    }

    /// Checks if the tree is empty.
    ///
    /// # Complexity:
    /// *O*(1) - checks if root is `None`.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Inserts a `record` into the tree while maintaining Red-Black Tree
    /// properties.
    ///
    /// Returns `true` iff the tree grew by one record. A record whose key
    /// matches a stored one is placed according to the key's duplicates
    /// policy; under [`DuplicatesPolicy::Refuse`] the insertion is
    /// rejected, the tree is unchanged and `false` is returned.
    ///
    /// # Complexity:
    /// - Average: *O*(log n)
    /// - Worst: *O*(log n) (due to balancing)
    /// - Best: *O*(1) (empty tree)
    pub fn insert(&mut self, record: R) -> bool {
        self.insert_rejecting(record).is_none()
    }

    /// Inserts every record of `records`, returning the rejected ones in
    /// input order.
    ///
    /// # Complexity:
    /// *O*(m log n) for m records.
    pub fn insert_all<I>(&mut self, records: I) -> Vec<R>
    where
        I: IntoIterator<Item = R>,
    {
        records
            .into_iter()
            .filter_map(|record| self.insert_rejecting(record))
            .collect()
    }

    /// Inserts `record`, handing it back if the duplicates policy
    /// refused it.
    fn insert_rejecting(&mut self, record: R) -> Option<R> {
        let (root, rejected) = Self::insert_recursive(self.root.take(), record);
        self.root = root;

        // Ensure root is black
        if let Some(root) = &mut self.root {
            root.color = Color::Black;
        }

        rejected
    }

    /// Recursively inserts a record and maintains Red-Black Tree properties.
    fn insert_recursive(
        node: Option<Box<RBNode<R>>>,
        record: R,
    ) -> (Option<Box<RBNode<R>>>, Option<R>) {
        let mut node = match node {
            None => return (Some(Box::new(RBNode::new(record))), None),
            Some(n) => n,
        };

        let descend_left = match record.key().compare(node.record.key()) {
            KeyOrdering::BelongsLeft => true,
            KeyOrdering::BelongsRight => false,
            KeyOrdering::Matches => match R::Key::duplicates_policy() {
                DuplicatesPolicy::Refuse => return (Some(node), Some(record)),
                // A Lifo duplicate lands in-order-before its equals, a
                // Fifo one in-order-after.
                DuplicatesPolicy::Lifo => true,
                DuplicatesPolicy::Fifo => false,
            },
        };

        let rejected = if descend_left {
            let (left, rejected) = Self::insert_recursive(node.left.take(), record);
            node.left = left;
            rejected
        } else {
            let (right, rejected) = Self::insert_recursive(node.right.take(), record);
            node.right = right;
            rejected
        };

        // Balance the tree
        (Some(node.red_balanced()), rejected)
    }

    /// Removes one record whose key matches `key` and returns it, or
    /// `None` if no record matches.
    ///
    /// When duplicates are stored, the leftmost matching record in tree
    /// order is removed: the oldest duplicate under
    /// [`DuplicatesPolicy::Fifo`], the newest under
    /// [`DuplicatesPolicy::Lifo`].
    ///
    /// # Complexity:
    /// - Average: *O*(log n)
    /// - Worst: *O*(log n) (due to balancing)
    pub fn remove(&mut self, key: &R::Key) -> Option<R> {
        let (root, _, removed) = Self::remove_recursive(self.root.take(), key);
        self.root = root;

        // Ensure root is black
        if removed.is_some() {
            if let Some(root) = &mut self.root {
                root.color = Color::Black;
            }
        }

        removed
    }

    /// Removes every record whose key matches `key`, leftmost first.
    ///
    /// # Complexity:
    /// *O*(m log n) for m matching records.
    pub fn remove_all(&mut self, key: &R::Key) -> Vec<R> {
        let mut removed = Vec::new();
        while let Some(record) = self.remove(key) {
            removed.push(record);
        }
        removed
    }

    /// Recursively removes a record and maintains Red-Black Tree
    /// properties.
    ///
    /// The boolean of the returned triple signals that the subtree came
    /// back one black short and the caller must repair or propagate.
    fn remove_recursive(
        node: Option<Box<RBNode<R>>>,
        key: &R::Key,
    ) -> (Option<Box<RBNode<R>>>, bool, Option<R>) {
        let node = match node {
            None => return (None, false, None),
            Some(n) => n,
        };

        match key.compare(node.record.key()) {
            KeyOrdering::BelongsLeft => {
                let (node, fix_height, removed) = Self::left_delete(node, key);
                (Some(node.red_balanced()), fix_height, removed)
            }
            KeyOrdering::BelongsRight => {
                let (node, fix_height, removed) = Self::right_delete(node, key);
                (Some(node.red_balanced()), fix_height, removed)
            }
            KeyOrdering::Matches => match R::Key::duplicates_policy() {
                DuplicatesPolicy::Refuse => Self::replace(node),
                _ => {
                    // Equal keys may sit deeper on the left; prefer the
                    // leftmost matching record over this one.
                    let (node, fix_height, removed) = Self::left_delete(node, key);
                    if removed.is_some() {
                        return (Some(node.red_balanced()), fix_height, removed);
                    }
                    Self::replace(node)
                }
            },
        }
    }

    /// Takes the record out of `node` and fuses its subtrees. Removing a
    /// black node costs the paths through it one black, so the fix
    /// signal is raised for the caller.
    fn replace(node: Box<RBNode<R>>) -> (Option<Box<RBNode<R>>>, bool, Option<R>) {
        let was_black = node.is_black();
        let RBNode { record, left, right, .. } = *node;
        (RBNode::fused(left, right), was_black, Some(record))
    }

    /// Continues the removal in the left child and repairs a reported
    /// black-height deficit. A red node absorbs the deficit while
    /// rebalancing; a black one rebalances and passes it upward.
    fn left_delete(
        mut node: Box<RBNode<R>>,
        key: &R::Key,
    ) -> (Box<RBNode<R>>, bool, Option<R>) {
        let was_black = node.is_black();
        let (left, fix_height, removed) = Self::remove_recursive(node.left.take(), key);
        node.left = left;

        if !fix_height {
            return (node, false, removed);
        }
        (node.left_balanced(), was_black, removed)
    }

    /// Mirror of [`left_delete`](Self::left_delete) for the right child.
    fn right_delete(
        mut node: Box<RBNode<R>>,
        key: &R::Key,
    ) -> (Box<RBNode<R>>, bool, Option<R>) {
        let was_black = node.is_black();
        let (right, fix_height, removed) = Self::remove_recursive(node.right.take(), key);
        node.right = right;

        if !fix_height {
            return (node, false, removed);
        }
        (node.right_balanced(), was_black, removed)
    }

    /// Checks if the tree stores a record whose key matches `key`.
    ///
    /// # Complexity:
    /// - Average: *O*(log n)
    /// - Worst: *O*(log n)
    /// - Best: *O*(1) (root match)
    pub fn contains(&self, key: &R::Key) -> bool {
        let mut cursor = &self.root;

        while let Some(current_node) = cursor {
            match key.compare(current_node.record.key()) {
                KeyOrdering::BelongsLeft => cursor = &current_node.left,
                KeyOrdering::BelongsRight => cursor = &current_node.right,
                KeyOrdering::Matches => return true,
            }
        }

        false
    }

    /// Returns a reference to a record whose key matches `key`, or
    /// `None`.
    ///
    /// With duplicates stored this is the leftmost match in tree order:
    /// the oldest under [`DuplicatesPolicy::Fifo`], the newest under
    /// [`DuplicatesPolicy::Lifo`].
    ///
    /// # Complexity:
    /// - Average: *O*(log n)
    /// - Worst: *O*(log n)
    pub fn fetch(&self, key: &R::Key) -> Option<&R> {
        Self::fetch_recursive(&self.root, key)
    }

    fn fetch_recursive<'a>(node: &'a Option<Box<RBNode<R>>>, key: &R::Key) -> Option<&'a R> {
        let node = node.as_ref()?;
        match key.compare(node.record.key()) {
            KeyOrdering::BelongsLeft => Self::fetch_recursive(&node.left, key),
            KeyOrdering::BelongsRight => Self::fetch_recursive(&node.right, key),
            KeyOrdering::Matches => match R::Key::duplicates_policy() {
                DuplicatesPolicy::Refuse => Some(&node.record),
                // Duplicates may sit deeper on the left.
                _ => Self::fetch_recursive(&node.left, key).or(Some(&node.record)),
            },
        }
    }

    /// Returns references to every record whose key matches `key`, in
    /// in-order sequence.
    ///
    /// # Complexity:
    /// *O*(log n + m) for m matching records.
    pub fn fetch_all(&self, key: &R::Key) -> Vec<&R> {
        let mut matches = Vec::new();
        Self::collect_matches(&self.root, key, &mut matches);
        matches
    }

    fn collect_matches<'a>(
        node: &'a Option<Box<RBNode<R>>>,
        key: &R::Key,
        out: &mut Vec<&'a R>,
    ) {
        if let Some(node) = node {
            match key.compare(node.record.key()) {
                KeyOrdering::BelongsLeft => Self::collect_matches(&node.left, key, out),
                KeyOrdering::BelongsRight => Self::collect_matches(&node.right, key, out),
                KeyOrdering::Matches => {
                    // Equal keys can surround a matching node on both sides.
                    Self::collect_matches(&node.left, key, out);
                    out.push(&node.record);
                    Self::collect_matches(&node.right, key, out);
                }
            }
        }
    }

    /// Returns a reference to the record at the end of the left spine,
    /// or `None` if the tree is empty.
    ///
    /// # Complexity:
    /// *O*(log n).
    pub fn leftmost(&self) -> Option<&R> {
        let mut cursor = self.root.as_ref()?;
        while let Some(left) = &cursor.left {
            cursor = left;
        }
        Some(&cursor.record)
    }

    /// Returns a reference to the record at the end of the right spine,
    /// or `None` if the tree is empty.
    ///
    /// # Complexity:
    /// *O*(log n).
    pub fn rightmost(&self) -> Option<&R> {
        let mut cursor = self.root.as_ref()?;
        while let Some(right) = &cursor.right {
            cursor = right;
        }
        Some(&cursor.record)
    }

    /// Returns the closest records strictly left and strictly right of
    /// `key` in tree order. Records whose keys match `key` are skipped,
    /// so around a run of duplicates both neighbours are outside the
    /// run. The key itself need not be stored.
    ///
    /// # Complexity:
    /// *O*(log n).
    pub fn neighbours_for(&self, key: &R::Key) -> (Option<&R>, Option<&R>) {
        (self.left_neighbour(key), self.right_neighbour(key))
    }

    /// Like [`neighbours_for`](Self::neighbours_for), but only for
    /// stored keys: returns `None` iff no record matches `key`.
    ///
    /// # Complexity:
    /// *O*(log n).
    pub fn neighbours_of(&self, key: &R::Key) -> Option<(Option<&R>, Option<&R>)> {
        if self.contains(key) {
            Some(self.neighbours_for(key))
        } else {
            None
        }
    }

    fn left_neighbour(&self, key: &R::Key) -> Option<&R> {
        let mut result = None;
        let mut cursor = &self.root;

        while let Some(node) = cursor {
            match key.compare(node.record.key()) {
                KeyOrdering::BelongsRight => {
                    result = Some(&node.record);
                    cursor = &node.right;
                }
                // A matching node is not a neighbour; its strict
                // predecessor is still further left.
                _ => cursor = &node.left,
            }
        }

        result
    }

    fn right_neighbour(&self, key: &R::Key) -> Option<&R> {
        let mut result = None;
        let mut cursor = &self.root;

        while let Some(node) = cursor {
            match key.compare(node.record.key()) {
                KeyOrdering::BelongsLeft => {
                    result = Some(&node.record);
                    cursor = &node.left;
                }
                _ => cursor = &node.right,
            }
        }

        result
    }

    /// Returns the number of stored records.
    ///
    /// # Complexity:
    /// *O*(n) - visits all nodes.
    pub fn count(&self) -> usize {
        Self::count_recursive(&self.root)
    }

    fn count_recursive(node: &Option<Box<RBNode<R>>>) -> usize {
        node.as_ref().map_or(0, |n| {
            1 + Self::count_recursive(&n.left) + Self::count_recursive(&n.right)
        })
    }

    /// Returns the number of nodes on the longest root-to-leaf path: 0
    /// for the empty tree, 1 for a singleton. Balancing keeps this
    /// within 2·⌈log₂(n+1)⌉.
    ///
    /// # Complexity:
    /// *O*(n) - visits all nodes.
    pub fn height(&self) -> usize {
        Self::height_recursive(&self.root)
    }

    fn height_recursive(node: &Option<Box<RBNode<R>>>) -> usize {
        node.as_ref().map_or(0, |n| {
            1 + Self::height_recursive(&n.left).max(Self::height_recursive(&n.right))
        })
    }

    /// Returns references to the records in the order of an inorder
    /// traversal, i.e. the tree order itself.
    ///
    /// # Complexity:
    /// *O*(n) - visits all nodes.
    pub fn in_order(&self) -> Vec<&R> {
        let mut result = Vec::new();
        Self::in_order_recursive(&self.root, &mut result);
        result
    }

    fn in_order_recursive<'a>(node: &'a Option<Box<RBNode<R>>>, out: &mut Vec<&'a R>) {
        if let Some(node) = node {
            Self::in_order_recursive(&node.left, out);
            out.push(&node.record);
            Self::in_order_recursive(&node.right, out);
        }
    }

    /// Returns references to the records in the order of a preorder
    /// traversal (each node before its subtrees).
    ///
    /// # Complexity:
    /// *O*(n) - visits all nodes.
    pub fn pre_order(&self) -> Vec<&R> {
        let mut result = Vec::new();
        Self::pre_order_recursive(&self.root, &mut result);
        result
    }

    fn pre_order_recursive<'a>(node: &'a Option<Box<RBNode<R>>>, out: &mut Vec<&'a R>) {
        if let Some(node) = node {
            out.push(&node.record);
            Self::pre_order_recursive(&node.left, out);
            Self::pre_order_recursive(&node.right, out);
        }
    }

    /// Returns references to the records in the order of a level order
    /// traversal (breadth-first from the root).
    ///
    /// # Complexity:
    /// *O*(n) - visits all nodes.
    pub fn level_order(&self) -> Vec<&R> {
        let mut result = Vec::new();
        let mut queue = VecDeque::new();

        if let Some(root) = &self.root {
            queue.push_back(root);
        }

        while let Some(node) = queue.pop_front() {
            result.push(&node.record);

            if let Some(left) = &node.left {
                queue.push_back(left);
            }
            if let Some(right) = &node.right {
                queue.push_back(right);
            }
        }

        result
    }
}

impl<R: KeyedRecord> Default for RedBlackTree<R> {
    fn default() -> Self {
        Self::new()
    }
}
