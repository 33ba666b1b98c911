//! Key registry: an AVL tree mapping each distinct key to a stable node id.
//!
//! Nodes live in an arena and refer to their children by index. Ids are
//! handed out in insertion order, starting at zero, and never change: the
//! tree rotates links between nodes, it never moves them.

use std::cmp::Ordering;

/// Index of a node in the registry arena.
pub type NodeId = usize;

#[derive(Debug)]
struct TreeNode {
    key: Box<[u8]>,
    left: Option<NodeId>,
    right: Option<NodeId>,
    /// Height of the right subtree minus height of the left one.
    balance: i8,
}

/// Balanced search tree over byte-string keys.
#[derive(Debug, Default)]
pub struct Registry {
    nodes: Vec<TreeNode>,
    root: Option<NodeId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Key stored for `id`.
    pub fn key(&self, id: NodeId) -> &[u8] {
        &self.nodes[id].key
    }

    /// Look up `key` without inserting it.
    pub fn get(&self, key: &[u8]) -> Option<NodeId> {
        let mut cursor = self.root;
        while let Some(at) = cursor {
            let node = &self.nodes[at];
            cursor = match key.cmp(&node.key) {
                Ordering::Equal => return Some(at),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Return the id for `key`, inserting it first if it is new.
    pub fn find_or_insert(&mut self, key: &[u8]) -> NodeId {
        let (root, id, _) = self.insert_into(self.root, key);
        self.root = Some(root);
        id
    }

    /// Nodes in ascending key order.
    pub fn in_order(&self) -> InOrder<'_> {
        let mut iter = InOrder {
            registry: self,
            stack: Vec::new(),
        };
        iter.descend_left(self.root);
        iter
    }

    /// Height of the tree; zero when empty.
    pub fn height(&self) -> usize {
        fn walk(registry: &Registry, at: Option<NodeId>) -> usize {
            at.map_or(0, |id| {
                let node = &registry.nodes[id];
                1 + walk(registry, node.left).max(walk(registry, node.right))
            })
        }
        walk(self, self.root)
    }

    fn alloc(&mut self, key: &[u8]) -> NodeId {
        self.nodes.push(TreeNode {
            key: key.into(),
            left: None,
            right: None,
            balance: 0,
        });
        self.nodes.len() - 1
    }

    /// Insert `key` below `slot`.
    ///
    /// Returns the new root of the subtree, the id holding `key`, and whether
    /// the subtree grew taller.
    fn insert_into(&mut self, slot: Option<NodeId>, key: &[u8]) -> (NodeId, NodeId, bool) {
        let Some(at) = slot else {
            let id = self.alloc(key);
            return (id, id, true);
        };

        match key.cmp(&self.nodes[at].key) {
            Ordering::Equal => (at, at, false),
            Ordering::Less => {
                let (child, id, grew) = self.insert_into(self.nodes[at].left, key);
                self.nodes[at].left = Some(child);
                if !grew {
                    return (at, id, false);
                }
                match self.nodes[at].balance {
                    1 => {
                        self.nodes[at].balance = 0;
                        (at, id, false)
                    }
                    0 => {
                        self.nodes[at].balance = -1;
                        (at, id, true)
                    }
                    _ => (self.rotate_left_heavy(at), id, false),
                }
            }
            Ordering::Greater => {
                let (child, id, grew) = self.insert_into(self.nodes[at].right, key);
                self.nodes[at].right = Some(child);
                if !grew {
                    return (at, id, false);
                }
                match self.nodes[at].balance {
                    -1 => {
                        self.nodes[at].balance = 0;
                        (at, id, false)
                    }
                    0 => {
                        self.nodes[at].balance = 1;
                        (at, id, true)
                    }
                    _ => (self.rotate_right_heavy(at), id, false),
                }
            }
        }
    }

    /// Restore balance at `s`, whose left subtree just outgrew the right by two.
    fn rotate_left_heavy(&mut self, s: NodeId) -> NodeId {
        let Some(r) = self.nodes[s].left else {
            unreachable!("left-heavy node without a left child");
        };

        if self.nodes[r].balance == -1 {
            self.nodes[s].left = self.nodes[r].right;
            self.nodes[r].right = Some(s);
            self.nodes[s].balance = 0;
            self.nodes[r].balance = 0;
            return r;
        }

        let Some(p) = self.nodes[r].right else {
            unreachable!("right-leaning child without a right child");
        };
        self.nodes[r].right = self.nodes[p].left;
        self.nodes[p].left = Some(r);
        self.nodes[s].left = self.nodes[p].right;
        self.nodes[p].right = Some(s);

        let (s_balance, r_balance) = match self.nodes[p].balance {
            -1 => (1, 0),
            1 => (0, -1),
            _ => (0, 0),
        };
        self.nodes[s].balance = s_balance;
        self.nodes[r].balance = r_balance;
        self.nodes[p].balance = 0;
        p
    }

    /// Mirror image of [`Self::rotate_left_heavy`].
    fn rotate_right_heavy(&mut self, s: NodeId) -> NodeId {
        let Some(r) = self.nodes[s].right else {
            unreachable!("right-heavy node without a right child");
        };

        if self.nodes[r].balance == 1 {
            self.nodes[s].right = self.nodes[r].left;
            self.nodes[r].left = Some(s);
            self.nodes[s].balance = 0;
            self.nodes[r].balance = 0;
            return r;
        }

        let Some(p) = self.nodes[r].left else {
            unreachable!("left-leaning child without a left child");
        };
        self.nodes[r].left = self.nodes[p].right;
        self.nodes[p].right = Some(r);
        self.nodes[s].right = self.nodes[p].left;
        self.nodes[p].left = Some(s);

        let (s_balance, r_balance) = match self.nodes[p].balance {
            1 => (-1, 0),
            -1 => (0, 1),
            _ => (0, 0),
        };
        self.nodes[s].balance = s_balance;
        self.nodes[r].balance = r_balance;
        self.nodes[p].balance = 0;
        p
    }
}

/// In-order iterator returned by [`Registry::in_order`].
#[derive(Debug)]
pub struct InOrder<'a> {
    registry: &'a Registry,
    stack: Vec<NodeId>,
}

impl InOrder<'_> {
    fn descend_left(&mut self, mut at: Option<NodeId>) {
        while let Some(id) = at {
            self.stack.push(id);
            at = self.registry.nodes[id].left;
        }
    }
}

impl Iterator for InOrder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.descend_left(self.registry.nodes[id].right);
        Some(id)
    }
}
