use std::cmp::Ordering;

use crate::error::MapError;

/// A node of the balanced tree.
///
/// Each child slot is exclusively owned; rotations exchange ownership by
/// value, so no link is ever aliased from outside the tree.
///
/// # Invariants
/// - `height` is 1 for a leaf and `1 + max(height(left), height(right))`
///   otherwise (an absent subtree counts as 0)
/// - `|height(left) - height(right)| <= 1` after every insert/remove
#[derive(Debug)]
struct Node<T> {
	item: T,
	height: i32,
	left: Option<Box<Node<T>>>,
	right: Option<Box<Node<T>>>,
}

impl<T> Node<T> {
	fn new(item: T) -> Self {
		Self { item, height: 1, left: None, right: None }
	}

	/// Recomputes this node's height from its children.
	fn update_height(&mut self) {
		self.height = 1 + height(&self.left).max(height(&self.right));
	}

	/// Balance factor: left height minus right height.
	fn balance(&self) -> i32 {
		height(&self.left) - height(&self.right)
	}
}

/// Height of an optional subtree (0 when absent).
fn height<T>(node: &Option<Box<Node<T>>>) -> i32 {
	node.as_ref().map_or(0, |n| n.height)
}

/// A self-balancing (AVL) binary search tree.
///
/// Stores at most one item per distinct ordering key and keeps every
/// subtree height-balanced through single and double rotations, so
/// lookup, insertion and removal all run in O(log n).
///
/// # Responsibilities
/// - Maintain the height-balance invariant across insert and remove
/// - Overwrite the stored item in place when a duplicate key is inserted
/// - Hand out mutable references to found items for in-place mutation
///
/// # Invariants
/// - An in-order traversal yields items in strictly ascending order
/// - `len` equals the number of distinct items currently stored
#[derive(Debug)]
pub struct AvlTree<T> {
	root: Option<Box<Node<T>>>,
	len: usize,
}

impl<T> Default for AvlTree<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> AvlTree<T> {
	/// Creates an empty tree.
	pub fn new() -> Self {
		Self { root: None, len: 0 }
	}

	/// Number of distinct items currently stored.
	pub fn len(&self) -> usize {
		self.len
	}

	/// Whether the tree stores no items.
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}
}

impl<T: Ord> AvlTree<T> {
	/// Looks up the item comparing equal to `probe`.
	///
	/// Standard iterative BST descent; never rebalances and never touches
	/// heights. Returns a mutable reference so the caller can update the
	/// stored item in place.
	///
	/// # Notes
	/// - The returned reference is only valid until the next structural
	///   mutation of the tree (`insert`/`remove` may relocate or destroy
	///   the node); the borrow checker enforces this.
	pub fn find(&mut self, probe: &T) -> Option<&mut T> {
		let mut current = self.root.as_deref_mut();
		while let Some(node) = current {
			match probe.cmp(&node.item) {
				Ordering::Equal => return Some(&mut node.item),
				Ordering::Less => current = node.left.as_deref_mut(),
				Ordering::Greater => current = node.right.as_deref_mut(),
			}
		}
		None
	}

	/// Inserts `item`, rebalancing every ancestor on the way back up.
	///
	/// If an item with the same ordering key is already stored, the stored
	/// item is overwritten in place (latest write wins) and the tree shape
	/// is left untouched.
	///
	/// Returns `true` if a new node was created, `false` on overwrite.
	pub fn insert(&mut self, item: T) -> bool {
		let mut created = false;
		let (root, _) = Self::insert_at(self.root.take(), item, &mut created);
		self.root = Some(root);
		if created {
			self.len += 1;
		}
		created
	}

	/// Removes the item comparing equal to `probe`.
	///
	/// Rebalances the ancestors of the removed node. Removing an absent
	/// key is a reported failure, never a silent success and never a
	/// panic.
	///
	/// # Errors
	/// Returns `MapError::MissingKey` if no stored item matches `probe`.
	pub fn remove(&mut self, probe: &T) -> Result<(), MapError> {
		let mut removed = false;
		self.root = Self::remove_at(self.root.take(), probe, &mut removed);
		if !removed {
			return Err(MapError::MissingKey);
		}
		self.len -= 1;
		Ok(())
	}

	/// Recursive insertion into an owned subtree.
	///
	/// Returns the (possibly rotated) subtree root together with the
	/// ordering of `item` against the root this call received. The parent
	/// uses that ordering to pick between the single and the double
	/// rotation case: it tells which side of the child the new item went
	/// to, and the child root cannot have rotated when the parent is the
	/// unbalanced node (a rotated child would not have grown).
	fn insert_at(
		node: Option<Box<Node<T>>>,
		item: T,
		created: &mut bool,
	) -> (Box<Node<T>>, Ordering) {
		let Some(mut node) = node else {
			*created = true;
			return (Box::new(Node::new(item)), Ordering::Equal);
		};

		let ord = item.cmp(&node.item);
		match ord {
			Ordering::Less => {
				let (child, child_ord) = Self::insert_at(node.left.take(), item, created);
				node.left = Some(child);
				node.update_height();
				if node.balance() > 1 {
					if child_ord == Ordering::Less {
						node = Self::rotate_right(node);
					} else {
						let left = node.left.take().expect("left-heavy node has a left child");
						node.left = Some(Self::rotate_left(left));
						node = Self::rotate_right(node);
					}
				}
			}
			Ordering::Greater => {
				let (child, child_ord) = Self::insert_at(node.right.take(), item, created);
				node.right = Some(child);
				node.update_height();
				if node.balance() < -1 {
					if child_ord == Ordering::Greater {
						node = Self::rotate_left(node);
					} else {
						let right = node.right.take().expect("right-heavy node has a right child");
						node.right = Some(Self::rotate_right(right));
						node = Self::rotate_left(node);
					}
				}
			}
			Ordering::Equal => {
				// Duplicate key: latest write wins, no shape change
				node.item = item;
			}
		}

		(node, ord)
	}

	/// Recursive removal from an owned subtree.
	///
	/// A node with two children has its item replaced by the in-order
	/// successor (leftmost item of the right subtree), which is then
	/// removed from that subtree; a node with at most one child is
	/// replaced by that child (or by nothing).
	fn remove_at(
		node: Option<Box<Node<T>>>,
		probe: &T,
		removed: &mut bool,
	) -> Option<Box<Node<T>>> {
		let mut node = node?;

		match probe.cmp(&node.item) {
			Ordering::Less => {
				node.left = Self::remove_at(node.left.take(), probe, removed);
			}
			Ordering::Greater => {
				node.right = Self::remove_at(node.right.take(), probe, removed);
			}
			Ordering::Equal => {
				*removed = true;
				node = match (node.left.take(), node.right.take()) {
					(None, None) => return None,
					(Some(child), None) | (None, Some(child)) => child,
					(Some(left), Some(right)) => {
						let (rest, successor) = Self::take_min(right);
						node.item = successor;
						node.left = Some(left);
						node.right = rest;
						node
					}
				};
			}
		}

		Some(Self::rebalance_after_remove(node))
	}

	/// Detaches the leftmost item of an owned subtree.
	///
	/// Returns the remaining subtree (rebalanced along the descent path)
	/// and the detached item.
	fn take_min(mut node: Box<Node<T>>) -> (Option<Box<Node<T>>>, T) {
		match node.left.take() {
			None => (node.right.take(), node.item),
			Some(left) => {
				let (rest, min) = Self::take_min(left);
				node.left = rest;
				(Some(Self::rebalance_after_remove(node)), min)
			}
		}
	}

	/// Recomputes a node's height and restores its balance after removal.
	///
	/// The removed key is gone and cannot be compared, so the rotation
	/// case is selected by the child's own balance factor: a left child
	/// with balance >= 0 takes a single right rotation, < 0 the
	/// left-then-right double rotation (mirrored on the right side).
	fn rebalance_after_remove(mut node: Box<Node<T>>) -> Box<Node<T>> {
		node.update_height();
		let balance = node.balance();

		if balance > 1 {
			let left_balance = node.left.as_ref().map_or(0, |n| n.balance());
			if left_balance >= 0 {
				Self::rotate_right(node)
			} else {
				let left = node.left.take().expect("left-heavy node has a left child");
				node.left = Some(Self::rotate_left(left));
				Self::rotate_right(node)
			}
		} else if balance < -1 {
			let right_balance = node.right.as_ref().map_or(0, |n| n.balance());
			if right_balance <= 0 {
				Self::rotate_left(node)
			} else {
				let right = node.right.take().expect("right-heavy node has a right child");
				node.right = Some(Self::rotate_right(right));
				Self::rotate_left(node)
			}
		} else {
			node
		}
	}

	/// Single right rotation around `parent`.
	///
	/// The left child becomes the subtree root; its right subtree is
	/// re-parented under `parent`. Heights are recomputed for exactly the
	/// two touched nodes, demoted child first, new root second.
	fn rotate_right(mut parent: Box<Node<T>>) -> Box<Node<T>> {
		let mut pivot = parent.left.take().expect("right rotation requires a left child");
		parent.left = pivot.right.take();
		parent.update_height();
		pivot.right = Some(parent);
		pivot.update_height();
		pivot
	}

	/// Single left rotation around `parent`, mirror of `rotate_right`.
	fn rotate_left(mut parent: Box<Node<T>>) -> Box<Node<T>> {
		let mut pivot = parent.right.take().expect("left rotation requires a right child");
		parent.right = pivot.left.take();
		parent.update_height();
		pivot.left = Some(parent);
		pivot.update_height();
		pivot
	}
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeSet;

	use rand::rngs::StdRng;
	use rand::seq::SliceRandom;
	use rand::{Rng, SeedableRng};

	use super::{AvlTree, Node};
	use crate::error::MapError;
	use crate::map::entry::Entry;

	/// Walks a subtree, asserting the height and balance invariants on
	/// every node, and returns the subtree height.
	fn check_subtree<T: Ord>(node: &Option<Box<Node<T>>>) -> i32 {
		let Some(node) = node else {
			return 0;
		};
		let left = check_subtree(&node.left);
		let right = check_subtree(&node.right);
		assert_eq!(node.height, 1 + left.max(right), "stale height");
		assert!((left - right).abs() <= 1, "balance factor out of range");
		node.height
	}

	fn collect_in_order<T: Ord + Clone>(node: &Option<Box<Node<T>>>, out: &mut Vec<T>) {
		if let Some(node) = node {
			collect_in_order(&node.left, out);
			out.push(node.item.clone());
			collect_in_order(&node.right, out);
		}
	}

	/// Asserts every structural invariant of the tree and returns its
	/// items in traversal order.
	fn assert_invariants<T: Ord + Clone>(tree: &AvlTree<T>) -> Vec<T> {
		check_subtree(&tree.root);
		let mut items = Vec::new();
		collect_in_order(&tree.root, &mut items);
		assert!(items.windows(2).all(|w| w[0] < w[1]), "in-order not strictly ascending");
		assert_eq!(tree.len(), items.len(), "len out of sync with stored items");
		items
	}

	#[test]
	fn ascending_inserts_stay_balanced() {
		let mut tree = AvlTree::new();
		for key in 0..100 {
			assert!(tree.insert(key));
			assert_invariants(&tree);
		}
		assert_eq!(assert_invariants(&tree), (0..100).collect::<Vec<_>>());
	}

	#[test]
	fn descending_inserts_stay_balanced() {
		let mut tree = AvlTree::new();
		for key in (0..100).rev() {
			assert!(tree.insert(key));
			assert_invariants(&tree);
		}
		assert_eq!(assert_invariants(&tree), (0..100).collect::<Vec<_>>());
	}

	#[test]
	fn double_rotation_cases() {
		// Left Right: 3, 1, 2 unbalances the root to the left with the new
		// key on the right of the left child.
		let mut tree = AvlTree::new();
		for key in [3, 1, 2] {
			tree.insert(key);
		}
		assert_eq!(assert_invariants(&tree), vec![1, 2, 3]);
		assert_eq!(tree.root.as_ref().map(|n| n.item), Some(2));

		// Right Left: mirror image.
		let mut tree = AvlTree::new();
		for key in [1, 3, 2] {
			tree.insert(key);
		}
		assert_eq!(assert_invariants(&tree), vec![1, 2, 3]);
		assert_eq!(tree.root.as_ref().map(|n| n.item), Some(2));
	}

	#[test]
	fn duplicate_insert_overwrites_in_place() {
		let mut tree = AvlTree::new();
		assert!(tree.insert(Entry::new(1, "a")));
		assert!(!tree.insert(Entry::new(1, "b")));

		assert_eq!(tree.len(), 1);
		let found = tree.find(&Entry::probe(1)).expect("key 1 present");
		assert_eq!(found.value, "b");
	}

	#[test]
	fn find_returns_mutable_reference() {
		let mut tree = AvlTree::new();
		tree.insert(Entry::new("ctx".to_owned(), 1u64));

		let entry = tree.find(&Entry::probe("ctx".to_owned())).expect("present");
		entry.value += 41;

		let entry = tree.find(&Entry::probe("ctx".to_owned())).expect("present");
		assert_eq!(entry.value, 42);
	}

	#[test]
	fn find_misses_report_none() {
		let mut tree = AvlTree::new();
		tree.insert(10);
		assert!(tree.find(&11).is_none());
		assert!(AvlTree::<i32>::new().find(&0).is_none());
	}

	#[test]
	fn remove_missing_key_is_reported() {
		let mut tree: AvlTree<i32> = AvlTree::new();
		assert_eq!(tree.remove(&42), Err(MapError::MissingKey));

		tree.insert(1);
		assert_eq!(tree.remove(&42), Err(MapError::MissingKey));
		assert_eq!(tree.len(), 1);
	}

	#[test]
	fn remove_two_child_node_uses_successor() {
		let mut tree = AvlTree::new();
		for key in [50, 25, 75, 10, 30, 60, 90] {
			tree.insert(key);
		}

		// 50 sits at the root with two children; its successor is 60.
		tree.remove(&50).expect("50 is present");
		assert_eq!(assert_invariants(&tree), vec![10, 25, 30, 60, 75, 90]);
		assert_eq!(tree.root.as_ref().map(|n| n.item), Some(60));
	}

	#[test]
	fn removals_keep_tree_balanced() {
		let mut tree = AvlTree::new();
		for key in 0..64 {
			tree.insert(key);
		}
		// Draining one side forces delete-side rotations.
		for key in 0..48 {
			tree.remove(&key).expect("key present");
			assert_invariants(&tree);
		}
		assert_eq!(assert_invariants(&tree), (48..64).collect::<Vec<_>>());
	}

	#[test]
	fn insert_then_remove_all_round_trips() {
		let mut rng = StdRng::seed_from_u64(7);
		let mut keys: Vec<u32> = (0..200).collect();
		keys.shuffle(&mut rng);

		let mut tree = AvlTree::new();
		for &key in &keys {
			assert!(tree.insert(key));
		}
		assert_eq!(tree.len(), keys.len());

		keys.shuffle(&mut rng);
		for &key in &keys {
			tree.remove(&key).expect("key present");
			assert_invariants(&tree);
		}
		assert!(tree.is_empty());
		assert!(tree.root.is_none());
	}

	#[test]
	fn random_operations_match_reference_model() {
		let mut rng = StdRng::seed_from_u64(0x5EED);
		let mut tree = AvlTree::new();
		let mut reference = BTreeSet::new();

		for _ in 0..2000 {
			let key: u16 = rng.random_range(0..300);
			if rng.random_bool(0.6) {
				assert_eq!(tree.insert(key), reference.insert(key));
			} else {
				assert_eq!(tree.remove(&key).is_ok(), reference.remove(&key));
			}
			assert_eq!(assert_invariants(&tree), reference.iter().copied().collect::<Vec<_>>());
		}
	}
}
