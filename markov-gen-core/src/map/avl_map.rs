use crate::error::MapError;
use crate::map::avl_tree::AvlTree;
use crate::map::entry::Entry;

/// An ordered key/value map backed by [`AvlTree`].
///
/// Thin adapter translating key-based calls into entry probes: a probe
/// carries the key plus a placeholder value that every comparison
/// ignores, so lookups and removals never need the stored value.
///
/// # Responsibilities
/// - Expose key -> value semantics over the entry tree
/// - Upsert on insertion: a second insert with the same key overwrites
///   the stored value (latest write wins)
/// - Hand out mutable value references for in-place mutation
#[derive(Debug)]
pub struct AvlMap<K, V> {
	tree: AvlTree<Entry<K, V>>,
}

impl<K, V> Default for AvlMap<K, V> {
	fn default() -> Self {
		Self { tree: AvlTree::new() }
	}
}

impl<K: Ord, V> AvlMap<K, V> {
	/// Creates an empty map.
	pub fn new() -> Self {
		Self { tree: AvlTree::new() }
	}

	/// Number of distinct keys currently stored.
	pub fn size(&self) -> usize {
		self.tree.len()
	}

	/// Whether the map stores no entries, i.e. `size == 0`.
	pub fn is_empty(&self) -> bool {
		self.tree.is_empty()
	}
}

impl<K: Ord + Clone, V: Default> AvlMap<K, V> {
	/// Looks up `key` and returns a mutable reference to its value.
	///
	/// A miss is a normal empty result, not an error.
	///
	/// # Notes
	/// - The reference is only valid until the next structural mutation
	///   of the map (`insert`/`remove`); the borrow checker enforces this.
	pub fn find(&mut self, key: &K) -> Option<&mut V> {
		self.tree.find(&Entry::probe(key.clone())).map(|entry| &mut entry.value)
	}

	/// Inserts `key -> value` and returns a reference to the stored value.
	///
	/// If `key` is already present its value is overwritten in place and
	/// the tree shape is untouched; `size` grows only on true insertion.
	pub fn insert(&mut self, key: K, value: V) -> &mut V {
		self.tree.insert(Entry::new(key.clone(), value));
		// The entry is guaranteed present right after insertion
		let entry = self.tree.find(&Entry::probe(key)).expect("entry just inserted");
		&mut entry.value
	}

	/// Removes `key` and its value.
	///
	/// # Errors
	/// Returns `MapError::MissingKey` if `key` is not in the map.
	pub fn remove(&mut self, key: &K) -> Result<(), MapError> {
		self.tree.remove(&Entry::probe(key.clone()))
	}
}
