use std::cmp::Ordering;

/// An ordered key/value tuple.
///
/// Entries compare and test equal **by key only**; the value is carried
/// alongside but never participates in comparisons. This keeps the
/// comparison semantics explicit instead of letting a derived ordering
/// accidentally become value-sensitive.
///
/// # Invariants
/// - Within a tree, at most one entry exists per distinct key.
#[derive(Debug, Clone)]
pub struct Entry<K, V> {
	/// Lookup key, the sole input to ordering and equality.
	pub key: K,
	/// Payload, free to be mutated in place through `find`.
	pub value: V,
}

impl<K, V> Entry<K, V> {
	/// Creates an entry from a key and a value.
	pub fn new(key: K, value: V) -> Self {
		Self { key, value }
	}
}

impl<K, V: Default> Entry<K, V> {
	/// Builds a lookup probe for `key`.
	///
	/// The default value is a placeholder; it is ignored by every
	/// comparison, so a probe matches the stored entry with the same key
	/// regardless of the stored value.
	pub fn probe(key: K) -> Self {
		Self { key, value: V::default() }
	}
}

impl<K: Ord, V> PartialEq for Entry<K, V> {
	fn eq(&self, other: &Self) -> bool {
		self.key == other.key
	}
}

impl<K: Ord, V> Eq for Entry<K, V> {}

impl<K: Ord, V> PartialOrd for Entry<K, V> {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl<K: Ord, V> Ord for Entry<K, V> {
	fn cmp(&self, other: &Self) -> Ordering {
		self.key.cmp(&other.key)
	}
}

#[cfg(test)]
mod tests {
	use super::Entry;

	#[test]
	fn comparisons_ignore_the_value() {
		let a = Entry::new(3, "left");
		let b = Entry::new(3, "right");
		let c = Entry::new(7, "left");

		assert_eq!(a, b);
		assert!(a < c);
		assert!(c > b);
	}

	#[test]
	fn probe_matches_stored_entry() {
		let stored = Entry::new("abc".to_owned(), 42u64);
		let probe: Entry<String, u64> = Entry::probe("abc".to_owned());
		assert_eq!(stored, probe);
	}
}
