use thiserror::Error;

/// Errors reported by the map layer.
///
/// A failed lookup is not part of this taxonomy: `find` reports a miss
/// with a plain `None`. Only operations that must not fail silently
/// surface here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapError {
	/// `remove` was called with a key that is not in the map.
	#[error("no matching key to delete")]
	MissingKey,
}

/// Errors reported by the model layer.
///
/// All variants are local, recoverable conditions; callers decide
/// whether to retry, substitute a default, or stop.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
	/// A character was requested from a distribution with all-zero counts.
	#[error("cannot sample from an empty distribution")]
	EmptyDistribution,

	/// The requested context window length is zero.
	#[error("window size must be at least 1")]
	WindowTooSmall,

	/// The training text is too short to fill a single context window.
	#[error("training text has {length} characters, need at least {window_size}")]
	TextTooShort {
		/// Character count of the supplied text.
		length: usize,
		/// Requested context window length.
		window_size: usize,
	},
}
