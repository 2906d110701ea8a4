use rand::Rng;

use crate::error::ModelError;

/// Number of tracked symbols: the space plus `'a'..='z'`.
pub const SYMBOL_COUNT: usize = 27;

/// A histogram of the 27 tracked symbols with weighted random draws.
///
/// Bucket 0 counts the space, bucket `i` (1..=26) the letter
/// `(i - 1) + 'a'`. Counts only ever grow; a draw interprets them as
/// categorical weights.
///
/// # Responsibilities
/// - Accumulate per-character occurrence counts during training
/// - Draw the next character with probability proportional to its count
///
/// # Invariants
/// - Every count is non-negative and never shrinks
#[derive(Debug, Clone, Default)]
pub struct CharDistribution {
	occurrences: [u64; SYMBOL_COUNT],
}

impl CharDistribution {
	/// Creates an empty distribution (all counts zero).
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a distribution from every character of `text`.
	pub fn from_text(text: &str) -> Self {
		let mut distribution = Self::new();
		for c in text.chars() {
			distribution.add_letter(c);
		}
		distribution
	}

	/// Bucket index for a character.
	///
	/// Lowercase ASCII letters land on buckets 1..=26; the space and any
	/// other character fold into bucket 0. The folding is a deliberate
	/// simplification carried through the whole pipeline, so generated
	/// output stays within the 27-symbol alphabet.
	fn bucket(c: char) -> usize {
		if c.is_ascii_lowercase() {
			(c as usize - 'a' as usize) + 1
		} else {
			0
		}
	}

	/// Character represented by a bucket index.
	fn symbol(bucket: usize) -> char {
		if bucket == 0 {
			' '
		} else {
			(b'a' + (bucket as u8 - 1)) as char
		}
	}

	/// Records one occurrence of `c`.
	pub fn add_letter(&mut self, c: char) {
		self.occurrences[Self::bucket(c)] += 1;
	}

	/// Draws a character with probability proportional to its count.
	///
	/// The draw is uniform over `[1, sum(counts)]`, located by a
	/// cumulative scan in fixed bucket order 0..=26; buckets with zero
	/// weight are skipped and have zero probability. The random source is
	/// supplied by the caller, so seeded generators make draws
	/// reproducible.
	///
	/// # Errors
	/// Returns `ModelError::EmptyDistribution` if every count is zero.
	pub fn sample<R: Rng>(&self, rng: &mut R) -> Result<char, ModelError> {
		let total: u64 = self.occurrences.iter().sum();
		if total == 0 {
			return Err(ModelError::EmptyDistribution);
		}

		let mut draw = rng.random_range(1..=total);
		for (bucket, &count) in self.occurrences.iter().enumerate() {
			if count == 0 {
				continue;
			}
			if draw <= count {
				return Ok(Self::symbol(bucket));
			}
			draw -= count;
		}

		// Unreachable: the counts sum to total and draw <= total
		Err(ModelError::EmptyDistribution)
	}

	/// Read-only snapshot of the 27 counts.
	pub fn occurrences(&self) -> &[u64; SYMBOL_COUNT] {
		&self.occurrences
	}

	/// Sum of all counts.
	pub fn total(&self) -> u64 {
		self.occurrences.iter().sum()
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::CharDistribution;
	use crate::error::ModelError;

	#[test]
	fn letters_and_spaces_map_to_their_buckets() {
		let distribution = CharDistribution::from_text("aab z");

		let counts = distribution.occurrences();
		assert_eq!(counts[0], 1, "space bucket");
		assert_eq!(counts[1], 2, "'a' bucket");
		assert_eq!(counts[2], 1, "'b' bucket");
		assert_eq!(counts[26], 1, "'z' bucket");
		assert_eq!(distribution.total(), 5);
	}

	#[test]
	fn non_letter_characters_fold_into_the_space_bucket() {
		let distribution = CharDistribution::from_text("A.!7é");
		assert_eq!(distribution.occurrences()[0], 5);
		assert_eq!(distribution.total(), 5);
	}

	#[test]
	fn sample_only_returns_recorded_characters() {
		let distribution = CharDistribution::from_text("cat hat");
		let mut rng = StdRng::seed_from_u64(1);

		for _ in 0..1000 {
			let c = distribution.sample(&mut rng).expect("non-empty distribution");
			assert!(" cath".contains(c), "unexpected character {c:?}");
		}
	}

	#[test]
	fn sample_frequencies_track_the_counts() {
		// 'a' weighted 3:1 against 'b'.
		let distribution = CharDistribution::from_text("aaab");
		let mut rng = StdRng::seed_from_u64(2);

		let trials = 20_000;
		let mut hits = 0u32;
		for _ in 0..trials {
			if distribution.sample(&mut rng).expect("non-empty distribution") == 'a' {
				hits += 1;
			}
		}

		let frequency = f64::from(hits) / f64::from(trials);
		assert!((frequency - 0.75).abs() < 0.02, "empirical frequency {frequency} too far from 0.75");
	}

	#[test]
	fn empty_distribution_is_an_error() {
		let distribution = CharDistribution::new();
		let mut rng = StdRng::seed_from_u64(3);
		assert_eq!(distribution.sample(&mut rng), Err(ModelError::EmptyDistribution));
	}

	#[test]
	fn single_bucket_always_wins() {
		let mut distribution = CharDistribution::new();
		distribution.add_letter('q');
		let mut rng = StdRng::seed_from_u64(4);

		for _ in 0..50 {
			assert_eq!(distribution.sample(&mut rng), Ok('q'));
		}
	}
}
