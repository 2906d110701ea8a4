use log::{debug, warn};
use rand::Rng;

use super::char_distribution::CharDistribution;
use crate::error::ModelError;
use crate::map::AvlMap;

/// Result of a generation run.
///
/// Early termination is an expected outcome, not an error: the partial
/// text produced so far is returned alongside the flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
	/// The generated character sequence, starting with the seed window.
	pub text: String,
	/// `true` if the target length was reached, `false` if generation
	/// stalled on a context window with no recorded distribution.
	pub completed: bool,
}

/// An order-k Markov character generator.
///
/// Slides a fixed-size window over a training text, mapping each
/// distinct window to the distribution of the characters observed right
/// after it, then synthesizes text by repeated windowed lookup and
/// weighted draw. The context map is the balanced-tree `AvlMap`, which
/// this workload exercises through its find/insert contract: the first
/// sighting of a window inserts a fresh distribution, every later
/// sighting mutates it in place through `find`'s reference.
///
/// # Invariants
/// - `window_size >= 1`
/// - `seed` holds exactly the first `window_size` characters of the
///   training text
/// - Every stored distribution has at least one recorded character
#[derive(Debug)]
pub struct MarkovGenerator {
	window_size: usize,
	seed: Vec<char>,
	contexts: AvlMap<String, CharDistribution>,
}

impl MarkovGenerator {
	/// Builds the context map from a training text.
	///
	/// For each position past the first window, the trailing
	/// `window_size`-character substring is looked up and the character at
	/// that position is recorded into its distribution.
	///
	/// # Errors
	/// - `ModelError::WindowTooSmall` if `window_size` is zero.
	/// - `ModelError::TextTooShort` if `text` cannot fill a single
	///   window (the first window also seeds later generation runs).
	pub fn train(text: &str, window_size: usize) -> Result<Self, ModelError> {
		if window_size == 0 {
			return Err(ModelError::WindowTooSmall);
		}

		let chars: Vec<char> = text.chars().collect();
		if chars.len() < window_size {
			return Err(ModelError::TextTooShort { length: chars.len(), window_size });
		}

		let mut contexts: AvlMap<String, CharDistribution> = AvlMap::new();
		for i in window_size..chars.len() {
			let window: String = chars[i - window_size..i].iter().collect();
			let next = chars[i];

			if let Some(distribution) = contexts.find(&window) {
				distribution.add_letter(next);
			} else {
				let mut distribution = CharDistribution::new();
				distribution.add_letter(next);
				contexts.insert(window, distribution);
			}
		}

		debug!(
			"trained on {} characters: {} distinct contexts of length {}",
			chars.len(),
			contexts.size(),
			window_size
		);

		Ok(Self { window_size, seed: chars[..window_size].to_vec(), contexts })
	}

	/// Synthesizes text until its length exceeds `output_size`.
	///
	/// The output starts as the first window of the training text; each
	/// step looks up the trailing window and appends a character drawn
	/// from its distribution. A window with no recorded distribution
	/// terminates the run early, which is an expected outcome reported
	/// through `Generation::completed` (and a `warn` log), not an error.
	///
	/// # Errors
	/// Propagates `ModelError::EmptyDistribution` from the draw; this
	/// cannot happen for a map built by `train`, which never stores an
	/// empty distribution.
	pub fn generate<R: Rng>(&mut self, output_size: usize, rng: &mut R) -> Result<Generation, ModelError> {
		let mut output = self.seed.clone();

		while output.len() <= output_size {
			let window: String = output[output.len() - self.window_size..].iter().collect();

			let Some(distribution) = self.contexts.find(&window) else {
				warn!(
					"no distribution for window {:?}, stopping early at {} of {} characters",
					window,
					output.len(),
					output_size
				);
				return Ok(Generation { text: output.into_iter().collect(), completed: false });
			};

			output.push(distribution.sample(rng)?);
		}

		Ok(Generation { text: output.into_iter().collect(), completed: true })
	}

	/// Length of the context window.
	pub fn window_size(&self) -> usize {
		self.window_size
	}

	/// Number of distinct context windows seen during training.
	pub fn context_count(&self) -> usize {
		self.contexts.size()
	}
}
