use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GenerationConfig;
use crate::error::GenerationError;
use crate::model::symbol::Symbol;
use crate::model::trie_model::TrieModel;

/// Random walk over a trained `TrieModel`.
///
/// The generator owns its random source, so two generators built with the
/// same seed produce the same strings from the same model.
///
/// # Responsibilities
/// - Walk the trie from a window of start sentinels to the end sentinel
/// - Optionally bound the walk (`step_limit`)
/// - Optionally re-draw strings that already exist in the training data
#[derive(Debug)]
pub struct Generator<R = StdRng> {
	rng: R,
	step_limit: Option<usize>,
}

impl Generator<StdRng> {
	/// Creates a generator seeded from the operating system.
	pub fn new() -> Self {
		Self::from_rng(StdRng::from_os_rng())
	}

	/// Creates a reproducible generator.
	pub fn seeded(seed: u64) -> Self {
		Self::from_rng(StdRng::seed_from_u64(seed))
	}

	/// Creates a generator from the `[generation]` section of a config.
	pub fn from_config(config: &GenerationConfig) -> Self {
		let generator = match config.seed {
			Some(seed) => Self::seeded(seed),
			None => Self::new(),
		};
		generator.with_step_limit(config.step_limit)
	}
}

impl Default for Generator<StdRng> {
	fn default() -> Self {
		Self::new()
	}
}

impl<R: Rng> Generator<R> {
	/// Uses a caller-provided random source.
	pub fn from_rng(rng: R) -> Self {
		Self { rng, step_limit: None }
	}

	/// Caps the number of symbols sampled by one `generate` call.
	///
	/// `None` leaves the walk unbounded: a model whose end sentinel is not
	/// reachable from some context then never returns.
	pub fn with_step_limit(mut self, step_limit: Option<usize>) -> Self {
		self.step_limit = step_limit;
		self
	}

	pub fn step_limit(&self) -> Option<usize> {
		self.step_limit
	}

	/// Generates one string.
	///
	/// Starts from `order` start sentinels. At each step the window is
	/// resolved to a trie node, one of its children is drawn with
	/// `Node::sample`, and the window slides by one symbol. The walk stops
	/// when the end sentinel is drawn.
	///
	/// Below the trained order, the start padding of the training lines is
	/// longer than the window, so a start sentinel can be drawn. It is slid
	/// into the window like any symbol but never emitted.
	///
	/// # Parameters
	/// - `order`: context length, at most `model.order()`. Smaller orders
	///   reuse the shallower levels of the same trie.
	///
	/// # Errors
	/// - `OrderExceeded` if `order > model.order()`
	/// - `PathNotFound` or `SamplingExhausted` if the trie is inconsistent
	///   with the requested order
	/// - `StepLimitReached` if a step limit is set and hit
	pub fn generate(&mut self, model: &TrieModel, order: usize) -> Result<String, GenerationError> {
		if order > model.order() {
			return Err(GenerationError::OrderExceeded { requested: order, trained: model.order() });
		}

		let mut window: VecDeque<Symbol> = std::iter::repeat_n(Symbol::Start, order).collect();
		let mut output = String::new();
		let mut steps = 0;

		loop {
			if let Some(limit) = self.step_limit {
				if steps >= limit {
					return Err(GenerationError::StepLimitReached { limit });
				}
			}
			steps += 1;

			let node = model.lookup(&window).ok_or_else(|| GenerationError::PathNotFound {
				path: window.iter().map(Symbol::to_string).collect(),
			})?;

			let next = node.sample(&mut self.rng)?.symbol();
			if next == Symbol::End {
				break;
			}
			// Start only follows start padding: slide it in, emit nothing
			if let Some(c) = next.as_char() {
				output.push(c);
			}
			if order > 0 {
				window.pop_front();
				window.push_back(next);
			}
		}

		tracing::debug!(order, steps, chars = output.chars().count(), "generated text");
		Ok(output)
	}

	/// Generates a string that is not one of the training lines, if possible.
	///
	/// # Behavior
	/// - Calls `generate`.
	/// - While the result matches a trained line (case-insensitive), draws
	///   again, at most `attempts` more times.
	/// - Returns the first novel string or the last draw if all fail.
	pub fn generate_novel(&mut self, model: &TrieModel, order: usize, attempts: usize) -> Result<String, GenerationError> {
		let mut text = self.generate(model, order)?;
		let mut remaining = attempts;

		while remaining > 0 && model.contains_line(&text) {
			tracing::trace!(text = %text, remaining, "generated a training line, drawing again");
			text = self.generate(model, order)?;
			remaining -= 1;
		}

		Ok(text)
	}
}
