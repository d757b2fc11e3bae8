use std::collections::BTreeMap;

use rand::Rng;

use super::symbol::Symbol;
use crate::error::GenerationError;

/// One symbol at one position of the trie.
///
/// The path from the root to a node spells an observed n-gram, and the
/// node's `occurrence_count` is how many times that n-gram was observed.
/// Its children are the symbols observed right after it, weighted by their
/// own counts.
///
/// ## Responsibilities:
/// - Record observations of a following symbol (`insert_child`)
/// - Pick a following symbol using weighted random sampling (`sample`)
///
/// ## Invariants
/// - Child keys are unique
/// - Every non-root node has `occurrence_count >= 1`
/// - A node built by `TrieModel::train` that has children has
///   `child_count_sum() == occurrence_count`
#[derive(Clone, Debug)]
pub struct Node {
	symbol: Symbol,
	/// Number of observations of this exact path.
	occurrence_count: u64,
	/// Number of `insert_child` calls performed on this node.
	follow_count: u64,
	/// Following symbols, enumerated in `Symbol` order.
	children: BTreeMap<Symbol, Node>,
}

impl Node {
	/// Creates a node for a first observation of `symbol`.
	pub(crate) fn new(symbol: Symbol) -> Self {
		Self {
			symbol,
			occurrence_count: 1,
			follow_count: 0,
			children: BTreeMap::new(),
		}
	}

	/// Creates the root node (empty prefix).
	///
	/// The root is not an observation, so it starts at 0. Its count is raised
	/// once per inserted window by `TrieModel::insert_sequence`.
	pub(crate) fn root() -> Self {
		Self {
			occurrence_count: 0,
			..Self::new(Symbol::Start)
		}
	}

	pub fn symbol(&self) -> Symbol {
		self.symbol
	}

	pub fn occurrence_count(&self) -> u64 {
		self.occurrence_count
	}

	pub fn follow_count(&self) -> u64 {
		self.follow_count
	}

	/// Returns the child keyed by `symbol`, if it was ever observed.
	pub fn child(&self, symbol: Symbol) -> Option<&Node> {
		self.children.get(&symbol)
	}

	/// Iterates over the children in enumeration (sampling) order.
	pub fn children(&self) -> impl Iterator<Item = &Node> {
		self.children.values()
	}

	pub fn is_leaf(&self) -> bool {
		self.children.is_empty()
	}

	/// Sum of the children's occurrence counts.
	pub fn child_count_sum(&self) -> u64 {
		self.children.values().map(|child| child.occurrence_count).sum()
	}

	pub(crate) fn observe(&mut self) {
		self.occurrence_count += 1;
	}

	/// Records one observation of `symbol` following this node.
	///
	/// - If the child already exists, its occurrence count is increased.
	/// - Otherwise, a new child is created with an initial count of 1.
	///
	/// Returns the child so that a path can be extended one level at a time.
	pub fn insert_child(&mut self, symbol: Symbol) -> &mut Node {
		self.follow_count += 1;
		self.children
			.entry(symbol)
			.and_modify(|child| child.occurrence_count += 1)
			.or_insert_with(|| Node::new(symbol))
	}

	/// Picks a child using weighted random sampling.
	///
	/// Draws `r` in `[0, occurrence_count)` and walks the children in
	/// `Symbol` order, subtracting each count from `r` until it falls inside
	/// a bucket. This is the cumulative-frequency selection: the first child
	/// whose running total exceeds the draw wins.
	///
	/// # Errors
	/// Returns `SamplingExhausted` when the node has a zero count or when the
	/// children's counts add up to less than the draw. Both mean the count
	/// invariant is broken.
	pub fn sample<R: Rng>(&self, rng: &mut R) -> Result<&Node, GenerationError> {
		let exhausted = || GenerationError::SamplingExhausted {
			count: self.occurrence_count,
			children_total: self.child_count_sum(),
		};

		if self.occurrence_count == 0 {
			return Err(exhausted());
		}

		let mut r = rng.random_range(0..self.occurrence_count);
		for child in self.children.values() {
			if r < child.occurrence_count {
				return Ok(child);
			}
			r -= child.occurrence_count;
		}

		Err(exhausted())
	}
}
