use std::collections::HashSet;

use super::node::Node;
use super::symbol::Symbol;

/// Character-level Markov model stored as a trie.
///
/// Every path of depth `k` from the root (`1 <= k <= order + 1`) spells a
/// window of `k` symbols observed in the padded training lines, and the count
/// of the last node on the path is how many times that window was seen.
///
/// # Responsibilities
/// - Pad training lines with sentinels and insert every window (`train`)
/// - Resolve context paths for the generator (`lookup`)
/// - Remember the trained lines so generation can avoid repeating them
///
/// # Invariants
/// - `order` is fixed at construction
/// - No path is deeper than `order + 1`
/// - Every node whose path holds no end sentinel and that has children has
///   `child_count_sum() == occurrence_count()`, the root included. Runs of
///   end sentinels are exempt: an observation may stop there.
#[derive(Clone, Debug)]
pub struct TrieModel {
	/// Number of preceding symbols used as context.
	order: usize,

	/// Empty prefix. Its count is the number of windows inserted.
	root: Node,

	/// Distinct trained lines, lowercased.
	known_lines: HashSet<String>,

	/// Number of `train` calls that inserted anything.
	line_count: usize,
}

impl TrieModel {
	/// Creates an empty model of the given order.
	///
	/// Order 0 is valid and yields a model of independent characters.
	pub fn new(order: usize) -> Self {
		Self {
			order,
			root: Node::root(),
			known_lines: HashSet::new(),
			line_count: 0,
		}
	}

	pub fn order(&self) -> usize {
		self.order
	}

	pub fn root(&self) -> &Node {
		&self.root
	}

	/// Number of lines trained so far (duplicates included).
	pub fn line_count(&self) -> usize {
		self.line_count
	}

	/// Case-insensitive check against the trained lines.
	pub fn contains_line(&self, line: &str) -> bool {
		self.known_lines.contains(&line.to_lowercase())
	}

	/// Builds the padded symbol sequence for a line.
	///
	/// `order` start sentinels, the characters of the line, then
	/// `max(order, 1)` end sentinels. An order-0 model still needs one end
	/// sentinel, otherwise order-0 generation could never stop.
	pub fn pad(&self, line: &str) -> Vec<Symbol> {
		let end_padding = self.order.max(1);
		let mut sequence = Vec::with_capacity(line.len() + self.order + end_padding);
		sequence.extend(std::iter::repeat_n(Symbol::Start, self.order));
		sequence.extend(line.chars().map(Symbol::Char));
		sequence.extend(std::iter::repeat_n(Symbol::End, end_padding));
		sequence
	}

	/// Inserts one window starting at the root.
	///
	/// The root counts the window, then every symbol is added as a child of
	/// the previous one. Windows longer than `order + 1` are cut.
	pub fn insert_sequence(&mut self, symbols: &[Symbol]) {
		let Some((first, rest)) = symbols.split_first() else {
			return;
		};
		self.root.observe();
		let mut parent = self.root.insert_child(*first);
		for symbol in rest.iter().take(self.order) {
			parent = parent.insert_child(*symbol);
		}
	}

	/// Adds a line to the model.
	///
	/// The line is padded (see `pad`) and a window of up to `order + 1`
	/// symbols is inserted from every offset of the padded sequence. Windows
	/// near the end are cut short, so the end sentinel runs they reach are
	/// counted without a full set of children.
	///
	/// # Notes
	/// - The caller trims lines and filters out empty ones; an empty string
	///   is ignored here.
	/// - UTF-8 safe: windows are built over `char`s.
	pub fn train(&mut self, line: &str) {
		if line.is_empty() {
			return;
		}

		let sequence = self.pad(line);
		let width = self.order + 1;
		for start in 0..sequence.len() {
			let stop = (start + width).min(sequence.len());
			self.insert_sequence(&sequence[start..stop]);
		}

		self.known_lines.insert(line.to_lowercase());
		self.line_count += 1;
		tracing::trace!(line, windows = sequence.len(), "trained line");
	}

	/// Trains on every line of an iterator.
	///
	/// Lines are trimmed and empty ones are skipped, like the corpus reader
	/// does. Returns the number of lines actually trained.
	pub fn train_lines<I, S>(&mut self, lines: I) -> usize
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut trained = 0;
		for line in lines {
			let line = line.as_ref().trim();
			if line.is_empty() {
				continue;
			}
			self.train(line);
			trained += 1;
		}
		tracing::debug!(trained, order = self.order, nodes = self.node_count(), "trained corpus");
		trained
	}

	/// Resolves the node reached by following `path` from the root.
	pub fn lookup<'a, I>(&self, path: I) -> Option<&Node>
	where
		I: IntoIterator<Item = &'a Symbol>,
	{
		path.into_iter().try_fold(&self.root, |node, symbol| node.child(*symbol))
	}

	/// Number of nodes, root excluded.
	pub fn node_count(&self) -> usize {
		fn count(node: &Node) -> usize {
			node.children().map(|child| 1 + count(child)).sum()
		}
		count(&self.root)
	}

	/// Length of the longest path from the root.
	pub fn depth(&self) -> usize {
		fn depth(node: &Node) -> usize {
			node.children().map(|child| 1 + depth(child)).max().unwrap_or(0)
		}
		depth(&self.root)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn count(model: &TrieModel, path: &[Symbol]) -> Option<u64> {
		model.lookup(path).map(Node::occurrence_count)
	}

	const A: Symbol = Symbol::Char('a');
	const B: Symbol = Symbol::Char('b');

	#[test]
	fn pad_surrounds_the_line_with_sentinels() {
		let model = TrieModel::new(2);
		assert_eq!(
			model.pad("ab"),
			vec![Symbol::Start, Symbol::Start, A, B, Symbol::End, Symbol::End]
		);
		assert_eq!(TrieModel::new(0).pad("ab"), vec![A, B, Symbol::End]);
	}

	#[test]
	fn order_one_on_ab() {
		let mut model = TrieModel::new(1);
		model.train("ab");

		assert_eq!(count(&model, &[A]), Some(1));
		assert_eq!(count(&model, &[A, B]), Some(1));
		assert_eq!(count(&model, &[B]), Some(1));
		assert_eq!(count(&model, &[B, Symbol::End]), Some(1));
		assert_eq!(count(&model, &[Symbol::Start, A]), Some(1));
		assert_eq!(count(&model, &[Symbol::End]), Some(1));
		// Windows are order + 1 deep, never more
		assert_eq!(count(&model, &[A, B, Symbol::End]), None);
		assert_eq!(model.root().occurrence_count(), 4);
		assert_eq!(model.node_count(), 7);
	}

	#[test]
	fn retraining_doubles_counts_without_new_branches() {
		let mut model = TrieModel::new(1);
		model.train("ab");
		let nodes = model.node_count();
		model.train("ab");

		assert_eq!(model.node_count(), nodes);
		let paths: [&[Symbol]; 7] = [&[A], &[A, B], &[B], &[B, Symbol::End], &[Symbol::Start], &[Symbol::Start, A], &[Symbol::End]];
		for path in paths {
			assert_eq!(count(&model, path), Some(2), "path {path:?}");
		}
		assert_eq!(model.line_count(), 2);
	}

	#[test]
	fn counts_are_substring_frequencies() {
		let mut model = TrieModel::new(2);
		model.train("abab");

		assert_eq!(count(&model, &[A]), Some(2));
		assert_eq!(count(&model, &[A, B]), Some(2));
		assert_eq!(count(&model, &[B, A]), Some(1));
		assert_eq!(count(&model, &[A, B, A]), Some(1));
		assert_eq!(count(&model, &[A, B, Symbol::End]), Some(1));
		// Both end sentinels start a window, cut short by the end of the line
		assert_eq!(count(&model, &[Symbol::End]), Some(2));
		assert_eq!(count(&model, &[Symbol::End, Symbol::End]), Some(1));
		assert_eq!(count(&model, &[Symbol::End, Symbol::End, Symbol::End]), None);
		assert_eq!(model.root().occurrence_count(), 8);
		assert_eq!(model.depth(), 3);
	}

	#[test]
	fn children_sum_to_parent_count() {
		let mut model = TrieModel::new(3);
		model.train_lines(["hello world", "help", "yellow", "  ", "hello world"]);

		fn check(node: &Node) {
			// Only end sentinels follow an end sentinel
			if node.symbol() == Symbol::End {
				return;
			}
			if !node.is_leaf() {
				assert_eq!(node.child_count_sum(), node.occurrence_count(), "at {}", node.symbol());
			}
			node.children().for_each(check);
		}
		check(model.root());
	}

	#[test]
	fn start_and_end_padding_are_counted_alike() {
		let mut model = TrieModel::new(2);
		model.train("ab");

		assert_eq!(count(&model, &[Symbol::Start]), Some(2));
		assert_eq!(count(&model, &[Symbol::End]), Some(2));
		assert_eq!(count(&model, &[Symbol::Start, Symbol::Start]), Some(1));
		assert_eq!(count(&model, &[Symbol::End, Symbol::End]), Some(1));
		// One window per offset of [S, S, a, b, E, E]
		assert_eq!(model.root().occurrence_count(), 6);
	}

	#[test]
	fn known_lines_are_matched_ignoring_case() {
		let mut model = TrieModel::new(1);
		model.train("Hello World");
		assert!(model.contains_line("hello world"));
		assert!(model.contains_line("HELLO WORLD"));
		assert!(!model.contains_line("hello"));
	}

	#[test]
	fn empty_line_inserts_nothing() {
		let mut model = TrieModel::new(2);
		model.train("");
		assert_eq!(model.node_count(), 0);
		assert_eq!(model.root().occurrence_count(), 0);
		assert_eq!(model.line_count(), 0);
	}

	#[test]
	fn train_lines_trims_and_skips_blank_lines() {
		let mut model = TrieModel::new(1);
		let trained = model.train_lines(vec!["  ab  ".to_owned(), String::new(), "\t".to_owned()]);
		assert_eq!(trained, 1);
		assert!(model.contains_line("ab"));
		assert!(model.contains_line("AB"));
		assert!(!model.contains_line("  ab  "));
	}

	#[test]
	fn insert_sequence_is_cut_at_order_plus_one() {
		let mut model = TrieModel::new(1);
		model.insert_sequence(&[A, B, A, B]);
		assert_eq!(model.depth(), 2);
		model.insert_sequence(&[]);
		assert_eq!(model.root().occurrence_count(), 1);
	}
}
