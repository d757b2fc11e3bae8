use std::fmt::Write;

use super::node::Node;
use super::symbol::Symbol;
use super::trie_model::TrieModel;

/// A node whose children's counts do not add up to its own count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
	/// Symbols from the root to the node (empty for the root itself).
	pub path: Vec<Symbol>,
	pub count: u64,
	pub children_total: u64,
}

/// Renders the whole trie, one node per line.
///
/// Each line reads `symbol - count (share of parent)`, indented two spaces
/// per level. A node whose children do not account for all its
/// observations is flagged inline and reported through `tracing::warn!`;
/// rendering goes on regardless. End sentinel runs are not checked, since
/// windows cut short by the end of a line stop there.
pub fn render(model: &TrieModel) -> String {
	let mut out = String::new();
	let root = model.root();
	render_node(&mut out, root, root.occurrence_count(), 0);
	out
}

fn render_node(out: &mut String, node: &Node, parent_count: u64, depth: usize) {
	let share = if parent_count == 0 {
		0.0
	} else {
		node.occurrence_count() as f64 / parent_count as f64 * 100.0
	};
	// Writing into a String cannot fail
	let _ = write!(
		out,
		"{:indent$}{} - {} ({:.2}%)",
		"",
		node.symbol(),
		node.occurrence_count(),
		share,
		indent = depth * 2
	);

	let children_total = node.child_count_sum();
	if is_checked(node) && children_total != node.occurrence_count() {
		tracing::warn!(
			symbol = %node.symbol(),
			count = node.occurrence_count(),
			children_total,
			"child count mismatch"
		);
		let _ = write!(out, " [child count mismatch: {}]", children_total);
	}
	out.push('\n');

	for child in node.children() {
		render_node(out, child, node.occurrence_count(), depth + 1);
	}
}

/// Lists every non-leaf node whose children's counts differ from its own.
///
/// End sentinel nodes are skipped. Empty for any model built through
/// `TrieModel::train`.
pub fn conservation_violations(model: &TrieModel) -> Vec<Violation> {
	let mut violations = Vec::new();
	let mut path = Vec::new();
	collect(model.root(), &mut path, &mut violations);
	violations
}

fn collect(node: &Node, path: &mut Vec<Symbol>, violations: &mut Vec<Violation>) {
	let children_total = node.child_count_sum();
	if is_checked(node) && children_total != node.occurrence_count() {
		violations.push(Violation {
			path: path.clone(),
			count: node.occurrence_count(),
			children_total,
		});
	}
	for child in node.children() {
		path.push(child.symbol());
		collect(child, path, violations);
		path.pop();
	}
}

// Only end sentinels follow an end sentinel, so skipping the node skips its whole path
fn is_checked(node: &Node) -> bool {
	!node.is_leaf() && node.symbol() != Symbol::End
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn render_lists_every_node_with_its_share() {
		let mut model = TrieModel::new(1);
		model.train("ab");

		let expected = "\
<START> - 4 (100.00%)
  <START> - 1 (25.00%)
    a - 1 (100.00%)
  a - 1 (25.00%)
    b - 1 (100.00%)
  b - 1 (25.00%)
    <END> - 1 (100.00%)
  <END> - 1 (25.00%)
";
		assert_eq!(render(&model), expected);
	}

	#[test]
	fn render_of_empty_model_is_the_root() {
		assert_eq!(render(&TrieModel::new(3)), "<START> - 0 (0.00%)\n");
	}

	#[test]
	fn trained_models_conserve_counts() {
		for order in 0..5 {
			let mut model = TrieModel::new(order);
			model.train_lines(["the cat sat", "the mat", "a cat", "that", "t"]);
			assert_eq!(conservation_violations(&model), Vec::new(), "order {order}");
		}
	}

	#[test]
	fn end_sentinel_runs_are_not_flagged() {
		let mut model = TrieModel::new(3);
		model.train("ab");

		let end = model.lookup(&[Symbol::End]).expect("end is trained");
		assert_eq!(end.occurrence_count(), 3);
		assert_eq!(end.child_count_sum(), 2);
		assert_eq!(conservation_violations(&model), Vec::new());
		assert!(!render(&model).contains("mismatch"));
	}

	#[test]
	fn hand_built_mismatch_is_reported() {
		// A window inserted by hand, shorter than the model's windows
		let mut model = TrieModel::new(2);
		model.train("xy");
		model.insert_sequence(&[Symbol::Char('x')]);

		let violations = conservation_violations(&model);
		assert_eq!(
			violations,
			vec![Violation { path: vec![Symbol::Char('x')], count: 2, children_total: 1 }]
		);
		assert!(render(&model).contains("[child count mismatch: 1]"));
	}
}
