//! Character-level Markov trie and the random walk that samples it.
//!
//! This module provides:
//! - Sentinel-aware symbols (`Symbol`)
//! - Trie nodes with occurrence counting and weighted sampling (`Node`)
//! - The trained model and its windowed trainer (`TrieModel`)
//! - The generation interface (`Generator`)
//! - Read-only diagnostics (`dump`)

/// Random walk producing new strings from a `TrieModel`.
///
/// Owns the random source; seedable for reproducible output.
pub mod generator;

/// Trie node: symbol, counts, children and weighted sampling.
pub mod node;

/// Symbols stored in the trie, including the start and end sentinels.
pub mod symbol;

/// The trie model and the line trainer.
///
/// Pads lines with sentinels and inserts every window of `order + 1`
/// symbols.
pub mod trie_model;

/// Tree rendering and count conservation checks. Never mutates the model.
pub mod dump;

pub use generator::Generator;
pub use node::Node;
pub use symbol::Symbol;
pub use trie_model::TrieModel;
