//! Character-level Markov text generation library.
//!
//! This crate provides:
//! - A trie recording, for every context of up to `order` characters, how
//!   often each next character was observed
//! - Sentinel padding so that line starts and ends are learned like any
//!   other transition
//! - A seedable weighted random walk generating new text from the trie
//! - A corpus reader and a TOML configuration layer for front ends
//!
//! ```
//! use trie_gen_core::model::{Generator, TrieModel};
//!
//! let mut model = TrieModel::new(3);
//! model.train("hello");
//! let text = Generator::seeded(7).generate(&model, 3).unwrap();
//! assert_eq!(text, "hello");
//! ```

/// Trie model, trainer, generator and diagnostics.
pub mod model;

/// Configuration file (`[model]` and `[generation]` sections).
pub mod config;

/// Error types for generation and configuration.
pub mod error;

/// Corpus reading (files and directories of training lines).
pub mod io;

pub use config::{Config, GenerationConfig, ModelConfig};
pub use error::{ConfigError, GenerationError};
