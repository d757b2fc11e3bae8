use std::path::PathBuf;

/// Failure of a single `Generator::generate` call.
///
/// Generation only borrows the model, so none of these leave it modified.
/// `OrderExceeded` and `StepLimitReached` are caller-side conditions; the
/// others mean the trie is not consistent with the requested order and are
/// logic errors (see `is_logic_error`).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
	#[error("cannot generate at order {requested}: model was trained at order {trained}")]
	OrderExceeded { requested: usize, trained: usize },
	#[error("no trie path for context `{path}`")]
	PathNotFound { path: String },
	#[error("weighted sampling found no child (node count {count}, children total {children_total})")]
	SamplingExhausted { count: u64, children_total: u64 },
	#[error("generation stopped after {limit} symbols without reaching the end sentinel")]
	StepLimitReached { limit: usize },
}

impl GenerationError {
	/// True for failures that reveal an inconsistent trie rather than a bad request.
	pub fn is_logic_error(&self) -> bool {
		matches!(
			self,
			GenerationError::PathNotFound { .. } | GenerationError::SamplingExhausted { .. }
		)
	}
}

/// Failure while loading or checking a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("failed to read config {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("failed to parse config: {0}")]
	Parse(#[from] toml::de::Error),
	#[error("invalid config: {0}")]
	Invalid(String),
}
