use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Settings for building the model.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
	/// Order of the trie (context length used when training).
	pub order: usize,
	/// Extension of the training files when the corpus is a directory.
	pub corpus_extension: String,
}

impl Default for ModelConfig {
	fn default() -> Self {
		Self {
			order: 5,
			corpus_extension: "txt".to_string(),
		}
	}
}

/// Settings for sampling strings out of a trained model.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
	/// Context length used when generating, at most `ModelConfig::order`.
	pub order: usize,
	/// Number of strings to generate.
	pub count: usize,
	/// Fixed seed, OS entropy when absent.
	pub seed: Option<u64>,
	/// Maximum number of symbols drawn for one string.
	pub step_limit: Option<usize>,
	/// Extra draws allowed when the output equals a training line.
	pub novelty_attempts: usize,
}

impl Default for GenerationConfig {
	fn default() -> Self {
		Self {
			order: 3,
			count: 1,
			seed: None,
			step_limit: None,
			novelty_attempts: 0,
		}
	}
}

/// Top-level configuration file.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
	pub model: ModelConfig,
	pub generation: GenerationConfig,
}

impl Config {
	/// Parses a TOML document. Missing keys keep their defaults.
	pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(text)?)
	}

	/// Reads and parses a TOML file.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml(&text)
	}

	/// Checks settings that depend on each other.
	///
	/// # Errors
	/// Returns `ConfigError::Invalid` if the generation order exceeds the
	/// model order.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.generation.order > self.model.order {
			return Err(ConfigError::Invalid(format!(
				"generation order {} exceeds model order {}",
				self.generation.order, self.model.order
			)));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_follow_the_reference_program() {
		let config = Config::default();
		assert_eq!(config.model.order, 5);
		assert_eq!(config.generation.order, 3);
		assert_eq!(config.generation.count, 1);
		assert_eq!(config.generation.seed, None);
		assert!(config.validate().is_ok());
	}

	#[test]
	fn partial_file_keeps_defaults() {
		let config = Config::from_toml(
			r#"
			[generation]
			seed = 42
			count = 10
			"#,
		)
		.expect("valid toml");

		assert_eq!(config.model, ModelConfig::default());
		assert_eq!(config.generation.seed, Some(42));
		assert_eq!(config.generation.count, 10);
		assert_eq!(config.generation.order, 3);
	}

	#[test]
	fn generation_order_above_model_order_is_invalid() {
		let config = Config::from_toml("[model]\norder = 2\n[generation]\norder = 4\n").expect("valid toml");
		assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
	}

	#[test]
	fn malformed_file_is_a_parse_error() {
		assert!(matches!(Config::from_toml("[model]\norder = \"five\""), Err(ConfigError::Parse(_))));
	}

	#[test]
	fn missing_file_is_an_io_error() {
		let err = Config::load("/definitely/not/here.toml").expect_err("file does not exist");
		assert!(matches!(err, ConfigError::Io { .. }));
	}
}
