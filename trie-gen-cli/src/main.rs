use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use trie_gen_core::Config;
use trie_gen_core::io::read_corpus;
use trie_gen_core::model::dump;
use trie_gen_core::model::{Generator, TrieModel};

/// Trains a character-level Markov trie on a corpus and prints generated lines.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Training file, or directory of training files
    corpus: PathBuf,

    /// TOML configuration file ([model] and [generation] sections)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Order of the trained model
    #[arg(long)]
    order: Option<usize>,

    /// Context length used for generation (at most the model order)
    #[arg(long)]
    gen_order: Option<usize>,

    /// Number of lines to generate
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Give up on a line after this many sampled symbols
    #[arg(long)]
    step_limit: Option<usize>,

    /// Extra draws when a generated line already exists in the corpus
    #[arg(long)]
    novelty: Option<usize>,

    /// Print the trained trie before generating
    #[arg(long)]
    dump: bool,

    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Loads the config file if any, then applies command line overrides.
    fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path).with_context(|| format!("loading {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(order) = self.order {
            config.model.order = order;
        }
        if let Some(order) = self.gen_order {
            config.generation.order = order;
        }
        if let Some(count) = self.count {
            config.generation.count = count;
        }
        if self.seed.is_some() {
            config.generation.seed = self.seed;
        }
        if self.step_limit.is_some() {
            config.generation.step_limit = self.step_limit;
        }
        if let Some(attempts) = self.novelty {
            config.generation.novelty_attempts = attempts;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config()?;

    // Build the model
    tracing::info!(order = config.model.order, corpus = %cli.corpus.display(), "building model");
    let started = Instant::now();
    let lines = read_corpus(&cli.corpus, &config.model.corpus_extension)
        .with_context(|| format!("reading corpus {}", cli.corpus.display()))?;
    let mut model = TrieModel::new(config.model.order);
    model.train_lines(&lines);
    tracing::info!(
        lines = model.line_count(),
        nodes = model.node_count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "model built"
    );

    if cli.dump {
        print!("{}", dump::render(&model));
    }

    // Generate
    let mut generator = Generator::from_config(&config.generation);
    let generation = &config.generation;
    let mut failures = 0;
    for i in 0..generation.count {
        match generator.generate_novel(&model, generation.order, generation.novelty_attempts) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                // A failed line does not end the batch
                failures += 1;
                if e.is_logic_error() {
                    tracing::error!(line = i + 1, error = %e, "inconsistent model");
                } else {
                    tracing::warn!(line = i + 1, error = %e, "generation failed");
                }
            }
        }
    }

    if failures > 0 {
        tracing::warn!(failures, requested = generation.count, "some lines could not be generated");
    }

    Ok(())
}
