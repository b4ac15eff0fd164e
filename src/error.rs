//! Error type shared by the normalizer, its pattern registry and config I/O.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("no phoneme configured for acronym letter '{letter}'")]
    MissingPhoneme { letter: char },

    #[error("month fragment '{fragment}' is not in any month dictionary")]
    MissingMonth { fragment: String },

    #[error("currency symbol '{symbol}' has no configured name")]
    MissingCurrency { symbol: String },

    #[error("failed to compile {name} pattern: {source}")]
    Pattern {
        name: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{name} pattern failed while matching: {source}")]
    Matching {
        name: &'static str,
        #[source]
        source: fancy_regex::Error,
    },

    #[error("input has {len} characters, limit is {max}")]
    InputTooLong { len: usize, max: usize },

    #[error("invalid normalizer config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to serialize normalizer config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl NormalizeError {
    pub(crate) fn pattern(
        name: &'static str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        NormalizeError::Pattern {
            name,
            source: Box::new(source),
        }
    }

    pub(crate) fn matching(name: &'static str, source: fancy_regex::Error) -> Self {
        NormalizeError::Matching { name, source }
    }
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
