//! Polish text normalization for speech synthesis.
//!
//! [`TextNormalizer`] rewrites written Polish into the spoken form a TTS engine
//! should read: acronyms are spelled, amounts, dates and times become phrases,
//! numbers agree with the units that follow them. Which rewrites run is chosen
//! per normalizer through [`NormalizationConfig::operations`].
//!
//! Processing is split in two stages. Document passes see the whole text and
//! handle spans that cross word boundaries (acronyms, money, dates, times).
//! Word passes then run over whitespace-separated tokens in the configured order.

pub mod config;
mod document;
pub mod error;
pub mod lexicon;
mod normalizer;
pub mod numerals;
pub mod patterns;
mod words;

pub use config::{
    AbbreviationTable, AcronymTable, CurrencyTable, LexicalTables, Liaison, LogLevel, MathSymbol,
    NormalizationConfig, Operation, SpecialRule, SpokenSymbol, SymbolGuard, UnitClass, UnitTable,
    cli_operations, load_config, parse_config, serialize_config,
};
pub use error::{NormalizeError, Result};
pub use normalizer::{DEFAULT_NORMALIZER_PATH, TextNormalizer};
pub use numerals::{NumberValue, NumeralConverter, NumeralError, PolishNumerals};
pub use patterns::CompiledPatterns;
