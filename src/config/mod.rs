//! Configuration for the normalizer.
//!
//! Pipeline switches and every Polish lookup table live here and can be loaded
//! from `conf/normalizer.toml`. Missing sections fall back to the built-in
//! tables so a partial file still produces a working normalizer.

mod defaults;
mod io;
mod models;
mod tables;

pub use defaults::cli_operations;
pub use io::{load_config, parse_config, serialize_config};
pub use models::{
    AbbreviationTable, AcronymTable, CurrencyTable, LexicalTables, Liaison, LogLevel, MathSymbol,
    NormalizationConfig, Operation, SpecialRule, SpokenSymbol, SymbolGuard, UnitClass, UnitTable,
};
