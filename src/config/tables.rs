use super::defaults;
use super::models::{
    AbbreviationTable, AcronymTable, CurrencyTable, LexicalTables, Liaison, LogLevel, MathSymbol,
    NormalizationConfig, Operation, SpecialRule, SpokenSymbol, UnitTable,
};
use serde::Deserialize;
use std::collections::BTreeMap;

/// On-disk layout of `conf/normalizer.toml`.
#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    pipeline: PipelineConfig,
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    acronyms: AcronymTable,
    #[serde(default)]
    characters: CharactersConfig,
    #[serde(default)]
    units: UnitTable,
    #[serde(default)]
    abbreviations: AbbreviationTable,
    #[serde(default)]
    currency: CurrencyTable,
    #[serde(default)]
    symbols: SymbolsConfig,
    #[serde(default)]
    liaison: Liaison,
}

impl From<ConfigTables> for NormalizationConfig {
    fn from(tables: ConfigTables) -> Self {
        let mut operations = Vec::with_capacity(tables.pipeline.operations.len());
        for op in tables.pipeline.operations {
            if !operations.contains(&op) {
                operations.push(op);
            }
        }
        NormalizationConfig {
            operations,
            make_lowercase: tables.pipeline.make_lowercase,
            sep_abbreviation: tables.pipeline.sep_abbreviation,
            replace: tables
                .pipeline
                .replace
                .into_iter()
                .map(|rule| (rule.from, rule.to))
                .collect(),
            max_input_chars: tables.pipeline.max_input_chars,
            log_level: tables.logging.log_level,
            tables: LexicalTables {
                unicode_to_ascii: tables.characters.unicode_to_ascii,
                acronyms: tables.acronyms,
                units: tables.units,
                abbreviations: tables.abbreviations,
                currency: tables.currency,
                math_symbols: tables.symbols.math,
                special: tables.symbols.special,
                spoken_symbols: tables.symbols.spoken,
                liaison: tables.liaison,
            },
        }
    }
}

impl From<&NormalizationConfig> for ConfigTables {
    fn from(config: &NormalizationConfig) -> Self {
        ConfigTables {
            pipeline: PipelineConfig {
                operations: config.operations.clone(),
                make_lowercase: config.make_lowercase,
                sep_abbreviation: config.sep_abbreviation.clone(),
                replace: config
                    .replace
                    .iter()
                    .map(|(from, to)| ReplaceRule {
                        from: from.clone(),
                        to: to.clone(),
                    })
                    .collect(),
                max_input_chars: config.max_input_chars,
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
            acronyms: config.tables.acronyms.clone(),
            characters: CharactersConfig {
                unicode_to_ascii: config.tables.unicode_to_ascii.clone(),
            },
            units: config.tables.units.clone(),
            abbreviations: config.tables.abbreviations.clone(),
            currency: config.tables.currency.clone(),
            symbols: SymbolsConfig {
                math: config.tables.math_symbols.clone(),
                special: config.tables.special.clone(),
                spoken: config.tables.spoken_symbols.clone(),
            },
            liaison: config.tables.liaison.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct PipelineConfig {
    #[serde(default = "defaults::default_operations")]
    operations: Vec<Operation>,
    #[serde(default = "defaults::default_make_lowercase")]
    make_lowercase: bool,
    #[serde(default = "defaults::default_sep_abbreviation")]
    sep_abbreviation: String,
    #[serde(default = "defaults::default_max_input_chars")]
    max_input_chars: usize,
    #[serde(default = "default_replace_rules")]
    replace: Vec<ReplaceRule>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            operations: defaults::default_operations(),
            make_lowercase: defaults::default_make_lowercase(),
            sep_abbreviation: defaults::default_sep_abbreviation(),
            max_input_chars: defaults::default_max_input_chars(),
            replace: default_replace_rules(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct ReplaceRule {
    from: String,
    to: String,
}

fn default_replace_rules() -> Vec<ReplaceRule> {
    defaults::default_replace()
        .into_iter()
        .map(|(from, to)| ReplaceRule { from, to })
        .collect()
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct CharactersConfig {
    #[serde(default = "defaults::default_unicode_to_ascii")]
    unicode_to_ascii: BTreeMap<String, String>,
}

impl Default for CharactersConfig {
    fn default() -> Self {
        CharactersConfig {
            unicode_to_ascii: defaults::default_unicode_to_ascii(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct SymbolsConfig {
    #[serde(default = "defaults::default_math_symbols")]
    math: Vec<MathSymbol>,
    #[serde(default = "defaults::default_special")]
    special: Vec<SpecialRule>,
    #[serde(default)]
    spoken: Vec<SpokenSymbol>,
}

impl Default for SymbolsConfig {
    fn default() -> Self {
        SymbolsConfig {
            math: defaults::default_math_symbols(),
            special: defaults::default_special(),
            spoken: Vec::new(),
        }
    }
}
