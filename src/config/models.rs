use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::config::defaults;

/// Everything a normalizer instance needs: pipeline switches plus the lexical tables.
///
/// Built once per [`crate::TextNormalizer`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizationConfig {
    /// Enabled operations in caller order. Word-level operations run in this order.
    pub operations: Vec<Operation>,
    pub make_lowercase: bool,
    /// Replaces the sentinel between spelled acronym letters in the final output.
    pub sep_abbreviation: String,
    /// Unconditional old -> new substitutions applied to every token.
    pub replace: Vec<(String, String)>,
    /// Inputs longer than this (in characters) are rejected; 0 disables the check.
    pub max_input_chars: usize,
    pub log_level: LogLevel,
    pub tables: LexicalTables,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        NormalizationConfig {
            operations: defaults::default_operations(),
            make_lowercase: defaults::default_make_lowercase(),
            sep_abbreviation: defaults::default_sep_abbreviation(),
            replace: defaults::default_replace(),
            max_input_chars: defaults::default_max_input_chars(),
            log_level: defaults::default_log_level(),
            tables: LexicalTables::default(),
        }
    }
}

impl NormalizationConfig {
    /// Default tables with the given operation list.
    pub fn with_operations(operations: impl IntoIterator<Item = Operation>) -> Self {
        NormalizationConfig {
            operations: operations.into_iter().collect(),
            ..NormalizationConfig::default()
        }
    }
}

/// A rewrite step the caller can switch on or off.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    AcronymPhoneme,
    AccentPeculiarity,
    AmountMoney,
    Date,
    Timestamp,
    TimeOfDay,
    Weekday,
    Month,
    Ordinal,
    Special,
    MathSymbol,
    SpokenSymbol,
    MiscAbbreviation,
    Number,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::AcronymPhoneme => "acronym_phoneme",
            Operation::AccentPeculiarity => "accent_peculiarity",
            Operation::AmountMoney => "amount_money",
            Operation::Date => "date",
            Operation::Timestamp => "timestamp",
            Operation::TimeOfDay => "time_of_day",
            Operation::Weekday => "weekday",
            Operation::Month => "month",
            Operation::Ordinal => "ordinal",
            Operation::Special => "special",
            Operation::MathSymbol => "math_symbol",
            Operation::SpokenSymbol => "spoken_symbol",
            Operation::MiscAbbreviation => "misc_abbreviation",
            Operation::Number => "number",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Static Polish lookup data. Pure data; see [`crate::lexicon`] for the helpers over it.
#[derive(Debug, Clone, PartialEq)]
pub struct LexicalTables {
    /// Character class (every char in the key) -> ASCII replacement.
    pub unicode_to_ascii: BTreeMap<String, String>,
    pub acronyms: AcronymTable,
    pub units: UnitTable,
    pub abbreviations: AbbreviationTable,
    pub currency: CurrencyTable,
    pub math_symbols: Vec<MathSymbol>,
    pub special: Vec<SpecialRule>,
    pub spoken_symbols: Vec<SpokenSymbol>,
    pub liaison: Liaison,
}

impl Default for LexicalTables {
    fn default() -> Self {
        LexicalTables {
            unicode_to_ascii: defaults::default_unicode_to_ascii(),
            acronyms: AcronymTable::default(),
            units: UnitTable::default(),
            abbreviations: AbbreviationTable::default(),
            currency: CurrencyTable::default(),
            math_symbols: defaults::default_math_symbols(),
            special: defaults::default_special(),
            spoken_symbols: Vec::new(),
            liaison: Liaison::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AcronymTable {
    /// Uppercase letters that may form an acronym.
    pub alphabet: String,
    /// Acronyms left exactly as written.
    pub exclude: BTreeSet<String>,
    /// Uppercase letter -> spoken letter name.
    pub letters: BTreeMap<String, String>,
}

impl Default for AcronymTable {
    fn default() -> Self {
        AcronymTable {
            alphabet: defaults::default_alphabet(),
            exclude: defaults::default_acronym_exclusions(),
            letters: defaults::default_letter_phonemes(),
        }
    }
}

/// How a unit word changes when the count is exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitClass {
    /// One fixed word for every count.
    NoSuffix,
    /// Final letter dropped for a count of one.
    SuffixN,
    /// Final two letters dropped for a count of one.
    SuffixEn,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct UnitTable {
    pub no_suffix: BTreeMap<String, String>,
    pub suffix_n: BTreeMap<String, String>,
    pub suffix_en: BTreeMap<String, String>,
}

impl Default for UnitTable {
    fn default() -> Self {
        UnitTable {
            no_suffix: defaults::default_units_no_suffix(),
            suffix_n: defaults::default_units_suffix_n(),
            suffix_en: defaults::default_units_suffix_en(),
        }
    }
}

impl UnitTable {
    pub fn lookup(&self, key: &str) -> Option<(UnitClass, &str)> {
        if let Some(word) = self.no_suffix.get(key) {
            return Some((UnitClass::NoSuffix, word));
        }
        if let Some(word) = self.suffix_en.get(key) {
            return Some((UnitClass::SuffixEn, word));
        }
        self.suffix_n
            .get(key)
            .map(|word| (UnitClass::SuffixN, word.as_str()))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AbbreviationTable {
    pub misc: BTreeMap<String, String>,
    pub weekday: BTreeMap<String, String>,
    /// Month names and dotted abbreviations -> full month name.
    pub month: BTreeMap<String, String>,
    /// "1", "01", ... "12" -> full month name.
    pub number_month: BTreeMap<String, String>,
}

impl Default for AbbreviationTable {
    fn default() -> Self {
        AbbreviationTable {
            misc: defaults::default_misc_abbreviations(),
            weekday: defaults::default_weekdays(),
            month: defaults::default_months(),
            number_month: defaults::default_number_months(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CurrencyTable {
    /// Symbol as written ("PLN", "zł", "€") -> spoken currency name.
    pub symbols: BTreeMap<String, String>,
    /// Magnitude words that may sit between an amount and its symbol.
    pub magnitudes: Vec<String>,
}

impl Default for CurrencyTable {
    fn default() -> Self {
        CurrencyTable {
            symbols: defaults::default_currency_symbols(),
            magnitudes: defaults::default_currency_magnitudes(),
        }
    }
}

/// Extra condition a math symbol must meet before it is spelled out.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SymbolGuard {
    #[default]
    None,
    /// Multiplication letter: not at position 0 and only digits before it.
    AfterDigit,
    /// Minus: not "--" and at most one character on either side.
    ShortOperands,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MathSymbol {
    pub symbol: String,
    pub word: String,
    #[serde(default)]
    pub guard: SymbolGuard,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SpecialRule {
    /// Regular expression the token must match.
    pub pattern: String,
    /// Literal whose first occurrence gets replaced.
    pub literal: String,
    pub replacement: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SpokenSymbol {
    pub open: String,
    pub close: String,
    /// Spoken form of the opening marker; `_` turns into a word separator.
    pub spoken: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Liaison {
    pub consonant: String,
    /// Two-character sequences before a date that trigger the consonant on the day word.
    pub date_triggers: Vec<String>,
    /// Ending of the previous word that triggers the consonant on an ordinal.
    pub ordinal_trigger: String,
}

impl Default for Liaison {
    fn default() -> Self {
        Liaison {
            consonant: "n".to_string(),
            date_triggers: vec!["m ".to_string(), "n ".to_string()],
            ordinal_trigger: "m".to_string(),
        }
    }
}
