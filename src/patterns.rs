//! Compiled detectors used by the document and word passes.
//!
//! Static shapes (times, ordinals, numbers) are compiled once per process.
//! Everything built from dictionary keys is compiled per normalizer, including the
//! case-folded, accent-folded and acronym-spelled surfaces of those keys, since
//! earlier passes have already rewritten the text when later detectors run.

use std::collections::{BTreeMap, HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

use crate::config::{NormalizationConfig, Operation};
use crate::error::{NormalizeError, Result};
use crate::lexicon::{self, AccentMap, Folding, SENTINEL};

pub(crate) static RE_TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?P<hours>\d+)(?:godz|h)?:(?P<minutes>[0-5][0-9]|[0-9])(?:min|m)?(?::(?P<seconds>[0-5][0-9]|[0-9])(?:sek|s)?)?\b",
    )
    .unwrap()
});
pub(crate) static RE_TIME_OF_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?P<hour>[01][0-9]|2[0-3]|[0-9])[.:](?P<minute>[0-5][0-9]|[0-9])(?:\s?(?:godziny|godz|h))?\b",
    )
    .unwrap()
});
pub(crate) static RE_ORDINAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<open>[(\[]?)(?P<number>\d+)\.(?P<close>[)\]]?)$").unwrap());
pub(crate) static RE_NUMBER_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d+(?:[.,]\d+)*").unwrap());
pub(crate) static RE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d+(?:[.,]\d+)*$").unwrap());
pub(crate) static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

const NUMBER: &str = r"[+-]?\d+(?:[.,]\d+)*";
const AMOUNT_BOUNDARY: &str = r"[.,!?;:\-()\[\]\s]";
const ACRONYM_OPEN: &str = r"[.!?;:\-\s,(\[{]";
const ACRONYM_CLOSE: &str = r"[.!?;:\-\s,)\]}]";
const NEVER: &str = r"\b\B";

/// A detector whose boundary characters are consumed around a `body` group.
///
/// Scanning resumes at the end of the body, so one boundary character can close
/// a match and open the next. Backed by `regex`, so a scan is linear in the input.
#[derive(Debug)]
pub(crate) struct BoundedPattern {
    regex: Regex,
}

impl BoundedPattern {
    fn compile(name: &'static str, open: &str, body: &str, close: &str) -> Result<Self> {
        let regex = Regex::new(&format!("(?:^|{open})(?P<body>{body})(?:$|{close})"))
            .map_err(|err| NormalizeError::pattern(name, err))?;
        Ok(BoundedPattern { regex })
    }

    pub(crate) fn captures_iter<'p, 'h>(&'p self, text: &'h str) -> BoundedMatches<'p, 'h> {
        BoundedMatches {
            regex: &self.regex,
            text,
            pos: 0,
        }
    }

    pub(crate) fn captures<'h>(&self, text: &'h str) -> Option<Captures<'h>> {
        self.captures_iter(text).next()
    }

    pub(crate) fn is_match(&self, text: &str) -> bool {
        self.captures(text).is_some()
    }
}

pub(crate) struct BoundedMatches<'p, 'h> {
    regex: &'p Regex,
    text: &'h str,
    pos: usize,
}

impl<'h> Iterator for BoundedMatches<'_, 'h> {
    type Item = Captures<'h>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos > self.text.len() {
            return None;
        }
        let caps = self.regex.captures_at(self.text, self.pos)?;
        let body = caps.name("body")?;
        // bodies are never empty, so this always moves forward
        self.pos = body.end().max(self.pos + 1);
        Some(caps)
    }
}

/// A case-insensitive detector over dictionary keys plus the expansion of every surface.
#[derive(Debug)]
pub(crate) struct WordPattern {
    pub(crate) regex: Regex,
    expansions: HashMap<String, String>,
}

impl WordPattern {
    fn compile(
        name: &'static str,
        table: &BTreeMap<String, String>,
        folding: Folding<'_>,
    ) -> Result<Self> {
        let mut expansions = HashMap::new();
        for (key, expansion) in table {
            expansions.insert(key.to_lowercase(), expansion.clone());
            expansions.insert(folding.apply(key).to_lowercase(), expansion.clone());
        }
        let body = alternation(expansions.keys().map(String::as_str), render_word_key);
        let regex =
            Regex::new(&format!("(?i)(?:{body})")).map_err(|err| NormalizeError::pattern(name, err))?;
        Ok(WordPattern { regex, expansions })
    }

    pub(crate) fn expand(&self, surface: &str) -> Option<&str> {
        self.expansions
            .get(&surface.to_lowercase())
            .map(String::as_str)
    }
}

#[derive(Debug)]
pub(crate) struct SpecialPattern {
    pub(crate) regex: fancy_regex::Regex,
    pub(crate) literal: String,
    pub(crate) replacement: String,
}

/// Every detector one normalizer needs, built from its config.
#[derive(Debug)]
pub struct CompiledPatterns {
    pub(crate) abbreviation: BoundedPattern,
    pub(crate) weekday: WordPattern,
    pub(crate) month: WordPattern,
    pub(crate) date: Regex,
    /// Lowercased month-name surface -> full month name.
    month_names: HashMap<String, String>,
    pub(crate) currency: BoundedPattern,
    /// Symbol surface as it appears after earlier passes -> spoken currency name.
    currency_symbols: HashMap<String, String>,
    /// Surfaces and spoken names, for the ordinal look-ahead.
    currency_words: HashSet<String>,
    pub(crate) special: Vec<SpecialPattern>,
    pub(crate) accents: AccentMap,
}

impl CompiledPatterns {
    pub fn compile(config: &NormalizationConfig) -> Result<Self> {
        let tables = &config.tables;
        let accents = AccentMap::from_table(&tables.unicode_to_ascii);
        let folding = Folding {
            lowercase: config.make_lowercase,
            accents: config
                .operations
                .contains(&Operation::AccentPeculiarity)
                .then_some(&accents),
        };
        let phonemes = config.operations.contains(&Operation::AcronymPhoneme);

        let alphabet = class_escape(&tables.acronyms.alphabet);
        let abbreviation = BoundedPattern::compile(
            "abbreviation",
            ACRONYM_OPEN,
            &format!(r"[{alphabet}]{{2,}}|(?:[{alphabet}]\.){{2,}}"),
            ACRONYM_CLOSE,
        )?;

        let weekday = WordPattern::compile("weekday", &tables.abbreviations.weekday, folding)?;
        let month = WordPattern::compile("month", &tables.abbreviations.month, folding)?;

        let mut month_names = HashMap::new();
        for (key, name) in &tables.abbreviations.month {
            month_names.insert(key.to_lowercase(), name.clone());
            month_names.insert(folding.apply(key).to_lowercase(), name.clone());
        }
        let names = alternation(month_names.keys().map(String::as_str), render_word_key);
        let date = Regex::new(&format!(
            r"\b(?P<day>0[1-9]|[12][0-9]|3[01]|[1-9])\.(?:(?P<month_number>1[0-2]|0[1-9]|[1-9])\.|\s?(?P<month_name>(?i:{names}))\.?)(?:\s?(?P<year>\d{{4}}|\d{{2}})\b)?"
        ))
        .map_err(|err| NormalizeError::pattern("date", err))?;

        let mut currency_symbols = HashMap::new();
        for (symbol, name) in &tables.currency.symbols {
            for surface in symbol_surfaces(symbol, config, folding, phonemes) {
                currency_symbols.insert(surface, name.clone());
            }
        }
        let mut magnitudes = HashSet::new();
        for magnitude in &tables.currency.magnitudes {
            magnitudes.insert(magnitude.clone());
            magnitudes.insert(folding.apply(magnitude));
        }
        let symbol_alt = alternation(currency_symbols.keys().map(String::as_str), escape);
        let magnitude_alt = alternation(magnitudes.iter().map(String::as_str), escape);
        let currency = BoundedPattern::compile(
            "currency",
            AMOUNT_BOUNDARY,
            &format!(
                r"(?P<lead_number>{NUMBER})\s*(?:(?P<lead_magnitude>{magnitude_alt})\s+)?(?P<trail_symbol>{symbol_alt})|(?P<lead_symbol>{symbol_alt})\s*(?P<trail_number>{NUMBER})(?:\s*(?P<trail_magnitude>{magnitude_alt}))?|(?P<bare_symbol>{symbol_alt})"
            ),
            AMOUNT_BOUNDARY,
        )?;

        let mut currency_words: HashSet<String> = currency_symbols.keys().cloned().collect();
        currency_words.extend(tables.currency.symbols.values().cloned());
        currency_words.extend(tables.currency.symbols.values().map(|n| folding.apply(n)));

        let mut special = Vec::with_capacity(tables.special.len());
        for rule in &tables.special {
            let regex = fancy_regex::Regex::new(&rule.pattern)
                .map_err(|err| NormalizeError::pattern("special", err))?;
            special.push(SpecialPattern {
                regex,
                literal: rule.literal.clone(),
                replacement: rule.replacement.clone(),
            });
        }

        debug!(
            currency_surfaces = currency_symbols.len(),
            month_surfaces = month_names.len(),
            special_rules = special.len(),
            "Compiled normalizer patterns"
        );

        Ok(CompiledPatterns {
            abbreviation,
            weekday,
            month,
            date,
            month_names,
            currency,
            currency_symbols,
            currency_words,
            special,
            accents,
        })
    }

    pub(crate) fn month_name(&self, surface: &str) -> Option<&str> {
        let surface = surface.to_lowercase();
        self.month_names
            .get(&surface)
            .or_else(|| self.month_names.get(&format!("{surface}.")))
            .map(String::as_str)
    }

    pub(crate) fn currency_name(&self, surface: &str) -> Option<&str> {
        self.currency_symbols.get(surface).map(String::as_str)
    }

    pub(crate) fn is_currency_word(&self, token: &str) -> bool {
        let trimmed = token.trim_end_matches(|c: char| c.is_ascii_punctuation() && c != '$');
        self.currency_words.contains(token) || self.currency_words.contains(trimmed)
    }
}

/// How a currency symbol may look once the acronym, case and accent passes ran.
fn symbol_surfaces(
    symbol: &str,
    config: &NormalizationConfig,
    folding: Folding<'_>,
    phonemes: bool,
) -> Vec<String> {
    let acronyms = &config.tables.acronyms;
    let mut surfaces = vec![symbol.to_string(), folding.apply(symbol)];

    let is_acronym = symbol.chars().count() >= 2
        && symbol.chars().all(|c| acronyms.alphabet.contains(c))
        && !acronyms.exclude.contains(symbol);
    if is_acronym {
        let masked = lexicon::mask_acronym(symbol);
        surfaces.push(folding.apply(&masked));
        surfaces.push(masked);
        if phonemes {
            if let Ok(spoken) = lexicon::spell_acronym(symbol, &acronyms.letters) {
                surfaces.push(folding.apply(&spoken));
                surfaces.push(spoken);
            }
        }
    }
    surfaces
}

/// Escaped alternation, longest surface first; never matches when empty.
fn alternation<'a>(surfaces: impl Iterator<Item = &'a str>, render: fn(&str) -> String) -> String {
    let mut surfaces: Vec<&str> = surfaces.filter(|s| !s.is_empty()).collect();
    if surfaces.is_empty() {
        return NEVER.to_string();
    }
    surfaces.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
    surfaces.dedup();
    surfaces
        .into_iter()
        .map(render)
        .collect::<Vec<_>>()
        .join("|")
}

fn escape(literal: &str) -> String {
    regex::escape(literal).replace(SENTINEL, r"\x00")
}

/// Dotted keys must end with their dot; plain keys end at a word boundary.
fn render_word_key(key: &str) -> String {
    match key.strip_suffix('.') {
        Some(stem) => format!(r"\b{}\.", escape(stem)),
        None => format!(r"\b{}\b", escape(key)),
    }
}

fn class_escape(chars: &str) -> String {
    let mut out = String::with_capacity(chars.len());
    for ch in chars.chars() {
        if matches!(ch, '\\' | ']' | '[' | '^' | '-' | '&' | '~') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpecialRule;

    fn compiled(ops: &[Operation]) -> CompiledPatterns {
        CompiledPatterns::compile(&NormalizationConfig::with_operations(ops.iter().copied()))
            .unwrap()
    }

    #[test]
    fn abbreviation_needs_two_letters_and_a_boundary() {
        let patterns = compiled(&[]);
        let found: Vec<String> = patterns
            .abbreviation
            .captures_iter("PKP i (U.S.A.) oraz ABc, Xy NATO.")
            .map(|caps| caps["body"].to_string())
            .collect();
        assert_eq!(found, vec!["PKP", "U.S.A.", "NATO"]);

        let adjacent: Vec<String> = patterns
            .abbreviation
            .captures_iter("AB,CD EF")
            .map(|caps| caps["body"].to_string())
            .collect();
        assert_eq!(adjacent, vec!["AB", "CD", "EF"]);
    }

    #[test]
    fn date_pattern_captures_parts() {
        let patterns = compiled(&[Operation::Date]);
        let caps = patterns.date.captures("z 12.12.2023 roku").unwrap();
        assert_eq!(&caps["day"], "12");
        assert_eq!(&caps["month_number"], "12");
        assert_eq!(&caps["year"], "2023");

        let caps = patterns.date.captures("3. gru. 99").unwrap();
        assert_eq!(&caps["month_name"], "gru.");
        assert_eq!(&caps["year"], "99");

        let caps = patterns.date.captures("1.Maj").unwrap();
        assert_eq!(&caps["month_name"], "Maj");
        assert!(caps.name("year").is_none());
    }

    #[test]
    fn accent_folded_surfaces_are_recognised() {
        let patterns = compiled(&[Operation::AccentPeculiarity]);
        assert!(patterns.weekday.regex.is_match("sr."));
        assert_eq!(patterns.weekday.expand("SR."), Some("środa"));
        assert_eq!(patterns.month_name("paz."), Some("październik"));
        assert_eq!(patterns.currency_name("zl"), Some("złoty"));
    }

    #[test]
    fn currency_symbols_cover_masked_and_spoken_forms() {
        let patterns = compiled(&[Operation::AcronymPhoneme]);
        assert_eq!(patterns.currency_name("pln"), Some("złoty"));
        assert_eq!(patterns.currency_name("p\u{0}l\u{0}n"), Some("złoty"));
        assert_eq!(patterns.currency_name("pe\u{0}el\u{0}en"), Some("złoty"));
        assert!(patterns.is_currency_word("złoty."));
        assert!(patterns.is_currency_word("$"));
    }

    #[test]
    fn currency_pattern_picks_the_right_branch() {
        let patterns = compiled(&[]);
        let caps = patterns.currency.captures("wynosi 2,5 mln zł.").unwrap();
        assert_eq!(&caps["lead_number"], "2,5");
        assert_eq!(&caps["lead_magnitude"], "mln");
        assert_eq!(&caps["trail_symbol"], "zł");

        assert_eq!(&caps["body"], "2,5 mln zł");

        let caps = patterns.currency.captures("cena €15").unwrap();
        assert_eq!(&caps["lead_symbol"], "€");
        assert_eq!(&caps["trail_number"], "15");

        assert!(!patterns.currency.is_match("złoto"));
        assert!(!patterns.currency.is_match("5 mlnzł"));
    }

    #[test]
    fn empty_dictionaries_never_match() {
        let mut config = NormalizationConfig::default();
        config.tables.currency.symbols.clear();
        config.tables.abbreviations.weekday.clear();
        let patterns = CompiledPatterns::compile(&config).unwrap();
        assert!(!patterns.currency.is_match("5 zł"));
        assert!(!patterns.weekday.regex.is_match("pon."));
    }

    #[test]
    fn broken_special_rule_fails_compilation() {
        let mut config = NormalizationConfig::default();
        config.tables.special.push(SpecialRule {
            pattern: "(".to_string(),
            literal: "(".to_string(),
            replacement: "nawias".to_string(),
        });
        let err = CompiledPatterns::compile(&config).unwrap_err();
        assert!(matches!(err, NormalizeError::Pattern { name: "special", .. }));
    }

    #[test]
    fn static_patterns_match_expected_shapes() {
        assert!(RE_TIMESTAMP.is_match("12h:30min:05s"));
        assert!(RE_TIME_OF_DAY.is_match("o 7.05 godz"));
        assert!(RE_ORDINAL.is_match("(3.)"));
        assert!(!RE_ORDINAL.is_match("3.5"));
        assert_eq!(RE_NUMBER_PREFIX.find("1.000,50zł").unwrap().as_str(), "1.000,50");
        assert!(RE_NUMBER.is_match("-12,5"));
    }
}
