use std::path::Path;

use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::config::{self, NormalizationConfig, Operation};
use crate::document::{Document, PASS_ORDER};
use crate::error::{NormalizeError, Result};
use crate::lexicon::SENTINEL;
use crate::numerals::{NumeralConverter, PolishNumerals};
use crate::patterns::{CompiledPatterns, RE_WHITESPACE};
use crate::words;

pub const DEFAULT_NORMALIZER_PATH: &str = "conf/normalizer.toml";

/// Borrowed view handed to every pass of one `transliterate` call.
pub(crate) struct Context<'a, N: NumeralConverter + ?Sized> {
    pub(crate) config: &'a NormalizationConfig,
    pub(crate) patterns: &'a CompiledPatterns,
    pub(crate) numerals: &'a N,
}

impl<'a, N: NumeralConverter + ?Sized> Context<'a, N> {
    pub(crate) fn new(
        config: &'a NormalizationConfig,
        patterns: &'a CompiledPatterns,
        numerals: &'a N,
    ) -> Self {
        Context {
            config,
            patterns,
            numerals,
        }
    }

    pub(crate) fn has(&self, op: Operation) -> bool {
        self.config.operations.contains(&op)
    }
}

/// Polish text normalizer. Build once, then share freely between threads.
///
/// ```
/// use pl_normalizer::{NormalizationConfig, Operation, TextNormalizer};
///
/// let config = NormalizationConfig::with_operations([Operation::AmountMoney]);
/// let normalizer = TextNormalizer::new(config).unwrap();
/// assert_eq!(
///     normalizer.transliterate("Kwota wynosi 1000 zł.").unwrap(),
///     "kwota wynosi tysiąc złoty."
/// );
/// ```
#[derive(Debug)]
pub struct TextNormalizer<N = PolishNumerals> {
    config: NormalizationConfig,
    patterns: CompiledPatterns,
    numerals: N,
}

impl TextNormalizer<PolishNumerals> {
    pub fn new(config: NormalizationConfig) -> Result<Self> {
        Self::with_converter(config, PolishNumerals)
    }

    pub fn load_default() -> Result<Self> {
        Self::load(Path::new(DEFAULT_NORMALIZER_PATH))
    }

    /// Config from `path`, or the defaults when it is missing or invalid.
    pub fn load(path: &Path) -> Result<Self> {
        Self::new(config::load_config(path))
    }
}

impl<N: NumeralConverter> TextNormalizer<N> {
    pub fn with_converter(mut config: NormalizationConfig, numerals: N) -> Result<Self> {
        let mut operations = Vec::with_capacity(config.operations.len());
        for op in config.operations.drain(..) {
            if !operations.contains(&op) {
                operations.push(op);
            }
        }
        config.operations = operations;

        let patterns = CompiledPatterns::compile(&config)?;
        debug!(
            operations = ?config.operations,
            lowercase = config.make_lowercase,
            "Built text normalizer"
        );
        Ok(TextNormalizer {
            config,
            patterns,
            numerals,
        })
    }

    pub fn config(&self) -> &NormalizationConfig {
        &self.config
    }

    pub fn transliterate(&self, text: &str) -> Result<String> {
        let text: String = text
            .nfc()
            .map(|c| if c == SENTINEL { ' ' } else { c })
            .collect();
        let max = self.config.max_input_chars;
        if max > 0 {
            let len = text.chars().count();
            if len > max {
                return Err(NormalizeError::InputTooLong { len, max });
            }
        }

        let ctx = Context::new(&self.config, &self.patterns, &self.numerals);
        let mut doc = Document::new(text);
        for pass in PASS_ORDER {
            if pass.enabled(&ctx) {
                pass.run(&mut doc, &ctx)?;
            }
        }

        let text = doc.into_text();
        let words = words::rewrite(&text, &ctx)?;
        let joined = words
            .join(" ")
            .replace(SENTINEL, &self.config.sep_abbreviation);
        let collapsed = RE_WHITESPACE.replace_all(&joined, " ");
        Ok(collapsed.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerals::{NumberValue, NumeralError};
    use proptest::prelude::*;

    fn normalizer(ops: &[Operation]) -> TextNormalizer {
        TextNormalizer::new(NormalizationConfig::with_operations(ops.iter().copied())).unwrap()
    }

    #[test]
    fn math_symbols_are_spoken_and_digits_kept() {
        let n = normalizer(&[Operation::AccentPeculiarity, Operation::MathSymbol]);
        assert_eq!(
            n.transliterate("Matematyka: 5 + 5 = 10, 2 * 3 = 6.").unwrap(),
            "matematyka: 5 plus 5 równa się 10, 2 razy 3 równa się 6."
        );
    }

    #[test]
    fn date_after_nowakiem_gets_liaison() {
        let n = normalizer(&[Operation::AcronymPhoneme, Operation::Date]);
        assert_eq!(
            n.transliterate("dr Jan Kowalski spotkał się z prof. Nowakiem 12.12.2023 roku.")
                .unwrap(),
            "dr jan kowalski spotkał się z prof. nowakiem dwunastyn grudzień dwa tysiące dwadzieścia trzy roku."
        );
    }

    #[test]
    fn amount_reads_as_phrase() {
        let n = normalizer(&[Operation::AmountMoney]);
        assert_eq!(
            n.transliterate("Kwota wynosi 1000 zł.").unwrap(),
            "kwota wynosi tysiąc złoty."
        );
    }

    #[test]
    fn unit_agreement_runs_without_operations() {
        assert_eq!(normalizer(&[]).transliterate("1 kg").unwrap(), "jedna kilogram");
    }

    #[test]
    fn excluded_acronym_is_left_alone() {
        let n = normalizer(&[Operation::AcronymPhoneme]);
        assert_eq!(n.transliterate("USA").unwrap(), "usa");

        let mut config = NormalizationConfig::with_operations([Operation::AcronymPhoneme]);
        config.make_lowercase = false;
        let n = TextNormalizer::new(config).unwrap();
        assert_eq!(n.transliterate("USA i PKP").unwrap(), "USA i pe ka pe");
    }

    #[test]
    fn separator_replaces_sentinel() {
        let mut config = NormalizationConfig::with_operations([]);
        config.sep_abbreviation = "-".to_string();
        let n = TextNormalizer::new(config).unwrap();
        assert_eq!(n.transliterate("Jadę PKP").unwrap(), "jadę p-k-p");
    }

    #[test]
    fn input_sentinel_is_scrubbed() {
        let n = normalizer(&[]);
        assert_eq!(n.transliterate("a\u{0}b").unwrap(), "a b");
    }

    #[test]
    fn decomposed_diacritics_are_composed_first() {
        let n = normalizer(&[Operation::AccentPeculiarity]);
        assert_eq!(n.transliterate("z\u{307}o\u{301}łw").unwrap(), "zolw");
    }

    #[test]
    fn long_input_is_rejected() {
        let mut config = NormalizationConfig::with_operations([]);
        config.max_input_chars = 3;
        let n = TextNormalizer::new(config).unwrap();
        let err = n.transliterate("abcd").unwrap_err();
        assert!(matches!(err, NormalizeError::InputTooLong { len: 4, max: 3 }));
        assert_eq!(n.transliterate("abc").unwrap(), "abc");
    }

    #[test]
    fn missing_phoneme_is_fatal() {
        let mut config = NormalizationConfig::with_operations([Operation::AcronymPhoneme]);
        config.tables.acronyms.letters.remove("K");
        let n = TextNormalizer::new(config).unwrap();
        let err = n.transliterate("Jadę PKP").unwrap_err();
        assert!(matches!(err, NormalizeError::MissingPhoneme { letter: 'K' }));
    }

    #[test]
    fn duplicate_operations_are_dropped() {
        let n = normalizer(&[Operation::Number, Operation::Date, Operation::Number]);
        assert_eq!(n.config().operations, vec![Operation::Number, Operation::Date]);
    }

    #[test]
    fn default_pipeline_handles_mixed_text() {
        let n = TextNormalizer::new(NormalizationConfig::default()).unwrap();
        assert_eq!(
            n.transliterate("Spotkanie o 12:30,   koszt 5 PLN!").unwrap(),
            "spotkanie o dwanaście godzin trzydzieści minut, koszt pięć złoty!"
        );
    }

    #[test]
    fn multiplication_sign_keeps_operands_apart() {
        let n = normalizer(&[Operation::MathSymbol, Operation::Number]);
        assert_eq!(n.transliterate("2×3").unwrap(), "dwa razy trzy");
        assert_eq!(n.transliterate("2x3 i 50%.").unwrap(), "dwa razy trzy i pięćdziesiąt procent.");
    }

    #[test]
    fn long_text_without_amounts_stays_within_limits() {
        let n = TextNormalizer::new(NormalizationConfig::default()).unwrap();
        let prose = "Ala ma kota, a kot ma Alę. ".repeat(3_600);
        assert!(prose.chars().count() < n.config().max_input_chars);
        let out = n.transliterate(&prose).unwrap();
        assert!(out.starts_with("ala ma kota, a kot ma ale. ala ma kota"));

        let acronyms = "AB ".repeat(10_000);
        assert!(n.transliterate(&acronyms).unwrap().starts_with("a be a be"));

        let padded = format!("5{}", " ".repeat(60_000));
        assert_eq!(n.transliterate(&padded).unwrap(), "pięć");
    }

    #[test]
    fn normalizer_is_shared_across_threads() {
        let n = normalizer(&[Operation::Number]);
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    let n = &n;
                    scope.spawn(move || n.transliterate(&format!("mam {i} koty")).unwrap())
                })
                .collect();
            let outputs: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
            assert_eq!(outputs[2], "mam dwa koty");
        });
    }

    #[derive(Debug)]
    struct Digits;

    impl NumeralConverter for Digits {
        fn cardinal(&self, value: &NumberValue) -> std::result::Result<String, NumeralError> {
            Ok(format!("<{}>", value.whole))
        }

        fn ordinal(&self, value: u64) -> std::result::Result<String, NumeralError> {
            Ok(format!("<{value}.>"))
        }
    }

    #[test]
    fn custom_converter_is_used() {
        let config = NormalizationConfig::with_operations([Operation::Number, Operation::Date]);
        let n = TextNormalizer::with_converter(config, Digits).unwrap();
        assert_eq!(
            n.transliterate("mam 3 koty od 1.05.2020").unwrap(),
            "mam <3> koty od <1.> maj <2020>"
        );
    }

    proptest! {
        #[test]
        fn currency_symbol_position_does_not_matter(amount in 0u32..1_000_000, idx in 0usize..9) {
            let n = TextNormalizer::new(NormalizationConfig::default()).unwrap();
            let symbols: Vec<String> = n.config().tables.currency.symbols.keys().cloned().collect();
            let symbol = &symbols[idx % symbols.len()];
            let trailing = n.transliterate(&format!("{amount} {symbol}")).unwrap();
            let leading = n.transliterate(&format!("{symbol}{amount}")).unwrap();
            prop_assert_eq!(trailing, leading);
        }

        #[test]
        fn whitespace_runs_collapse(words in proptest::collection::vec("[a-z]{1,6}", 1..6), gaps in proptest::collection::vec("[ \t\n]{1,4}", 6)) {
            let n = normalizer(&[]);
            let mut input = String::new();
            for (word, gap) in words.iter().zip(gaps.iter()) {
                input.push_str(word);
                input.push_str(gap);
            }
            let out = n.transliterate(&input).unwrap();
            prop_assert!(!out.contains("  "));
            prop_assert!(!out.contains('\t') && !out.contains('\n'));
            prop_assert_eq!(out.trim(), out.as_str());
        }

        #[test]
        fn accent_stripping_is_idempotent(text in "[a-ząćęłńóśźż ]{0,40}") {
            let n = normalizer(&[Operation::AccentPeculiarity]);
            let once = n.transliterate(&text).unwrap();
            let twice = n.transliterate(&once).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn normalized_text_has_no_digits_acronyms_or_symbols(parts in proptest::collection::vec(
            prop_oneof![
                "(ala|ma|kota|i|psa)".prop_map(|s| s.to_string()),
                (0u32..2_000_000).prop_map(|n| n.to_string()),
                "(PKP|NBP|PZU|N\\.B\\.P\\.)".prop_map(|s| s.to_string()),
                (0u32..100_000, 0usize..9, any::<bool>()).prop_map(|(amount, idx, leading)| {
                    let symbols = NormalizationConfig::default().tables.currency.symbols;
                    let symbol = symbols.keys().nth(idx % symbols.len()).cloned().unwrap();
                    if leading {
                        format!("{symbol}{amount}")
                    } else {
                        format!("{amount} {symbol}")
                    }
                }),
            ],
            1..8,
        )) {
            let n = TextNormalizer::new(NormalizationConfig::default()).unwrap();
            let symbols: Vec<String> = n
                .config()
                .tables
                .currency
                .symbols
                .keys()
                .map(|s| s.to_lowercase())
                .collect();
            let leftover_symbol = |text: &str| {
                text.split(' ')
                    .map(|token| token.trim_matches(|c: char| c.is_ascii_punctuation() && c != '$'))
                    .any(|token| symbols.iter().any(|s| s == token || token.contains(['€', '$', '£'])))
            };

            let out = n.transliterate(&parts.join(" ")).unwrap();
            prop_assert!(!out.chars().any(|c| c.is_ascii_digit() || c.is_uppercase()), "{}", out);
            prop_assert!(!leftover_symbol(&out), "{}", out);

            let again = n.transliterate(&out).unwrap();
            prop_assert!(!again.chars().any(|c| c.is_ascii_digit() || c.is_uppercase()), "{}", again);
            prop_assert!(!leftover_symbol(&again), "{}", again);
        }
    }
}
