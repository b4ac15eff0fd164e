//! Polish number words.
//!
//! The rewriters only talk to [`NumeralConverter`]; [`PolishNumerals`] is the
//! built-in implementation (masculine nominative forms).

use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NumeralError {
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("'{0}' is too large to spell out")]
    Overflow(String),
}

/// A parsed numeric literal.
///
/// Follows the Polish convention: a single comma separates the fraction and
/// dots group thousands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberValue {
    pub negative: bool,
    pub whole: u64,
    /// Fraction digits with trailing zeros trimmed ("0" when all were zero).
    pub fraction: Option<String>,
}

impl From<u64> for NumberValue {
    fn from(whole: u64) -> Self {
        NumberValue {
            negative: false,
            whole,
            fraction: None,
        }
    }
}

impl FromStr for NumberValue {
    type Err = NumeralError;

    fn from_str(literal: &str) -> Result<Self, Self::Err> {
        let not_a_number = || NumeralError::NotANumber(literal.to_string());
        let (negative, body) = match literal.as_bytes().first() {
            Some(b'-') => (true, &literal[1..]),
            Some(b'+') => (false, &literal[1..]),
            _ => (false, literal),
        };

        let (whole, fraction) = match body.matches(',').count() {
            0 => (body.replace('.', ""), None),
            1 => {
                let (whole, fraction) = body.split_once(',').ok_or_else(not_a_number)?;
                (whole.replace('.', ""), Some(fraction))
            }
            _ => return Err(not_a_number()),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(not_a_number());
        }
        let whole = whole
            .parse::<u64>()
            .map_err(|_| NumeralError::Overflow(literal.to_string()))?;

        let fraction = match fraction {
            None => None,
            Some(digits) if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) => {
                return Err(not_a_number());
            }
            Some(digits) => {
                let trimmed = digits.trim_end_matches('0');
                Some(if trimmed.is_empty() {
                    "0".to_string()
                } else {
                    trimmed.to_string()
                })
            }
        };

        Ok(NumberValue {
            negative,
            whole,
            fraction,
        })
    }
}

pub trait NumeralConverter: Send + Sync {
    fn cardinal(&self, value: &NumberValue) -> Result<String, NumeralError>;

    fn ordinal(&self, value: u64) -> Result<String, NumeralError>;

    fn year(&self, value: u64) -> Result<String, NumeralError> {
        self.cardinal(&NumberValue::from(value))
    }
}

/// Spell `literal` as cardinal words, keeping the literal when it does not parse.
pub(crate) fn spell_cardinal<N: NumeralConverter + ?Sized>(numerals: &N, literal: &str) -> String {
    let spelled = literal
        .parse::<NumberValue>()
        .and_then(|value| numerals.cardinal(&value));
    match spelled {
        Ok(words) => words,
        Err(err) => {
            debug!(literal, "Keeping numeric literal: {err}");
            literal.to_string()
        }
    }
}

/// Spell `literal` as ordinal words, keeping the literal when it does not parse.
pub(crate) fn spell_ordinal<N: NumeralConverter + ?Sized>(numerals: &N, literal: &str) -> String {
    let spelled = literal
        .parse::<u64>()
        .map_err(|_| NumeralError::NotANumber(literal.to_string()))
        .and_then(|value| numerals.ordinal(value));
    match spelled {
        Ok(words) => words,
        Err(err) => {
            debug!(literal, "Keeping ordinal literal: {err}");
            literal.to_string()
        }
    }
}

pub(crate) fn spell_year<N: NumeralConverter + ?Sized>(numerals: &N, literal: &str) -> String {
    let spelled = literal
        .parse::<u64>()
        .map_err(|_| NumeralError::NotANumber(literal.to_string()))
        .and_then(|value| numerals.year(value));
    match spelled {
        Ok(words) => words,
        Err(err) => {
            debug!(literal, "Keeping year literal: {err}");
            literal.to_string()
        }
    }
}

const ONES: [&str; 10] = [
    "zero", "jeden", "dwa", "trzy", "cztery", "pięć", "sześć", "siedem", "osiem", "dziewięć",
];

const TEENS: [&str; 10] = [
    "dziesięć",
    "jedenaście",
    "dwanaście",
    "trzynaście",
    "czternaście",
    "piętnaście",
    "szesnaście",
    "siedemnaście",
    "osiemnaście",
    "dziewiętnaście",
];

const TENS: [&str; 10] = [
    "",
    "dziesięć",
    "dwadzieścia",
    "trzydzieści",
    "czterdzieści",
    "pięćdziesiąt",
    "sześćdziesiąt",
    "siedemdziesiąt",
    "osiemdziesiąt",
    "dziewięćdziesiąt",
];

const HUNDREDS: [&str; 10] = [
    "",
    "sto",
    "dwieście",
    "trzysta",
    "czterysta",
    "pięćset",
    "sześćset",
    "siedemset",
    "osiemset",
    "dziewięćset",
];

// singular, 2-4 plural, genitive plural
const SCALES: [[&str; 3]; 6] = [
    ["tysiąc", "tysiące", "tysięcy"],
    ["milion", "miliony", "milionów"],
    ["miliard", "miliardy", "miliardów"],
    ["bilion", "biliony", "bilionów"],
    ["biliard", "biliardy", "biliardów"],
    ["trylion", "tryliony", "trylionów"],
];

const ORD_ONES: [&str; 20] = [
    "zerowy",
    "pierwszy",
    "drugi",
    "trzeci",
    "czwarty",
    "piąty",
    "szósty",
    "siódmy",
    "ósmy",
    "dziewiąty",
    "dziesiąty",
    "jedenasty",
    "dwunasty",
    "trzynasty",
    "czternasty",
    "piętnasty",
    "szesnasty",
    "siedemnasty",
    "osiemnasty",
    "dziewiętnasty",
];

const ORD_TENS: [&str; 10] = [
    "",
    "dziesiąty",
    "dwudziesty",
    "trzydziesty",
    "czterdziesty",
    "pięćdziesiąty",
    "sześćdziesiąty",
    "siedemdziesiąty",
    "osiemdziesiąty",
    "dziewięćdziesiąty",
];

const ORD_HUNDREDS: [&str; 10] = [
    "",
    "setny",
    "dwusetny",
    "trzechsetny",
    "czterechsetny",
    "pięćsetny",
    "sześćsetny",
    "siedemsetny",
    "osiemsetny",
    "dziewięćsetny",
];

const ORD_SCALES: [&str; 6] = [
    "tysięczny",
    "milionowy",
    "miliardowy",
    "bilionowy",
    "biliardowy",
    "trylionowy",
];

const COMPOUND_PREFIX: [&str; 10] = [
    "", "", "dwu", "trzy", "cztero", "pięcio", "sześcio", "siedmio", "ośmio", "dziewięcio",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct PolishNumerals;

impl PolishNumerals {
    fn plural_form(count: u64) -> usize {
        if count == 1 {
            0
        } else if (2..=4).contains(&(count % 10)) && !(12..=14).contains(&(count % 100)) {
            1
        } else {
            2
        }
    }

    fn below_thousand(value: u64, words: &mut Vec<&'static str>) {
        let hundreds = (value / 100) as usize;
        let rest = value % 100;
        if hundreds > 0 {
            words.push(HUNDREDS[hundreds]);
        }
        if (10..20).contains(&rest) {
            words.push(TEENS[(rest - 10) as usize]);
            return;
        }
        let tens = (rest / 10) as usize;
        let ones = (rest % 10) as usize;
        if tens > 0 {
            words.push(TENS[tens]);
        }
        if ones > 0 {
            words.push(ONES[ones]);
        }
    }

    fn whole_words(value: u64) -> String {
        if value == 0 {
            return ONES[0].to_string();
        }
        let mut chunks = Vec::new();
        let mut rest = value;
        while rest > 0 {
            chunks.push(rest % 1000);
            rest /= 1000;
        }

        let mut words = Vec::new();
        for (scale, chunk) in chunks.iter().enumerate().rev() {
            let chunk = *chunk;
            if chunk == 0 {
                continue;
            }
            if scale == 0 {
                Self::below_thousand(chunk, &mut words);
                continue;
            }
            if chunk != 1 {
                Self::below_thousand(chunk, &mut words);
            }
            words.push(SCALES[scale - 1][Self::plural_form(chunk)]);
        }
        words.join(" ")
    }

    fn ordinal_below_thousand(value: u64) -> String {
        let hundreds = (value / 100) as usize;
        let rest = value % 100;
        if rest == 0 {
            return if hundreds == 0 {
                ORD_ONES[0].to_string()
            } else {
                ORD_HUNDREDS[hundreds].to_string()
            };
        }

        let mut words = Vec::new();
        if hundreds > 0 {
            words.push(HUNDREDS[hundreds]);
        }
        if rest < 20 {
            words.push(ORD_ONES[rest as usize]);
        } else {
            words.push(ORD_TENS[(rest / 10) as usize]);
            if rest % 10 > 0 {
                words.push(ORD_ONES[(rest % 10) as usize]);
            }
        }
        words.join(" ")
    }

    fn round_ordinal(value: u64) -> String {
        // value is a non-zero multiple of 1000
        let mut scale = 0;
        let mut head = value;
        while head % 1000 == 0 {
            head /= 1000;
            scale += 1;
        }
        let last = head % 1000;
        let higher = (head - last) * 1000u64.pow(scale as u32);
        let suffix = ORD_SCALES[scale - 1];

        let tail = match last {
            1 => suffix.to_string(),
            2..=9 => format!("{}{suffix}", COMPOUND_PREFIX[last as usize]),
            _ => format!("{} {suffix}", Self::whole_words(last)),
        };
        if higher == 0 {
            tail
        } else {
            format!("{} {tail}", Self::whole_words(higher))
        }
    }
}

impl NumeralConverter for PolishNumerals {
    fn cardinal(&self, value: &NumberValue) -> Result<String, NumeralError> {
        let mut words = String::new();
        if value.negative {
            words.push_str("minus ");
        }
        words.push_str(&Self::whole_words(value.whole));
        if let Some(fraction) = &value.fraction {
            words.push_str(" przecinek");
            for digit in fraction.bytes() {
                words.push(' ');
                words.push_str(ONES[(digit - b'0') as usize]);
            }
        }
        Ok(words)
    }

    fn ordinal(&self, value: u64) -> Result<String, NumeralError> {
        let rest = value % 1000;
        if value < 1000 {
            return Ok(Self::ordinal_below_thousand(value));
        }
        if rest == 0 {
            return Ok(Self::round_ordinal(value));
        }
        Ok(format!(
            "{} {}",
            Self::whole_words(value - rest),
            Self::ordinal_below_thousand(rest)
        ))
    }
}
