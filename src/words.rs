//! Per-token passes with look-ahead into raw tokens and look-behind into cleaned ones.

use tracing::debug;

use crate::config::{MathSymbol, Operation, SymbolGuard, UnitClass};
use crate::error::{NormalizeError, Result};
use crate::lexicon::{self, SENTINEL};
use crate::normalizer::Context;
use crate::numerals::{self, NumeralConverter};
use crate::patterns::{RE_NUMBER, RE_NUMBER_PREFIX, RE_ORDINAL, WordPattern};

/// Runs the word passes over `text` split on single spaces.
pub(crate) fn rewrite<N: NumeralConverter + ?Sized>(
    text: &str,
    ctx: &Context<'_, N>,
) -> Result<Vec<String>> {
    let mut tokens: Vec<String> = text
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();
    let mut cleaned: Vec<String> = Vec::with_capacity(tokens.len());
    let misc = ctx.has(Operation::MiscAbbreviation);

    for idx in 0..tokens.len() {
        let mut word = tokens[idx].clone();
        for op in &ctx.config.operations {
            word = match op {
                Operation::Weekday => expand_abbreviations(&word, &ctx.patterns.weekday),
                Operation::Month => expand_abbreviations(&word, &ctx.patterns.month),
                Operation::Ordinal => ordinal(word, idx, &tokens, cleaned.last(), ctx),
                Operation::Special => special(word, ctx)?,
                Operation::MathSymbol => math_symbol(word, &ctx.config.tables.math_symbols),
                Operation::SpokenSymbol => spoken_symbol(word, idx, &mut tokens, ctx),
                // document-level operations
                Operation::AcronymPhoneme
                | Operation::AccentPeculiarity
                | Operation::AmountMoney
                | Operation::Date
                | Operation::Timestamp
                | Operation::TimeOfDay
                | Operation::MiscAbbreviation
                | Operation::Number => word,
            };
        }

        for (old, new) in &ctx.config.replace {
            if !old.is_empty() {
                word = word.replace(old.as_str(), new);
            }
        }
        // earlier passes may have split the token; each piece agrees on its own
        for piece in word.split(' ').filter(|piece| !piece.is_empty()) {
            let mut piece = piece.to_string();
            if misc {
                piece = misc_abbreviation(piece, ctx);
            }
            piece = number_unit(piece, &mut cleaned, ctx);
            cleaned.push(piece);
        }
    }

    debug!(tokens = cleaned.len(), "Word passes done");
    Ok(cleaned)
}

/// Weekday and month abbreviations; leftover dots go once anything expanded.
fn expand_abbreviations(word: &str, pattern: &WordPattern) -> String {
    let mut changed = false;
    let expanded = pattern
        .regex
        .replace_all(word, |caps: &regex::Captures<'_>| {
            let found = &caps[0];
            match pattern.expand(found) {
                Some(full) => {
                    changed |= full != found;
                    full.to_string()
                }
                None => found.to_string(),
            }
        })
        .into_owned();
    if changed {
        expanded.replace('.', "")
    } else {
        expanded
    }
}

fn ordinal<N: NumeralConverter + ?Sized>(
    word: String,
    idx: usize,
    tokens: &[String],
    previous: Option<&String>,
    ctx: &Context<'_, N>,
) -> String {
    let Some(caps) = RE_ORDINAL.captures(&word) else {
        return word;
    };
    let Some(next) = tokens.get(idx + 1) else {
        return word;
    };
    if ctx.patterns.is_currency_word(next) {
        return word;
    }

    let liaison = &ctx.config.tables.liaison;
    let mut spelled = caps["open"].to_string();
    spelled.push_str(&numerals::spell_ordinal(ctx.numerals, &caps["number"]));
    let trigger = liaison.ordinal_trigger.as_str();
    let after_trigger =
        previous.is_some_and(|prev| !trigger.is_empty() && prev.ends_with(trigger));
    if after_trigger {
        spelled.push_str(&liaison.consonant);
    }
    spelled.push_str(&caps["close"]);
    spelled
}

fn special<N: NumeralConverter + ?Sized>(mut word: String, ctx: &Context<'_, N>) -> Result<String> {
    for rule in &ctx.patterns.special {
        let matched = rule
            .regex
            .is_match(&word)
            .map_err(|err| NormalizeError::matching("special", err))?;
        if !matched || rule.literal.is_empty() {
            continue;
        }
        word = word.replacen(&rule.literal, &rule.replacement, 1);
        word = word
            .split(' ')
            .map(|piece| spell_number_piece(piece, ctx.numerals))
            .collect::<Vec<_>>()
            .join(" ");
    }
    Ok(word)
}

/// A number followed only by punctuation becomes cardinal words; anything else is kept.
fn spell_number_piece<N: NumeralConverter + ?Sized>(piece: &str, numerals: &N) -> String {
    match RE_NUMBER_PREFIX.find(piece) {
        Some(number) if piece[number.end()..].chars().all(|c| c.is_ascii_punctuation()) => {
            let mut spelled = numerals::spell_cardinal(numerals, number.as_str());
            spelled.push_str(&piece[number.end()..]);
            spelled
        }
        _ => piece.to_string(),
    }
}

fn math_symbol(mut word: String, symbols: &[MathSymbol]) -> String {
    for symbol in symbols {
        if symbol.symbol.is_empty() {
            continue;
        }
        let Some(pos) = word.find(&symbol.symbol) else {
            continue;
        };
        let end = pos + symbol.symbol.len();
        let single = word.chars().count() == 1;
        let before = &word[..pos];
        let after = &word[end..];
        let allowed = match symbol.guard {
            SymbolGuard::None => true,
            SymbolGuard::AfterDigit => {
                single || (!before.is_empty() && before.chars().all(|c| c.is_ascii_digit()))
            }
            SymbolGuard::ShortOperands => {
                word != "--"
                    && (single || (before.chars().count() <= 1 && after.chars().count() <= 1))
            }
        };
        if allowed {
            // keep operands apart from the spoken word so numbers stay separate pieces
            let mut spoken = String::with_capacity(symbol.word.len() + 2);
            if !before.is_empty() {
                spoken.push(' ');
            }
            spoken.push_str(&symbol.word);
            if after.starts_with(char::is_alphanumeric) {
                spoken.push(' ');
            }
            word.replace_range(pos..end, &spoken);
        }
    }
    word
}

/// Opening marker becomes its spoken form; the closing marker, here or in a
/// later raw token, becomes a separator.
fn spoken_symbol<N: NumeralConverter + ?Sized>(
    mut word: String,
    idx: usize,
    tokens: &mut [String],
    ctx: &Context<'_, N>,
) -> String {
    let separator = SENTINEL.to_string();
    for symbol in &ctx.config.tables.spoken_symbols {
        if symbol.open.is_empty() || !word.contains(&symbol.open) {
            continue;
        }
        let spoken = symbol.spoken.replace('_', &separator);
        word = word.replace(&symbol.open, &spoken);
        if symbol.close.is_empty() {
            continue;
        }
        if word.contains(&symbol.close) {
            word = word.replace(&symbol.close, &separator);
        } else if let Some(later) = tokens
            .iter_mut()
            .skip(idx + 1)
            .find(|token| token.contains(&symbol.close))
        {
            *later = later.replace(&symbol.close, &separator);
        }
    }
    word
}

fn misc_abbreviation<N: NumeralConverter + ?Sized>(word: String, ctx: &Context<'_, N>) -> String {
    for (short, long) in &ctx.config.tables.abbreviations.misc {
        if word.contains(long.as_str()) {
            continue;
        }
        let dotted = word.strip_suffix('.').is_some_and(|stem| stem == short.as_str());
        if word == *short || dotted {
            return long.clone();
        }
    }
    word
}

/// Unit words agree with the count before them; number-led tokens are spelled.
fn number_unit<N: NumeralConverter + ?Sized>(
    word: String,
    cleaned: &mut [String],
    ctx: &Context<'_, N>,
) -> String {
    let units = &ctx.config.tables.units;
    let key: String = word
        .strip_suffix('.')
        .unwrap_or(&word)
        .chars()
        .filter(|c| *c != SENTINEL)
        .collect();
    if let Some((class, unit)) = units.lookup(&key) {
        return unit_after_count(class, unit, cleaned, ctx);
    }

    let Some(number) = RE_NUMBER_PREFIX.find(&word) else {
        return word;
    };
    let literal = number.as_str();
    let rest = &word[number.end()..];

    let unit_key = rest.strip_suffix('.').unwrap_or(rest);
    if let Some((class, unit)) = units.lookup(unit_key) {
        let one = lexicon::is_one_literal(literal);
        let numeral = if one {
            "jedna".to_string()
        } else {
            numerals::spell_cardinal(ctx.numerals, literal)
        };
        return format!("{numeral} {}", lexicon::unit_form(class, unit, one));
    }

    if !ctx.has(Operation::Number) {
        return word;
    }
    let spelled = numerals::spell_cardinal(ctx.numerals, literal);
    if rest.is_empty() || rest.chars().all(|c| c.is_ascii_punctuation()) {
        format!("{spelled}{rest}")
    } else {
        format!("{spelled} {rest}")
    }
}

fn unit_after_count<N: NumeralConverter + ?Sized>(
    class: UnitClass,
    unit: &str,
    cleaned: &mut [String],
    ctx: &Context<'_, N>,
) -> String {
    let mut one = false;
    if let Some(prev) = cleaned.last_mut() {
        one = lexicon::is_one_word(prev) || lexicon::is_one_literal(prev);
        if one {
            *prev = "jedna".to_string();
        } else if RE_NUMBER.is_match(prev) {
            *prev = numerals::spell_cardinal(ctx.numerals, prev);
        }
    }
    lexicon::unit_form(class, unit, one)
}
