//! Whole-text passes, run in a fixed order before tokenization.

use std::ops::Range;

use tracing::{debug, trace};

use crate::config::Operation;
use crate::error::{NormalizeError, Result};
use crate::lexicon;
use crate::normalizer::Context;
use crate::numerals::{self, NumberValue, NumeralConverter};
use crate::patterns::{RE_TIME_OF_DAY, RE_TIMESTAMP};

/// Text under rewrite plus the offset accumulated by splices in the current pass.
///
/// Replacements are computed from one scan over the pass input, so their ranges
/// refer to that input. `splice` shifts them by the running drift.
#[derive(Debug, Clone, Default)]
pub(crate) struct Document {
    text: String,
    drift: isize,
}

impl Document {
    pub(crate) fn new(text: String) -> Self {
        Document { text, drift: 0 }
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn into_text(self) -> String {
        self.text
    }

    fn replace_all(&mut self, text: String) {
        self.text = text;
        self.drift = 0;
    }

    /// Splices edits given in pass-input coordinates, in ascending order.
    fn apply(&mut self, edits: Vec<(Range<usize>, String)>) {
        self.drift = 0;
        for (range, replacement) in edits {
            self.splice(range, &replacement);
        }
    }

    fn splice(&mut self, range: Range<usize>, replacement: &str) {
        let start = range.start.saturating_add_signed(self.drift);
        let end = range.end.saturating_add_signed(self.drift);
        self.text.replace_range(start..end, replacement);
        self.drift += replacement.len() as isize - range.len() as isize;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DocumentPass {
    Acronyms,
    Lowercase,
    Accents,
    Currency,
    Date,
    Timestamp,
    TimeOfDay,
}

/// Later passes rely on the shapes earlier ones leave behind.
pub(crate) const PASS_ORDER: [DocumentPass; 7] = [
    DocumentPass::Acronyms,
    DocumentPass::Lowercase,
    DocumentPass::Accents,
    DocumentPass::Currency,
    DocumentPass::Date,
    DocumentPass::Timestamp,
    DocumentPass::TimeOfDay,
];

impl DocumentPass {
    fn name(self) -> &'static str {
        match self {
            DocumentPass::Acronyms => "acronyms",
            DocumentPass::Lowercase => "lowercase",
            DocumentPass::Accents => "accents",
            DocumentPass::Currency => "currency",
            DocumentPass::Date => "date",
            DocumentPass::Timestamp => "timestamp",
            DocumentPass::TimeOfDay => "time_of_day",
        }
    }

    pub(crate) fn enabled<N: NumeralConverter + ?Sized>(self, ctx: &Context<'_, N>) -> bool {
        match self {
            DocumentPass::Acronyms => true,
            DocumentPass::Lowercase => ctx.config.make_lowercase,
            DocumentPass::Accents => ctx.has(Operation::AccentPeculiarity),
            DocumentPass::Currency => ctx.has(Operation::AmountMoney),
            DocumentPass::Date => ctx.has(Operation::Date),
            DocumentPass::Timestamp => ctx.has(Operation::Timestamp),
            DocumentPass::TimeOfDay => ctx.has(Operation::TimeOfDay),
        }
    }

    pub(crate) fn run<N: NumeralConverter + ?Sized>(
        self,
        doc: &mut Document,
        ctx: &Context<'_, N>,
    ) -> Result<()> {
        match self {
            DocumentPass::Lowercase => {
                let lowered = doc.text().to_lowercase();
                doc.replace_all(lowered);
                return Ok(());
            }
            DocumentPass::Accents => {
                let stripped = ctx.patterns.accents.strip(doc.text());
                doc.replace_all(stripped);
                return Ok(());
            }
            _ => {}
        }

        let edits = match self {
            DocumentPass::Acronyms => acronym_edits(doc.text(), ctx)?,
            DocumentPass::Currency => currency_edits(doc.text(), ctx)?,
            DocumentPass::Date => date_edits(doc.text(), ctx)?,
            DocumentPass::Timestamp => timestamp_edits(doc.text()),
            DocumentPass::TimeOfDay => time_of_day_edits(doc.text()),
            DocumentPass::Lowercase | DocumentPass::Accents => Vec::new(),
        };
        debug!(pass = self.name(), replacements = edits.len(), "Document pass");
        for (range, replacement) in &edits {
            trace!(pass = self.name(), from = &doc.text()[range.clone()], to = %replacement);
        }
        doc.apply(edits);
        Ok(())
    }
}

/// Masks every acronym with sentinel-joined letters, or spells the letters
/// out when phoneme expansion is on.
fn acronym_edits<N: NumeralConverter + ?Sized>(
    text: &str,
    ctx: &Context<'_, N>,
) -> Result<Vec<(Range<usize>, String)>> {
    let acronyms = &ctx.config.tables.acronyms;
    let phonemes = ctx.has(Operation::AcronymPhoneme);
    let mut edits = Vec::new();
    for caps in ctx.patterns.abbreviation.captures_iter(text) {
        let Some(found) = caps.name("body") else {
            continue;
        };
        let span = found.as_str();
        if acronyms.exclude.contains(span) {
            continue;
        }
        let replacement = if phonemes {
            lexicon::spell_acronym(span, &acronyms.letters)?
        } else {
            lexicon::mask_acronym(span)
        };
        edits.push((found.start()..found.end(), replacement));
    }
    Ok(edits)
}

fn currency_edits<N: NumeralConverter + ?Sized>(
    text: &str,
    ctx: &Context<'_, N>,
) -> Result<Vec<(Range<usize>, String)>> {
    let mut edits = Vec::new();
    for caps in ctx.patterns.currency.captures_iter(text) {
        let Some(whole) = caps.name("body") else {
            continue;
        };
        let Some(symbol) = caps
            .name("trail_symbol")
            .or_else(|| caps.name("lead_symbol"))
            .or_else(|| caps.name("bare_symbol"))
        else {
            continue;
        };
        let name = ctx.patterns.currency_name(symbol.as_str()).ok_or_else(|| {
            NormalizeError::MissingCurrency {
                symbol: symbol.as_str().to_string(),
            }
        })?;
        let number = caps
            .name("lead_number")
            .or_else(|| caps.name("trail_number"))
            .map(|m| m.as_str());
        let magnitude = caps
            .name("lead_magnitude")
            .or_else(|| caps.name("trail_magnitude"))
            .map(|m| m.as_str());

        let phrase = currency_phrase(number, magnitude, name, ctx.numerals);
        edits.push((whole.start()..whole.end(), phrase));
    }
    Ok(edits)
}

/// `<number> [<magnitude>] <name>`, or `<whole> <name> <fraction>` for a decimal
/// amount without a magnitude.
fn currency_phrase<N: NumeralConverter + ?Sized>(
    number: Option<&str>,
    magnitude: Option<&str>,
    name: &str,
    numerals: &N,
) -> String {
    let decimal = number.filter(|n| magnitude.is_none() && n.parse::<NumberValue>().is_ok());
    if let Some(number) = decimal {
        if let Some((whole, fraction)) = number.split_once(',') {
            let mut parts = vec![numerals::spell_cardinal(numerals, whole), name.to_string()];
            if fraction.bytes().any(|b| b != b'0') {
                let split = fraction
                    .char_indices()
                    .nth(2)
                    .map_or(fraction.len(), |(idx, _)| idx);
                let (pair, rest) = fraction.split_at(split);
                parts.push(numerals::spell_cardinal(numerals, pair));
                for digit in rest.chars() {
                    parts.push(numerals::spell_cardinal(numerals, digit.encode_utf8(&mut [0; 4])));
                }
            }
            return parts.join(" ");
        }
    }

    let mut parts = Vec::with_capacity(3);
    if let Some(number) = number {
        parts.push(numerals::spell_cardinal(numerals, number));
    }
    if let Some(magnitude) = magnitude {
        parts.push(magnitude.to_string());
    }
    parts.push(name.to_string());
    parts.join(" ")
}

fn date_edits<N: NumeralConverter + ?Sized>(
    text: &str,
    ctx: &Context<'_, N>,
) -> Result<Vec<(Range<usize>, String)>> {
    let liaison = &ctx.config.tables.liaison;
    let mut edits = Vec::new();
    for caps in ctx.patterns.date.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let Some(day) = caps.name("day") else {
            continue;
        };
        let mut phrase = numerals::spell_ordinal(ctx.numerals, day.as_str());
        if ends_with_trigger(&text[..whole.start()], &liaison.date_triggers) {
            phrase.push_str(&liaison.consonant);
        }

        let month = if let Some(number) = caps.name("month_number") {
            ctx.config
                .tables
                .abbreviations
                .number_month
                .get(number.as_str())
                .map(String::as_str)
                .ok_or_else(|| NormalizeError::MissingMonth {
                    fragment: number.as_str().to_string(),
                })?
        } else {
            let fragment = caps.name("month_name").map_or("", |m| m.as_str());
            ctx.patterns
                .month_name(fragment)
                .ok_or_else(|| NormalizeError::MissingMonth {
                    fragment: fragment.to_string(),
                })?
        };
        phrase.push(' ');
        phrase.push_str(month);

        if let Some(year) = caps.name("year") {
            phrase.push(' ');
            phrase.push_str(&numerals::spell_year(ctx.numerals, year.as_str()));
        }
        edits.push((whole.start()..whole.end(), phrase));
    }
    Ok(edits)
}

fn ends_with_trigger(before: &str, triggers: &[String]) -> bool {
    let mut tail: Vec<char> = before.chars().rev().take(2).collect();
    if tail.len() < 2 {
        return false;
    }
    tail.reverse();
    let tail: String = tail.into_iter().collect();
    triggers.iter().any(|trigger| *trigger == tail)
}

fn is_one_digits(digits: &str) -> bool {
    digits.trim_start_matches('0') == "1"
}

fn timestamp_edits(text: &str) -> Vec<(Range<usize>, String)> {
    let mut edits = Vec::new();
    for caps in RE_TIMESTAMP.captures_iter(text) {
        let (Some(whole), Some(hours), Some(minutes)) =
            (caps.get(0), caps.name("hours"), caps.name("minutes"))
        else {
            continue;
        };
        let mut parts = vec![
            component(hours.as_str(), "jedna godzina", "godzin"),
            component(minutes.as_str(), "jedna minuta", "minut"),
        ];
        if let Some(seconds) = caps.name("seconds") {
            parts.push(component(seconds.as_str(), "jedna sekunda", "sekund"));
        }
        edits.push((whole.start()..whole.end(), parts.join(" ")));
    }
    edits
}

fn component(digits: &str, one: &str, many: &str) -> String {
    if is_one_digits(digits) {
        one.to_string()
    } else {
        format!("{digits} {many}")
    }
}

fn time_of_day_edits(text: &str) -> Vec<(Range<usize>, String)> {
    let mut edits = Vec::new();
    for caps in RE_TIME_OF_DAY.captures_iter(text) {
        let (Some(whole), Some(hour), Some(minute)) =
            (caps.get(0), caps.name("hour"), caps.name("minute"))
        else {
            continue;
        };
        let phrase = if is_one_digits(hour.as_str()) {
            format!("jedna godzina {}", minute.as_str())
        } else {
            format!("{} godzina {}", hour.as_str(), minute.as_str())
        };
        edits.push((whole.start()..whole.end(), phrase));
    }
    edits
}
