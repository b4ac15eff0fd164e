//! Helpers over the lexical tables: accent folding, acronym spelling and unit forms.

use std::collections::{BTreeMap, HashMap};

use crate::config::UnitClass;
use crate::error::{NormalizeError, Result};

/// Marks boundaries inside a token (spelled acronym letters, spoken symbols).
/// Replaced by the configured separator once the word passes are done.
pub const SENTINEL: char = '\u{0}';

/// Per-character ASCII replacements built from the `unicode_to_ascii` table.
#[derive(Debug, Clone, Default)]
pub struct AccentMap {
    chars: HashMap<char, String>,
}

impl AccentMap {
    pub fn from_table(table: &BTreeMap<String, String>) -> Self {
        let mut chars = HashMap::new();
        for (class, replacement) in table {
            for ch in class.chars() {
                chars.insert(ch, replacement.clone());
            }
        }
        AccentMap { chars }
    }

    pub fn strip(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for ch in text.chars() {
            match self.chars.get(&ch) {
                Some(replacement) => out.push_str(replacement),
                None => out.push(ch),
            }
        }
        out
    }
}

/// The document-level rewrites a dictionary surface goes through before the
/// word passes see it.
#[derive(Debug, Clone, Copy)]
pub struct Folding<'a> {
    pub lowercase: bool,
    pub accents: Option<&'a AccentMap>,
}

impl Folding<'_> {
    pub fn apply(&self, text: &str) -> String {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        match self.accents {
            Some(map) => map.strip(&text),
            None => text,
        }
    }
}

/// Letters of an acronym span (dots dropped) joined by the sentinel.
pub fn mask_acronym(span: &str) -> String {
    let mut out = String::with_capacity(span.len() * 2);
    for ch in span.chars().filter(|c| *c != '.') {
        if !out.is_empty() {
            out.push(SENTINEL);
        }
        out.push(ch);
    }
    out
}

/// Spoken letter names of an acronym span joined by the sentinel.
pub fn spell_acronym(span: &str, letters: &BTreeMap<String, String>) -> Result<String> {
    let mut spoken = Vec::new();
    for letter in span.chars().filter(|c| *c != '.') {
        let mut key = [0u8; 4];
        let name = letters
            .get(letter.encode_utf8(&mut key) as &str)
            .ok_or(NormalizeError::MissingPhoneme { letter })?;
        spoken.push(name.as_str());
    }
    Ok(spoken.join(&SENTINEL.to_string()))
}

/// Unit word for the given count, dropping the class's singular suffix when the count is one.
pub fn unit_form(class: UnitClass, word: &str, count_is_one: bool) -> String {
    let drop = match (class, count_is_one) {
        (UnitClass::SuffixN, true) => 1,
        (UnitClass::SuffixEn, true) => 2,
        _ => 0,
    };
    let keep = word.chars().count().saturating_sub(drop);
    word.chars().take(keep).collect()
}

/// Spoken words that already say "one" and agree with a following unit.
pub fn is_one_word(word: &str) -> bool {
    matches!(word, "jeden" | "jedna" | "jedną")
}

/// `1`, `1.0`, `1,00`, ... with the sign ignored.
pub fn is_one_literal(literal: &str) -> bool {
    let body = literal.trim_start_matches(['+', '-']);
    match body.split_once(['.', ',']) {
        Some((whole, fraction)) => {
            whole == "1" && !fraction.is_empty() && fraction.bytes().all(|b| b == b'0')
        }
        None => body == "1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LexicalTables;

    #[test]
    fn accent_map_replaces_whole_class() {
        let tables = LexicalTables::default();
        let map = AccentMap::from_table(&tables.unicode_to_ascii);
        assert_eq!(map.strip("Zażółć gęślą jaźń"), "Zazolc gesla jazn");
        assert_eq!(map.strip("œuvre"), "oeuvre");
    }

    #[test]
    fn folding_lowercases_then_strips() {
        let tables = LexicalTables::default();
        let map = AccentMap::from_table(&tables.unicode_to_ascii);
        let folding = Folding {
            lowercase: true,
            accents: Some(&map),
        };
        assert_eq!(folding.apply("ZŁ"), "zl");
        let keep_case = Folding {
            lowercase: false,
            accents: None,
        };
        assert_eq!(keep_case.apply("ZŁ"), "ZŁ");
    }

    #[test]
    fn masks_and_spells_acronyms() {
        let tables = LexicalTables::default();
        assert_eq!(mask_acronym("P.K.P."), "P\u{0}K\u{0}P");
        assert_eq!(
            spell_acronym("PKP", &tables.acronyms.letters).unwrap(),
            "pe\u{0}ka\u{0}pe"
        );
    }

    #[test]
    fn missing_letter_names_the_letter() {
        let letters = BTreeMap::from([("A".to_string(), "a".to_string())]);
        let err = spell_acronym("AB", &letters).unwrap_err();
        assert!(matches!(err, NormalizeError::MissingPhoneme { letter: 'B' }));
    }

    #[test]
    fn unit_forms_drop_suffix_for_one() {
        assert_eq!(unit_form(UnitClass::NoSuffix, "kilogram", true), "kilogram");
        assert_eq!(unit_form(UnitClass::SuffixN, "minut", true), "minu");
        assert_eq!(unit_form(UnitClass::SuffixEn, "tysięcy", true), "tysię");
        assert_eq!(unit_form(UnitClass::SuffixEn, "tysięcy", false), "tysięcy");
    }

    #[test]
    fn recognises_one() {
        assert!(is_one_literal("1"));
        assert!(is_one_literal("-1,00"));
        assert!(is_one_literal("+1.0"));
        assert!(!is_one_literal("10"));
        assert!(!is_one_literal("1,5"));
        assert!(is_one_word("jedną"));
        assert!(!is_one_word("dwa"));
    }
}
