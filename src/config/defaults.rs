use std::collections::{BTreeMap, BTreeSet};

use crate::config::{LogLevel, MathSymbol, Operation, SpecialRule, SymbolGuard};

fn string_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Operations enabled when a library caller does not choose any.
pub(crate) fn default_operations() -> Vec<Operation> {
    vec![
        Operation::AcronymPhoneme,
        Operation::AccentPeculiarity,
        Operation::AmountMoney,
        Operation::Date,
        Operation::Timestamp,
        Operation::TimeOfDay,
        Operation::Ordinal,
        Operation::Special,
        Operation::MiscAbbreviation,
        Operation::Number,
    ]
}

/// Operation set used by the command-line entry point.
pub fn cli_operations() -> Vec<Operation> {
    default_operations()
        .into_iter()
        .filter(|op| *op != Operation::AcronymPhoneme)
        .collect()
}

pub(crate) fn default_make_lowercase() -> bool {
    true
}

pub(crate) fn default_sep_abbreviation() -> String {
    " ".to_string()
}

pub(crate) fn default_replace() -> Vec<(String, String)> {
    vec![("-".to_string(), " ".to_string())]
}

pub(crate) fn default_max_input_chars() -> usize {
    100_000
}

pub(crate) fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

pub(crate) fn default_unicode_to_ascii() -> BTreeMap<String, String> {
    string_map(&[
        ("àáâãåāăąǟǡǻȁȃȧ", "a"),
        ("æǣǽ", "ae"),
        ("çćĉċč", "c"),
        ("ďđ", "d"),
        ("èéêëēĕėęěȅȇȩ", "e"),
        ("ĝğġģǥǧǵ", "g"),
        ("ĥħȟ", "h"),
        ("ìíîïĩīĭįıȉȋ", "i"),
        ("ĵǰ", "j"),
        ("ķĸǩκ", "k"),
        ("ĺļľŀł", "l"),
        ("ñńņňŉŋǹ", "n"),
        ("òóôõōŏőǫǭȍȏð", "o"),
        ("œøǿ", "oe"),
        ("ŕŗřȑȓ", "r"),
        ("śŝşšș", "s"),
        ("ţťŧț", "t"),
        ("ùúûũūŭůűųȕȗ", "u"),
        ("ŵ", "w"),
        ("ýÿŷ", "y"),
        ("źżžȥ", "z"),
    ])
}

pub(crate) fn default_alphabet() -> String {
    "ABCDEFGHIJKLMNOPQRSTUVWXYZĄĆĘŁŃÓŚŹŻ".to_string()
}

pub(crate) fn default_acronym_exclusions() -> BTreeSet<String> {
    ["EU", "USA"].iter().map(|s| s.to_string()).collect()
}

pub(crate) fn default_letter_phonemes() -> BTreeMap<String, String> {
    string_map(&[
        ("A", "a"),
        ("B", "be"),
        ("C", "ce"),
        ("D", "de"),
        ("E", "e"),
        ("F", "ef"),
        ("G", "ge"),
        ("H", "ha"),
        ("I", "i"),
        ("J", "jot"),
        ("K", "ka"),
        ("L", "el"),
        ("M", "em"),
        ("N", "en"),
        ("O", "o"),
        ("P", "pe"),
        ("Q", "ku"),
        ("R", "er"),
        ("S", "es"),
        ("T", "te"),
        ("U", "u"),
        ("V", "fał"),
        ("W", "wu"),
        ("X", "iks"),
        ("Y", "y"),
        ("Z", "zet"),
        ("Ą", "ą"),
        ("Ć", "ć"),
        ("Ę", "ę"),
        ("Ł", "el"),
        ("Ń", "ń"),
        ("Ó", "o z kreską"),
        ("Ś", "ś"),
        ("Ź", "ź"),
        ("Ż", "ż"),
    ])
}

pub(crate) fn default_units_no_suffix() -> BTreeMap<String, String> {
    string_map(&[
        ("kg", "kilogram"),
        ("g", "gram"),
        ("l", "litr"),
        ("m", "metr"),
        ("km", "kilometr"),
        ("m2", "metr kwadratowy"),
        ("m3", "metr sześcienny"),
        ("ml", "mililitr"),
    ])
}

pub(crate) fn default_units_suffix_n() -> BTreeMap<String, String> {
    string_map(&[("s", "sekund"), ("min", "minut"), ("h", "godzin")])
}

pub(crate) fn default_units_suffix_en() -> BTreeMap<String, String> {
    string_map(&[("mln", "milionów"), ("mld", "miliardów"), ("tys", "tysięcy")])
}

pub(crate) fn default_misc_abbreviations() -> BTreeMap<String, String> {
    string_map(&[
        ("np.", "na przykład"),
        ("itd.", "i tak dalej"),
        ("dr", "doktor"),
        ("mgr", "magister"),
    ])
}

pub(crate) fn default_weekdays() -> BTreeMap<String, String> {
    string_map(&[
        ("pon.", "poniedziałek"),
        ("wt.", "wtorek"),
        ("śr.", "środa"),
        ("czw.", "czwartek"),
        ("pt.", "piątek"),
        ("sob.", "sobota"),
        ("ndz.", "niedziela"),
    ])
}

pub(crate) fn default_months() -> BTreeMap<String, String> {
    string_map(&[
        ("styczeń", "styczeń"),
        ("luty", "luty"),
        ("marzec", "marzec"),
        ("kwiecień", "kwiecień"),
        ("maj", "maj"),
        ("czerwiec", "czerwiec"),
        ("lipiec", "lipiec"),
        ("sierpień", "sierpień"),
        ("wrzesień", "wrzesień"),
        ("październik", "październik"),
        ("listopad", "listopad"),
        ("grudzień", "grudzień"),
        ("sty.", "styczeń"),
        ("lut.", "luty"),
        ("mar.", "marzec"),
        ("kwi.", "kwiecień"),
        ("cze.", "czerwiec"),
        ("lip.", "lipiec"),
        ("sie.", "sierpień"),
        ("wrz.", "wrzesień"),
        ("paź.", "październik"),
        ("lis.", "listopad"),
        ("gru.", "grudzień"),
    ])
}

pub(crate) fn default_number_months() -> BTreeMap<String, String> {
    const NAMES: [&str; 12] = [
        "styczeń",
        "luty",
        "marzec",
        "kwiecień",
        "maj",
        "czerwiec",
        "lipiec",
        "sierpień",
        "wrzesień",
        "październik",
        "listopad",
        "grudzień",
    ];
    let mut months = BTreeMap::new();
    for (idx, name) in NAMES.iter().enumerate() {
        let number = idx + 1;
        months.insert(number.to_string(), name.to_string());
        if number < 10 {
            months.insert(format!("0{number}"), name.to_string());
        }
    }
    months
}

pub(crate) fn default_currency_symbols() -> BTreeMap<String, String> {
    string_map(&[
        ("PLN", "złoty"),
        ("USD", "dolar"),
        ("EUR", "euro"),
        ("GBP", "funt"),
        ("CHF", "frank"),
        ("zł", "złoty"),
        ("€", "euro"),
        ("$", "dolar"),
        ("£", "funt"),
    ])
}

pub(crate) fn default_currency_magnitudes() -> Vec<String> {
    [
        "mln.", "mln", "mld.", "mld", "miliony", "milion", "miliardy", "miliard", "tysiące",
        "tysięcy", "tysiąc", "tys.", "tys",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub(crate) fn default_math_symbols() -> Vec<MathSymbol> {
    let plain = |symbol: &str, word: &str| MathSymbol {
        symbol: symbol.to_string(),
        word: word.to_string(),
        guard: SymbolGuard::None,
    };
    vec![
        plain("+", "plus"),
        MathSymbol {
            symbol: "-".to_string(),
            word: "minus".to_string(),
            guard: SymbolGuard::ShortOperands,
        },
        plain("*", "razy"),
        MathSymbol {
            symbol: "x".to_string(),
            word: "razy".to_string(),
            guard: SymbolGuard::AfterDigit,
        },
        MathSymbol {
            symbol: "×".to_string(),
            word: "razy".to_string(),
            guard: SymbolGuard::AfterDigit,
        },
        plain("/", "podzielić przez"),
        plain("=", "równa się"),
        plain("<", "mniej niż"),
        plain(">", "więcej niż"),
        plain("±", "plus minus"),
        plain("≤", "mniejsze lub równe"),
        plain("≥", "większe lub równe"),
        plain("^", "do potęgi"),
        plain("√", "pierwiastek"),
        plain("∑", "suma"),
        plain("∏", "iloczyn"),
        plain("%", "procent"),
    ]
}

pub(crate) fn default_special() -> Vec<SpecialRule> {
    let rule = |pattern: &str, literal: &str, replacement: &str| SpecialRule {
        pattern: pattern.to_string(),
        literal: literal.to_string(),
        replacement: replacement.to_string(),
    };
    vec![
        rule(r".*\+/-.*", "+/-", "plus minus"),
        rule(r".*&.*", "&", " i "),
        rule(
            r"(?:^|(?<=[.!?;:\-\s]))(?:[a-z]?|\d+)\s?[^-]-\s?(?:\d+|[a-z]?)(?:$|(?=[.!?;:\-\s]+))",
            "-",
            " do ",
        ),
        rule(r"\b[02-9]+\s?/\s?\d+\b", "/", " z "),
        rule(r"\b1/10\b", "1/10", "jedna dziesiąta"),
        rule("⅒", "⅒", "jedna dziesiąta"),
        rule(r"\b1/9\b", "1/9", "jedna dziewiąta"),
        rule("⅑", "⅑", "jedna dziewiąta"),
        rule(r"\b1/8\b", "1/8", "jedna ósma"),
        rule("⅛", "⅛", "jedna ósma"),
        rule(r"\b1/7\b", "1/7", "jedna siódma"),
        rule("⅐", "⅐", "jedna siódma"),
        rule(r"\b1/6\b", "1/6", "jedna szósta"),
        rule("⅙", "⅙", "jedna szósta"),
        rule(r"\b1/5\b", "1/5", "jedna piąta"),
        rule("⅕", "⅕", "jedna piąta"),
        rule(r"\b1/4\b", "1/4", "jedna czwarta"),
        rule("¼", "¼", "jedna czwarta"),
        rule(r"\b1/3\b", "1/3", "jedna trzecia"),
        rule("⅓", "⅓", "jedna trzecia"),
        rule(r"\b1/2\b", "1/2", "pół"),
        rule("½", "½", "pół"),
        rule(r"\b1000\b", "1000", "tysiąc"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_months_cover_padded_and_plain_keys() {
        let months = default_number_months();
        assert_eq!(months.len(), 21);
        assert_eq!(months["01"], "styczeń");
        assert_eq!(months["1"], "styczeń");
        assert_eq!(months["12"], "grudzień");
        assert!(!months.contains_key("010"));
    }

    #[test]
    fn cli_operations_skip_phoneme_expansion() {
        let ops = cli_operations();
        assert!(!ops.contains(&Operation::AcronymPhoneme));
        assert!(ops.contains(&Operation::Number));
    }
}
