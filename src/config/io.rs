use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use super::models::NormalizationConfig;
use super::tables::ConfigTables;
use crate::error::Result;

/// Read `path` and build a config from it, falling back to defaults on any failure.
pub fn load_config(path: &Path) -> NormalizationConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded normalizer config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default normalizer config: {err}"
            );
            return NormalizationConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!(
                operations = cfg.operations.len(),
                "Parsed normalizer configuration from disk"
            );
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid normalizer config TOML: {err}");
            NormalizationConfig::default()
        }
    }
}

pub fn parse_config(contents: &str) -> Result<NormalizationConfig> {
    let tables: ConfigTables = toml::from_str(contents)?;
    Ok(tables.into())
}

pub fn serialize_config(config: &NormalizationConfig) -> Result<String> {
    let tables = ConfigTables::from(config);
    Ok(toml::to_string_pretty(&tables)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LogLevel, Operation, SymbolGuard};
    use crate::error::NormalizeError;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg, NormalizationConfig::default());
    }

    #[test]
    fn pipeline_section_overrides_switches() {
        let cfg = parse_config(
            r#"
            [pipeline]
            operations = ["date", "number", "date"]
            make_lowercase = false
            sep_abbreviation = "_"
            max_input_chars = 0

            [[pipeline.replace]]
            from = "&"
            to = " i "

            [logging]
            log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.operations, vec![Operation::Date, Operation::Number]);
        assert!(!cfg.make_lowercase);
        assert_eq!(cfg.sep_abbreviation, "_");
        assert_eq!(cfg.max_input_chars, 0);
        assert_eq!(cfg.replace, vec![("&".to_string(), " i ".to_string())]);
        assert_eq!(cfg.log_level, LogLevel::Debug);
    }

    #[test]
    fn table_sections_replace_lexicon_entries() {
        let cfg = parse_config(
            r#"
            [currency]
            symbols = { "JPY" = "jen" }
            magnitudes = []

            [units]
            no_suffix = { "t" = "tona" }

            [[symbols.math]]
            symbol = "x"
            word = "razy"
            guard = "after-digit"

            [[symbols.spoken]]
            open = "<<"
            close = ">>"
            spoken = "cytat_"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.tables.currency.symbols.len(), 1);
        assert_eq!(cfg.tables.currency.symbols["JPY"], "jen");
        assert!(cfg.tables.currency.magnitudes.is_empty());
        assert_eq!(cfg.tables.units.no_suffix["t"], "tona");
        // sub-tables not named keep their defaults
        assert_eq!(cfg.tables.units.suffix_n["h"], "godzin");
        assert_eq!(cfg.tables.math_symbols.len(), 1);
        assert_eq!(cfg.tables.math_symbols[0].guard, SymbolGuard::AfterDigit);
        assert_eq!(cfg.tables.spoken_symbols[0].spoken, "cytat_");
        assert!(!cfg.tables.special.is_empty());
    }

    #[test]
    fn unknown_operation_is_a_config_error() {
        let err = parse_config("[pipeline]\noperations = [\"shout\"]\n").unwrap_err();
        assert!(matches!(err, NormalizeError::Config(_)));
    }

    #[test]
    fn serialized_config_parses_back() {
        let mut cfg = NormalizationConfig::with_operations([Operation::Month, Operation::Weekday]);
        cfg.sep_abbreviation = "-".to_string();
        let text = serialize_config(&cfg).unwrap();
        assert!(text.contains("[pipeline]"));
        assert_eq!(parse_config(&text).unwrap(), cfg);
    }

    #[test]
    fn shipped_config_parses() {
        let cfg = parse_config(include_str!("../../conf/normalizer.toml")).unwrap();
        assert!(cfg.operations.contains(&Operation::SpokenSymbol));
        assert!(!cfg.operations.contains(&Operation::AcronymPhoneme));
        assert_eq!(cfg.tables.spoken_symbols.len(), 1);
        assert_eq!(cfg.tables.acronyms, NormalizationConfig::default().tables.acronyms);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = load_config(Path::new("definitely/not/here/normalizer.toml"));
        assert_eq!(cfg, NormalizationConfig::default());
    }
}
